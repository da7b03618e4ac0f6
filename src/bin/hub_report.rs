//! Print tag tallies and page-coverage reporting for a catalog.
//!
//! Used by content authors to spot thin pages and unbalanced tagging before
//! new landing pages go out. Routes default to everything the catalog
//! references; pass `--routes` to audit a specific page list.

use anyhow::{Context, Result, bail};
use imagehub::{
    ImageCatalog, coverage_report, default_catalog_path, page_image_mapping, routes_in_catalog,
    split_list, tag_tally,
};
use serde_json::json;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let catalog = ImageCatalog::load(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    let routes = match args.routes {
        Some(routes) => routes,
        None => routes_in_catalog(&catalog).into_iter().collect(),
    };

    let mut output = json!({
        "tally": tag_tally(&catalog),
        "report": coverage_report(&catalog, &routes),
    });
    if args.mapping {
        output["mapping"] = serde_json::to_value(page_image_mapping(&catalog, &routes))?;
    }

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

struct CliArgs {
    catalog: PathBuf,
    routes: Option<Vec<String>>,
    mapping: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut routes: Option<Vec<String>> = None;
        let mut mapping = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    catalog = Some(PathBuf::from(path));
                }
                "--routes" => {
                    routes = Some(split_list(&next_value(&mut args, "--routes")?));
                }
                "--mapping" => {
                    mapping = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            catalog: catalog.unwrap_or_else(default_catalog_path),
            routes,
            mapping,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: hub-report [--catalog PATH] [--routes a,b] [--mapping]\n\
Loads the image catalog, tallies tags per facet, and reports page-coverage gaps for the given routes (default: every route the catalog references). --mapping includes the per-route asset resolution.\n"
}

fn print_usage() {
    print!("{}", usage());
}
