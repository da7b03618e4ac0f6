//! Run one catalog query from the command line.
//!
//! Loads a validated catalog, executes exactly one of the four query entry
//! points, and prints the matching assets as a compact JSON array. Designed
//! for page-generation scripts that need imagery lookups without linking the
//! library.

use anyhow::{Context, Result, bail};
use imagehub::{ImageCatalog, SizeHint, default_catalog_path, split_list};
use std::collections::BTreeSet;
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

    let hits = match &args.mode {
        QueryMode::Page(route) => catalog.images_for_page(route),
        QueryMode::Category { facet, tags } => {
            let tags: BTreeSet<String> = tags.iter().cloned().collect();
            catalog.images_by_category(facet, &tags)?
        }
        QueryMode::Keywords(terms) => catalog.search_by_keywords(terms)?,
        QueryMode::SizeHint(hint) => catalog.images_by_size_hint(*hint),
    };

    println!("{}", serde_json::to_string(&hits)?);
    Ok(())
}

enum QueryMode {
    Page(String),
    Category { facet: String, tags: Vec<String> },
    Keywords(Vec<String>),
    SizeHint(SizeHint),
}

struct CliArgs {
    catalog: PathBuf,
    mode: QueryMode,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut page: Option<String> = None;
        let mut facet: Option<String> = None;
        let mut tags: Vec<String> = Vec::new();
        let mut keywords: Vec<String> = Vec::new();
        let mut size_hint: Option<SizeHint> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    catalog = Some(PathBuf::from(path));
                }
                "--page" => {
                    page = Some(next_value(&mut args, "--page")?);
                }
                "--facet" => {
                    facet = Some(next_value(&mut args, "--facet")?);
                }
                "--tags" => {
                    tags = split_list(&next_value(&mut args, "--tags")?);
                }
                "--keywords" => {
                    keywords = split_list(&next_value(&mut args, "--keywords")?);
                }
                "--size-hint" => {
                    let raw = next_value(&mut args, "--size-hint")?;
                    let Some(hint) = SizeHint::parse(&raw) else {
                        bail!("unknown size hint '{raw}' (expected hero|gallery|inline|thumbnail)");
                    };
                    size_hint = Some(hint);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        let mut modes: Vec<QueryMode> = Vec::new();
        if let Some(route) = page {
            modes.push(QueryMode::Page(route));
        }
        if let Some(facet) = facet {
            modes.push(QueryMode::Category { facet, tags });
        } else if !tags.is_empty() {
            bail!("--tags requires --facet");
        }
        if !keywords.is_empty() {
            modes.push(QueryMode::Keywords(keywords));
        }
        if let Some(hint) = size_hint {
            modes.push(QueryMode::SizeHint(hint));
        }

        if modes.len() != 1 {
            bail!("exactly one of --page, --facet, --keywords, --size-hint is required");
        }
        let mode = modes.remove(0);

        Ok(CliArgs {
            catalog: catalog.unwrap_or_else(default_catalog_path),
            mode,
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
    "Usage: hub-query [--catalog PATH] (--page ROUTE | --facet NAME --tags a,b | --keywords a,b | --size-hint hero)\n\
Loads the image catalog (default: IMAGEHUB_CATALOG or the shipped schema/image_catalog.json), runs one query, and prints matching assets as compact JSON.\n"
}

fn print_usage() {
    print!("{}", usage());
}
