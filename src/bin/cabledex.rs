//! Top-level catalog CLI: list, show, search, and render cards.
//!
//! The binary keeps the `cabledex (--list | --show | --search | --card)`
//! interface stable while resolving the store root (preferring an explicit
//! `--root`, then `CABLEDEX_ROOT`, then discovery). Output is human text by
//! default; `--json` switches the query modes to machine-readable JSON.

use anyhow::{Context, Result, bail};
use cabledex::render::format_data_rate;
use cabledex::{
    CableStore, CardView, CatalogIndex, category_by_slug, max_data_rate, max_power, render_card,
    search, slugify, video_capabilities,
};
use serde_json::json;
use std::env;
use std::path::PathBuf;

fn main() {
    cabledex::init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let store = match &args.root {
        Some(root) => CableStore::new(root),
        None => CableStore::discover()?,
    };

    match &args.mode {
        Mode::List(category) => run_list(&store, category.as_deref(), args.json),
        Mode::Show(slug) => run_show(&store, slug, args.json),
        Mode::Search(query) => run_search(&store, query, args.json),
        Mode::Card(slug) => run_card(&store, slug, args.highlight.as_deref()),
    }
}

enum Mode {
    List(Option<String>),
    Show(String),
    Search(String),
    Card(String),
}

struct CliArgs {
    mode: Mode,
    root: Option<PathBuf>,
    highlight: Option<String>,
    json: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut mode: Option<Mode> = None;
        let mut root: Option<PathBuf> = None;
        let mut highlight: Option<String> = None;
        let mut json = false;

        let mut args = env::args().skip(1).peekable();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" | "-l" => {
                    let category = match args.peek() {
                        Some(next) if !next.starts_with('-') => args.next(),
                        _ => None,
                    };
                    set_mode(&mut mode, Mode::List(category))?;
                }
                "--show" | "-s" => {
                    let slug = require_value(&mut args, "--show")?;
                    set_mode(&mut mode, Mode::Show(slug))?;
                }
                "--search" | "-q" => {
                    let query = require_value(&mut args, "--search")?;
                    set_mode(&mut mode, Mode::Search(query))?;
                }
                "--card" | "-c" => {
                    let slug = require_value(&mut args, "--card")?;
                    set_mode(&mut mode, Mode::Card(slug))?;
                }
                "--highlight" => highlight = Some(require_value(&mut args, "--highlight")?),
                "--root" => root = Some(PathBuf::from(require_value(&mut args, "--root")?)),
                "--json" => json = true,
                "--help" | "-h" => usage(0),
                other => {
                    eprintln!("Unknown option: {other}");
                    usage(1);
                }
            }
        }

        let Some(mode) = mode else {
            usage(1);
        };
        Ok(Self {
            mode,
            root,
            highlight,
            json,
        })
    }
}

fn set_mode(slot: &mut Option<Mode>, mode: Mode) -> Result<()> {
    if slot.is_some() {
        bail!("Only one of --list/--show/--search/--card may be given");
    }
    *slot = Some(mode);
    Ok(())
}

fn require_value(
    args: &mut std::iter::Peekable<std::iter::Skip<env::Args>>,
    flag: &str,
) -> Result<String> {
    args.next()
        .with_context(|| format!("Missing value for {flag}"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: cabledex [--root DIR] [--json] (--list [CATEGORY] | --show SLUG | --search QUERY | --card SLUG [--highlight TERM])\n\n\
         Commands:\n  \
         --list, -l     List categories, or the records of one category.\n  \
         --show, -s     Show one cable resolved by its URL slug.\n  \
         --search, -q   Full-text search; embedded figures like '40 Gbps' or '100W' act as thresholds.\n  \
         --card, -c     Print the HTML card fragment for one cable.\n\n\
         Examples:\n  \
         cabledex --list usb\n  \
         cabledex --search \"40 Gbps\" --json\n  \
         cabledex --card usb-c --highlight usb"
    );
    std::process::exit(code);
}

fn run_list(store: &CableStore, category: Option<&str>, json: bool) -> Result<()> {
    match category {
        None => {
            let catalog = store.load_catalog();
            if json {
                let entries: Vec<_> = catalog
                    .iter()
                    .map(|c| {
                        json!({
                            "slug": c.info.slug.as_str(),
                            "name": c.info.name,
                            "description": c.info.description,
                            "records": c.records.len(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for c in &catalog {
                    println!(
                        "{:<8} {:<8} {:>3} records  {}",
                        c.info.slug.as_str(),
                        c.info.name,
                        c.records.len(),
                        c.info.description
                    );
                }
            }
        }
        Some(slug) => {
            let Some(info) = category_by_slug(slug) else {
                bail!("Unknown category '{slug}' (expected one of usb, video, audio, power, legacy)");
            };
            let records = store.load_category(&info.slug);
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    println!(
                        "{:<14} {:<40} {}",
                        record.cable_type.0,
                        record.name,
                        format_data_rate(max_data_rate(record))
                    );
                }
            }
        }
    }
    Ok(())
}

fn run_show(store: &CableStore, slug: &str, json: bool) -> Result<()> {
    let Some((record, info)) = store.resolve_by_slug(slug) else {
        bail!("No cable matches slug '{slug}'");
    };

    if json {
        let payload = json!({
            "category": info.slug.as_str(),
            "record": record,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{} — {}", record.cable_type.0, record.name);
    println!("Category:      {} ({})", info.name, info.slug.as_str());
    println!("Standard body: {}", record.standard_body);
    if !record.aliases.is_empty() {
        println!("Aliases:       {}", record.aliases.join(", "));
    }
    println!("Max data rate: {}", format_data_rate(max_data_rate(&record)));
    match max_power(&record) {
        Some(watts) => println!("Max power:     {watts} W"),
        None => println!("Max power:     n/a"),
    }
    let video = video_capabilities(&record);
    if !video.is_empty() {
        println!(
            "Video:         {}",
            video.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }
    if !record.protocols.is_empty() {
        println!("Protocols:");
        for (name, variant) in &record.protocols {
            println!("  {:<20} {}", name, variant.data_rate);
        }
    }
    if !record.common_devices.is_empty() {
        println!("Seen on:       {}", record.common_devices.join(", "));
    }
    for point in &record.confusion_points {
        println!("Watch out:     {point}");
    }
    if !record.notes.is_empty() {
        println!("Notes:         {}", record.notes);
    }
    println!("Last updated:  {}", record.last_updated);
    Ok(())
}

fn run_search(store: &CableStore, query: &str, json: bool) -> Result<()> {
    let index = CatalogIndex::load(store);
    let hits = search(&index, query);

    if json {
        let entries: Vec<_> = hits
            .iter()
            .map(|record| {
                json!({
                    "slug": slugify(&record.cable_type.0),
                    "record": record,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches for '{query}'");
        return Ok(());
    }
    for record in hits {
        println!(
            "{:<14} {:<40} {}",
            record.cable_type.0,
            record.name,
            format_data_rate(max_data_rate(record))
        );
    }
    Ok(())
}

fn run_card(store: &CableStore, slug: &str, highlight: Option<&str>) -> Result<()> {
    let Some((record, info)) = store.resolve_by_slug(slug) else {
        bail!("No cable matches slug '{slug}'");
    };
    let view = CardView::project(&record, info);
    print!("{}", render_card(&view, highlight));
    Ok(())
}
