//! Renders the whole catalog to a static HTML tree.
//!
//! Output layout: `index.html` linking every category, plus
//! `<category>/index.html` carrying one card per record. Pages are written
//! whole on every run; the builder never patches an existing tree.

use anyhow::{Context, Result, bail};
use cabledex::{CableStore, CardView, CatalogIndex, escape_html, render_card, render_page};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

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

    let index = CatalogIndex::load(&store);
    if index.is_empty() {
        bail!("Refusing to build an empty site: no records loaded from {}", store.root().display());
    }

    let mut pages = 0usize;
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output dir {}", args.out.display()))?;

    let mut home = String::new();
    home.push_str("<main class=\"category-list\">\n<h1>Cable catalog</h1>\n<ul>\n");
    for category in index.categories() {
        home.push_str(&format!(
            "  <li><a href=\"{slug}/\">{name}</a> — {count} records. {description}</li>\n",
            slug = escape_html(category.info.slug.as_str()),
            name = escape_html(category.info.name),
            count = category.records.len(),
            description = escape_html(category.info.description),
        ));
    }
    home.push_str("</ul>\n</main>");
    write_page(&args.out.join("index.html"), "Cable catalog", &home)?;
    pages += 1;

    for category in index.categories() {
        let mut body = String::new();
        body.push_str(&format!(
            "<main class=\"category-page\">\n<h1>{}</h1>\n<p>{}</p>\n",
            escape_html(category.info.name),
            escape_html(category.info.description)
        ));
        for record in &category.records {
            let view = CardView::project(record, category.info);
            body.push_str(&render_card(&view, None));
        }
        body.push_str("</main>");

        let dir = args.out.join(category.info.slug.as_str());
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating category dir {}", dir.display()))?;
        let title = format!("{} cables", category.info.name);
        write_page(&dir.join("index.html"), &title, &body)?;
        pages += 1;
    }

    println!(
        "site-build: wrote {pages} pages covering {} records to {}",
        index.len(),
        args.out.display()
    );
    Ok(())
}

fn write_page(path: &Path, title: &str, body: &str) -> Result<()> {
    fs::write(path, render_page(title, body))
        .with_context(|| format!("writing {}", path.display()))
}

struct CliArgs {
    root: Option<PathBuf>,
    out: PathBuf,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut root = None;
        let mut out = PathBuf::from("site");
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--root" => {
                    let value = args.next().context("Missing path for --root")?;
                    root = Some(PathBuf::from(value));
                }
                "--out" => {
                    let value = args.next().context("Missing path for --out")?;
                    out = PathBuf::from(value);
                }
                "--help" | "-h" => usage(0),
                other => {
                    eprintln!("Unknown option: {other}");
                    usage(1);
                }
            }
        }
        Ok(Self { root, out })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: site-build [--root DIR] [--out DIR]\n\n\
         Renders index.html plus one page per category into the output\n\
         directory (default: site/)."
    );
    std::process::exit(code);
}
