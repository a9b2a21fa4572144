// src/main.rs

//! `sysfont`: list installed fonts, resolve names and preview rendered text
//! in the terminal.

use anyhow::{bail, Context};
use log::{debug, info};
use std::env;
use sysfont::{PixelFormat, Rgba, Surface};

const USAGE: &str = "\
Usage: sysfont <command>
Commands:
  list [--json]                              List installed families
  match <names> [--bold] [--italic]          Resolve a comma-separated name list
  render <name> <size> <text> [--bold] [--italic] [--underline] [--aa]
                                             Print an ASCII preview";

/// Characters for increasing coverage in antialiased previews.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Command-line switches and the remaining positional arguments.
#[derive(Debug, Default)]
struct Args {
    positional: Vec<String>,
    bold: bool,
    italic: bool,
    underline: bool,
    antialias: bool,
    json: bool,
}

impl Args {
    fn parse(raw: &[String]) -> anyhow::Result<Args> {
        let mut args = Args::default();
        for arg in raw {
            match arg.as_str() {
                "--bold" => args.bold = true,
                "--italic" => args.italic = true,
                "--underline" => args.underline = true,
                "--aa" => args.antialias = true,
                "--json" => args.json = true,
                flag if flag.starts_with("--") => bail!("unknown option {}", flag),
                _ => args.positional.push(arg.clone()),
            }
        }
        Ok(args)
    }

    fn positional(&self, index: usize, what: &str) -> anyhow::Result<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .with_context(|| format!("missing <{}>\n{}", what, USAGE))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = raw.split_first() else {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    };
    let args = Args::parse(rest)?;
    debug!("sysfont: {} {:?}", command, args);

    sysfont::init();
    let result = match command.as_str() {
        "list" => list(&args),
        "match" => match_names(&args),
        "render" => render(&args),
        other => Err(anyhow::anyhow!("unknown command {}\n{}", other, USAGE)),
    };
    sysfont::quit();
    result
}

fn list(args: &Args) -> anyhow::Result<()> {
    let catalog = sysfont::catalog_snapshot().context("reading the font catalog")?;
    if args.json {
        let descriptors: Vec<_> = catalog
            .families()
            .flat_map(|name| catalog.descriptors(name))
            .collect();
        let json = serde_json::to_string_pretty(&descriptors)
            .context("serializing the font catalog")?;
        println!("{}", json);
        return Ok(());
    }

    for name in catalog.families() {
        let variants: Vec<&str> = catalog
            .descriptors(name)
            .iter()
            .map(|d| match (d.is_bold, d.is_italic) {
                (false, false) => "regular",
                (true, false) => "bold",
                (false, true) => "italic",
                (true, true) => "bold-italic",
            })
            .collect();
        println!("{:<32} {}", name, variants.join(", "));
    }
    info!(
        "{} families, {} faces, {} aliases",
        catalog.families().count(),
        catalog.len(),
        catalog.aliases().len()
    );
    Ok(())
}

fn match_names(args: &Args) -> anyhow::Result<()> {
    let names = args.positional(0, "names")?;
    match sysfont::match_font(names, args.bold, args.italic)? {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("no match for '{}' (sys_font would use {})", names, sysfont::get_default_font());
        }
    }
    Ok(())
}

fn render(args: &Args) -> anyhow::Result<()> {
    let name = args.positional(0, "name")?;
    let size: u32 = args
        .positional(1, "size")?
        .parse()
        .context("<size> must be a positive integer")?;
    let text = args.positional(2, "text")?;

    let mut font = sysfont::sys_font(name, size, args.bold, args.italic)
        .with_context(|| format!("loading '{}' at {}pt", name, size))?;
    if args.underline {
        font.set_underline(true);
    }
    info!(
        "rendering with {} ({}), style {:?}",
        font.family_name().unwrap_or("?"),
        font.source(),
        font.style()
    );

    let surface = font
        .render(text, args.antialias, Rgba::opaque(255, 255, 255), None)
        .context("rendering text")?;
    print!("{}", ascii_preview(&surface));
    Ok(())
}

/// One character per pixel, darker characters for more coverage.
fn ascii_preview(surface: &Surface) -> String {
    let mut out = String::with_capacity((surface.width() + 1) * surface.height());
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let level = match (surface.format(), surface.get_at(x, y)) {
                (PixelFormat::Indexed8 { .. }, _) => {
                    if surface.index_at(x, y) == Some(1) {
                        RAMP.len() - 1
                    } else {
                        0
                    }
                }
                (_, Some(px)) => px.a as usize * (RAMP.len() - 1) / 255,
                (_, None) => 0,
            };
            out.push(RAMP[level] as char);
        }
        out.push('\n');
    }
    out
}
