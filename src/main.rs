// src/main.rs
//
// mdpage — Markdown to sectioned page HTML
//
// - Reads one Markdown source, converts it in full, then writes two files:
//   the content HTML and the navigation HTML.
// - Nothing is written unless the source was read and converted.
// - Navigation path: --nav if given; otherwise OUTPUT with "_nav" inserted
//   before its extension; otherwise "navigation.html".
//
// CLI flags:
//   --ordered-lists     : emit "N. item" runs as <ol>
//   --no-ordered-lists  : fold "N. item" runs into paragraphs (default)
//   --nav PATH          : navigation output path
//   --print             : also echo both results to stdout
//   -q, --quiet         : no status lines
// Logging: RUST_LOG=mdpage=debug

use clap::{ArgAction, Parser};
use log::info;
use mdpage::{Conversion, ConvertOptions, Converter, Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_INPUT: &str = "origin.md";
const DEFAULT_OUTPUT: &str = "output.html";
const DEFAULT_NAV: &str = "navigation.html";

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Emit numbered item runs as ordered lists
    #[arg(long = "ordered-lists", action = ArgAction::SetTrue)]
    ordered_lists: bool,

    /// Fold numbered item runs into paragraphs with line breaks
    #[arg(long = "no-ordered-lists", action = ArgAction::SetTrue)]
    no_ordered_lists: bool,

    /// Navigation output file (default: OUTPUT with "_nav" before the extension)
    #[arg(long, value_name = "PATH")]
    nav: Option<PathBuf>,

    /// Also print content and navigation to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    print: bool,

    /// Suppress status messages
    #[arg(short, long, action = ArgAction::SetTrue)]
    quiet: bool,

    /// Markdown input file
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Content output file
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // --no-ordered-lists wins if both are present.
    let options = ConvertOptions {
        ordered_lists: cli.ordered_lists && !cli.no_ordered_lists,
    };

    let src = fs::read_to_string(&cli.input).map_err(|e| Error::read(&cli.input, e))?;
    let conversion = Converter::new(options).convert(&src);
    info!(
        "{}: {} navigation entries",
        cli.input.display(),
        conversion.entries.len()
    );

    if cli.print {
        print_conversion(&conversion);
    }

    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let nav_path = match (&cli.nav, &cli.output) {
        (Some(nav), _) => nav.clone(),
        (None, Some(out)) => nav_path_for(out),
        (None, None) => PathBuf::from(DEFAULT_NAV),
    };

    fs::write(&out_path, &conversion.content).map_err(|e| Error::write(&out_path, e))?;
    fs::write(&nav_path, &conversion.navigation).map_err(|e| Error::write(&nav_path, e))?;

    if !cli.quiet {
        println!(
            "Converted: {} -> {}",
            cli.input.display(),
            out_path.display()
        );
        println!("Navigation saved to: {}", nav_path.display());
    }
    Ok(())
}

fn print_conversion(conversion: &Conversion) {
    let rule = "=".repeat(50);
    println!("Content:");
    println!("{rule}");
    println!("{}", conversion.content);
    println!("{rule}");
    println!();
    println!("Navigation:");
    println!("{rule}");
    println!("{}", conversion.navigation);
    println!("{rule}");
}

/// `page.html` → `page_nav.html`, `dir/page` → `dir/page_nav`.
fn nav_path_for(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.file_stem().unwrap_or_default());
    name.push("_nav");
    if let Some(ext) = output.extension() {
        name.push(".");
        name.push(ext);
    }
    output.with_file_name(name)
}
