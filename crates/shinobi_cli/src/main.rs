use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use chrono::NaiveDateTime;
use clap::Parser;
use shinobi_core::core_api::Engine;
use shinobi_core::locator::SheetLocator;
use shinobi_core::memo::MemoEntry;
use shinobi_core::source::PayloadSource;
use shinobi_render::{
    ImportOptions, PaletteEntry, SheetImporter, TIMESTAMP_FORMAT, render_record_json,
};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Character sheet payload, plain JSON or a JSONP response.
    #[arg(value_name = "SHEET")]
    path: PathBuf,
    /// Sheet URL recorded in the memo tab.
    #[arg(long, default_value = "")]
    url: String,
    /// JSON array of existing memo tabs to carry checkbox state from.
    #[arg(long, value_name = "FILE")]
    memos: Option<PathBuf>,
    /// Reload-marker time, `YYYY/MM/DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`.
    #[arg(long, value_parser = parse_timestamp)]
    timestamp: Option<NaiveDateTime>,
    #[arg(long, conflicts_with = "record")]
    palette: bool,
    #[arg(long)]
    record: bool,
    #[arg(long)]
    json: bool,
    /// Write the rendered memo tabs as JSON instead of printing them.
    #[arg(long, conflicts_with_all = ["palette", "record"])]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.url.is_empty() && !SheetLocator::is_supported(&cli.url) {
        warn!(url = %cli.url, "not a recognized character sheet URL");
    }

    let memos = match &cli.memos {
        Some(path) => read_memos(path),
        None => Vec::new(),
    };

    if cli.record {
        let mut session = Engine::new()
            .open_path(&cli.path, &cli.url)
            .unwrap_or_else(|e| {
                eprintln!("Error parsing sheet: {}", cli.path.display());
                eprintln!("  {e}");
                process::exit(1);
            });
        session.restore_from_memos(&memos);
        print_json(&render_record_json(session.record()));
        return;
    }

    let payload = fs::read_to_string(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });
    let importer = SheetImporter::new(PayloadSource::new(payload), cli.url.clone()).with_options(
        ImportOptions {
            timestamp: cli.timestamp,
        },
    );

    if cli.palette {
        let palette = importer.create_chat_palette();
        if palette.is_empty() {
            no_data(&cli.path);
        }
        if cli.json {
            print_json(&palette);
        } else {
            print_palette(&palette);
        }
        return;
    }

    let Some(tabs) = importer.create_other_text(&memos) else {
        no_data(&cli.path);
    };

    if let Some(output) = &cli.output {
        let text = to_pretty_json(&tabs);
        fs::write(output, text + "\n").unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", output.display());
            process::exit(1);
        });
        println!("Wrote {} tabs to {}", tabs.len(), output.display());
    } else if cli.json {
        print_json(&tabs);
    } else {
        print_tabs(&tabs);
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_tabs(tabs: &[MemoEntry]) {
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===", tab.tab);
        println!("{}", tab.text.replace("\r\n", "\n"));
    }
}

fn print_palette(palette: &[PaletteEntry]) {
    for entry in palette {
        println!("{}", entry.label);
        println!("{}", entry.text);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    println!("{}", to_pretty_json(value));
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {e}");
        process::exit(1);
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_memos(path: &Path) -> Vec<MemoEntry> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing memos: {}", path.display());
        eprintln!("  {e}");
        process::exit(1);
    })
}

fn no_data(path: &Path) -> ! {
    eprintln!("No character data in {}", path.display());
    process::exit(1);
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| format!("invalid timestamp '{value}', expected YYYY/MM/DD HH:MM:SS"))
}
