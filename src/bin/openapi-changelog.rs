//! OpenAPI Change Log CLI
//!
//! Command-line interface for diffing two API descriptions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use openapi_changelog::{
    compute_change_set_with, load_document_auto, render_json, render_markdown, DiffOptions,
    RenderOptions, UsageMatching,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-changelog")]
#[command(about = "Generate a change log from two versions of an API description")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two documents and print the change log
    Diff {
        /// Previous document: file path or URL (http:// or https://)
        previous: String,

        /// Current document: file path or URL (http:// or https://)
        current: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Report renamed paths as separate removals and additions
        #[arg(long)]
        no_renames: bool,

        /// Match component usages on the exact pointer name instead of a substring
        #[arg(long)]
        exact_usage: bool,

        /// Title heading for Markdown output
        #[arg(long)]
        title: Option<String>,

        /// Exit with status 1 when changes are found, including edited components
        /// that no operation references
        #[arg(long)]
        exit_code: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

struct DiffArgs {
    previous: String,
    current: String,
    format: Format,
    pretty: bool,
    output: Option<PathBuf>,
    no_renames: bool,
    exact_usage: bool,
    title: Option<String>,
    exit_code: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Diff {
            previous,
            current,
            format,
            pretty,
            output,
            no_renames,
            exact_usage,
            title,
            exit_code,
        } => run_diff(DiffArgs {
            previous,
            current,
            format,
            pretty,
            output,
            no_renames,
            exact_usage,
            title,
            exit_code,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_diff(args: DiffArgs) -> Result<(), u8> {
    let previous = load(&args.previous)?;
    let current = load(&args.current)?;

    let matching = if args.exact_usage {
        UsageMatching::Exact
    } else {
        UsageMatching::Substring
    };
    let options = DiffOptions::new()
        .detect_renames(!args.no_renames)
        .usage_matching(matching);
    let changes = compute_change_set_with(&previous, &current, &options);

    let summary = changes.summary();
    info!(
        added = summary.added,
        removed = summary.removed,
        modified = summary.modified,
        impacted = summary.impacted,
        renamed = summary.renamed,
        "diff complete"
    );

    let rendered = match args.format {
        Format::Markdown => {
            let mut render_options = RenderOptions::new();
            if let Some(title) = args.title {
                render_options = render_options.title(title);
            }
            render_markdown(&changes, &render_options)
        }
        Format::Json => render_json(&changes, args.pretty).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }

    if args.exit_code && !changes.is_empty() {
        return Err(1);
    }
    Ok(())
}

fn load(source: &str) -> Result<serde_json::Value, u8> {
    load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}: {}", source, e);
        e.exit_code() as u8
    })
}
