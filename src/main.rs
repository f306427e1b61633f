use clap::{Parser, Subcommand};
use simple_journal::generate;
use simple_journal::journal::Journal;
use simple_journal::sink::{DirSink, MemorySink};
use simple_journal::{config, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-journal")]
#[command(about = "Static generator for monthly Markdown journals")]
#[command(long_about = "\
Static generator for monthly Markdown journals

Every Markdown file below the source directory is one journal entry. Entries
are grouped by the year and month of their `published` date; the directory
layout does not matter.

Entry format:

  ---
  published: 2024-01-20T09:00      # required, unique, sorts the journal
  entry: 2                         # optional entry number
  slug: registers                  # optional, defaults to the slugged title
  tag: v0.1                        # optional source repository tag
  ---
  # Registers                      # exactly one level-1 title

  __Optional lead-in in bold.__    # author card goes below it

  The first paragraph is the teaser on the month overview.

Output structure:

  docs/
  ├── 2024-01/
  │   ├── registers.md             # Entry page
  │   ├── NAV.md                   # Month navigation
  │   ├── index.md                 # Month overview with teasers
  │   └── ALL.md                   # Complete month on one page
  ├── journal/
  │   ├── NAV.md                   # Months, latest first
  │   └── index.md                 # Landing page
  └── months/
      └── NAV.md                   # Complete months, oldest first

Files in `draft/` and hidden files are never read.

Run 'simple-journal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Journal source directory
    #[arg(long, default_value = "blog", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "docs", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the source directory and list the entries found
    Scan {
        /// Print the scan manifest as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Generate all pages into the output directory
    Build,
    /// Validate the journal and render every page without writing
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { json } => {
            let manifest = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                let config = manifest.config.clone();
                let journal = Journal::from_entries(manifest.entries)?;
                output::print_scan_output(&journal, &config, &cli.source);
            }
        }
        Command::Build => {
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::build(&cli.source, &mut DirSink::new(&cli.output))?;
            output::print_scan_output(&report.journal, &report.config, &cli.source);
            output::print_build_output(&report.journal, &report.pages);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let mut sink = MemorySink::new();
            let report = generate::build(&cli.source, &mut sink)?;
            output::print_scan_output(&report.journal, &report.config, &cli.source);
            println!(
                "==> Journal is valid: {} entries, {} pages",
                report.journal.entry_count(),
                sink.len()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
