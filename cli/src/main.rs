//! untoc CLI - textbook outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untoc::{
    ErrorMode, ExtractOptions, GroupingOptions, IgnorePattern, JsonFormat, OutlineExtractor,
    ProximityThresholds, RegionMode, ScanBackend, ScannedDocument,
};

#[derive(Parser)]
#[command(name = "untoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract textbook outlines and section text from OCR scans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline tree
    Outline {
        /// Input JSON scan
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Extract outline and section text to JSON
    Extract {
        /// Input JSON scan
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Extract outline and section text as plain text
    Text {
        /// Input JSON scan
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show scan information
    Info {
        /// Input JSON scan
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by every extracting command.
#[derive(Args, Debug, Clone, Default)]
struct ExtractArgs {
    /// Skip misplaced headings instead of failing
    #[arg(long)]
    lenient: bool,

    /// Group regions in parallel
    #[arg(long)]
    parallel: bool,

    /// Only read section text from the page each heading is on
    #[arg(long)]
    anchor_page_only: bool,

    /// Pattern for filler words trimmed from line ends (full match)
    #[arg(long, value_name = "REGEX")]
    ignore_pattern: Option<String>,

    /// Fuse groups separated by filler-only groups
    #[arg(long)]
    merge_ghost_groups: bool,

    /// Maximum horizontal gap between words of a line
    #[arg(long, value_name = "UNITS")]
    word_gap: Option<f32>,

    /// Maximum vertical gap between lines of a group
    #[arg(long, value_name = "UNITS")]
    group_gap: Option<f32>,

    /// Maximum slope between a word and its line
    #[arg(long, value_name = "SLOPE")]
    line_slope: Option<f32>,

    /// Maximum height difference between a word and its line
    #[arg(long, value_name = "UNITS")]
    height_diff: Option<f32>,
}

impl ExtractArgs {
    fn to_options(&self) -> untoc::Result<ExtractOptions> {
        let defaults = ProximityThresholds::default();
        let thresholds = defaults
            .with_word(self.word_gap.unwrap_or(defaults.word))
            .with_group(self.group_gap.unwrap_or(defaults.group))
            .with_line_slope(self.line_slope.unwrap_or(defaults.line_slope))
            .with_height(self.height_diff.unwrap_or(defaults.height));

        let mut grouping = GroupingOptions::new()
            .with_thresholds(thresholds)
            .with_ghost_merge(self.merge_ghost_groups);
        if let Some(ref pattern) = self.ignore_pattern {
            grouping = grouping.with_ignore_pattern(IgnorePattern::new(pattern)?);
        }

        let error_mode = if self.lenient {
            ErrorMode::Lenient
        } else {
            ErrorMode::Strict
        };
        let region_mode = if self.anchor_page_only {
            RegionMode::AnchorPage
        } else {
            RegionMode::Continuous
        };

        Ok(ExtractOptions::new()
            .with_grouping(grouping)
            .with_error_mode(error_mode)
            .with_region_mode(region_mode)
            .with_parallel(self.parallel))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline { input, extract }) => cmd_outline(&input, &extract),
        Some(Commands::Extract {
            input,
            output,
            compact,
            extract,
        }) => cmd_extract(&input, output.as_deref(), compact, &extract),
        Some(Commands::Text {
            input,
            output,
            extract,
        }) => cmd_text(&input, output.as_deref(), &extract),
        Some(Commands::Info {
            input,
            json,
            extract,
        }) => cmd_info(&input, json, &extract),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: untoc <COMMAND> <FILE>".yellow());
            println!("       untoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Write to `output` or print to stdout.
fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn print_diagnostics(diagnostics: &[String]) {
    for message in diagnostics {
        eprintln!("{}: {}", "Skipped".yellow().bold(), message);
    }
}

fn cmd_outline(input: &Path, args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scan = ScannedDocument::open(input)?;
    let options = args.to_options()?;
    let (outline, skipped) = OutlineExtractor::new(&scan, &options).build_outline()?;

    let skipped: Vec<String> = skipped.iter().map(ToString::to_string).collect();
    print_diagnostics(&skipped);

    print!("{}", untoc::render::outline_tree(&outline));
    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Loading scan...");
    let scan = ScannedDocument::open(input)?;
    let options = args.to_options()?;
    log::debug!(
        "Loaded {} pages ({} words) from {}",
        scan.page_count(),
        scan.word_count(),
        input.display()
    );

    pb.set_message("Extracting outline...");
    let doc = untoc::extract(&scan, &options)?;
    pb.finish_and_clear();

    print_diagnostics(&doc.diagnostics);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = untoc::render::to_json(&doc, format)?;

    emit(&json, output)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let doc = untoc::extract_file_with_options(input, &options)?;
    print_diagnostics(&doc.diagnostics);

    let text = untoc::render::to_text(&doc)?;
    emit(&text, output)
}

fn cmd_info(
    input: &Path,
    json: bool,
    args: &ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let scan = ScannedDocument::open(input)?;
    let options = args.to_options()?;
    let extractor = OutlineExtractor::new(&scan, &options);

    let contents = extractor.find_anchors(untoc::NodeKind::TableOfContents).len();
    let parts = extractor.find_anchors(untoc::NodeKind::Part).len();
    let chapters = extractor.find_anchors(untoc::NodeKind::Chapter).len();
    let sections = extractor.find_anchors(untoc::NodeKind::Section).len();

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "pages": scan.page_count(),
            "words": scan.word_count(),
            "anchors": {
                "table_of_contents": contents,
                "part": parts,
                "chapter": chapters,
                "section": sections,
            },
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Scan Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), scan.page_count());
    println!("{}: {}", "Words".bold(), scan.word_count());

    println!();
    println!("{}", "Anchor Matches".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Table of Contents".bold(), contents);
    println!("{}: {}", "Parts".bold(), parts);
    println!("{}: {}", "Chapters".bold(), chapters);
    println!("{}: {}", "Sections".bold(), sections);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Textbook outline extraction tool");
    println!();
    println!("License: MIT");
}
