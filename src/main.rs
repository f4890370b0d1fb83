// ABOUTME: Main entry point for the doc-slides program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use doc_slides::{Config, Page, SlideMode, SlidesProcessor};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a single page
    Process(ProcessArgs),

    /// Transform every page under the docs directory
    Build(BuildArgs),

    /// Build, then rebuild whenever the docs change
    Watch(BuildArgs),
}

#[derive(Args)]
struct GlobalArgs {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Documentation source root
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,

    /// Build output root
    #[arg(long, global = true)]
    site_dir: Option<PathBuf>,

    /// How slides are embedded in the deck
    #[arg(long, value_enum, global = true)]
    mode: Option<SlideMode>,

    /// Slide padding, e.g. 64px
    #[arg(long, global = true)]
    padding: Option<String>,

    /// Deck maximum width, e.g. 1200px
    #[arg(long, global = true)]
    max_width: Option<String>,

    /// Slide aspect ratio, e.g. 16/9
    #[arg(long, global = true)]
    aspect_ratio: Option<String>,

    /// Slide font size, e.g. 32px
    #[arg(long, global = true)]
    font_size: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Args)]
struct ProcessArgs {
    /// Page source path, relative to the docs directory
    #[arg(short, long)]
    page: PathBuf,

    /// Where to write the transformed markdown (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
    /// Directory receiving the transformed markdown
    #[arg(short, long)]
    out: PathBuf,
}

fn load_config(args: &GlobalArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => Config::default(),
    };
    config.apply_env()?;

    if let Some(dir) = &args.docs_dir {
        config.docs_dir = dir.clone();
    }
    if let Some(dir) = &args.site_dir {
        config.site_dir = dir.clone();
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    for (value, slot) in [
        (&args.padding, &mut config.style.padding),
        (&args.max_width, &mut config.style.max_width),
        (&args.aspect_ratio, &mut config.style.aspect_ratio),
        (&args.font_size, &mut config.style.font_size),
    ] {
        if value.is_some() {
            slot.clone_from(value);
        }
    }
    Ok(config)
}

fn run_process(config: &Config, args: &ProcessArgs) -> anyhow::Result<()> {
    let source = config.docs_dir.join(&args.page);
    let markdown = fs::read_to_string(&source)
        .with_context(|| format!("Failed to read page {:?}", source))?;

    let processor = SlidesProcessor::new(config)?;
    let page = Page::new(&args.page, config.use_directory_urls);
    let processed = doc_slides::process_page(&processor, config, &page, &markdown)?;
    if processed.has_slides {
        doc_slides::install_assets(config)?;
    }

    match &args.output {
        Some(path) => {
            doc_slides::output::write_file(&processed.markdown, path)
                .with_context(|| format!("Failed to write output file {:?}", path))?;
            println!("Page written: {:?}", path);
        }
        None => print!("{}", processed.markdown),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.global.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(&cli.global)?;

    match &cli.command {
        Some(Commands::Process(args)) => run_process(&config, args),
        Some(Commands::Build(args)) => {
            let summary = doc_slides::build_site(&config, &args.out)?;
            println!(
                "Built {} page(s), {} with slides, {} slide file(s) written",
                summary.pages, summary.pages_with_slides, summary.slide_files_written
            );
            Ok(())
        }
        Some(Commands::Watch(args)) => {
            doc_slides::watch_docs(&config, &args.out)?;
            Ok(())
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    }
}
