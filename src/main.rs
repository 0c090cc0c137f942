//! markdeco - view and edit dialogue markdown with inline decorations

use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use clap::Parser;
use tracing::Level;

use markdeco::buffer::Document;
use markdeco::config::Config;
use markdeco::display::render_document;
use markdeco::editor::{window_height, EditorState};
use markdeco::error::Result;
use markdeco::terminal::Terminal;
use markdeco::view::DocumentView;
use markdeco::DecorationEngine;

/// Columns used by --print when the terminal width is unknown
const DEFAULT_PRINT_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "markdeco", version, about = "Inline decorations for dialogue markdown")]
struct Args {
    /// File to open
    file: PathBuf,

    /// Render the decorated file to stdout and exit
    #[arg(long)]
    print: bool,

    /// With --print, emit no ANSI styling
    #[arg(long, requires = "print")]
    plain: bool,

    /// With --print, columns to render into
    #[arg(long, requires = "print")]
    width: Option<usize>,

    /// Config file (default: ~/.markdeco.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    tracing::debug!(?config, "configuration loaded");

    let scroll_margin = config.scroll_margin;
    let engine = DecorationEngine::new(config);

    if args.print {
        return print_document(&args, &engine);
    }

    let terminal = Terminal::new()?;
    let view = DocumentView::open(&args.file, window_height(terminal.rows()))?
        .with_scroll_margin(scroll_margin);
    let mut editor = EditorState::new(terminal, view, engine);
    editor.run()
}

/// Decorate the whole document once and write it to stdout
fn print_document(args: &Args, engine: &DecorationEngine) -> Result<()> {
    let document = Document::from_file(&args.file)?;
    let width = args
        .width
        .or_else(|| crossterm::terminal::size().ok().map(|(cols, _)| cols as usize))
        .unwrap_or(DEFAULT_PRINT_WIDTH);
    print!("{}", render_document(document, engine, width, !args.plain)?);
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    if let Some(path) = &args.log {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.print {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
