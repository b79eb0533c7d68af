//! jspad - a terminal JavaScript scratchpad.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use common::{Color, Severity};
use scratchpad::{build_scratchpad, run_headless, ScratchpadConfig};
use ui::{App, ThemeName};

/// jspad - edit JavaScript, run it, read its console output
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script file to load into the editor
    file: Option<PathBuf>,

    /// Script text to load instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Run once, print the console output and exit
    #[arg(long)]
    run: bool,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the light theme
    #[arg(long)]
    light: bool,

    /// Stop scripts after this many iterations of one loop
    #[arg(long)]
    loop_limit: Option<u64>,

    /// Stop scripts nested deeper than this many calls
    #[arg(long)]
    recursion_limit: Option<usize>,

    /// chrono strftime pattern for timestamps
    #[arg(long)]
    timestamp_format: Option<String>,

    /// Console color for one severity, e.g. `error=#ff5555` (repeatable)
    #[arg(long = "color", value_name = "SEVERITY=HEX", value_parser = parse_color_override)]
    colors: Vec<(Severity, Color)>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file (the interactive UI logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.log_file.as_deref(), !args.run)?;
    info!("jspad v{}", scratchpad::VERSION);

    let config = build_config(&args)?;
    let source = match (&args.eval, &args.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => config.initial_source.clone(),
    };

    if args.run {
        let summary = run_headless(&config, &source, &mut io::stdout().lock())?;
        if summary.failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_interactive(&config, &source)
}

/// Configuration file, then command line overrides.
fn build_config(args: &Args) -> Result<ScratchpadConfig> {
    let mut config = match &args.config {
        Some(path) => ScratchpadConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScratchpadConfig::default(),
    };

    if args.light {
        config = config.with_theme(ThemeName::Light);
    }
    if let Some(limit) = args.loop_limit {
        config = config.with_loop_iteration_limit(limit);
    }
    if let Some(limit) = args.recursion_limit {
        config = config.with_recursion_limit(limit);
    }
    if let Some(format) = &args.timestamp_format {
        config = config.with_timestamp_format(format);
    }
    for (severity, color) in &args.colors {
        config = config.with_severity_color(*severity, *color);
    }

    config.validate()?;
    Ok(config)
}

fn parse_color_override(value: &str) -> Result<(Severity, Color), String> {
    let (severity, hex) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SEVERITY=HEX, got {value}"))?;
    let severity: Severity = severity.trim().parse()?;
    let color = Color::from_hex(hex.trim()).ok_or_else(|| format!("invalid hex color: {hex}"))?;
    Ok((severity, color))
}

fn init_logging(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder().with_max_level(log_level);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            let subscriber = builder.with_writer(Mutex::new(file)).with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        // The terminal belongs to the UI.
        None if interactive => {}
        None => {
            let subscriber = builder.with_writer(io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

fn run_interactive(config: &ScratchpadConfig, source: &str) -> Result<()> {
    let mut app = App::new(build_scratchpad(config, source), config.ui_theme());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.run(&mut terminal);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    result?;
    info!(entries = app.scratchpad.output().len(), "session closed");
    Ok(())
}
