use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{info, warn, LevelFilter};
use page_toc_config::{Config, LoadOptions};
use page_toc_format::{render_outline, OutlineFormat};
use page_toc_ops::{
    ApplyMode, ApplyOptions, ApplyOutcome, OperationError, Operations, ScanOptions,
};
use simple_logger::SimpleLogger;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let mut options = LoadOptions::default();
    if let Some(path) = &cli.config {
        options = options.with_override_path(path);
    }
    let config = Config::load(options)?;
    let ops = Operations::new(config);

    let result = match cli.command {
        Command::Apply(args) => handle_apply(&ops, args, cli.quiet),
        Command::Render(args) => handle_render(&ops, args),
        Command::Outline(args) => handle_outline(&ops, args),
    };

    match result {
        Err(OperationError::Io { path, source }) => {
            eprintln!("I/O error on {}: {}", path.display(), source);
            Ok(4)
        }
        Err(OperationError::InvalidInput(message)) => {
            eprintln!("invalid input: {message}");
            Ok(1)
        }
        Err(err) => Err(err.into()),
        Ok(code) => Ok(code),
    }
}

fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialise logging")
}

fn handle_apply(ops: &Operations, args: ApplyArgs, quiet: bool) -> Result<i32, OperationError> {
    let ApplyArgs {
        path,
        check,
        update,
        diff,
    } = args;

    let mode = if update {
        ApplyMode::Update
    } else if diff {
        ApplyMode::Diff
    } else {
        // Explicit --check maps to same default mode.
        let _ = check;
        ApplyMode::Check
    };

    let options = ApplyOptions {
        scan: ScanOptions { paths: path },
        mode,
        quiet,
    };
    let ApplyOutcome {
        rendered,
        exit_code,
        pages_scanned,
        ..
    } = ops.apply(options)?;
    info!("processed {pages_scanned} page(s)");

    if !rendered.is_empty() {
        emit(&rendered).map_err(|source| OperationError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    }

    Ok(exit_code)
}

fn handle_render(ops: &Operations, args: RenderArgs) -> Result<i32, OperationError> {
    let html = match decode(&args.file, read_input(&args.file)?) {
        Ok(input) => {
            let rendered = ops.render(&input)?;
            if !rendered.changed() {
                info!("{}: {:?}", args.file.display(), rendered.outcome);
            }
            rendered.html.into_bytes()
        }
        Err(bytes) => bytes,
    };
    write_stdout(&html).map_err(|source| OperationError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    Ok(0)
}

fn handle_outline(ops: &Operations, args: OutlineArgs) -> Result<i32, OperationError> {
    let input = decode(&args.file, read_input(&args.file)?).unwrap_or_default();
    let tree = ops.outline(&input).unwrap_or_else(|| {
        info!("{}: no content container or h2/h3 headings", args.file.display());
        Default::default()
    });

    let format = match args.format.unwrap_or(OutlineFormatValue::Plain) {
        OutlineFormatValue::Plain => OutlineFormat::Plain,
        OutlineFormatValue::Json => OutlineFormat::Json,
    };
    let label = args.file.to_string_lossy();
    let rendered = render_outline(&tree, Some(label.as_ref()), format)
        .map_err(|err| OperationError::InvalidInput(err.to_string()))?;

    if !rendered.is_empty() {
        write_stdout(rendered.as_bytes()).map_err(|source| OperationError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    }
    Ok(0)
}

fn read_input(path: &Path) -> Result<Vec<u8>, OperationError> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .map_err(|source| OperationError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        Ok(buffer)
    } else {
        fs::read(path).map_err(|source| OperationError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Pages that are not UTF-8 are handed back untouched.
fn decode(path: &Path, bytes: Vec<u8>) -> Result<String, Vec<u8>> {
    String::from_utf8(bytes).map_err(|err| {
        warn!(
            "{}: not valid UTF-8 ({}), leaving page unchanged",
            path.display(),
            err.utf8_error()
        );
        err.into_bytes()
    })
}

fn emit(content: &str) -> io::Result<()> {
    if content.ends_with('\n') {
        write_stdout(content.as_bytes())
    } else {
        write_stdout(format!("{content}\n").as_bytes())
    }
}

fn write_stdout(content: &[u8]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match handle.write_all(content).and_then(|_| handle.flush()) {
        Ok(()) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err),
    }
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sidebar table-of-contents generator for rendered HTML pages",
    propagate_version = true
)]
struct Cli {
    /// Use this config file on top of the discovered ones
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors and suppress "up to date" summaries
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add sidebar navigation to every in-scope page
    Apply(ApplyArgs),
    /// Enhance one page and print the result
    Render(RenderArgs),
    /// Print the navigation a page would receive
    Outline(OutlineArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Restrict processing to specific files or directories
    #[arg(long = "path", value_name = "PATH", action = ArgAction::Append)]
    path: Vec<PathBuf>,
    /// Report pages that would change without modifying them (default)
    #[arg(long, conflicts_with_all = ["update", "diff"])]
    check: bool,
    /// Rewrite pages in place
    #[arg(long, conflicts_with_all = ["check", "diff"])]
    update: bool,
    /// Print unified diffs for pages that would change
    #[arg(long, conflicts_with_all = ["check", "update"])]
    diff: bool,
}

#[derive(Args)]
struct RenderArgs {
    /// HTML page to enhance (`-` reads stdin)
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

#[derive(Args)]
struct OutlineArgs {
    /// HTML page to inspect (`-` reads stdin)
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// Output format (plain or json)
    #[arg(long, value_enum)]
    format: Option<OutlineFormatValue>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutlineFormatValue {
    Plain,
    Json,
}
