//! fpane - file pane
//!
//! A line-oriented driver for the filepane core: list directories, inspect
//! paths, and copy/paste files with background progress.

use clap::{Parser, Subcommand, ValueEnum};
use filepane::{
    Browser, BrowserBuilder, CopyStatus, Error as CoreError, ErrorCode, FileEntry, PasteOutcome,
    TaskId, TaskReport, TaskState, create_progress_bar,
};
use indicatif::ProgressBar;
use serde_json::{Value, json};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// How often a background paste is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// fpane - terminal file pane
///
/// Usage:
///   fpane ls [DIR]
///   fpane stat PATH
///   fpane paste SOURCE [DEST_DIR]
#[derive(Parser, Debug)]
#[command(name = "fpane", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    output: OutputMode,

    /// Disable progress bar and informational output
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Verbose logging on stderr (overrides RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a directory
    Ls {
        /// Directory to list (default: current directory)
        dir: Option<PathBuf>,

        /// Maximum number of entries, `..` included
        #[arg(long, default_value_t = filepane::DEFAULT_LISTING_LIMIT)]
        limit: usize,
    },

    /// Show metadata for a single path
    Stat {
        path: PathBuf,
    },

    /// Show free space on the filesystem holding a path
    Df {
        /// Any path on the filesystem (default: current directory)
        path: Option<PathBuf>,
    },

    /// Copy SOURCE and paste it into DEST_DIR under a free name
    Paste {
        source: PathBuf,

        /// Destination directory (default: current directory)
        dest_dir: Option<PathBuf>,

        /// Copy buffer size in bytes
        #[arg(long, default_value_t = filepane::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Files larger than this many bytes are copied in the background
        #[arg(long, default_value_t = filepane::DEFAULT_BACKGROUND_THRESHOLD)]
        background_threshold: u64,

        /// Do not preserve file permissions
        #[arg(long)]
        no_perms: bool,

        /// Preserve file modification and access times
        #[arg(long)]
        times: bool,
    },

    /// Delete a file or directory tree
    Rm {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Copy to {dest} failed: {reason}")]
    TaskFailed { dest: PathBuf, reason: String },

    #[error("Interrupted; removed partial copy {dest}")]
    Interrupted { dest: PathBuf },

    #[error("Failed to install interrupt handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Core(error) => error.code(),
            Self::TaskFailed { .. } => ErrorCode::IoError,
            Self::Interrupted { .. } => ErrorCode::Cancelled,
            Self::SignalHandler(_) | Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        ErrorCode::Cancelled => 130,
        _ => 1,
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(error) = run(&args) {
        tracing::debug!("exiting with error: {:?}", error);
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> CliResult<()> {
    match &args.command {
        Command::Ls { dir, limit } => {
            let browser = BrowserBuilder::new().listing_limit(*limit).build();
            let dir = resolve_dir(&browser, dir.as_deref())?;
            cmd_ls(&browser, &dir, args.output)
        }
        Command::Stat { path } => {
            let entry = Browser::new().stat_path(path)?;
            match args.output {
                OutputMode::Human => print_stat(path, &entry),
                OutputMode::Json => print_json_value(&entry_to_json(&entry)?)?,
            }
            Ok(())
        }
        Command::Df { path } => {
            let browser = Browser::new();
            let path = resolve_dir(&browser, path.as_deref())?;
            let space = browser.free_disk_space(&path)?;
            match args.output {
                OutputMode::Human => println!("{}: {}", path.display(), space),
                OutputMode::Json => print_json_value(&json!({
                    "path": display_path(&path),
                    "available_bytes": space.available,
                    "available": space.to_string(),
                }))?,
            }
            Ok(())
        }
        Command::Paste {
            source,
            dest_dir,
            chunk_size,
            background_threshold,
            no_perms,
            times,
        } => {
            let mut builder = BrowserBuilder::new()
                .chunk_size(*chunk_size)
                .background_threshold(*background_threshold);
            if *no_perms {
                builder = builder.no_permissions();
            }
            if *times {
                builder = builder.preserve_timestamps();
            }
            let browser = builder.build();
            let dest_dir = resolve_dir(&browser, dest_dir.as_deref())?;
            cmd_paste(&browser, source, &dest_dir, args)
        }
        Command::Rm { path } => {
            Browser::new().delete_path(path)?;
            if args.output == OutputMode::Json {
                print_json_value(&json!({ "deleted": display_path(path) }))?;
            } else if !args.quiet {
                println!("Deleted {}", path.display());
            }
            Ok(())
        }
    }
}

fn resolve_dir(browser: &Browser, dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(browser.current_dir()?),
    }
}

fn cmd_ls(browser: &Browser, dir: &Path, output: OutputMode) -> CliResult<()> {
    let mut entries = browser.list_directory(dir)?;
    browser.reap_finished_tasks();
    browser.project_status(&mut entries, dir);

    match output {
        OutputMode::Human => {
            for entry in &entries {
                println!("{}", format_entry_line(entry));
            }
        }
        OutputMode::Json => {
            let items = entries.iter().map(entry_to_json).collect::<CliResult<Vec<_>>>()?;
            print_json_value(&Value::Array(items))?;
        }
    }
    Ok(())
}

fn cmd_paste(browser: &Browser, source: &Path, dest_dir: &Path, args: &Args) -> CliResult<()> {
    let clip = browser.set_clipboard(source)?;

    // Ctrl+C becomes a cancellation request while the paste is in flight.
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        let input = browser.input_mode();
        ctrlc::set_handler(move || match input.disposition() {
            filepane::InterruptDisposition::DeliverAsInput => {
                interrupted.store(true, Ordering::Relaxed);
            }
            filepane::InterruptDisposition::Terminate => std::process::exit(130),
        })?;
    }
    let _guard = browser.protect_interrupts();

    let outcome = browser.paste_into(dest_dir)?;
    let (mode, bytes) = match &outcome {
        PasteOutcome::Completed { bytes, .. } => ("inline", *bytes),
        PasteOutcome::Background { task, dest } => {
            let pb = (!args.quiet && args.output == OutputMode::Human).then(|| {
                let pb = create_progress_bar(0);
                pb.set_message(format!("Pasting {}", dest.display()));
                pb
            });
            let report = wait_for_task(browser, *task, dest, &interrupted, pb.as_ref());
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            let report = report?;
            match report.state {
                TaskState::Completed => {}
                TaskState::Cancelled => {
                    return Err(CliError::Interrupted { dest: report.dest });
                }
                TaskState::Failed | TaskState::Running => {
                    return Err(CliError::TaskFailed {
                        dest: report.dest,
                        reason: report.failure.unwrap_or_else(|| "unknown error".to_owned()),
                    });
                }
            }
            ("background", report.bytes_copied)
        }
    };

    match args.output {
        OutputMode::Human => {
            if !args.quiet {
                println!(
                    "Pasted {} -> {} ({})",
                    clip.path.display(),
                    outcome.dest().display(),
                    filepane::format_size(bytes)
                );
            }
        }
        OutputMode::Json => print_json_value(&json!({
            "source": display_path(&clip.path),
            "destination": display_path(outcome.dest()),
            "is_directory": clip.is_directory,
            "mode": mode,
            "bytes_copied": bytes,
        }))?,
    }
    Ok(())
}

/// Poll until the task leaves the registry, cancelling it on interrupt.
fn wait_for_task(
    browser: &Browser,
    task: TaskId,
    dest: &Path,
    interrupted: &AtomicBool,
    pb: Option<&ProgressBar>,
) -> CliResult<TaskReport> {
    loop {
        if interrupted.load(Ordering::Relaxed) {
            match browser.cancel_task(task) {
                Ok(()) => {
                    return Err(CliError::Interrupted {
                        dest: dest.to_path_buf(),
                    });
                }
                // Finished before the interrupt was seen; report it as is.
                Err(CoreError::TaskNotRunning(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(report) = browser
            .reap_finished_tasks()
            .into_iter()
            .find(|r| r.id == task)
        {
            return Ok(report);
        }

        if let (Some(pb), Some(snap)) = (pb, browser.active_task()) {
            pb.set_length(snap.progress.total);
            pb.set_position(snap.progress.copied);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn format_entry_line(entry: &FileEntry) -> String {
    let suffix = if entry.is_directory() {
        "/"
    } else if entry.is_executable() {
        "*"
    } else {
        ""
    };
    let status = match entry.copy_status {
        CopyStatus::None => "",
        CopyStatus::InProgress => "  [copying]",
        CopyStatus::Completed => "  [done]",
    };
    format!(
        "{:<16} {:>8}  {:<16}  {}{}{}",
        entry.kind.label(),
        entry.size_label,
        entry.modified_at,
        entry.name,
        suffix,
        status
    )
}

fn print_stat(path: &Path, entry: &FileEntry) {
    println!("Path:       {}", path.display());
    println!("Name:       {}", entry.name);
    println!("Type:       {}", entry.kind);
    println!("Size:       {} ({} bytes)", entry.size_label, entry.size);
    println!("Mode:       {:o}", entry.mode);
    println!("Modified:   {}", entry.modified_at);
    println!("Executable: {}", entry.is_executable());
    println!("Editable:   {}", entry.is_editable_text);
}

fn entry_to_json(entry: &FileEntry) -> CliResult<Value> {
    let mut value =
        serde_json::to_value(entry).map_err(|source| CliError::JsonSerialize { source })?;
    if let Value::Object(ref mut obj) = value {
        obj.insert("kind_label".to_owned(), Value::String(entry.kind.label().to_owned()));
        obj.insert("is_executable".to_owned(), Value::Bool(entry.is_executable()));
    }
    Ok(value)
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{rendered}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
