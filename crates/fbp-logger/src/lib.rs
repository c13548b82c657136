//! User-facing logging for the fbp-manifest CLI
//!
//! Messages go to stderr so stdout only carries command output (manifest JSON, stats).
//! Console output is gated by the verbosity level:
//! - quiet: errors only
//! - 0: warnings, errors and success lines
//! - 1 (`-v` and above): plus info and debug
//!
//! When a log file is configured every message is also appended to it with a timestamp.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);
static QUIET: Mutex<bool> = Mutex::new(false);
static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Whether only errors are printed
pub fn is_quiet() -> bool {
    QUIET.lock().ok().is_some_and(|q| *q)
}

/// Initialize console verbosity and the optional log file
///
/// The log file is truncated so it only holds the current run.
pub fn init(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<(), String> {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = if quiet { 0 } else { verbosity };
    }
    if let Ok(mut q) = QUIET.lock() {
        *q = quiet;
    }

    let Some(log_file) = log_file else {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = None;
        }
        return Ok(());
    };
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }
    fs::write(log_file, "").map_err(|e| format!("Failed to create log file: {}", e))?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(log_file.to_path_buf());
    }
    Ok(())
}

/// Get the log file path, if one is configured
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}

fn write_to_log(level: &str, message: &str) {
    let Some(log_path) = get_log_path() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {} {}", timestamp, level, message);
    }
}

/// Log an informational message (to console if verbose >= 1)
pub fn info(message: &str) {
    write_to_log("INFO", message);
    if get_verbosity() >= 1 {
        eprintln!("{}", message);
    }
}

/// Log a debug message (to console if verbose >= 1)
pub fn debug(message: &str) {
    write_to_log("DEBUG", message);
    if get_verbosity() >= 1 {
        eprintln!("{} {}", "DEBUG:".blue().bold(), message);
    }
}

/// Log a warning (to console unless quiet)
pub fn warn(message: &str) {
    write_to_log("WARN", message);
    if !is_quiet() {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}

/// Log an error (always to console)
pub fn error(message: &str) {
    write_to_log("ERROR", message);
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Log a success message (to console unless quiet)
pub fn success(message: &str) {
    write_to_log("SUCCESS", message);
    if !is_quiet() {
        eprintln!("{} {}", "\u{2714}".green().bold(), message);
    }
}

/// Start a spinner with the given message (only when not verbose or quiet)
pub fn spinner_start(message: &str) {
    if get_verbosity() > 0 || is_quiet() {
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    if let Ok(mut guard) = SPINNER.lock() {
        *guard = Some(spinner);
    }
}

/// Stop the spinner without any message
pub fn spinner_stop() {
    if let Ok(mut guard) = SPINNER.lock() {
        if let Some(spinner) = guard.take() {
            spinner.finish_and_clear();
        }
    }
}
