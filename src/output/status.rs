use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

static VERBOSITY: AtomicU8 = AtomicU8::new(0);
static STDOUT_RESERVED: AtomicBool = AtomicBool::new(false);

/// While set, every status line goes to stderr so stdout carries only the rendered board.
pub fn reserve_stdout(reserved: bool) {
    STDOUT_RESERVED.store(reserved, Ordering::Relaxed);
}

pub fn stdout_reserved() -> bool {
    STDOUT_RESERVED.load(Ordering::Relaxed)
}

fn emit_line(line: String) {
    if stdout_reserved() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn set_verbosity(level: u8) {
    VERBOSITY.store(level, Ordering::Relaxed);
}

pub fn verbosity() -> u8 {
    VERBOSITY.load(Ordering::Relaxed)
}

fn tag(label: ColoredString) -> String {
    format!("{}{}{}", "[".bold().white(), label, "]".bold().white())
}

pub fn info(msg: &str) {
    emit_line(format!("{} {}", tag("INF".bold().blue()), msg.bold().white()));
}

pub fn ok(msg: &str) {
    emit_line(format!("{} {}", tag("OK".bold().green()), msg.bold().white()));
}

pub fn warn(msg: &str) {
    emit_line(format!("{} {}", tag("WRN".bold().yellow()), msg.bold().white()));
}

pub fn error(msg: &str) {
    eprintln!("{} {}", tag("ERR".bold().red()), msg.bold().white());
}

pub fn debug(msg: &str) {
    if verbosity() > 0 {
        emit_line(format!("{} {}", tag("DBG".bold().magenta()), msg.dimmed()));
    }
}

pub fn kv_line(label: &str, value: &str) {
    emit_line(format!(":: {:<10}: {}", label, value));
}

/// Spinner shown while the sheet request is pending.
pub fn fetch_spinner(url: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("loading members from {url}"));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
