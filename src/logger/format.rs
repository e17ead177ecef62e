//! Log formatting and output with ANSI colors
//!
//! Console output goes to stderr so tools can keep stdout for their own data.
//! Multi-line messages are continued under the message column.

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LOG_TYPE_WIDTH: usize = 8;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str, colors: bool) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let tag_str = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    let level_str = format!("{:<width$}", level.as_str(), width = LOG_TYPE_WIDTH);

    let base_line = if colors {
        format!(
            "{} [{}] [{}] ",
            time.dimmed(),
            color_tag(&tag, tag_str),
            color_level(level, level_str)
        )
    } else {
        format!("{} [{}] [{}] ", time, tag_str, level_str)
    };

    let prefix_width = time.len() + TAG_WIDTH + LOG_TYPE_WIDTH + 7;
    let mut lines = message.split('\n');
    let first = lines.next().unwrap_or_default();
    print_stderr_safe(&format!("{}{}", base_line, first));
    for line in lines {
        print_stderr_safe(&format!("{}{}", " ".repeat(prefix_width), line));
    }
}

fn color_tag(tag: &LogTag, padded: String) -> ColoredString {
    match tag {
        LogTag::Decoder => padded.bright_blue().bold(),
        LogTag::Registry => padded.bright_cyan().bold(),
        LogTag::Config => padded.bright_magenta().bold(),
        LogTag::System => padded.bright_yellow().bold(),
    }
}

fn color_level(level: LogLevel, padded: String) -> ColoredString {
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.bright_yellow().bold(),
        LogLevel::Info => padded.bright_green(),
        LogLevel::Debug => padded.bright_blue(),
        LogLevel::Verbose => padded.dimmed(),
    }
}

/// Write a line, ignoring a closed pipe
fn print_stderr_safe(message: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            return;
        }
    }
    let _ = handle.flush();
}
