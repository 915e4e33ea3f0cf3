//! Output formatting utilities for the report renderer.

use is_terminal::IsTerminal;
use std::io;

/// Log info message to stderr (respects quiet flag).
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", msg);
    }
}

/// Colorize text with ANSI escape codes (only if stdout is a terminal).
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Print a section divider with a centered title.
pub fn divider(title: &str) {
    const WIDTH: usize = 60;
    let pad = WIDTH.saturating_sub(title.len() + 2);
    let left = pad / 2;
    let right = pad - left;
    println!();
    println!(
        "{}",
        color(
            "1;36",
            &format!("{} {} {}", "=".repeat(left), title, "=".repeat(right))
        )
    );
}

/// Print an aligned table: first column left-aligned, the rest
/// right-aligned, with a dashed rule under the header.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut header_line = String::new();
    let mut rule = String::new();
    for (i, header) in headers.iter().enumerate() {
        if i == 0 {
            header_line.push_str(&format!("{:<width$}", header, width = widths[i]));
        } else {
            header_line.push_str(&format!("   {:>width$}", header, width = widths[i]));
        }
        if i > 0 {
            rule.push_str("   ");
        }
        rule.push_str(&"-".repeat(widths[i]));
    }
    println!("{}", color("1", &header_line));
    println!("{}", rule);

    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate().take(cols) {
            if i == 0 {
                line.push_str(&format!("{:<width$}", cell, width = widths[i]));
            } else {
                line.push_str(&format!("   {:>width$}", cell, width = widths[i]));
            }
        }
        println!("{}", line);
    }
}

/// Print a wrapped note paragraph, dimmed.
pub fn print_note(text: &str) {
    for line in text.lines() {
        println!("{}", color("2", line.trim()));
    }
}
