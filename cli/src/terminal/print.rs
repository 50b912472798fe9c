//! Human-readable output for the interactive subcommands.
//!
//! Everything goes through [`print`], which emits a tracing event on
//! [`PRINT_TARGET`]. The log formatter writes those verbatim to stderr, so
//! pretty output never interleaves with a progress bar or with `--json` on
//! stdout.

use std::fmt::Display;

use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

pub const PRINT_TARGET: &str = "netdiag::print";

const MIN_TREE_KEY_WIDTH: usize = 7;

/// Values that bring their own colour keep it, plain text gets the default.
pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn blank() {
    print("");
}

/// A full-width rule with `label` centred in it.
fn rule(fill: &str, label: ColoredString) -> String {
    let used = UnicodeWidthStr::width(label.to_string().as_str());
    let free = TOTAL_WIDTH.saturating_sub(used);
    let left = fill.repeat(free / 2).bright_black();
    let right = fill.repeat(free - free / 2).bright_black();
    format!("{left}{label}{right}")
}

/// `key` followed by dots up to `width` and a colon.
fn dotted_key(key: &str, width: usize, key_color: Color) -> String {
    let dots = ".".repeat(width.saturating_sub(key.len()));
    format!(
        "{}{}{}",
        key.color(key_color),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    )
}

pub fn banner() {
    let label = format!("⟦ NETDIAG v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&rule("═", label.bright_green().bold()));
}

pub fn header(msg: &str) {
    let label = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&rule("─", label.bright_green()));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    print(&format!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

/// `> key.....: value` with the colon at column `key_width + 1`.
pub fn aligned_line<V>(key: &str, value: V, key_width: usize)
where
    V: Display + WithDefaultColor,
{
    let key = dotted_key(key, key_width + 1, colors::PRIMARY);
    print_status(format!("{key} {}", value.with_default(colors::TEXT_DEFAULT)));
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn as_tree_one_level(pairs: Vec<(String, ColoredString)>) {
    let width = pairs
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0)
        .max(MIN_TREE_KEY_WIDTH);
    let last = pairs.len().saturating_sub(1);

    for (i, (key, value)) in pairs.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        print(&format!(
            " {} {} {value}",
            branch.bright_black(),
            dotted_key(key, width, colors::TEXT_DEFAULT)
        ));
    }
}

pub fn centerln(msg: &str) {
    let pad = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

pub fn failure(msg: &str) {
    print(&format!("{} {}", "[-]".red().bold(), msg.red()));
}

pub fn nothing_found(what: &str) {
    print(&format!("no {what} found").red().bold().to_string());
}
