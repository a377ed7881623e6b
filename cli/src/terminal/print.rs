use crate::terminal::colors;
use crate::terminal::logging::PRINT_TARGET;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
const TREE_KEY_WIDTH: usize = 9;

#[macro_export]
macro_rules! cprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let title: String = format!("⟦ CIPHERCERT v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    print(&rule(&title, title.as_str().color(colors::PRIMARY).bold(), "═"));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&rule(&title, title.as_str().color(colors::PRIMARY), "─"));
}

/// Centers `styled` on a line of `fill`, measuring width on the plain `title`.
fn rule(title: &str, styled: ColoredString, fill: &str) -> String {
    let pad: usize = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(title));
    let left: usize = pad / 2;
    format!(
        "{}{}{}",
        fill.repeat(left).bright_black(),
        styled,
        fill.repeat(pad - left).bright_black()
    )
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

/// `key.......: value`, with the dots padding every key to `key_width`.
pub fn aligned_line(key: &str, value: ColoredString, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    let colon: ColoredString = format!("{dots}:").color(colors::SEPARATOR);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: ColoredString = format!("[{}]", idx.to_string().color(colors::ACCENT))
        .color(colors::SEPARATOR);
    print(&format!("{} {}", idx_str, name.color(colors::PRIMARY)));
}

/// Prints one line per item under a tree head.
fn branches<I>(lines: I)
where
    I: ExactSizeIterator<Item = String>,
{
    for line in branch_lines(lines) {
        print(&line);
    }
}

/// `├─` on every line but the last, which gets `└─`.
fn branch_lines<I>(lines: I) -> Vec<String>
where
    I: ExactSizeIterator<Item = String>,
{
    let len: usize = lines.len();
    lines
        .enumerate()
        .map(|(i, line)| {
            let branch: &str = if i + 1 == len { "└─" } else { "├─" };
            format!(" {} {}", branch.bright_black(), line)
        })
        .collect()
}

/// `key......: value` details of a record.
pub fn as_tree_one_level(details: Vec<(String, ColoredString)>) {
    branches(details.into_iter().map(|(key, value)| {
        let dots: String = ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.len()));
        format!(
            "{}{} {}",
            key.color(colors::TEXT_DEFAULT),
            format!("{dots}:").color(colors::SEPARATOR),
            value
        )
    }));
}

/// Plain items prefixed with `marker`, e.g. the targets of a partition.
pub fn as_list(items: &[String], marker: ColoredString) {
    branches(
        items
            .iter()
            .map(|item| format!("{} {}", marker, item.color(colors::TEXT_DEFAULT))),
    );
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

const NO_RESULTS: &str = r#"
         _   _  ___    ____   ____    _    _   _ ____
        | \ | |/ _ \  / ___| / ___|  / \  | \ | / ___|
        |  \| | | | | \___ \| |     / _ \ |  \| \___ \
        | |\  | |_| |  ___) | |___ / ___ \| |\  |___) |
        |_| \_|\___/  |____/ \____/_/   \_\_| \_|____/
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
}
