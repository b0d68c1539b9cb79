//! Human-readable rendering of compile errors and compiler crashes.
//!
//! A compile error is shown as the line holding the start of its span, with
//! the span highlighted and underlined by carets, plus one line of context on
//! either side. Tabs are shown as single spaces; offsets are computed on the
//! untouched source so the two always agree.

use super::{InternalFault, Style};
use crate::CompileError;
use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("line break pattern is valid"));

/// One physical line of source, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the first character
    pub start: usize,
    pub text: &'a str,
}

pub fn lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut result = vec![];
    let mut start = 0;

    for found in LINE_BREAK.find_iter(source) {
        result.push(SourceLine {
            number: result.len() + 1,
            start,
            text: &source[start..found.start()],
        });
        start = found.end();
    }
    result.push(SourceLine {
        number: result.len() + 1,
        start,
        text: &source[start..],
    });
    result
}

/// Index into `lines` of the line containing byte `offset`.
///
/// Offsets on a line terminator belong to the line it ends; offsets past
/// the end belong to the last line.
pub fn line_index(lines: &[SourceLine<'_>], offset: usize) -> usize {
    lines
        .iter()
        .rposition(|line| line.start <= offset)
        .unwrap_or(0)
}

/// Number of characters of `text` before byte `offset`.
fn column(text: &str, offset: usize) -> usize {
    text.char_indices().take_while(|(i, _)| *i < offset).count()
}

fn display(text: &str) -> String {
    text.replace('\t', " ")
}

/// Renders `error` against `source`, naming the source `file`.
pub fn render(error: &CompileError, source: &str, file: &str, style: &Style) -> String {
    let lines = lines(source);
    let index = line_index(&lines, error.start());
    let line = lines[index];

    let text = display(line.text);
    let width = text.chars().count();
    let start_col = column(line.text, error.start().saturating_sub(line.start)).min(width);
    let stop_col = column(line.text, error.stop().saturating_sub(line.start)).min(width);
    let carets = stop_col.saturating_sub(start_col).max(1);

    let before: String = text.chars().take(start_col).collect();
    let marked: String = text.chars().skip(start_col).take(stop_col - start_col).collect();
    let after: String = text.chars().skip(stop_col).collect();

    let mut out = String::new();
    out.push_str(&style.paint("§u§lException occurred while compiling:§r\n"));
    out.push_str(&style.paint("  File §d\""));
    out.push_str(file);
    out.push_str(&style.paint(&format!("\"§r, line §d{}§r\n", line.number)));

    if let Some(previous) = index.checked_sub(1).map(|i| lines[i]) {
        out.push_str(&style.paint("    §8"));
        out.push_str(&display(previous.text));
        out.push_str(&style.paint("§r\n"));
    }

    out.push_str("    ");
    out.push_str(&before);
    out.push_str(&style.paint("§c§l"));
    out.push_str(&marked);
    out.push_str(&style.paint("§r"));
    out.push_str(&after);
    out.push('\n');

    out.push_str("    ");
    out.push_str(&" ".repeat(start_col));
    out.push_str(&style.paint(&format!("§c§l{}§r\n", "^".repeat(carets))));

    if let Some(next) = lines.get(index + 1) {
        out.push_str(&style.paint("    §8"));
        out.push_str(&display(next.text));
        out.push_str(&style.paint("§r\n"));
    }

    out.push_str(&style.paint(&format!("§l§5{}: §r§d", error.kind)));
    out.push_str(&error.message);
    out.push_str(&style.paint("§r\n"));
    out
}

/// Renders a crash report for a defect in the compiler itself.
pub fn render_crash(fault: &InternalFault, style: &Style) -> String {
    let mut out = String::new();
    out.push_str(&style.paint("§e§u§l:( The BlockScript compiler has crashed:§r\n"));
    out.push_str("Please note, that this is not a problem with your code!\n\n");
    out.push_str(&style.paint("§l§uFurther information:§r\n\n"));
    out.push_str(&style.paint("§lType: §r"));
    out.push_str(&fault.category);
    out.push('\n');
    out.push_str(&style.paint("§lMessage: §r"));
    out.push_str(&fault.message);
    out.push('\n');
    if let Some(location) = &fault.location {
        out.push_str(&style.paint("§lLocation: §r"));
        out.push_str(location);
        out.push('\n');
    }
    out.push_str(&style.paint("§lStack: §r"));
    out.push_str(&fault.trace);
    out.push('\n');
    out
}
