//! `§` colour markup for terminal output.
//!
//! Templates mark styling inline with two-character codes (`§c` bright red,
//! `§l` bold, `§r` reset, ...). A [`Style`] either translates them to ANSI
//! escapes or strips them. Only templates go through [`Style::paint`]; user
//! source text is appended raw so it can never be mistaken for markup.

use regex::Regex;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)§[0-9a-frlnu]").expect("markup pattern is valid"));

fn ansi(code: char) -> &'static str {
    match code.to_ascii_lowercase() {
        '0' => "\x1b[30m",
        '1' => "\x1b[34m",
        '2' => "\x1b[32m",
        '3' => "\x1b[36m",
        '4' => "\x1b[31m",
        '5' => "\x1b[35m",
        '6' => "\x1b[33m",
        '7' => "\x1b[37m",
        '8' => "\x1b[90m",
        '9' => "\x1b[94m",
        'a' => "\x1b[92m",
        'b' => "\x1b[96m",
        'c' => "\x1b[91m",
        'd' => "\x1b[95m",
        'e' => "\x1b[93m",
        'f' => "\x1b[97m",
        'l' => "\x1b[1m",
        'r' => "\x1b[0m",
        'u' => "\x1b[4m",
        'n' => "\x1b[22m",
        _ => "",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Style { color }
    }

    /// Strips all markup.
    pub fn plain() -> Self {
        Style { color: false }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn paint(&self, markup: &str) -> String {
        MARKUP
            .replace_all(markup, |caps: &regex::Captures<'_>| {
                if !self.color {
                    return "";
                }
                caps[0].chars().last().map_or("", ansi)
            })
            .into_owned()
    }
}
