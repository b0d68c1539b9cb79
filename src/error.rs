//! Positioned errors shared by the lexer and the parser.
//!
//! Every error produced while compiling BlockScript carries the exact byte
//! range of the offending source text. The first error aborts the compile;
//! nothing is collected or recovered.

use std::ops::Range;

/// A half-open `[start, stop)` byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub stop: usize,
}

impl Span {
    /// Creates a span. `stop` is clamped so that it never precedes `start`.
    pub const fn new(start: usize, stop: usize) -> Self {
        let stop = if stop < start { start } else { stop };
        Span { start, stop }
    }

    /// A zero-width span at `offset`.
    pub const fn point(offset: usize) -> Self {
        Span {
            start: offset,
            stop: offset,
        }
    }

    /// Width in bytes; zero for a hand-built span whose `stop` precedes `start`.
    pub const fn len(self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.stop <= self.start
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.stop.max(other.stop))
    }

    pub const fn as_range(self) -> Range<usize> {
        self.start..self.stop
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// The category of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input at the lexical or grammatical level.
    SyntaxError,
    /// A recognised construct the parser does not implement yet.
    NotYetSupported,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::NotYetSupported => "NotYetSupported",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An error raised by the lexer or parser, pointing at the source it blames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        CompileError {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::SyntaxError, message, span)
    }

    pub fn not_yet_supported(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::NotYetSupported, message, span)
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn stop(&self) -> usize {
        self.span.stop
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (at {}..{})",
            self.kind, self.message, self.span.start, self.span.stop
        )
    }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_never_runs_backwards() {
        let span = Span::new(7, 3);
        assert_eq!(span.start, 7);
        assert_eq!(span.stop, 7);
        assert!(span.is_empty());
    }

    #[test]
    fn len_of_inverted_span_is_zero() {
        let span = Span { start: 5, stop: 2 };
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn merge_covers_both() {
        let merged = Span::new(4, 6).merge(Span::new(1, 2));
        assert_eq!(merged, Span::new(1, 6));
        assert_eq!(merged.len(), 5);
    }

    #[test]
    fn display_names_kind_and_range() {
        let err = CompileError::syntax("Unparsable character", Span::new(3, 4));
        assert_eq!(err.to_string(), "SyntaxError: Unparsable character (at 3..4)");
        assert_eq!(err.start(), 3);
        assert_eq!(err.stop(), 4);
    }
}
