//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//! When the source text is attached, labels are rendered as
//! `line:col` positions followed by the offending line and a caret run.

use std::io::{self, Write};

use nick_ir::Span;

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const CONTEXT: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the source text that label spans point into.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_snippet(&mut self, span: Span, color: &str) {
        let Some(source) = self.source else {
            return;
        };
        let Some((line_no, col, line)) = locate(source, span.start) else {
            return;
        };
        let width = (span.len() as usize).clamp(1, line.len().saturating_sub(col).max(1));
        let gutter = line_no.to_string().len();
        let _ = writeln!(self.writer, "  {:gutter$} |", "");
        let _ = writeln!(self.writer, "  {line_no} | {line}");
        let _ = write!(self.writer, "  {:gutter$} | {:col$}", "", "");
        self.write_colored(&"^".repeat(width), color);
        let _ = writeln!(self.writer);
    }
}

/// Find the 1-based line number, 0-based byte column and text of the line
/// containing `offset`.
fn locate(source: &str, offset: u32) -> Option<(usize, usize, &str)> {
    let offset = offset as usize;
    if offset > source.len() {
        return None;
    }
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    let line_no = source[..line_start].matches('\n').count() + 1;
    Some((line_no, offset - line_start, &source[line_start..line_end]))
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for (i, label) in diagnostic.labels.iter().enumerate() {
            let primary = i == 0;
            let marker = if primary { "-->" } else { "   " };
            let position = match self.source.and_then(|s| locate(s, label.span.start)) {
                Some((line, col, _)) => format!("{line}:{}", col + 1),
                None => format!("{:?}", label.span),
            };
            let _ = write!(self.writer, "  {marker} {position}: ");
            let color = if primary {
                colors::ERROR
            } else {
                colors::CONTEXT
            };
            self.write_colored(&label.message, color);
            let _ = writeln!(self.writer);
            self.write_snippet(label.span, color);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    fn sample_diagnostic() -> Diagnostic {
        Diagnostic::error(ErrorCode::E0104)
            .with_message("`HELPER` is not external in namespace `UTIL`")
            .with_label(Span::new(8, 18), "internal identifier")
            .with_note("current namespace is `APP`")
            .with_suggestion("write `$u::helper` to reference it explicitly")
    }

    #[test]
    fn test_terminal_emitter_no_color() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, true);

        emitter.emit(&sample_diagnostic());
        emitter.flush();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("error[E0104]: "));
        assert!(text.contains("--> 8..18: internal identifier"));
        assert!(text.contains("= note: current namespace is `APP`"));
        assert!(text.contains("= help: write `$u::helper`"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_terminal_emitter_with_color() {
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Always, false);

        emitter.emit(&sample_diagnostic());

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("E0104"));
    }

    #[test]
    fn test_snippet_points_at_span() {
        let source = "(print\n  $u:helper)";
        let mut output = Vec::new();
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false)
            .with_source(source);

        emitter.emit(
            &Diagnostic::error(ErrorCode::E0104)
                .with_message("not external")
                .with_label(Span::new(9, 18), "here"),
        );

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("--> 2:3: here"), "{text}");
        assert!(text.contains("2 |   $u:helper)"), "{text}");
        assert!(text.contains("|   ^^^^^^^^^"), "{text}");
    }

    #[test]
    fn test_locate() {
        assert_eq!(locate("ab\ncd", 0), Some((1, 0, "ab")));
        assert_eq!(locate("ab\ncd", 4), Some((2, 1, "cd")));
        assert_eq!(locate("ab", 9), None);
    }
}
