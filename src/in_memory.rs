use std::fmt::{Debug, Formatter};
use std::io::Write;
use std::sync::{Arc, Mutex};

use vt100::Parser;

use crate::TermLike;

/// A thin wrapper around [`vt100::Parser`].
///
/// This is just an [`Arc`] around its internal state, so it can be freely cloned.
/// Hand a clone to [`MeterDrawTarget::term_like`] and inspect what a real
/// terminal would show through [`InMemoryTerm::contents`].
///
/// [`MeterDrawTarget::term_like`]: crate::MeterDrawTarget::term_like
#[derive(Debug, Clone)]
pub struct InMemoryTerm {
    state: Arc<Mutex<InMemoryTermState>>,
}

impl InMemoryTerm {
    pub fn new(rows: u16, cols: u16) -> InMemoryTerm {
        assert!(rows > 0, "rows must be > 0");
        assert!(cols > 0, "cols must be > 0");
        InMemoryTerm {
            state: Arc::new(Mutex::new(InMemoryTermState::new(rows, cols))),
        }
    }

    /// The visible screen, one line per row, with trailing blanks and empty
    /// trailing rows removed.
    pub fn contents(&self) -> String {
        let state = self.state.lock().unwrap();

        // `Screen::contents` doesn't keep row boundaries, so rebuild the
        // screen row by row.
        let mut rows = state
            .parser
            .screen()
            .rows(0, state.width)
            .map(|row| row.trim_end().to_string())
            .collect::<Vec<_>>();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        rows.join("\n")
    }

    /// The cursor position as `(row, col)`.
    pub fn cursor_position(&self) -> (u16, u16) {
        self.state.lock().unwrap().parser.screen().cursor_position()
    }
}

impl TermLike for InMemoryTerm {
    fn write_str(&self, s: &str) -> std::io::Result<()> {
        self.state.lock().unwrap().write_str(s)
    }

    fn write_line(&self, s: &str) -> std::io::Result<()> {
        let mut state = self.state.lock().unwrap();

        debug_assert!(
            s.lines().count() <= 1,
            "calling write_line with embedded newlines is not allowed"
        );

        // vt100 needs the full \r\n sequence to jump to the next line and
        // reset the cursor to the beginning of the line
        state.write_str(s)?;
        state.write_str("\r\n")
    }

    fn flush(&self) -> std::io::Result<()> {
        self.state.lock().unwrap().parser.flush()
    }
}

struct InMemoryTermState {
    width: u16,
    parser: vt100::Parser,
}

impl InMemoryTermState {
    pub(crate) fn new(rows: u16, cols: u16) -> InMemoryTermState {
        InMemoryTermState {
            width: cols,
            parser: Parser::new(rows, cols, 0),
        }
    }

    pub(crate) fn write_str(&mut self, s: &str) -> std::io::Result<()> {
        self.parser.write_all(s.as_bytes())
    }
}

impl Debug for InMemoryTermState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTermState").finish_non_exhaustive()
    }
}
