use std::io;

use console::Term;

use crate::TermLike;

/// Target for draw operations
///
/// This tells a meter where to paint to. Meters draw to stdout by default.
#[derive(Debug)]
pub struct MeterDrawTarget {
    kind: TargetKind,
}

impl MeterDrawTarget {
    /// Draw to a buffered stdout terminal.
    ///
    /// The buffer is flushed after every draw. Unlike a full-screen progress
    /// bar the meter is written even if stdout is not a terminal.
    pub fn stdout() -> Self {
        Self::term(Term::buffered_stdout())
    }

    /// Draw to a buffered stderr terminal.
    pub fn stderr() -> Self {
        Self::term(Term::buffered_stderr())
    }

    /// Draw to a terminal.
    pub fn term(term: Term) -> Self {
        Self {
            kind: TargetKind::Term { term },
        }
    }

    /// Draw to a boxed object that implements the [`TermLike`] trait.
    pub fn term_like(term_like: Box<dyn TermLike>) -> Self {
        Self {
            kind: TargetKind::TermLike { inner: term_like },
        }
    }

    /// A hidden draw target.
    ///
    /// This forces a meter to be not rendered at all.
    pub fn hidden() -> Self {
        Self {
            kind: TargetKind::Hidden,
        }
    }

    /// Returns true if the draw target is hidden.
    ///
    /// This is internally used in meters to figure out if overhead from
    /// drawing can be prevented.
    pub fn is_hidden(&self) -> bool {
        matches!(self.kind, TargetKind::Hidden)
    }

    /// Writes `s` after backing over `erase` columns, then flushes.
    pub(crate) fn draw(&self, erase: usize, s: &str) -> io::Result<()> {
        let Some(term) = self.as_term_like() else {
            return Ok(());
        };
        term.backspace(erase)?;
        term.write_str(s)?;
        term.flush()
    }

    /// Blanks `width` columns to the left of the cursor and leaves the cursor
    /// where the blanked region starts.
    pub(crate) fn erase(&self, width: usize) -> io::Result<()> {
        let Some(term) = self.as_term_like() else {
            return Ok(());
        };
        term.backspace(width)?;
        term.write_str(&" ".repeat(width))?;
        term.backspace(width)?;
        term.flush()
    }

    /// Blanks the current line from its start over `width` columns.
    pub(crate) fn clear_line(&self, width: usize) -> io::Result<()> {
        let Some(term) = self.as_term_like() else {
            return Ok(());
        };
        term.write_str(&format!("\r{}\r", " ".repeat(width)))?;
        term.flush()
    }

    /// Writes `s` followed by a newline, then flushes.
    pub(crate) fn write_line(&self, s: &str) -> io::Result<()> {
        let Some(term) = self.as_term_like() else {
            return Ok(());
        };
        term.write_line(s)?;
        term.flush()
    }

    fn as_term_like(&self) -> Option<&dyn TermLike> {
        match &self.kind {
            TargetKind::Term { term } => Some(term as &dyn TermLike),
            TargetKind::TermLike { inner } => Some(&**inner),
            TargetKind::Hidden => None,
        }
    }
}

impl Default for MeterDrawTarget {
    fn default() -> Self {
        Self::stdout()
    }
}

#[derive(Debug)]
enum TargetKind {
    Term { term: Term },
    TermLike { inner: Box<dyn TermLike> },
    Hidden,
}
