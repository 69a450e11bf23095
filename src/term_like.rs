use std::fmt::Debug;
use std::io;

use console::Term;

/// A trait for minimal terminal-like behavior.
///
/// Anything that implements this trait can be used as a draw target via
/// [`MeterDrawTarget::term_like`]. Meters only ever write plain text, spaces,
/// carriage returns and backspaces, so that is all an implementation needs
/// to understand.
///
/// [`MeterDrawTarget::term_like`]: crate::MeterDrawTarget::term_like
pub trait TermLike: Debug + Send + Sync {
    /// Write a string
    fn write_str(&self, s: &str) -> io::Result<()>;

    /// Write a string and add a newline.
    fn write_line(&self, s: &str) -> io::Result<()> {
        self.write_str(s)?;
        self.write_str("\n")
    }

    /// Move the cursor left by `n` columns using backspace characters.
    fn backspace(&self, n: usize) -> io::Result<()> {
        match n {
            0 => Ok(()),
            n => self.write_str(&"\x08".repeat(n)),
        }
    }

    fn flush(&self) -> io::Result<()>;
}

impl TermLike for Term {
    fn write_str(&self, s: &str) -> io::Result<()> {
        self.write_str(s)
    }

    fn write_line(&self, s: &str) -> io::Result<()> {
        self.write_line(s)
    }

    fn flush(&self) -> io::Result<()> {
        self.flush()
    }
}
