//! progress-meter is a small library for single-line terminal progress meters.
//!
//! A [`Meter`] overwrites the tail of the current line in place, using
//! backspace characters, to show how far along a long-running task is. Three
//! styles are available:
//!
//! * [`Bar`]: a bracketed bar such as `|=====     |`
//! * [`Spinner`]: a rotating `|/-\` glyph for tasks of unknown length
//! * [`Percent`]: a right-aligned percentage such as ` 42%`
//!
//! # Usage
//!
//! ```rust,no_run
//! use progress_meter::Meter;
//!
//! let mut meter = Meter::new(1000).with_label("copying");
//! meter.show();
//! for i in 0..1000 {
//!     // ...
//!     meter.update(i + 1);
//! }
//! meter.finish();
//! ```
//!
//! Redraws are throttled: an update repaints the meter at most once every
//! 250 milliseconds, and only when the rendered text actually changed. This
//! keeps tight loops cheap even when they call [`Meter::update`] on every
//! iteration.
//!
//! # Iterators
//!
//! ```rust,no_run
//! use progress_meter::MeterIterator;
//!
//! for _ in (0..4096).progress() {
//!     // ...
//! }
//! ```
//!
//! # Output
//!
//! Meters draw to stdout by default. The draw target can be replaced with any
//! [`TermLike`] implementation, or hidden completely, through
//! [`Meter::with_draw_target`].

mod draw_target;
#[cfg(feature = "in_memory")]
mod in_memory;
mod iter;
mod meter;
mod state;
mod style;
mod term_like;

pub use crate::draw_target::MeterDrawTarget;
#[cfg(feature = "in_memory")]
pub use crate::in_memory::InMemoryTerm;
pub use crate::iter::{MeterIter, MeterIterator};
pub use crate::meter::{Meter, Progress};
pub use crate::state::{MeterState, REFRESH_INTERVAL};
pub use crate::style::{Bar, MeterStyle, Percent, Spinner, DEFAULT_BAR_WIDTH};
pub use crate::term_like::TermLike;
