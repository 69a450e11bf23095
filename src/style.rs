use std::fmt;

use crate::state::MeterState;

/// Width of a [`Bar`] between its brackets when none is configured.
pub const DEFAULT_BAR_WIDTH: usize = 10;

const SPINNER_GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

/// Controls how a meter renders its state.
///
/// A style turns the [`MeterState`] into the text shown on screen and knows
/// how many columns must be backed over to erase what it drew before. The
/// [`Meter`](crate::Meter) driving it takes care of throttling, labels and
/// the line lifecycle.
pub trait MeterStyle: fmt::Debug {
    /// Advances any internal animation by one refresh tick.
    ///
    /// Called right before [`render`](MeterStyle::render) whenever the
    /// refresh interval elapsed.
    fn tick(&mut self) {}

    /// Renders the indicator for the given state.
    fn render(&self, state: &MeterState) -> String;

    /// The number of columns to back over to erase the previous rendering,
    /// including the space that follows it.
    fn erase_width(&self, state: &MeterState) -> usize;

    /// Whether the indicator is wiped off the line on finish instead of
    /// showing a final rendering.
    fn erases_on_finish(&self) -> bool {
        false
    }
}

/// A bracketed bar, `|=====     |`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    width: usize,
}

impl Bar {
    /// Creates a bar with `width` units between the brackets.
    ///
    /// A width of 0 selects [`DEFAULT_BAR_WIDTH`].
    pub fn new(width: usize) -> Self {
        Self {
            width: match width {
                0 => DEFAULT_BAR_WIDTH,
                width => width,
            },
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of filled units for the given state, always within `0..=width`.
    pub fn filled_units(&self, state: &MeterState) -> usize {
        state.scaled(self.width as u64) as usize
    }
}

impl Default for Bar {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl MeterStyle for Bar {
    fn render(&self, state: &MeterState) -> String {
        let filled = self.filled_units(state);
        format!(
            "|{}{}|",
            "=".repeat(filled),
            " ".repeat(self.width - filled)
        )
    }

    fn erase_width(&self, _state: &MeterState) -> usize {
        // two brackets and the trailing space
        self.width + 3
    }
}

/// A rotating `|/-\` glyph for work of unknown length.
///
/// The value passed to [`Meter::update`](crate::Meter::update) is ignored;
/// the glyph advances once per refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spinner {
    idx: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The glyph that is currently shown.
    pub fn glyph(&self) -> char {
        SPINNER_GLYPHS[self.idx]
    }
}

impl MeterStyle for Spinner {
    fn tick(&mut self) {
        self.idx = (self.idx + 1) % SPINNER_GLYPHS.len();
    }

    fn render(&self, _state: &MeterState) -> String {
        self.glyph().to_string()
    }

    fn erase_width(&self, _state: &MeterState) -> usize {
        2
    }

    fn erases_on_finish(&self) -> bool {
        true
    }
}

/// A right-aligned percentage, ` 42%`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Percent;

impl Percent {
    pub fn new() -> Self {
        Percent
    }

    /// The percentage for the given state, always within `0..=100`.
    ///
    /// A meter without a positive maximum reads 0%.
    pub fn percentage(&self, state: &MeterState) -> u8 {
        state.scaled(100) as u8
    }
}

impl MeterStyle for Percent {
    fn render(&self, state: &MeterState) -> String {
        format!("{:3}%", self.percentage(state))
    }

    fn erase_width(&self, _state: &MeterState) -> usize {
        5
    }
}
