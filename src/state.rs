use std::borrow::Cow;
use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Minimum wall-clock time between two redraws of a meter.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(250);

/// The state of a meter at a moment in time.
///
/// This is what a [`MeterStyle`](crate::MeterStyle) renders from. It is
/// owned by the [`Meter`](crate::Meter) driving it.
#[derive(Clone, Debug)]
pub struct MeterState {
    pub(crate) value: i64,
    pub(crate) max_value: i64,
    pub(crate) label: Cow<'static, str>,
    pub(crate) rlabel: Cow<'static, str>,
    pub(crate) last_refresh: Instant,
    pub(crate) visible: bool,
    /// The text that is currently on screen (without the trailing space).
    pub(crate) line: String,
}

impl MeterState {
    pub(crate) fn new(max_value: i64, now: Instant) -> Self {
        Self {
            value: 0,
            max_value,
            label: Cow::Borrowed(""),
            rlabel: Cow::Borrowed(""),
            last_refresh: now,
            visible: false,
            line: String::new(),
        }
    }

    /// The raw value as last passed to `update`.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn max_value(&self) -> i64 {
        self.max_value
    }

    /// The value clamped to `[0, max_value]`.
    ///
    /// A non-positive maximum clamps every value to 0.
    pub fn clamped_value(&self) -> i64 {
        if self.max_value <= 0 {
            return 0;
        }
        self.value.clamp(0, self.max_value)
    }

    /// Returns the completion as a floating-point number between 0 and 1
    ///
    /// A meter without a positive maximum is never complete and reports 0.
    pub fn fraction(&self) -> f64 {
        if self.max_value <= 0 {
            return 0.0;
        }
        self.clamped_value() as f64 / self.max_value as f64
    }

    /// `round(clamped_value * scale / max_value)` in exact integer arithmetic,
    /// rounding halves up. Always within `0..=scale`; 0 without a positive maximum.
    ///
    /// `scale` is a display width or 100, well below the `2^63` that would
    /// overflow the intermediate product.
    pub fn scaled(&self, scale: u64) -> u64 {
        if self.max_value <= 0 {
            return 0;
        }
        let value = self.clamped_value() as u128;
        let max = self.max_value as u128;
        let scaled = (2 * value * scale as u128 + max) / (2 * max);
        scaled.min(scale as u128) as u64
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label printed to the right of the indicator.
    pub fn rlabel(&self) -> &str {
        &self.rlabel
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The text that was rendered last, empty before the first draw.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns `true` if at least [`REFRESH_INTERVAL`] passed since the last refresh.
    pub fn should_refresh(&self, now: Instant) -> bool {
        // a clock running backwards never refreshes
        now.checked_duration_since(self.last_refresh)
            .is_some_and(|elapsed| elapsed >= REFRESH_INTERVAL)
    }

    /// Returns `true` if `line` differs from what is currently on screen.
    pub fn line_changed(&self, line: &str) -> bool {
        self.line != line
    }

    /// Number of columns taken by the right-hand label, including its separator.
    pub(crate) fn rlabel_width(&self) -> usize {
        match self.rlabel.is_empty() {
            true => 0,
            false => console::measure_text_width(&self.rlabel) + 1,
        }
    }

    /// Number of columns taken by the left-hand label, including its separator.
    pub(crate) fn label_width(&self) -> usize {
        match self.label.is_empty() {
            true => 0,
            false => console::measure_text_width(&self.label) + 1,
        }
    }

    pub(crate) fn reset_line(&mut self) {
        self.visible = false;
        self.line.clear();
    }
}
