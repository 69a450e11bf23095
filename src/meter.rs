use std::borrow::Cow;
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use crate::draw_target::MeterDrawTarget;
use crate::state::MeterState;
use crate::style::{Bar, MeterStyle, Percent, Spinner};

/// A single-line progress meter
///
/// The meter owns its state and is driven through `&mut self`: call
/// [`show`](Meter::show) once, [`update`](Meter::update) as work progresses
/// and [`finish`](Meter::finish) at the end. How the progress is drawn is
/// decided by the style `S`.
///
/// None of the display operations fail. If writing to the draw target
/// returns an error, it is reported through the `log` crate and otherwise
/// ignored.
#[derive(Debug)]
pub struct Meter<S = Bar> {
    state: MeterState,
    style: S,
    draw_target: MeterDrawTarget,
}

impl Meter<Bar> {
    /// Creates a new progress bar with a given maximum value
    ///
    /// The bar is [`DEFAULT_BAR_WIDTH`](crate::DEFAULT_BAR_WIDTH) units wide
    /// and draws to stdout.
    pub fn new(max_value: i64) -> Self {
        Self::from_style(max_value, Bar::default())
    }

    /// A convenience builder-like function for a bar with a given width
    ///
    /// A width of 0 selects the default width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.style = Bar::new(width);
        self
    }
}

impl Meter<Spinner> {
    /// Creates a new spinner
    ///
    /// A spinner has no maximum; the values passed to
    /// [`update`](Meter::update) are recorded but do not affect the display.
    pub fn new_spinner() -> Self {
        Self::from_style(0, Spinner::new())
    }
}

impl Meter<Percent> {
    /// Creates a new percentage meter with a given maximum value
    pub fn new_percent(max_value: i64) -> Self {
        Self::from_style(max_value, Percent)
    }
}

impl<S: MeterStyle> Meter<S> {
    /// Creates a meter with the given maximum value and style that draws to stdout
    ///
    /// A maximum of 0 or less is allowed. Such a meter never fills up: bars
    /// stay empty and percentages read 0%.
    pub fn from_style(max_value: i64, style: S) -> Self {
        Self {
            state: MeterState::new(max_value, Instant::now()),
            style,
            draw_target: MeterDrawTarget::stdout(),
        }
    }

    /// A convenience builder-like function for a meter with a given label
    ///
    /// The label is printed in front of the indicator when the meter is shown.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.state.label = label.into();
        self
    }

    /// A convenience builder-like function for a meter with a label to the
    /// right of the indicator
    pub fn with_rlabel(mut self, rlabel: impl Into<Cow<'static, str>>) -> Self {
        self.state.rlabel = rlabel.into();
        self
    }

    /// A convenience builder-like function for a meter with a given starting value
    pub fn with_value(mut self, value: i64) -> Self {
        self.state.value = value;
        self
    }

    /// A convenience builder-like function for a meter with a given draw target
    pub fn with_draw_target(mut self, draw_target: MeterDrawTarget) -> Self {
        self.draw_target = draw_target;
        self
    }

    /// Prints the label and the current state of the meter
    ///
    /// Calling this on a meter that is already visible only restarts the
    /// refresh interval.
    pub fn show(&mut self) {
        report(self.show_at(Instant::now()));
    }

    /// Records a new value and redraws the meter if needed
    ///
    /// The meter is redrawn at most once per
    /// [`REFRESH_INTERVAL`](crate::REFRESH_INTERVAL), and only if the
    /// rendered text changed. Updating a meter that is not shown records the
    /// value without drawing anything.
    pub fn update(&mut self, value: i64) {
        report(self.update_at(Instant::now(), value));
    }

    /// Draws the final state of the meter and ends the line
    ///
    /// Bars and percentages are drawn at their maximum value. Spinners are
    /// wiped, leaving the right-hand label if there is one. A meter that was
    /// never shown is shown first.
    pub fn finish(&mut self) {
        report(self.finish_at(Instant::now()));
    }

    /// Blanks the line the meter is on
    ///
    /// The meter can be brought back with [`show`](Meter::show), which
    /// starts over with the label.
    pub fn hide(&mut self) {
        report(self.hide_at());
    }

    /// Rewinds the meter to a value of 0 without drawing
    ///
    /// The cached rendering is dropped as well, so the next refresh of a
    /// visible meter repaints it even if the text comes out the same.
    pub fn reset(&mut self) {
        self.state.value = 0;
        self.state.line.clear();
    }

    /// Records a new value without drawing.
    pub fn set_value(&mut self, value: i64) {
        self.state.value = value;
    }

    pub fn set_max_value(&mut self, max_value: i64) {
        self.state.max_value = max_value;
    }

    /// Sets the label in front of the indicator
    ///
    /// The label is only printed by [`show`](Meter::show), so changing it on
    /// a visible meter takes effect the next time the meter is shown.
    pub fn set_label(&mut self, label: impl Into<Cow<'static, str>>) {
        self.state.label = label.into();
    }

    /// Sets the label to the right of the indicator, redrawing it right away
    /// if the meter is visible
    pub fn set_rlabel(&mut self, rlabel: impl Into<Cow<'static, str>>) {
        let previous = self.state.rlabel_width();
        self.state.rlabel = rlabel.into();
        if self.state.visible {
            let width = self.style.erase_width(&self.state) + previous;
            let tail = self.tail(&self.state.line);
            report(
                self.draw_target
                    .erase(width)
                    .and_then(|()| self.draw_target.draw(0, &tail)),
            );
        }
    }

    pub fn value(&self) -> i64 {
        self.state.value
    }

    pub fn max_value(&self) -> i64 {
        self.state.max_value
    }

    pub fn label(&self) -> &str {
        &self.state.label
    }

    pub fn rlabel(&self) -> &str {
        &self.state.rlabel
    }

    /// Returns `true` between [`show`](Meter::show) and [`finish`](Meter::finish)
    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// A quick convenience check if the meter draws nowhere
    pub fn is_hidden(&self) -> bool {
        self.draw_target.is_hidden()
    }

    pub fn style(&self) -> &S {
        &self.style
    }

    /// The current state, as handed to the style when rendering
    pub fn state(&self) -> &MeterState {
        &self.state
    }

    pub(crate) fn show_at(&mut self, now: Instant) -> io::Result<()> {
        self.state.last_refresh = now;
        if self.state.visible {
            return Ok(());
        }

        let line = self.style.render(&self.state);
        let mut out = String::new();
        if !self.state.label.is_empty() {
            out.push_str(&self.state.label);
            out.push(' ');
        }
        out.push_str(&self.tail(&line));

        self.state.visible = true;
        self.state.line = line;
        self.draw_target.draw(0, &out)
    }

    pub(crate) fn update_at(&mut self, now: Instant, value: i64) -> io::Result<()> {
        self.state.value = value;
        if !self.state.visible {
            log::trace!("meter updated before it was shown");
            return Ok(());
        }
        if !self.state.should_refresh(now) {
            return Ok(());
        }

        self.state.last_refresh = now;
        self.style.tick();
        self.redraw()
    }

    pub(crate) fn finish_at(&mut self, now: Instant) -> io::Result<()> {
        let rv = self.finish_inner(now);
        self.state.reset_line();
        rv
    }

    fn finish_inner(&mut self, now: Instant) -> io::Result<()> {
        if !self.state.visible {
            self.show_at(now)?;
        }

        self.state.value = self.state.max_value;
        self.state.last_refresh = now;
        if self.style.erases_on_finish() {
            let width = self.style.erase_width(&self.state) + self.state.rlabel_width();
            self.draw_target.erase(width)?;
            self.draw_target.write_line(&self.state.rlabel)
        } else {
            self.redraw()?;
            self.draw_target.write_line("")
        }
    }

    pub(crate) fn hide_at(&mut self) -> io::Result<()> {
        if !self.state.visible {
            return Ok(());
        }

        let width = self.state.label_width()
            + console::measure_text_width(&self.state.line)
            + 1
            + self.state.rlabel_width();
        self.state.reset_line();
        self.draw_target.clear_line(width)
    }

    /// Renders the current state and writes it over the previous rendering
    /// if the text changed.
    fn redraw(&mut self) -> io::Result<()> {
        let line = self.style.render(&self.state);
        if !self.state.line_changed(&line) {
            return Ok(());
        }

        let erase = self.style.erase_width(&self.state) + self.state.rlabel_width();
        let out = self.tail(&line);
        self.state.line = line;
        self.draw_target.draw(erase, &out)
    }

    /// The indicator text followed by the right-hand label, each with a
    /// trailing space.
    fn tail(&self, line: &str) -> String {
        match self.state.rlabel.is_empty() {
            true => format!("{line} "),
            false => format!("{line} {} ", self.state.rlabel),
        }
    }
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        log::debug!("failed to draw progress meter: {err}");
    }
}

/// The display operations shared by every [`Meter`], usable as a trait object
///
/// ```rust,no_run
/// use progress_meter::{Meter, Progress};
///
/// let mut meters: Vec<Box<dyn Progress>> = vec![
///     Box::new(Meter::new(10)),
///     Box::new(Meter::new_percent(10)),
///     Box::new(Meter::new_spinner()),
/// ];
/// for meter in &mut meters {
///     meter.show();
///     meter.update(10);
///     meter.finish();
/// }
/// ```
pub trait Progress {
    fn show(&mut self);
    fn update(&mut self, value: i64);
    fn finish(&mut self);
    fn hide(&mut self);
    fn value(&self) -> i64;
    fn max_value(&self) -> i64;
}

impl<S: MeterStyle> Progress for Meter<S> {
    fn show(&mut self) {
        Meter::show(self)
    }

    fn update(&mut self, value: i64) {
        Meter::update(self, value)
    }

    fn finish(&mut self) {
        Meter::finish(self)
    }

    fn hide(&mut self) {
        Meter::hide(self)
    }

    fn value(&self) -> i64 {
        Meter::value(self)
    }

    fn max_value(&self) -> i64 {
        Meter::max_value(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TermLike;

    #[derive(Debug, Default, Clone)]
    struct Recorder(Arc<Mutex<String>>);

    impl Recorder {
        /// Returns everything written since the last call.
        fn take(&self) -> String {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl TermLike for Recorder {
        fn write_str(&self, s: &str) -> io::Result<()> {
            self.0.lock().unwrap().push_str(s);
            Ok(())
        }

        fn flush(&self) -> io::Result<()> {
            Ok(())
        }
    }

    fn recorded<S: MeterStyle>(meter: Meter<S>) -> (Meter<S>, Recorder) {
        let rec = Recorder::default();
        let meter = meter.with_draw_target(MeterDrawTarget::term_like(Box::new(rec.clone())));
        (meter, rec)
    }

    fn bs(n: usize) -> String {
        "\x08".repeat(n)
    }

    const TICK: Duration = Duration::from_millis(250);

    #[test]
    fn bar_half_then_full() {
        let (mut bar, rec) = recorded(Meter::new(10).with_width(10).with_label("copying"));
        let t0 = Instant::now();

        bar.show_at(t0).unwrap();
        assert_eq!(rec.take(), "copying |          | ");

        bar.update_at(t0 + TICK, 5).unwrap();
        assert_eq!(rec.take(), format!("{}|=====     | ", bs(13)));

        bar.update_at(t0 + TICK * 2, 10).unwrap();
        assert_eq!(rec.take(), format!("{}|==========| ", bs(13)));

        bar.finish_at(t0 + TICK * 2).unwrap();
        assert_eq!(rec.take(), "\n");
        assert!(!bar.is_visible());
        assert_eq!(bar.state().line(), "");
    }

    #[test]
    fn finish_forces_the_full_bar() {
        let (mut bar, rec) = recorded(Meter::new(100).with_width(4));
        let t0 = Instant::now();

        bar.show_at(t0).unwrap();
        bar.update_at(t0 + TICK, 50).unwrap();
        rec.take();

        // within the refresh interval, but finish is not throttled
        bar.update_at(t0 + TICK + Duration::from_millis(10), 90).unwrap();
        assert_eq!(rec.take(), "");
        bar.finish_at(t0 + TICK + Duration::from_millis(20)).unwrap();
        assert_eq!(rec.take(), format!("{}|====| \n", bs(7)));
        assert_eq!(bar.value(), 100);
    }

    #[test]
    fn updates_within_interval_are_throttled() {
        let (mut pct, rec) = recorded(Meter::new_percent(100));
        let t0 = Instant::now();
        pct.show_at(t0).unwrap();
        rec.take();

        pct.update_at(t0 + Duration::from_millis(100), 10).unwrap();
        assert_eq!(rec.take(), "");

        pct.update_at(t0 + TICK, 20).unwrap();
        assert_eq!(rec.take(), format!("{} 20% ", bs(5)));

        pct.update_at(t0 + TICK + Duration::from_millis(249), 30).unwrap();
        assert_eq!(rec.take(), "");
        assert_eq!(pct.value(), 30);

        pct.update_at(t0 + TICK * 2, 30).unwrap();
        assert_eq!(rec.take(), format!("{} 30% ", bs(5)));
    }

    #[test]
    fn unchanged_text_is_not_redrawn() {
        let (mut bar, rec) = recorded(Meter::new(1000));
        let t0 = Instant::now();
        bar.show_at(t0).unwrap();
        bar.update_at(t0 + TICK, 500).unwrap();
        rec.take();

        // 510/1000 still rounds to 5 of 10 units
        bar.update_at(t0 + TICK * 4, 510).unwrap();
        assert_eq!(rec.take(), "");
        assert_eq!(bar.state().line(), "|=====     |");
    }

    #[test]
    fn percent_scenario() {
        let (mut pct, rec) = recorded(Meter::new_percent(200).with_label("processing"));
        let t0 = Instant::now();

        pct.show_at(t0).unwrap();
        assert_eq!(rec.take(), "processing   0% ");

        pct.update_at(t0 + TICK, 100).unwrap();
        assert_eq!(rec.take(), format!("{} 50% ", bs(5)));

        pct.update_at(t0 + TICK * 2, 200).unwrap();
        pct.finish_at(t0 + TICK * 2).unwrap();
        assert_eq!(rec.take(), format!("{}100% \n", bs(5)));
    }

    #[test]
    fn overflow_renders_like_max() {
        let (mut pct, rec) = recorded(Meter::new_percent(50));
        let t0 = Instant::now();
        pct.show_at(t0).unwrap();
        pct.update_at(t0 + TICK, 50).unwrap();
        rec.take();

        pct.update_at(t0 + TICK * 2, 75).unwrap();
        assert_eq!(rec.take(), "");
        assert_eq!(pct.state().line(), "100%");
    }

    #[test]
    fn spinner_rotates_and_erases() {
        let (mut spinner, rec) = recorded(Meter::new_spinner().with_label("working"));
        let t0 = Instant::now();

        spinner.show_at(t0).unwrap();
        assert_eq!(rec.take(), "working | ");

        for (i, glyph) in ["/", "-", "\\", "|", "/"].iter().enumerate() {
            // the value is irrelevant to a spinner
            spinner.update_at(t0 + TICK * (i as u32 + 1), 7).unwrap();
            assert_eq!(rec.take(), format!("{}{glyph} ", bs(2)));
        }

        // throttled ticks do not advance the glyph
        spinner
            .update_at(t0 + TICK * 5 + Duration::from_millis(1), 7)
            .unwrap();
        assert_eq!(rec.take(), "");
        assert_eq!(spinner.style().glyph(), '/');

        spinner.finish_at(t0 + TICK * 6).unwrap();
        assert_eq!(rec.take(), format!("{}  {}\n", bs(2), bs(2)));
    }

    #[test]
    fn spinner_finish_leaves_rlabel() {
        let (mut spinner, rec) = recorded(Meter::new_spinner().with_rlabel("(wait)"));
        let t0 = Instant::now();

        spinner.show_at(t0).unwrap();
        assert_eq!(rec.take(), "| (wait) ");

        spinner.update_at(t0 + TICK, 0).unwrap();
        assert_eq!(rec.take(), format!("{}/ (wait) ", bs(9)));

        spinner.finish_at(t0 + TICK).unwrap();
        assert_eq!(rec.take(), format!("{}{}{}(wait)\n", bs(9), " ".repeat(9), bs(9)));
    }

    #[test]
    fn rlabel_is_redrawn_with_the_bar() {
        let (mut bar, rec) = recorded(Meter::new(4).with_width(4).with_rlabel("a.txt"));
        let t0 = Instant::now();

        bar.show_at(t0).unwrap();
        assert_eq!(rec.take(), "|    | a.txt ");

        bar.update_at(t0 + TICK, 2).unwrap();
        assert_eq!(rec.take(), format!("{}|==  | a.txt ", bs(13)));

        bar.set_rlabel("b");
        assert_eq!(
            rec.take(),
            format!("{}{}{}|==  | b ", bs(13), " ".repeat(13), bs(13))
        );
    }

    #[test]
    fn zero_max_is_safe() {
        let (mut bar, bar_rec) = recorded(Meter::new(0));
        let (mut pct, pct_rec) = recorded(Meter::new_percent(0));
        let t0 = Instant::now();

        bar.show_at(t0).unwrap();
        bar.update_at(t0 + TICK, 5).unwrap();
        bar.finish_at(t0 + TICK).unwrap();
        assert_eq!(bar_rec.take(), "|          | \n");

        pct.show_at(t0).unwrap();
        pct.update_at(t0 + TICK, 5).unwrap();
        pct.finish_at(t0 + TICK).unwrap();
        assert_eq!(pct_rec.take(), "  0% \n");
    }

    #[test]
    fn update_before_show_draws_nothing() {
        let (mut bar, rec) = recorded(Meter::new(10));
        let t0 = Instant::now();

        bar.update_at(t0 + TICK, 5).unwrap();
        assert_eq!(rec.take(), "");
        assert_eq!(bar.value(), 5);
        assert!(!bar.is_visible());

        // showing later renders the recorded value
        bar.show_at(t0 + TICK).unwrap();
        assert_eq!(rec.take(), "|=====     | ");
    }

    #[test]
    fn finish_without_show_prints_final_state() {
        let (mut pct, rec) = recorded(Meter::new_percent(10).with_label("done"));
        pct.finish_at(Instant::now()).unwrap();
        assert_eq!(rec.take(), format!("done   0% {}100% \n", bs(5)));
        assert!(!pct.is_visible());
    }

    #[test]
    fn show_is_idempotent() {
        let (mut bar, rec) = recorded(Meter::new(10).with_label("x"));
        let t0 = Instant::now();

        bar.show_at(t0).unwrap();
        rec.take();
        bar.show_at(t0 + TICK).unwrap();
        assert_eq!(rec.take(), "");
        assert!(bar.is_visible());

        // the second show restarted the refresh interval
        bar.update_at(t0 + TICK + Duration::from_millis(100), 5).unwrap();
        assert_eq!(rec.take(), "");
        bar.update_at(t0 + TICK * 2, 5).unwrap();
        assert_eq!(rec.take(), format!("{}|=====     | ", bs(13)));
    }

    #[test]
    fn hide_blanks_the_line() {
        let (mut pct, rec) = recorded(
            Meter::new_percent(10)
                .with_label("abc")
                .with_rlabel("de"),
        );
        let t0 = Instant::now();

        pct.show_at(t0).unwrap();
        assert_eq!(rec.take(), "abc   0% de ");

        pct.hide_at().unwrap();
        assert_eq!(rec.take(), format!("\r{}\r", " ".repeat(12)));
        assert!(!pct.is_visible());

        // hiding twice is a no-op
        pct.hide_at().unwrap();
        assert_eq!(rec.take(), "");

        pct.set_value(10);
        pct.show_at(t0 + TICK).unwrap();
        assert_eq!(rec.take(), "abc 100% de ");
    }

    #[test]
    fn reset_rewinds_and_repaints() {
        let (mut pct, rec) = recorded(Meter::new_percent(4));
        let t0 = Instant::now();

        pct.show_at(t0).unwrap();
        pct.update_at(t0 + TICK, 2).unwrap();
        rec.take();

        pct.reset();
        assert_eq!(pct.value(), 0);
        assert_eq!(pct.state().line(), "");
        assert!(pct.is_visible());

        pct.update_at(t0 + TICK * 2, 2).unwrap();
        assert_eq!(rec.take(), format!("{} 50% ", bs(5)));
    }

    #[test]
    fn hidden_target_still_tracks_state() {
        let mut bar = Meter::new(10).with_draw_target(MeterDrawTarget::hidden());
        assert!(bar.is_hidden());
        let t0 = Instant::now();

        bar.show_at(t0).unwrap();
        bar.update_at(t0 + TICK, 3).unwrap();
        assert_eq!(bar.state().line(), "|===       |");
        bar.finish_at(t0 + TICK).unwrap();
        assert_eq!(bar.value(), 10);
    }

    #[test]
    fn meters_as_trait_objects() {
        let rec = Recorder::default();
        let target = || MeterDrawTarget::term_like(Box::new(rec.clone()));
        let mut meters: Vec<Box<dyn Progress>> = vec![
            Box::new(Meter::new(4).with_width(4).with_draw_target(target())),
            Box::new(Meter::new_percent(4).with_draw_target(target())),
            Box::new(Meter::new_spinner().with_draw_target(target())),
        ];

        for meter in &mut meters {
            meter.show();
            meter.finish();
        }
        assert_eq!(
            rec.take(),
            format!(
                "|    | {}|====| \n  0% {}100% \n| {}  {}\n",
                bs(7),
                bs(5),
                bs(2),
                bs(2)
            )
        );
        assert_eq!(meters[0].value(), 4);
        assert_eq!(meters[0].max_value(), 4);
    }
}
