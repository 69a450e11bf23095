use std::borrow::Cow;
use std::io;
use std::iter::FusedIterator;

use crate::meter::Meter;
use crate::style::{Bar, MeterStyle};

/// Wraps an iterator to display its progress.
pub trait MeterIterator
where
    Self: Sized + Iterator,
{
    /// Wrap an iterator with a default bar. Uses [`ExactSizeIterator::len()`]
    /// as the maximum value.
    fn progress(self) -> MeterIter<Self>
    where
        Self: ExactSizeIterator,
    {
        let len = i64::try_from(self.len()).unwrap_or(i64::MAX);
        self.progress_count(len)
    }

    /// Wrap an iterator with an explicit element count.
    fn progress_count(self, len: i64) -> MeterIter<Self> {
        self.progress_with(Meter::new(len))
    }

    /// Wrap an iterator with a custom meter.
    fn progress_with<S: MeterStyle>(self, meter: Meter<S>) -> MeterIter<Self, S>;
}

impl<T: Iterator> MeterIterator for T {
    fn progress_with<S: MeterStyle>(self, meter: Meter<S>) -> MeterIter<Self, S> {
        MeterIter::new(self, meter)
    }
}

/// Wraps an iterator or reader to display its progress.
///
/// The meter is shown when the first item is pulled, updated with the
/// number of items (or bytes) seen so far, and finished once the inner
/// iterator is exhausted.
#[derive(Debug)]
pub struct MeterIter<T, S = Bar> {
    it: T,
    pub meter: Meter<S>,
    done: bool,
}

impl<T, S: MeterStyle> MeterIter<T, S> {
    pub fn new(it: T, meter: Meter<S>) -> Self {
        Self {
            it,
            meter,
            done: false,
        }
    }

    /// Builder-like function for setting the underlying meter's label.
    ///
    /// See [`Meter::with_label()`].
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.meter = self.meter.with_label(label);
        self
    }

    /// Builder-like function for setting the underlying meter's right-hand label.
    ///
    /// See [`Meter::with_rlabel()`].
    pub fn with_rlabel(mut self, rlabel: impl Into<Cow<'static, str>>) -> Self {
        self.meter = self.meter.with_rlabel(rlabel);
        self
    }

    /// Consumes the wrapper, returning the inner iterator and the meter.
    pub fn into_parts(self) -> (T, Meter<S>) {
        (self.it, self.meter)
    }

    fn advance(&mut self, delta: i64) {
        if !self.meter.is_visible() {
            self.meter.show();
        }
        let value = self.meter.value().saturating_add(delta);
        self.meter.update(value);
    }

    fn complete(&mut self) {
        if !self.done {
            self.done = true;
            self.meter.finish();
        }
    }
}

impl<I, T: Iterator<Item = I>, S: MeterStyle> Iterator for MeterIter<T, S> {
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.it.next();

        match item {
            Some(_) => self.advance(1),
            None => self.complete(),
        }

        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<T: ExactSizeIterator, S: MeterStyle> ExactSizeIterator for MeterIter<T, S> {
    fn len(&self) -> usize {
        self.it.len()
    }
}

impl<T: DoubleEndedIterator, S: MeterStyle> DoubleEndedIterator for MeterIter<T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.it.next_back();

        match item {
            Some(_) => self.advance(1),
            None => self.complete(),
        }

        item
    }
}

impl<T: FusedIterator, S: MeterStyle> FusedIterator for MeterIter<T, S> {}

impl<R: io::Read, S: MeterStyle> io::Read for MeterIter<R, S> {
    /// Reads from the inner reader, counting bytes towards the meter. A read
    /// of 0 bytes into a non-empty buffer finishes the meter.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.it.read(buf)?;
        if n > 0 {
            self.advance(n as i64);
        } else if !buf.is_empty() {
            self.complete();
        }
        Ok(n)
    }
}
