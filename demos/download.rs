use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use progress_meter::{Meter, MeterIter};
use rand::Rng;

/// Hands out a fixed amount of bytes in small, slow chunks.
struct FakeDownload {
    remaining: usize,
}

impl Read for FakeDownload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut rng = rand::rng();
        thread::sleep(Duration::from_millis(rng.random_range(5..40)));
        let n = buf.len().min(self.remaining).min(rng.random_range(1..4096));
        buf[..n].fill(0);
        self.remaining -= n;
        Ok(n)
    }
}

fn main() -> io::Result<()> {
    let total = 1024 * 1024;
    let meter = Meter::new(total as i64)
        .with_width(30)
        .with_label("downloading")
        .with_rlabel("archive.tar.gz");

    let mut reader = MeterIter::new(FakeDownload { remaining: total }, meter);
    io::copy(&mut reader, &mut io::sink())?;
    Ok(())
}
