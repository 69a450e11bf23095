use std::thread;
use std::time::Duration;

use progress_meter::{Meter, MeterIterator};
use rand::Rng;

fn main() {
    let mut rng = rand::rng();

    // A bar sized from the iterator itself.
    for _ in (0..40).progress().with_label("bar") {
        thread::sleep(Duration::from_millis(rng.random_range(10..80)));
    }

    let words = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta"];
    let lengths: Vec<usize> = words
        .iter()
        .progress_with(Meter::new_percent(words.len() as i64).with_label("measuring"))
        .map(|word| {
            thread::sleep(Duration::from_millis(300));
            word.len()
        })
        .collect();
    println!("lengths: {lengths:?}");

    for _ in (0..20).progress_with(Meter::new_spinner().with_label("spinning")) {
        thread::sleep(Duration::from_millis(100));
    }
}
