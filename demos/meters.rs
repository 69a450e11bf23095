use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use progress_meter::{Meter, Progress};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Bar,
    Percent,
    Spinner,
    All,
}

#[derive(Debug, Parser)]
struct Cli {
    /// Which meter to run
    #[arg(long, value_enum, default_value_t = Kind::All)]
    kind: Kind,
    /// Number of steps to simulate
    #[arg(long, default_value_t = 100)]
    steps: i64,
    /// Milliseconds of "work" per step
    #[arg(long, default_value_t = 50)]
    delay: u64,
    /// Width of the bar
    #[arg(long, default_value_t = 20)]
    width: usize,
}

fn run(meter: &mut dyn Progress, steps: i64, delay: Duration) {
    meter.show();
    for _ in 0..steps {
        let value = meter.value() + 1;
        meter.update(value);
        thread::sleep(delay);
    }
    meter.finish();
}

fn main() {
    let cli = Cli::parse();
    let delay = Duration::from_millis(cli.delay);

    let mut meters: Vec<Box<dyn Progress>> = Vec::new();
    if matches!(cli.kind, Kind::Bar | Kind::All) {
        meters.push(Box::new(
            Meter::new(cli.steps)
                .with_width(cli.width)
                .with_label("downloading")
                .with_rlabel("linux.tar.gz"),
        ));
    }
    if matches!(cli.kind, Kind::Percent | Kind::All) {
        meters.push(Box::new(
            Meter::new_percent(cli.steps)
                .with_label("processing")
                .with_rlabel("done"),
        ));
    }
    if matches!(cli.kind, Kind::Spinner | Kind::All) {
        meters.push(Box::new(
            Meter::new_spinner()
                .with_label("working")
                .with_rlabel("(please wait)"),
        ));
    }

    for meter in meters.iter_mut() {
        run(meter.as_mut(), cli.steps, delay);
    }
}
