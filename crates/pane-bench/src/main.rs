use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use pane_wm::{
    Bounds, EdgeShift, FrameSize, Gesture, PaneManager, PanelRect, PointerEvent,
    PointerEventKind, RecordingEngine, StyledPanel,
};

#[derive(Parser, Debug)]
#[command(
    name = "pane-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event-throughput benchmark for the pane drag/resize pipeline"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// How many panes to attach and cycle gestures across.
    #[arg(short = 'p', long = "panes", value_name = "COUNT", default_value_t = 16)]
    panes: usize,

    /// Pointer steps per synthetic gesture before release.
    #[arg(short = 's', long = "steps", value_name = "STEPS", default_value_t = 24)]
    steps_per_gesture: u32,
}

impl BenchCli {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }
}

struct BenchConfig {
    duration: Duration,
    panes: usize,
    steps_per_gesture: u32,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.5..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.5 and 600 seconds".to_string());
        }
        if !(1..=4096).contains(&cli.panes) {
            return Err("panes must be between 1 and 4096".to_string());
        }
        if !(1..=10_000).contains(&cli.steps_per_gesture) {
            return Err("steps must be between 1 and 10000".to_string());
        }
        Ok(Self {
            duration: cli.duration(),
            panes: cli.panes,
            steps_per_gesture: cli.steps_per_gesture,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config);
    println!("{}", stats.final_report(&config));

    Ok(())
}

type BenchManager = PaneManager<String, StyledPanel, RecordingEngine<String>>;

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let mut manager: BenchManager = PaneManager::new(RecordingEngine::new());
    let delivered = Rc::new(Cell::new(0u64));

    for index in 0..config.panes {
        let handle = format!("pane-{index:04}");
        let surface = StyledPanel::with_rect(PanelRect::new(
            (index % 32) as f64 * 24.0,
            (index / 32) as f64 * 24.0,
            320.0,
            240.0,
        ))
        .with_parent(Bounds::new(1920.0, 1080.0));
        let counter = Rc::clone(&delivered);
        manager
            .attach(handle, surface, move |_delta| {
                counter.set(counter.get() + 1);
            })
            .expect("recording engine never rejects installs");
    }

    let mut stats = BenchStats::new();
    let mut noise = NoiseField::seeded_from_clock();
    let mut pane_cursor = 0usize;

    loop {
        let handle = format!("pane-{:04}", pane_cursor % config.panes);
        pane_cursor = pane_cursor.wrapping_add(1);

        let gesture_start = Instant::now();
        pump_gesture(&mut manager, &mut noise, &handle, config, &mut stats);
        stats.record_gesture(gesture_start.elapsed());

        if stats.elapsed() >= config.duration {
            break;
        }
    }

    stats.delivered = delivered.get();
    stats.dropped = manager.dropped_changes();
    stats.mark_completed();
    stats
}

/// Drive one synthetic gesture: alternate drags and resizes pane by pane,
/// with the occasional anomalous frame mixed in so the guard path is part
/// of what gets measured.
fn pump_gesture(
    manager: &mut BenchManager,
    noise: &mut NoiseField,
    handle: &str,
    config: &BenchConfig,
    stats: &mut BenchStats,
) {
    let resizing = (noise.next() & 1) == 0;
    for _ in 0..config.steps_per_gesture {
        let kind = if resizing {
            let width = 160.0 + (noise.next() % 640) as f64;
            // one frame in 16 reports a zero dimension, like the real engine
            let height = if (noise.next() & 0xF) == 0 {
                0.0
            } else {
                120.0 + (noise.next() % 480) as f64
            };
            PointerEventKind::ResizeMove {
                rect: FrameSize { width, height },
                delta_rect: EdgeShift {
                    left: (noise.next() % 5) as f64 - 2.0,
                    top: 0.0,
                },
            }
        } else {
            PointerEventKind::DragMove {
                dx: (noise.next() % 9) as f64 - 4.0,
                dy: (noise.next() % 9) as f64 - 4.0,
            }
        };
        manager.handle_event(&PointerEvent::new(handle.to_string(), kind));
        stats.record_event();
    }
    let gesture = if resizing {
        Gesture::Resize
    } else {
        Gesture::Drag
    };
    manager.handle_event(&PointerEvent::new(
        handle.to_string(),
        PointerEventKind::GestureEnd { gesture },
    ));
    stats.record_event();
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    events: u64,
    gestures: u64,
    delivered: u64,
    dropped: u64,
    total_gesture_time: Duration,
    slowest_gesture: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            events: 0,
            gestures: 0,
            delivered: 0,
            dropped: 0,
            total_gesture_time: Duration::ZERO,
            slowest_gesture: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    fn record_gesture(&mut self, took: Duration) {
        self.gestures = self.gestures.saturating_add(1);
        self.total_gesture_time += took;
        if took > self.slowest_gesture {
            self.slowest_gesture = took;
        }
    }

    fn average_gesture_us(&self) -> f64 {
        if self.gestures == 0 {
            return 0.0;
        }
        (self.total_gesture_time.as_secs_f64() / self.gestures as f64) * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let events_per_second = if elapsed > 0.0 {
            self.events as f64 / elapsed
        } else {
            0.0
        };
        // guarded-out frames plus gesture ends that needed no correction
        let quiet = self.events.saturating_sub(self.delivered + self.dropped);

        indoc::formatdoc!(
            r#"
            Pane bench completed.
            Duration: {elapsed:.2}s (target {target:.2}s) | Panes: {panes}
            Events: {events} total (~{events_per_sec:.0}/s)
            Gestures: {gestures} | avg {avg:.1} us | worst {worst:.1} us
            Delivered: {delivered} | Quiet: {quiet} | Dropped: {dropped}
            "#,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            panes = config.panes,
            events = self.events,
            events_per_sec = events_per_second,
            gestures = self.gestures,
            avg = self.average_gesture_us(),
            worst = self.slowest_gesture.as_secs_f64() * 1_000_000.0,
            delivered = self.delivered,
            quiet = quiet,
            dropped = self.dropped,
        )
    }
}

struct NoiseField {
    state: u64,
}

impl NoiseField {
    fn seeded_from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ 0xA5A5_A5A5_1234_5678;
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
}
