use std::time::Instant;

/// Accumulates the time spent between `start` and `stop` calls.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Timer {
    pub total_time: u128,
    pub laps: usize,
    curr: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self { total_time: 0, laps: 0, curr: Instant::now() }
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn start(&mut self) {
        self.curr = Instant::now();
    }

    /// Ends the current lap and returns its duration in nanoseconds.
    #[inline(always)]
    pub fn stop(&mut self) -> u128 {
        let diff = self.curr.elapsed().as_nanos();
        self.total_time += diff;
        self.laps += 1;
        diff
    }

    /// Average nanoseconds per `unit` over all laps, e.g. per input symbol.
    pub fn nanos_per(&self, units: usize) -> f64 {
        if units == 0 {
            return 0.0;
        }
        self.total_time as f64 / units as f64
    }
}

#[test]
fn test_timer() {
    use std::{thread, time};

    let mut timer = Timer::new();
    timer.start();

    thread::sleep(time::Duration::from_millis(20));

    let lap = timer.stop();

    assert!(lap >= 20_000_000);
    assert_eq!(timer.total_time, lap);
    assert_eq!(timer.laps, 1);
    assert!(timer.nanos_per(2) >= 10_000_000.0);
    assert_eq!(timer.nanos_per(0), 0.0);
}
