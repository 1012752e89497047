use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::warn;

/// The measured durations of every phase, ordered by the name of the phase.
type Phases = Rc<RefCell<BTreeMap<String, Vec<Duration>>>>;

/// Measures the time spent in the phases of an analysis, for example
/// determinization and minimization. Phases that run multiple times are
/// summarized together.
#[derive(Default)]
pub struct Timing {
    phases: Phases,
}

/// Measures a single run of a phase. Must be finished explicitly, a timer
/// that is dropped without finishing records nothing.
pub struct Timer {
    name: String,
    start: Instant,
    phases: Phases,
    finished: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts measuring a run of the phase with the given name.
    pub fn start(&self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            phases: self.phases.clone(),
            finished: false,
        }
    }

    /// Returns the number of finished runs of the given phase.
    pub fn count(&self, name: &str) -> usize {
        self.phases.borrow().get(name).map_or(0, Vec::len)
    }

    /// Writes one line per phase. For a phase that ran more than once the
    /// total is followed by the shortest, longest and average run.
    pub fn write_summary(&self, writer: &mut impl Write) -> io::Result<()> {
        for (name, runs) in self.phases.borrow().iter() {
            let total: Duration = runs.iter().sum();

            match (runs.iter().min(), runs.iter().max()) {
                (Some(min), Some(max)) if runs.len() > 1 => writeln!(
                    writer,
                    "Time {name}: {:.3}s, min: {:.3}s, max: {:.3}s, avg: {:.3}s, n: {}",
                    total.as_secs_f64(),
                    min.as_secs_f64(),
                    max.as_secs_f64(),
                    total.as_secs_f64() / runs.len() as f64,
                    runs.len()
                )?,
                _ => writeln!(writer, "Time {name}: {:.3}s", total.as_secs_f64())?,
            }
        }

        Ok(())
    }
}

impl Timer {
    /// Stops the timer and records the elapsed time for its phase.
    pub fn finish(&mut self) {
        let elapsed = self.start.elapsed();
        debug!("Time {}: {:.3}s", self.name, elapsed.as_secs_f64());

        self.phases
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .push(elapsed);
        self.finished = true;
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Timer {} was dropped before it was finished", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_timing_summarizes_phases() {
        let timing = Timing::new();

        for _ in 0..3 {
            let mut timer = timing.start("minimize");
            timer.finish();
        }

        let mut timer = timing.start("determinize");
        timer.finish();

        // Dropped timers are not recorded.
        drop(timing.start("determinize"));

        assert_eq!(timing.count("minimize"), 3);
        assert_eq!(timing.count("determinize"), 1);
        assert_eq!(timing.count("compare"), 0);

        let mut output = Vec::new();
        timing.write_summary(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Time determinize:"));
        assert!(!lines[0].contains("n:"));
        assert!(lines[1].starts_with("Time minimize:"));
        assert!(lines[1].ends_with("n: 3"));
    }
}
