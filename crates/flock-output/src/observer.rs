//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use flock_agent::HuntingState;
use flock_core::SimClock;
use flock_sim::{SimObserver, StepView};

use crate::row::{AgentSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a summary row every step and an agent
/// snapshot every `snapshot_interval` steps to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, view: &StepView<'_>) {
        let in_state = |s: HuntingState| view.predators.iter().filter(|p| p.state() == s).count() as u64;
        let row = StepSummaryRow {
            step:                view.report.step.0,
            time:                view.clock.elapsed_secs,
            prey_alive:          view.prey.len() as u64,
            caught:              view.report.caught() as u64,
            predators_attacking: in_state(HuntingState::Attack),
            predators_resting:   in_state(HuntingState::Rest),
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, view: &StepView<'_>) {
        let step = view.report.step.0;
        let rows: Vec<AgentSnapshotRow> = view
            .prey
            .iter()
            .map(|b| AgentSnapshotRow::prey(step, b))
            .chain(view.predators.iter().map(|p| AgentSnapshotRow::predator(step, p)))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _clock: &SimClock) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
