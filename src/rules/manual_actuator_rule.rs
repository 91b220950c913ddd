use log::{debug, info};
use crate::models::{DigitalLevel, EventRecord, OperatingMode, ReportedState, SignalTransition};
use crate::rules::TransitionRule;

/// Logs an actuator switching on while its machine is out of automatic mode
///
/// The guard reads the mode-select flag from the reported snapshot of the same pass,
/// not from the cache, so it reflects the flag at fetch time
pub struct ManualActuatorRule {
    signal: &'static str,
    mode_signal: &'static str,
    machine: &'static str,
    comment: &'static str,
}

impl ManualActuatorRule {
    pub fn new(signal: &'static str, mode_signal: &'static str, machine: &'static str, comment: &'static str) -> Self {
        Self { signal, mode_signal, machine, comment }
    }
}

impl TransitionRule for ManualActuatorRule {
    fn name(&self) -> &'static str {
        "ManualActuatorRule"
    }

    fn apply(&self, transition: &SignalTransition, reported: &ReportedState) -> Vec<EventRecord> {
        if transition.signal_id() != self.signal || !transition.is_rise() {
            return vec![];
        }

        if reported.level(self.mode_signal) != Some(DigitalLevel::Off) {
            debug!("{} rose but {} is not \"00\"; no manual event", self.signal, self.mode_signal);
            return vec![];
        }

        info!("{}: {}", self.machine, self.comment);
        vec![EventRecord::event(self.machine, OperatingMode::Manual, self.comment, self.signal, transition.timestamp)]
    }
}
