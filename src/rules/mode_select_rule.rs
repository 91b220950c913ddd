use log::info;
use crate::models::{EventRecord, OperatingMode, ReportedState, SignalTransition};
use crate::rules::TransitionRule;

/// Logs a machine entering and leaving automatic mode from its mode-select flag
pub struct ModeSelectRule {
    signal: &'static str,
    machine: &'static str,
    entered_comment: &'static str,
    ended_comment: &'static str,
}

impl ModeSelectRule {
    pub fn new(signal: &'static str, machine: &'static str, entered_comment: &'static str, ended_comment: &'static str) -> Self {
        Self { signal, machine, entered_comment, ended_comment }
    }
}

impl TransitionRule for ModeSelectRule {
    fn name(&self) -> &'static str {
        "ModeSelectRule"
    }

    fn apply(&self, transition: &SignalTransition, _reported: &ReportedState) -> Vec<EventRecord> {
        if transition.signal_id() != self.signal {
            return vec![];
        }

        let comment = if transition.is_rise() {
            self.entered_comment
        } else if transition.is_fall() {
            self.ended_comment
        } else {
            return vec![];
        };

        info!("{}: {}", self.machine, comment);
        vec![EventRecord::event(self.machine, OperatingMode::Automatic, comment, self.signal, transition.timestamp)]
    }
}
