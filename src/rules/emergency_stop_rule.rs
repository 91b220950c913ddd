use log::warn;
use crate::models::{DigitalLevel, EventRecord, OperatingMode, ReportedState, SignalTransition};
use crate::rules::TransitionRule;

/// A machine affected by the emergency input, with the flag that tells its mode
#[derive(Debug, Clone)]
pub struct MachineMode {
    pub machine: &'static str,
    /// Mode-select flag; "01" at fetch time means automatic, anything else manual
    pub mode_signal: &'static str,
    pub automatic_comment: &'static str,
    pub manual_comment: &'static str,
}

/// Logs an emergency stop once per machine when the emergency input falls
///
/// Every machine gets a record regardless of whether it was running; the mode of each one
/// is decided independently from its own mode-select flag
pub struct EmergencyStopRule {
    signal: &'static str,
    machines: Vec<MachineMode>,
}

impl EmergencyStopRule {
    pub fn new(signal: &'static str, machines: Vec<MachineMode>) -> Self {
        Self { signal, machines }
    }
}

impl TransitionRule for EmergencyStopRule {
    fn name(&self) -> &'static str {
        "EmergencyStopRule"
    }

    fn apply(&self, transition: &SignalTransition, reported: &ReportedState) -> Vec<EventRecord> {
        if transition.signal_id() != self.signal || !transition.is_fall() {
            return vec![];
        }

        warn!("Emergency input {} fell", self.signal);
        self.machines.iter()
            .map(|m| {
                let (mode, comment) = if reported.level(m.mode_signal) == Some(DigitalLevel::On) {
                    (OperatingMode::Automatic, m.automatic_comment)
                } else {
                    (OperatingMode::Manual, m.manual_comment)
                };
                EventRecord::event(m.machine, mode, comment, self.signal, transition.timestamp)
            })
            .collect()
    }
}
