use std::sync::Arc;
use log::debug;
use crate::models::{EventRecord, ReportedState, SignalTransition};
use crate::models::{CENTRIFUGE_MOTOR, EMERGENCY, HEATER, MODE_A_SELECT, MODE_B_SELECT, PISTON, VULCANIZER_MOTOR};
use crate::rules::{EmergencyStopRule, ManualActuatorRule, MachineMode, ModeSelectRule, CENTRIFUGE, VULCANIZER};

/// A rule that classifies a single signal transition into zero or more event records
///
/// Rules are pure: they see the transition and the reported snapshot of the same pass, nothing else
pub trait TransitionRule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Applies the rule to a transition
    ///
    /// # Arguments
    ///
    /// * `transition`: The change that was detected, with decoded levels and the fetch-time timestamp
    /// * `reported`: The full reported snapshot of the pass, used for guards on other signals
    ///
    /// # Returns
    ///
    /// The records this rule emits for the transition, possibly none
    fn apply(&self, transition: &SignalTransition, reported: &ReportedState) -> Vec<EventRecord>;
}

/// Runs every registered rule against a transition, collecting what they emit
#[derive(Default, Clone)]
pub struct RuleEvaluator {
    rules: Vec<Arc<dyn TransitionRule>>,
}

impl RuleEvaluator {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Arc<dyn TransitionRule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluates all rules independently; a single transition may yield records from several of them
    pub fn evaluate(&self, transition: &SignalTransition, reported: &ReportedState) -> Vec<EventRecord> {
        let mut records = Vec::new();
        for rule in &self.rules {
            let emitted = rule.apply(transition, reported);
            if !emitted.is_empty() {
                debug!("{} emitted {} record(s) for {}", rule.name(), emitted.len(), transition.signal_id());
            }
            records.extend(emitted);
        }
        records
    }
}

/// Builds the evaluator with the plant's rule table
///
/// * Mode-select rise/fall on either machine logs automatic mode entered/ended
/// * Actuator rises log a manual activation only while the owning machine's mode-select reads "00"
/// * An emergency fall logs one record per machine, each with that machine's current mode
pub fn create_default_evaluator() -> RuleEvaluator {
    let mut evaluator = RuleEvaluator::new();

    evaluator.add_rule(Arc::new(ModeSelectRule::new(
        MODE_A_SELECT,
        "vulcanizadora",
        "Vulcanizadora activada en modo automático",
        "Modo automático finalizado de la vulcanizadora",
    )));
    evaluator.add_rule(Arc::new(ModeSelectRule::new(
        MODE_B_SELECT,
        CENTRIFUGE,
        "Horno centrifugo activado en modo automático",
        "Modo automático finalizado del Horno centrifugo",
    )));

    evaluator.add_rule(Arc::new(ManualActuatorRule::new(PISTON, MODE_B_SELECT, CENTRIFUGE, "Pistón activado")));
    evaluator.add_rule(Arc::new(ManualActuatorRule::new(CENTRIFUGE_MOTOR, MODE_B_SELECT, CENTRIFUGE, "Motor del horno centrifugo activado")));
    evaluator.add_rule(Arc::new(ManualActuatorRule::new(HEATER, MODE_A_SELECT, VULCANIZER, "Resistencias activadas")));
    evaluator.add_rule(Arc::new(ManualActuatorRule::new(VULCANIZER_MOTOR, MODE_A_SELECT, VULCANIZER, "Motor vulcanizadora activado")));

    evaluator.add_rule(Arc::new(EmergencyStopRule::new(EMERGENCY, vec![
        MachineMode {
            machine: VULCANIZER,
            mode_signal: MODE_A_SELECT,
            automatic_comment: "Emergencia en modo automático vulcanizadora",
            manual_comment: "Emergencia en modo manual vulcanizadora",
        },
        MachineMode {
            machine: CENTRIFUGE,
            mode_signal: MODE_B_SELECT,
            automatic_comment: "Emergencia en modo automático centrifugadora",
            manual_comment: "Emergencia en modo manual centrifugadora",
        },
    ])));

    evaluator
}
