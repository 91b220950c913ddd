pub mod rule_evaluator;
pub mod mode_select_rule;
pub mod manual_actuator_rule;
pub mod emergency_stop_rule;

pub use rule_evaluator::*;
pub use mode_select_rule::ModeSelectRule;
pub use manual_actuator_rule::ManualActuatorRule;
pub use emergency_stop_rule::{EmergencyStopRule, MachineMode};

/// Machine A, driven by the mode-select flag `M..1:22-1`
pub const VULCANIZER: &str = "Vulcanizadora";
/// Machine B, driven by the mode-select flag `M..1:23-1`
pub const CENTRIFUGE: &str = "Horno centrifugo";
