//! # PLC Signal Representation

//! This module defines the fixed set of PLC I/O points the bridge monitors, how each one is classified
//! (digital or analog), and the `DigitalLevel` type raw "00"/"01" codes are translated into at the ingestion boundary.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Mode-select flag of the vulcanizadora (machine A); "01" while it runs in automatic mode
pub const MODE_A_SELECT: &str = "M..1:22-1";
/// Mode-select flag of the Horno centrifugo (machine B); "01" while it runs in automatic mode
pub const MODE_B_SELECT: &str = "M..1:23-1";
/// Piston output of the Horno centrifugo
pub const PISTON: &str = "Q..1:10-1";
/// Motor output of the Horno centrifugo
pub const CENTRIFUGE_MOTOR: &str = "Q..1:8-1";
/// Heater (resistencias) output of the vulcanizadora
pub const HEATER: &str = "Q..1:9-1";
/// Motor output of the vulcanizadora
pub const VULCANIZER_MOTOR: &str = "Q..1:12-1";
/// Emergency-stop input, shared by both machines
pub const EMERGENCY: &str = "I..1:5-1";
/// Vulcanizadora pressure transducer
pub const PRESSURE: &str = "AI..4:3-1";
/// Vulcanizadora temperature probe
pub const TEMPERATURE: &str = "AI..4:1-1";

/// Whether a signal carries a binary level or a continuous reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Binary I/O point reported as "00"/"01"
    Digital,
    /// Continuous reading reported as a numeric string, with its engineering unit
    Analog { unit: &'static str },
}

/// One PLC I/O point from the monitored set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitoredSignal {
    /// The signal identifier as it appears in the reported shadow state
    pub id: &'static str,
    /// Human readable label stored alongside readings
    pub label: &'static str,
    pub kind: SignalKind,
}

impl MonitoredSignal {
    const fn digital(id: &'static str, label: &'static str) -> Self {
        Self { id, label, kind: SignalKind::Digital }
    }

    const fn analog(id: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self { id, label, kind: SignalKind::Analog { unit } }
    }

    pub fn is_analog(&self) -> bool {
        matches!(self.kind, SignalKind::Analog { .. })
    }

    /// The engineering unit of an analog signal, `None` for digital ones
    pub fn unit(&self) -> Option<&'static str> {
        match self.kind {
            SignalKind::Analog { unit } => Some(unit),
            SignalKind::Digital => None,
        }
    }
}

/// The monitored set, in processing order: seven digital points followed by two analog ones
pub static MONITORED_SIGNALS: [MonitoredSignal; 9] = [
    MonitoredSignal::digital(MODE_A_SELECT, "Auto Vulcanizadora"),
    MonitoredSignal::digital(MODE_B_SELECT, "Auto Centrifugo"),
    MonitoredSignal::digital(PISTON, "Pistón"),
    MonitoredSignal::digital(CENTRIFUGE_MOTOR, "Motor centrifugo"),
    MonitoredSignal::digital(HEATER, "Resistencias"),
    MonitoredSignal::digital(VULCANIZER_MOTOR, "Motor vulcanizadora"),
    MonitoredSignal::digital(EMERGENCY, "Emergencia"),
    MonitoredSignal::analog(PRESSURE, "Presión vulcanizadora", "bar"),
    MonitoredSignal::analog(TEMPERATURE, "Temperatura vulcanizadora", "°C"),
];

/// Finds a signal of the monitored set by its identifier
pub fn find_signal(id: &str) -> Option<&'static MonitoredSignal> {
    MONITORED_SIGNALS.iter().find(|signal| signal.id == id)
}

/// Level of a digital signal, decoded from its "00"/"01" wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitalLevel {
    Off,
    On,
}

impl DigitalLevel {
    /// Decodes a reported code. Anything other than exactly "00" or "01" is unrecognised
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "00" => Some(DigitalLevel::Off),
            "01" => Some(DigitalLevel::On),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DigitalLevel::Off => "00",
            DigitalLevel::On => "01",
        }
    }
}

impl fmt::Display for DigitalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
