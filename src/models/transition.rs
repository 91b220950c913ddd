//! # Signal Transitions

//! A `SignalTransition` is the change of one monitored signal between the cached value and the
//! freshly reported one. Raw codes are decoded into `DigitalLevel`s when the transition is built,
//! so rules only ever reason about levels.

use chrono::{DateTime, Utc};
use crate::models::{DigitalLevel, MonitoredSignal};

/// True iff the level went from `Off` to `On`
pub fn is_rise(previous: Option<DigitalLevel>, current: Option<DigitalLevel>) -> bool {
    matches!((previous, current), (Some(DigitalLevel::Off), Some(DigitalLevel::On)))
}

/// True iff the level went from `On` to `Off`
pub fn is_fall(previous: Option<DigitalLevel>, current: Option<DigitalLevel>) -> bool {
    matches!((previous, current), (Some(DigitalLevel::On), Some(DigitalLevel::Off)))
}

/// Represents a change of a monitored signal detected during a processing pass
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTransition {
    /// The signal that changed
    pub signal: &'static MonitoredSignal,
    /// Decoded previous level, `None` if the cached code was not "00"/"01"
    pub previous: Option<DigitalLevel>,
    /// Decoded current level, `None` if the reported code was not "00"/"01"
    pub current: Option<DigitalLevel>,
    /// Time the snapshot was fetched; shared by every record of the pass
    pub timestamp: DateTime<Utc>,
}

impl SignalTransition {
    pub fn new(signal: &'static MonitoredSignal, previous: &str, current: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            signal,
            previous: DigitalLevel::from_code(previous),
            current: DigitalLevel::from_code(current),
            timestamp,
        }
    }

    pub fn signal_id(&self) -> &'static str {
        self.signal.id
    }

    pub fn is_rise(&self) -> bool {
        is_rise(self.previous, self.current)
    }

    pub fn is_fall(&self) -> bool {
        is_fall(self.previous, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{find_signal, EMERGENCY};

    #[test]
    fn edges_need_both_levels_recognised() {
        use DigitalLevel::{Off, On};
        assert!(is_rise(Some(Off), Some(On)));
        assert!(!is_rise(Some(On), Some(On)));
        assert!(!is_rise(None, Some(On)));
        assert!(is_fall(Some(On), Some(Off)));
        assert!(!is_fall(Some(On), None));
        assert!(!is_fall(Some(Off), Some(On)));
    }

    #[test]
    fn unknown_codes_are_neither_rise_nor_fall() {
        let signal = find_signal(EMERGENCY).unwrap();
        let transition = SignalTransition::new(signal, "02", "01", Utc::now());
        assert!(!transition.is_rise());
        assert!(!transition.is_fall());

        let transition = SignalTransition::new(signal, "01", "00", Utc::now());
        assert!(transition.is_fall());
        assert_eq!(transition.signal_id(), EMERGENCY);
    }
}
