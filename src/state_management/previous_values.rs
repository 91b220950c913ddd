use std::collections::HashMap;

/// Last observed value of each monitored signal
///
/// Owned by whoever runs processing passes and handed to each pass by `&mut`, so its lifetime
/// and sharing are decided by the caller. Nothing is persisted; a fresh cache means every
/// signal starts with no previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviousValues {
    values: HashMap<String, String>,
}

impl PreviousValues {
    pub fn new() -> Self {
        Self { values: HashMap::new() }
    }

    /// The previous raw value of `signal`, `None` until the signal has been observed once
    pub fn get(&self, signal: &str) -> Option<&str> {
        self.values.get(signal).map(String::as_str)
    }

    /// Records the value observed for `signal` in the current pass, returning the replaced one
    pub fn set(&mut self, signal: &str, value: impl Into<String>) -> Option<String> {
        self.values.insert(signal.to_string(), value.into())
    }

    /// Forgets `signal`, so its next value is treated as a first observation
    pub fn remove(&mut self, signal: &str) -> Option<String> {
        self.values.remove(signal)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PreviousValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_reports_previous() {
        let mut cache = PreviousValues::new();
        assert_eq!(cache.get("M..1:22-1"), None);
        assert_eq!(cache.set("M..1:22-1", "01"), None);
        assert_eq!(cache.set("M..1:22-1", "00"), Some("01".to_string()));
        assert_eq!(cache.get("M..1:22-1"), Some("00"));
        assert_eq!(cache.len(), 1);
    }
}
