use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use crate::errors::{BridgeError, BridgeResult};
use crate::models::{EventRecord, ReportedState, SignalTransition, MONITORED_SIGNALS};
use crate::repositories::Repository;
use crate::rules::RuleEvaluator;
use crate::services::ShadowService;
use crate::state_management::PreviousValues;

/// Counters describing one processing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Monitored signals present in the snapshot
    pub signals_seen: usize,
    /// Analog readings written to the store
    pub readings_written: usize,
    /// Rule events written to the store
    pub events_written: usize,
    /// Records the store did not accept (including skipped inserts without credentials)
    pub failed_writes: usize,
}

/// Turns one snapshot of reported signal state into store records
pub struct ChangeProcessor {
    /// Source of the reported state
    shadow: Arc<dyn ShadowService>,
    /// Sink for readings and events
    repository: Arc<dyn Repository<EventRecord>>,
    evaluator: RuleEvaluator,
}

impl ChangeProcessor {
    /// Creates a new `ChangeProcessor`.
    ///
    /// # Arguments
    ///
    /// * `shadow` - The shadow service the reported state is fetched from.
    /// * `repository` - The repository records are appended to.
    /// * `evaluator` - The rules applied to digital transitions.
    pub fn new(shadow: Arc<dyn ShadowService>, repository: Arc<dyn Repository<EventRecord>>, evaluator: RuleEvaluator) -> Self {
        Self { shadow, repository, evaluator }
    }

    /// Runs one processing pass against the current shadow.
    ///
    /// Fetches the reported state once, then processes it with a single fetch-time timestamp.
    ///
    /// # Arguments
    ///
    /// * `cache` - The previous-value cache owned by the caller; updated in place.
    ///
    /// # Returns
    ///
    /// A `PassSummary`, or a `BridgeError` if the shadow could not be fetched or has no reported state.
    /// Failed record writes do not fail the pass.
    pub async fn run_pass(&self, cache: &mut PreviousValues) -> BridgeResult<PassSummary> {
        let start = std::time::Instant::now();
        let document = self.shadow.get_shadow().await.map_err(|e| {
            error!("Error fetching shadow for processing pass: {}", e);
            e
        })?;
        let reported = document.reported()
            .ok_or_else(|| BridgeError::ShadowPayloadError("shadow document has no reported state".to_string()))?;

        let summary = self.process_snapshot(&reported, Utc::now(), cache).await;
        info!(
            "Processing pass completed in {:?}: {} signals, {} readings, {} events, {} failed writes",
            start.elapsed(), summary.signals_seen, summary.readings_written, summary.events_written, summary.failed_writes
        );
        Ok(summary)
    }

    /// Processes an already fetched snapshot.
    ///
    /// For each monitored signal reported in `reported`, in monitored-set order:
    /// an analog signal always writes a reading; a value that differs from a cached previous one goes
    /// through the rules; the cache is then updated to the current value. A reported `null` (or any
    /// value without a string form) clears the cached value instead.
    ///
    /// # Arguments
    ///
    /// * `reported` - The reported snapshot; also used for rule guards.
    /// * `timestamp` - The fetch time shared by every record of this pass.
    /// * `cache` - The previous-value cache.
    pub async fn process_snapshot(&self, reported: &ReportedState, timestamp: DateTime<Utc>, cache: &mut PreviousValues) -> PassSummary {
        let mut summary = PassSummary::default();

        for signal in MONITORED_SIGNALS.iter() {
            if !reported.contains(signal.id) {
                continue;
            }
            summary.signals_seen += 1;
            let current = reported.value(signal.id);

            if let Some(unit) = signal.unit() {
                let valor = current.as_deref().and_then(parse_reading);
                if valor.is_none() {
                    warn!("{} reported {:?}, storing the reading without a value", signal.id, current);
                }
                let record = EventRecord::reading(signal.id, signal.label, valor, unit, timestamp);
                if self.store(&record).await {
                    summary.readings_written += 1;
                } else {
                    summary.failed_writes += 1;
                }
            }

            let Some(current) = current else {
                cache.remove(signal.id);
                continue;
            };

            match cache.get(signal.id).filter(|previous| !previous.is_empty()) {
                Some(previous) if previous != current => {
                    debug!("{} changed: {} -> {}", signal.id, previous, current);
                    let transition = SignalTransition::new(signal, previous, &current, timestamp);
                    for record in self.evaluator.evaluate(&transition, reported) {
                        if self.store(&record).await {
                            summary.events_written += 1;
                        } else {
                            summary.failed_writes += 1;
                        }
                    }
                }
                Some(_) => {}
                None => debug!("First observation of {}: {}", signal.id, current),
            }

            cache.set(signal.id, current);
        }

        summary
    }

    /// Writes one record; failures are logged and reported as `false`, never propagated
    async fn store(&self, record: &EventRecord) -> bool {
        match self.repository.insert(record).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error guardando {} de {}: {}", record.kind(), record.signal_id(), e);
                false
            }
        }
    }
}

/// Leading decimal number of `raw`, e.g. `"3.5 bar"` reads as 3.5 and `"n/a"` as nothing
fn parse_reading(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = if matches!(bytes.first(), Some(b'+' | b'-')) { 1 } else { 0 };
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
