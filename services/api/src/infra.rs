use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use template_advisor::advisor::{ConfigStore, RecommendationRecord, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Persistence collaborator: writes the confirmed configuration as pretty
/// JSON to a single flat file, replacing any previous run's output.
pub(crate) struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn save(&self, record: &RecommendationRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

pub(crate) fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (key, code) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question=code, got '{raw}'"))?;
    let key = key.trim();
    let code = code.trim();
    if key.is_empty() || code.is_empty() {
        return Err(format!("expected question=code, got '{raw}'"));
    }
    Ok((key.to_string(), code.to_string()))
}
