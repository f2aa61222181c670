use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::AdvisorRubric;
use super::domain::{AnswerSet, DerivedConfig, ScoreTable, TemplateId};
use super::{profile, scoring, selection};
use super::scoring::InvalidAnswerError;

/// Service composing the rubric, the scoring pipeline, and the configuration
/// store so delivery surfaces share one entry point.
pub struct AdvisorService<S> {
    rubric: AdvisorRubric,
    store: Arc<S>,
}

/// Outcome of one scoring run: the winning template and the full table that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub template_id: TemplateId,
    pub scores: ScoreTable,
}

/// A derived configuration as handed to storage, stamped at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub saved_at: DateTime<Utc>,
    pub config: DerivedConfig,
}

/// Storage abstraction for confirmed configurations so the service can be
/// exercised in isolation.
pub trait ConfigStore: Send + Sync {
    fn save(&self, record: &RecommendationRecord) -> Result<(), StoreError>;
}

/// Error enumeration for configuration store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Answer(#[from] InvalidAnswerError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S> AdvisorService<S>
where
    S: ConfigStore + 'static,
{
    pub fn new(rubric: AdvisorRubric, store: Arc<S>) -> Self {
        Self { rubric, store }
    }

    pub fn rubric(&self) -> &AdvisorRubric {
        &self.rubric
    }

    /// Score the answers and pick the winning template.
    pub fn recommend(&self, answers: &AnswerSet) -> Result<Recommendation, AdvisorError> {
        let scores = scoring::score(&self.rubric, answers)?;
        let template_id = selection::select_best(self.rubric.registry(), &scores);
        Ok(Recommendation {
            template_id,
            scores,
        })
    }

    /// Score, select, and normalize the answers into a full configuration.
    pub fn derive(&self, answers: &AnswerSet) -> Result<DerivedConfig, AdvisorError> {
        let recommendation = self.recommend(answers)?;
        Ok(profile::derive(answers, &recommendation.template_id))
    }

    /// Persist a confirmed configuration through the configured store.
    pub fn save(&self, config: &DerivedConfig) -> Result<RecommendationRecord, AdvisorError> {
        let record = RecommendationRecord {
            saved_at: Utc::now(),
            config: config.clone(),
        };
        self.store.save(&record)?;
        Ok(record)
    }
}
