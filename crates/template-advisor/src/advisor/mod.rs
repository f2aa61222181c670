//! Template recommendation engine: survey catalog, template registry, scoring,
//! selection, and profile derivation, plus the service facade, HTTP router,
//! and CSV answer intake built around them.
//!
//! The four core operations are pure and synchronous; catalog and registry are
//! validated once at startup and read-only afterwards, so concurrent scoring
//! runs need no coordination.

pub mod catalog;
pub mod domain;
mod intake;
pub mod profile;
mod router;
pub mod scoring;
pub mod selection;
mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    AdvisorRubric, CatalogError, OptionOverride, QuestionCatalog, RubricOverrides,
    TemplateOverride, TemplateRegistry,
};
pub use domain::{
    AnswerOption, AnswerSet, DerivedConfig, Question, RevenueModel, ScoreTable, Template,
    TemplateId,
};
pub use intake::{AnswerCsvImporter, AnswerImportError};
pub use router::advisor_router;
pub use scoring::{score, InvalidAnswerError};
pub use selection::{rank, select_best, RankedScore};
pub use service::{
    AdvisorError, AdvisorService, ConfigStore, Recommendation, RecommendationRecord, StoreError,
};
