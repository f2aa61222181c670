use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::TemplateRegistry;

/// Identifier wrapper for registered workspace templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A pre-authored workspace configuration candidate the engine recommends among.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub best_for: Vec<String>,
    /// Exactly one template per registry carries this flag; it wins when no
    /// answer awarded any points.
    pub is_default: bool,
}

/// One legal answer to a question, carrying per-template point contributions.
/// A template absent from `contributions` receives zero points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub contributions: BTreeMap<TemplateId, u32>,
}

/// One fixed-choice survey item. Options are keyed by the short code the
/// collaborator collects (e.g. `"1"`), in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub key: String,
    pub prompt: String,
    pub options: BTreeMap<String, AnswerOption>,
}

/// The answer codes collected for one recommendation run, keyed by question.
/// Questions may be omitted; scoring treats them as contributing nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, key: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(key, code);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, code: impl Into<String>) {
        self.0.insert(key.into(), code.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, code)| (key.as_str(), code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accumulated points per template for one answer set. Every registered
/// template is present, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreTable(BTreeMap<TemplateId, u32>);

impl ScoreTable {
    pub(crate) fn zeroed(registry: &TemplateRegistry) -> Self {
        Self(
            registry
                .templates()
                .iter()
                .map(|template| (template.id.clone(), 0))
                .collect(),
        )
    }

    pub(crate) fn add(&mut self, id: &TemplateId, points: u32) {
        if let Some(total) = self.0.get_mut(id) {
            *total += points;
        }
    }

    /// Points accumulated for a template; zero for ids outside the registry.
    pub fn get(&self, id: &TemplateId) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TemplateId, u32)> {
        self.0.iter().map(|(id, points)| (id, *points))
    }
}

/// Fixed revenue-model categories recognized by profile derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueModel {
    ProjectBased,
    Subscription,
    Hourly,
    ProductSales,
    Mixed,
}

impl RevenueModel {
    pub const fn label(self) -> &'static str {
        match self {
            RevenueModel::ProjectBased => "project_based",
            RevenueModel::Subscription => "subscription",
            RevenueModel::Hourly => "hourly",
            RevenueModel::ProductSales => "product_sales",
            RevenueModel::Mixed => "mixed",
        }
    }
}

/// The normalized business configuration handed to downstream collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedConfig {
    pub template_id: TemplateId,
    pub business_type: String,
    pub revenue_model: RevenueModel,
    pub team_size: u32,
    pub raw_answers: AnswerSet,
}
