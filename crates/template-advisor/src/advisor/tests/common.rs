use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::advisor::{
    AdvisorRubric, AdvisorService, AnswerOption, AnswerSet, ConfigStore, Question,
    RecommendationRecord, StoreError, Template, TemplateId,
};

pub(super) fn standard_rubric() -> AdvisorRubric {
    AdvisorRubric::standard().expect("standard rubric validates")
}

pub(super) fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    let mut set = AnswerSet::new();
    for (key, code) in pairs {
        set.insert(*key, *code);
    }
    set
}

pub(super) fn template(id: &str, name: &str, is_default: bool) -> Template {
    Template {
        id: TemplateId::new(id),
        name: name.to_string(),
        description: format!("{name} workspace"),
        best_for: vec!["test fixtures".to_string()],
        is_default,
    }
}

pub(super) fn option(label: &str, contributions: &[(&str, u32)]) -> AnswerOption {
    AnswerOption {
        label: label.to_string(),
        contributions: contributions
            .iter()
            .map(|(id, points)| (TemplateId::new(*id), *points))
            .collect(),
    }
}

pub(super) fn question(key: &str, options: Vec<(&str, AnswerOption)>) -> Question {
    Question {
        key: key.to_string(),
        prompt: format!("{key}?"),
        options: options
            .into_iter()
            .map(|(code, option)| (code.to_string(), option))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// A four-template rubric where only the business-type and revenue-model
/// questions award points, matching the worked profile-scoring example.
pub(super) fn profile_only_rubric() -> AdvisorRubric {
    AdvisorRubric::new(
        vec![
            template("general-business", "General Business", true),
            template("consulting-agency", "Consulting Agency", false),
            template("saas-business", "SaaS Business", false),
            template("freelancer-solo", "Freelancer/Solo", false),
        ],
        vec![
            question(
                "business_type",
                vec![("1", option("Consulting", &[("consulting-agency", 3)]))],
            ),
            question(
                "revenue_model",
                vec![(
                    "3",
                    option(
                        "Hourly billing",
                        &[("consulting-agency", 1), ("freelancer-solo", 2)],
                    ),
                )],
            ),
            question("team_size", vec![("2", option("2-5 people", &[]))]),
        ],
    )
    .expect("profile rubric validates")
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<RecommendationRecord>>>,
}

impl MemoryStore {
    pub(super) fn records(&self) -> Vec<RecommendationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

impl ConfigStore for MemoryStore {
    fn save(&self, record: &RecommendationRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl ConfigStore for UnavailableStore {
    fn save(&self, _record: &RecommendationRecord) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "storage offline",
        )))
    }
}

pub(super) fn build_service() -> (AdvisorService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = AdvisorService::new(standard_rubric(), store.clone());
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
