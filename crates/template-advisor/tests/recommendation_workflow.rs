//! Integration specifications for the recommendation pipeline.
//!
//! Scenarios exercise the public API end to end: rubric assembly, scoring,
//! selection, profile derivation, and persistence through the service facade,
//! without reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use template_advisor::advisor::{
        AdvisorRubric, AdvisorService, AnswerOption, AnswerSet, ConfigStore, Question,
        RecommendationRecord, StoreError, Template, TemplateId,
    };

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
            best_for: vec!["integration fixtures".to_string()],
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
                .collect(),
        }
    }

    /// Rubric for the worked example: only the business-type and revenue-model
    /// questions award points.
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

    pub(super) fn build_service() -> (AdvisorService<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let rubric = AdvisorRubric::standard().expect("standard rubric validates");
        (AdvisorService::new(rubric, store.clone()), store)
    }
}

use common::*;
use template_advisor::advisor::{
    score, select_best, AdvisorError, InvalidAnswerError, RevenueModel, TemplateId,
};

#[test]
fn consulting_profile_wins_the_worked_example() {
    let rubric = profile_only_rubric();
    let set = answers(&[
        ("business_type", "1"),
        ("revenue_model", "3"),
        ("team_size", "2"),
    ]);

    let scores = score(&rubric, &set).expect("scoring succeeds");
    assert_eq!(scores.get(&TemplateId::new("consulting-agency")), 4);
    assert_eq!(scores.get(&TemplateId::new("freelancer-solo")), 2);
    assert_eq!(scores.get(&TemplateId::new("saas-business")), 0);
    assert_eq!(scores.get(&TemplateId::new("general-business")), 0);

    let best = select_best(rubric.registry(), &scores);
    assert_eq!(best, TemplateId::new("consulting-agency"));
}

#[test]
fn empty_survey_falls_back_to_the_default_template() {
    let (service, _) = build_service();

    let recommendation = service.recommend(&answers(&[])).expect("recommendation");

    assert_eq!(
        recommendation.template_id,
        TemplateId::new("general-business")
    );
    assert_eq!(recommendation.scores.total(), 0);
}

#[test]
fn invalid_codes_stop_the_pipeline_before_any_output() {
    let (service, store) = build_service();

    match service.recommend(&answers(&[("business_type", "9")])) {
        Err(AdvisorError::Answer(InvalidAnswerError::UnknownChoice { question, code })) => {
            assert_eq!(question, "business_type");
            assert_eq!(code, "9");
        }
        other => panic!("expected invalid answer error, got {other:?}"),
    }
    assert!(store.records().is_empty());
}

#[test]
fn full_run_derives_and_persists_a_configuration() {
    let (service, store) = build_service();
    let set = answers(&[
        ("business_type", "1"),
        ("revenue_model", "1"),
        ("team_size", "2"),
        ("primary_focus", "1"),
    ]);

    let config = service.derive(&set).expect("derivation succeeds");
    assert_eq!(config.template_id, TemplateId::new("consulting-agency"));
    assert_eq!(config.business_type, "Professional Services");
    assert_eq!(config.revenue_model, RevenueModel::ProjectBased);
    assert_eq!(config.team_size, 3);
    assert_eq!(config.raw_answers, set);

    let record = service.save(&config).expect("save succeeds");
    let stored = store.records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].config, config);
    assert_eq!(stored[0].saved_at, record.saved_at);
}

#[test]
fn derivation_tolerates_a_partially_answered_survey() {
    let (service, _) = build_service();

    let config = service
        .derive(&answers(&[("business_type", "4")]))
        .expect("derivation succeeds");

    assert_eq!(config.business_type, "E-commerce");
    assert_eq!(config.revenue_model, RevenueModel::Mixed);
    assert_eq!(config.team_size, 1);
}
