use std::collections::{BTreeMap, BTreeSet};

use super::domain::{AnswerOption, Question, Template, TemplateId};

/// Validation failure in a registry, catalog, or override set. Raised while
/// assembling a rubric at startup, never during a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate template id '{0}'")]
    DuplicateTemplate(String),
    #[error("duplicate question key '{0}'")]
    DuplicateQuestion(String),
    #[error("question '{0}' declares no options")]
    EmptyQuestion(String),
    #[error("option '{code}' of question '{question}' awards points to unregistered template '{template}'")]
    UnknownTemplate {
        question: String,
        code: String,
        template: String,
    },
    #[error("no template is flagged as the default recommendation")]
    MissingDefault,
    #[error("templates '{first}' and '{second}' are both flagged as the default recommendation")]
    ConflictingDefaults { first: String, second: String },
    #[error("override targets unregistered template '{0}'")]
    UnknownOverrideTemplate(String),
    #[error("override targets unknown question '{0}'")]
    UnknownOverrideQuestion(String),
    #[error("override targets unknown option '{code}' of question '{question}'")]
    UnknownOverrideOption { question: String, code: String },
}

/// Immutable, validated sequence of candidate templates. Declaration order is
/// semantic: ties during selection resolve to the earliest entry.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    pub fn new(templates: Vec<Template>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        let mut default: Option<&TemplateId> = None;

        for template in &templates {
            if !seen.insert(template.id.clone()) {
                return Err(CatalogError::DuplicateTemplate(template.id.0.clone()));
            }
            if template.is_default {
                match default {
                    None => default = Some(&template.id),
                    Some(first) => {
                        return Err(CatalogError::ConflictingDefaults {
                            first: first.0.clone(),
                            second: template.id.0.clone(),
                        })
                    }
                }
            }
        }

        if default.is_none() {
            return Err(CatalogError::MissingDefault);
        }

        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|template| &template.id == id)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.get(id).is_some()
    }

    /// The template that wins an all-zero score table. Registry construction
    /// guarantees exactly one exists.
    pub fn default_template(&self) -> &Template {
        self.templates
            .iter()
            .find(|template| template.is_default)
            .expect("validated registry carries a default template")
    }
}

/// Immutable, validated sequence of survey questions. Iteration order is the
/// order collaborators present questions in.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    fn new(questions: Vec<Question>, registry: &TemplateRegistry) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();

        for question in &questions {
            if !seen.insert(question.key.clone()) {
                return Err(CatalogError::DuplicateQuestion(question.key.clone()));
            }
            if question.options.is_empty() {
                return Err(CatalogError::EmptyQuestion(question.key.clone()));
            }
            for (code, option) in &question.options {
                for template in option.contributions.keys() {
                    if !registry.contains(template) {
                        return Err(CatalogError::UnknownTemplate {
                            question: question.key.clone(),
                            code: code.clone(),
                            template: template.0.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.key == key)
    }
}

/// A registry plus the catalog scored against it, validated as a unit and
/// passed explicitly into the engine. Specializations never mutate a shared
/// rubric; they compose a new one with [`AdvisorRubric::compose`].
#[derive(Debug, Clone)]
pub struct AdvisorRubric {
    registry: TemplateRegistry,
    catalog: QuestionCatalog,
}

impl AdvisorRubric {
    pub fn new(templates: Vec<Template>, questions: Vec<Question>) -> Result<Self, CatalogError> {
        let registry = TemplateRegistry::new(templates)?;
        let catalog = QuestionCatalog::new(questions, &registry)?;
        Ok(Self { registry, catalog })
    }

    /// The built-in survey and template set.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_templates(), standard_questions())
    }

    /// Builds a new rubric from this one plus explicit override records. The
    /// composed value is re-validated before use; unknown targets fail.
    pub fn compose(&self, overrides: RubricOverrides) -> Result<Self, CatalogError> {
        let mut templates = self.registry.templates().to_vec();
        let mut questions = self.catalog.questions().to_vec();

        for patch in overrides.templates {
            let template = templates
                .iter_mut()
                .find(|template| template.id == patch.id)
                .ok_or_else(|| CatalogError::UnknownOverrideTemplate(patch.id.0.clone()))?;
            if let Some(name) = patch.name {
                template.name = name;
            }
            if let Some(description) = patch.description {
                template.description = description;
            }
            if let Some(best_for) = patch.best_for {
                template.best_for = best_for;
            }
        }

        for patch in overrides.options {
            let question = questions
                .iter_mut()
                .find(|question| question.key == patch.question)
                .ok_or_else(|| CatalogError::UnknownOverrideQuestion(patch.question.clone()))?;
            let option = question.options.get_mut(&patch.code).ok_or_else(|| {
                CatalogError::UnknownOverrideOption {
                    question: patch.question.clone(),
                    code: patch.code.clone(),
                }
            })?;
            if let Some(label) = patch.label {
                option.label = label;
            }
            if let Some(contributions) = patch.contributions {
                option.contributions = contributions;
            }
        }

        Self::new(templates, questions)
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }
}

/// Override records for composing a specialized rubric from a base one.
#[derive(Debug, Clone, Default)]
pub struct RubricOverrides {
    pub templates: Vec<TemplateOverride>,
    pub options: Vec<OptionOverride>,
}

/// Replaces display fields of one registered template.
#[derive(Debug, Clone)]
pub struct TemplateOverride {
    pub id: TemplateId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub best_for: Option<Vec<String>>,
}

/// Replaces the label and/or contribution table of one answer option.
#[derive(Debug, Clone)]
pub struct OptionOverride {
    pub question: String,
    pub code: String,
    pub label: Option<String>,
    pub contributions: Option<BTreeMap<TemplateId, u32>>,
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    best_for: &[&str],
    is_default: bool,
) -> Template {
    Template {
        id: TemplateId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        best_for: best_for.iter().map(|entry| entry.to_string()).collect(),
        is_default,
    }
}

fn option(label: &str, contributions: &[(&str, u32)]) -> AnswerOption {
    AnswerOption {
        label: label.to_string(),
        contributions: contributions
            .iter()
            .map(|(id, points)| (TemplateId::new(*id), *points))
            .collect(),
    }
}

fn question(key: &str, prompt: &str, options: Vec<(&str, AnswerOption)>) -> Question {
    Question {
        key: key.to_string(),
        prompt: prompt.to_string(),
        options: options
            .into_iter()
            .map(|(code, option)| (code.to_string(), option))
            .collect(),
    }
}

fn standard_templates() -> Vec<Template> {
    vec![
        template(
            "general-business",
            "General Business",
            "Flexible template suitable for any business type",
            &[
                "New businesses",
                "Mixed revenue models",
                "Unclear business type",
            ],
            true,
        ),
        template(
            "consulting-agency",
            "Consulting Agency",
            "Optimized for client service businesses",
            &[
                "Professional services",
                "Project-based work",
                "Client deliverables",
            ],
            false,
        ),
        template(
            "saas-business",
            "SaaS Business",
            "Perfect for subscription-based software companies",
            &[
                "Software products",
                "Subscription revenue",
                "User onboarding",
            ],
            false,
        ),
        template(
            "freelancer-solo",
            "Freelancer/Solo",
            "Individual contributor optimization",
            &["Solo workers", "Hourly billing", "Personal productivity"],
            false,
        ),
    ]
}

fn standard_questions() -> Vec<Question> {
    vec![
        question(
            "business_type",
            "What type of business are you running?",
            vec![
                (
                    "1",
                    option(
                        "Consulting/Professional Services",
                        &[("consulting-agency", 3)],
                    ),
                ),
                ("2", option("Software/SaaS Product", &[("saas-business", 3)])),
                (
                    "3",
                    option("Freelancer/Solo Practice", &[("freelancer-solo", 3)]),
                ),
                (
                    "4",
                    option("E-commerce/Retail", &[("general-business", 2)]),
                ),
                ("5", option("Other/Mixed", &[("general-business", 3)])),
            ],
        ),
        question(
            "revenue_model",
            "What is your primary revenue model?",
            vec![
                (
                    "1",
                    option(
                        "Project-based contracts",
                        &[("consulting-agency", 2), ("general-business", 1)],
                    ),
                ),
                (
                    "2",
                    option("Monthly subscriptions", &[("saas-business", 2)]),
                ),
                (
                    "3",
                    option(
                        "Hourly billing",
                        &[("freelancer-solo", 2), ("consulting-agency", 1)],
                    ),
                ),
                ("4", option("Product sales", &[("general-business", 2)])),
                (
                    "5",
                    option("Mixed revenue sources", &[("general-business", 2)]),
                ),
            ],
        ),
        question(
            "team_size",
            "How many people are on your team?",
            vec![
                ("1", option("Just me (solo)", &[("freelancer-solo", 2)])),
                (
                    "2",
                    option(
                        "2-5 people",
                        &[
                            ("consulting-agency", 2),
                            ("saas-business", 1),
                            ("general-business", 1),
                        ],
                    ),
                ),
                (
                    "3",
                    option(
                        "6-15 people",
                        &[("saas-business", 2), ("consulting-agency", 1)],
                    ),
                ),
                (
                    "4",
                    option(
                        "15+ people",
                        &[("saas-business", 2), ("general-business", 1)],
                    ),
                ),
            ],
        ),
        question(
            "primary_focus",
            "What is your primary business focus?",
            vec![
                (
                    "1",
                    option(
                        "Client satisfaction and delivery",
                        &[("consulting-agency", 2)],
                    ),
                ),
                (
                    "2",
                    option(
                        "Product development and features",
                        &[("saas-business", 2)],
                    ),
                ),
                (
                    "3",
                    option(
                        "Personal productivity and efficiency",
                        &[("freelancer-solo", 2)],
                    ),
                ),
                (
                    "4",
                    option("Sales and marketing growth", &[("general-business", 2)]),
                ),
                (
                    "5",
                    option(
                        "Operations optimization",
                        &[("general-business", 1), ("saas-business", 1)],
                    ),
                ),
            ],
        ),
    ]
}
