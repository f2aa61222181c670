use super::domain::{AnswerSet, DerivedConfig, RevenueModel, TemplateId};

/// Business type reported when the answer is missing or unrecognized.
pub const DEFAULT_BUSINESS_TYPE: &str = "General Business";

/// Revenue model reported when the answer is missing or unrecognized.
pub const DEFAULT_REVENUE_MODEL: RevenueModel = RevenueModel::Mixed;

/// Headcount reported when the team-size answer is missing or unrecognized.
pub const DEFAULT_TEAM_SIZE: u32 = 1;

/// Normalizes the profile questions of an answer set into a configuration for
/// the chosen template.
///
/// Unlike scoring, derivation is lenient: a missing or unrecognized code for a
/// profile question resolves to its documented default rather than failing, so
/// a configuration can always be produced, even from an empty answer set.
pub fn derive(answers: &AnswerSet, template_id: &TemplateId) -> DerivedConfig {
    let business_type = answers
        .get("business_type")
        .and_then(business_type_label)
        .unwrap_or(DEFAULT_BUSINESS_TYPE)
        .to_string();

    let revenue_model = answers
        .get("revenue_model")
        .and_then(revenue_model_for)
        .unwrap_or(DEFAULT_REVENUE_MODEL);

    let team_size = answers
        .get("team_size")
        .and_then(team_headcount)
        .unwrap_or(DEFAULT_TEAM_SIZE);

    DerivedConfig {
        template_id: template_id.clone(),
        business_type,
        revenue_model,
        team_size,
        raw_answers: answers.clone(),
    }
}

fn business_type_label(code: &str) -> Option<&'static str> {
    match code {
        "1" => Some("Professional Services"),
        "2" => Some("Software/SaaS"),
        "3" => Some("Freelancer"),
        "4" => Some("E-commerce"),
        "5" => Some("Other"),
        _ => None,
    }
}

fn revenue_model_for(code: &str) -> Option<RevenueModel> {
    match code {
        "1" => Some(RevenueModel::ProjectBased),
        "2" => Some(RevenueModel::Subscription),
        "3" => Some(RevenueModel::Hourly),
        "4" => Some(RevenueModel::ProductSales),
        "5" => Some(RevenueModel::Mixed),
        _ => None,
    }
}

fn team_headcount(code: &str) -> Option<u32> {
    match code {
        "1" => Some(1),
        "2" => Some(3),
        "3" => Some(10),
        "4" => Some(20),
        _ => None,
    }
}
