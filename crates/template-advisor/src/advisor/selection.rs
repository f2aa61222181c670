use serde::Serialize;

use super::catalog::TemplateRegistry;
use super::domain::{ScoreTable, TemplateId};

/// Picks the highest-scoring template. Templates are scanned in registry
/// declaration order and the leader is only replaced on a strictly greater
/// score, so ties always resolve to the earliest declaration. An all-zero
/// table selects the registry's flagged default.
pub fn select_best(registry: &TemplateRegistry, scores: &ScoreTable) -> TemplateId {
    let mut leader: Option<&TemplateId> = None;
    let mut best = 0;

    for template in registry.templates() {
        let points = scores.get(&template.id);
        if points > best {
            best = points;
            leader = Some(&template.id);
        }
    }

    leader
        .unwrap_or(&registry.default_template().id)
        .clone()
}

/// One line of the ranked results view shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedScore {
    pub template_id: TemplateId,
    pub name: String,
    pub score: u32,
}

/// Templates ordered by descending score; equal scores keep registry order.
pub fn rank(registry: &TemplateRegistry, scores: &ScoreTable) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = registry
        .templates()
        .iter()
        .map(|template| RankedScore {
            template_id: template.id.clone(),
            name: template.name.clone(),
            score: scores.get(&template.id),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
