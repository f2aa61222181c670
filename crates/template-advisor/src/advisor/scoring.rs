use super::catalog::AdvisorRubric;
use super::domain::{AnswerSet, ScoreTable};

/// An answer set entry that the catalog cannot account for. The engine rejects
/// it once and leaves any retry policy to the collaborator that collected the
/// answers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAnswerError {
    #[error("answer references unknown question '{question}'")]
    UnknownQuestion { question: String },
    #[error("'{code}' is not a valid choice for question '{question}'")]
    UnknownChoice { question: String, code: String },
}

/// Totals every answered option's contributions into a per-template table.
///
/// Unanswered questions contribute nothing. An entry whose key or code the
/// rubric does not recognize fails the whole run; no partial table escapes.
/// Totals are independent of answer ordering because addition commutes.
pub fn score(rubric: &AdvisorRubric, answers: &AnswerSet) -> Result<ScoreTable, InvalidAnswerError> {
    for (key, code) in answers.iter() {
        let question = rubric.catalog().question(key).ok_or_else(|| {
            InvalidAnswerError::UnknownQuestion {
                question: key.to_string(),
            }
        })?;
        if !question.options.contains_key(code) {
            return Err(InvalidAnswerError::UnknownChoice {
                question: key.to_string(),
                code: code.to_string(),
            });
        }
    }

    let mut scores = ScoreTable::zeroed(rubric.registry());
    for question in rubric.catalog().questions() {
        let Some(code) = answers.get(&question.key) else {
            continue;
        };
        if let Some(option) = question.options.get(code) {
            for (template, points) in &option.contributions {
                scores.add(template, *points);
            }
        }
    }

    Ok(scores)
}
