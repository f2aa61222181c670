use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::AnswerSet;

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answers file: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answers CSV data: {}", err),
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads a `Question,Choice` CSV export into an answer set so answers can be
/// collected from a file instead of an interactive prompt.
///
/// Blank choices count as unanswered, a duplicated question keeps its first
/// row, and codes are not checked here; the scoring engine validates them.
pub struct AnswerCsvImporter;

impl AnswerCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AnswerSet, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<AnswerSet, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut answers = AnswerSet::new();
        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            let Some(choice) = row.choice else {
                continue;
            };
            if answers.get(&row.question).is_some() {
                continue;
            }
            answers.insert(row.question, choice);
        }

        Ok(answers)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Choice", default, deserialize_with = "empty_string_as_none")]
    choice: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
