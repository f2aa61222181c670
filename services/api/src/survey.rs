use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use template_advisor::advisor::{
    rank, AdvisorRubric, AdvisorService, AnswerCsvImporter, AnswerSet, ConfigStore,
    Recommendation, TemplateId,
};
use template_advisor::config::AppConfig;
use template_advisor::error::AppError;

use crate::infra::JsonFileConfigStore;

#[derive(Args, Debug, Default)]
pub(crate) struct SurveyArgs {
    /// Where to write the confirmed configuration (defaults to ADVISOR_OUTPUT_PATH)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Answer in question=code form; repeatable
    #[arg(long = "answer", value_parser = crate::infra::parse_answer)]
    pub(crate) answers: Vec<(String, String)>,
    /// Optional Question,Choice CSV with pre-collected answers
    #[arg(long)]
    pub(crate) answers_csv: Option<PathBuf>,
    /// Persist the derived configuration after scoring
    #[arg(long)]
    pub(crate) save: bool,
    /// Where to write the configuration (defaults to ADVISOR_OUTPUT_PATH)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_survey(args: SurveyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rubric = AdvisorRubric::standard()?;
    let output_path = args.output.unwrap_or(config.storage.output_path);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    writeln!(out, "Template advisor survey")?;
    writeln!(out, "Answer each question with the number of your choice.")?;

    let answers = collect_answers(&rubric, &mut input, &mut out)?;

    let store = Arc::new(JsonFileConfigStore::new(output_path));
    let service = AdvisorService::new(rubric, store.clone());
    let recommendation = service.recommend(&answers)?;
    render_recommendation(&service, &recommendation, &mut out)?;

    write!(out, "\nSave this configuration? (y/N): ")?;
    out.flush()?;
    if read_confirmation(&mut input)? {
        let derived = service.derive(&answers)?;
        service.save(&derived)?;
        writeln!(out, "\nConfiguration saved to {}", store.path().display())?;
        render_next_steps(&service, &recommendation.template_id, &mut out)?;
    } else {
        writeln!(out, "\nNothing saved. Run the survey again anytime.")?;
    }

    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        answers: pairs,
        answers_csv,
        save,
        output,
    } = args;

    let config = AppConfig::load()?;
    let rubric = AdvisorRubric::standard()?;

    let mut answers = match answers_csv {
        Some(path) => AnswerCsvImporter::from_path(path)?,
        None => AnswerSet::new(),
    };
    // Explicit --answer flags win over the file.
    for (key, code) in pairs {
        answers.insert(key, code);
    }

    let output_path = output.unwrap_or(config.storage.output_path);
    let store = Arc::new(JsonFileConfigStore::new(output_path));
    let service = AdvisorService::new(rubric, store.clone());

    let mut out = io::stdout();
    let recommendation = service.recommend(&answers)?;
    render_recommendation(&service, &recommendation, &mut out)?;

    let derived = service.derive(&answers)?;
    match serde_json::to_string_pretty(&derived) {
        Ok(json) => writeln!(out, "\nDerived configuration:\n{json}")?,
        Err(err) => writeln!(out, "\nDerived configuration unavailable: {err}")?,
    }

    if save {
        let record = service.save(&derived)?;
        writeln!(
            out,
            "Configuration saved to {} at {}",
            store.path().display(),
            record.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }

    Ok(())
}

pub(crate) fn run_templates() -> Result<(), AppError> {
    let rubric = AdvisorRubric::standard()?;
    let mut out = io::stdout();

    writeln!(out, "Registered templates")?;
    for template in rubric.registry().templates() {
        let marker = if template.is_default { " (default)" } else { "" };
        writeln!(out, "- {} [{}]{}", template.name, template.id.0, marker)?;
        writeln!(out, "  {}", template.description)?;
        writeln!(out, "  Best for: {}", template.best_for.join(", "))?;
    }

    Ok(())
}

/// Walks the survey questions over the given reader/writer pair. Invalid
/// entries re-prompt; the engine itself never retries. End of input leaves the
/// remaining questions unanswered, which scoring tolerates.
fn collect_answers<R, W>(
    rubric: &AdvisorRubric,
    input: &mut R,
    out: &mut W,
) -> Result<AnswerSet, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut answers = AnswerSet::new();

    for question in rubric.catalog().questions() {
        writeln!(out, "\n{}", question.prompt)?;
        for (code, option) in &question.options {
            writeln!(out, "  {}. {}", code, option.label)?;
        }

        loop {
            write!(out, "Your choice: ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(answers);
            }
            let code = line.trim();
            if question.options.contains_key(code) {
                answers.insert(question.key.clone(), code);
                break;
            }
            writeln!(out, "Please enter one of the listed choices.")?;
        }
    }

    Ok(answers)
}

fn read_confirmation<R: BufRead>(input: &mut R) -> io::Result<bool> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    let reply = line.trim().to_ascii_lowercase();
    Ok(reply == "y" || reply == "yes")
}

fn render_recommendation<S, W>(
    service: &AdvisorService<S>,
    recommendation: &Recommendation,
    out: &mut W,
) -> Result<(), AppError>
where
    S: ConfigStore + 'static,
    W: Write,
{
    writeln!(out, "\nTemplate scores")?;
    for entry in rank(service.rubric().registry(), &recommendation.scores) {
        let marker = if entry.template_id == recommendation.template_id {
            "  <- recommended"
        } else {
            ""
        };
        writeln!(out, "- {}: {} points{}", entry.name, entry.score, marker)?;
    }

    if let Some(template) = service.rubric().registry().get(&recommendation.template_id) {
        writeln!(out, "\nBest match: {}", template.name)?;
        writeln!(out, "  {}", template.description)?;
        writeln!(out, "  Best for: {}", template.best_for.join(", "))?;
    }

    Ok(())
}

fn render_next_steps<S, W>(
    service: &AdvisorService<S>,
    template_id: &TemplateId,
    out: &mut W,
) -> Result<(), AppError>
where
    S: ConfigStore + 'static,
    W: Write,
{
    let name = service
        .rubric()
        .registry()
        .get(template_id)
        .map(|template| template.name.clone())
        .unwrap_or_else(|| template_id.0.clone());

    writeln!(out, "\nNext steps:")?;
    writeln!(out, "1. Review the {} template with your team.", name)?;
    writeln!(out, "2. Apply it to your workspace.")?;
    writeln!(
        out,
        "3. Re-run the survey whenever the business model changes."
    )?;

    Ok(())
}
