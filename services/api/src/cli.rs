use crate::server;
use crate::survey::{run_recommend, run_survey, run_templates, RecommendArgs, SurveyArgs};
use clap::{Args, Parser, Subcommand};
use template_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Template Advisor",
    about = "Recommend and configure a workspace template from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Answer the survey interactively and get a recommendation
    Survey(SurveyArgs),
    /// Score a prepared answer set without prompting
    Recommend(RecommendArgs),
    /// List the registered templates
    Templates,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Survey(args) => run_survey(args),
        Command::Recommend(args) => run_recommend(args),
        Command::Templates => run_templates(),
    }
}
