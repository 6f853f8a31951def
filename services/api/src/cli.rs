use crate::demo::{run_demo, run_questions, run_score, DemoArgs, QuestionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use transparency_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Transparency AI",
    about = "Generate product transparency questionnaires and scores from the command line",
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
    /// Print the follow-up questionnaire for a product
    Questions(QuestionsArgs),
    /// Score a saved submission (JSON with `draft` and `answers`)
    Score(ScoreArgs),
    /// Walk through the Organic Green Tea submission end to end
    Demo(DemoArgs),
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
        Command::Questions(args) => run_questions(args).await,
        Command::Score(args) => run_score(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["transparency-ai"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn questions_requires_a_category() {
        assert!(Cli::try_parse_from(["transparency-ai", "questions"]).is_err());
        let cli = Cli::try_parse_from([
            "transparency-ai",
            "questions",
            "--category",
            "Food & Beverages",
            "--ingredients",
            "Organic green tea leaves",
        ])
        .expect("parses");
        assert!(matches!(cli.command, Some(Command::Questions(_))));
    }
}
