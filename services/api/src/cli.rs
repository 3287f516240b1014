use crate::demo::{
    run_chat, run_demo, run_estimate, run_validate, ChatArgs, DemoArgs, EstimateArgs,
    ValidateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lifespan_estimator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lifespan Estimator",
    about = "Score lifestyle questionnaires and serve the lifespan estimator API",
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
    /// Score a JSON answer file and print the results in the chosen export format
    Estimate(EstimateArgs),
    /// Run the calculation gate over a JSON answer file and list every issue
    Validate(ValidateArgs),
    /// Ask the FAQ bot or the health coach a question
    Chat(ChatArgs),
    /// Walk the six questionnaire sections with a sample respondent
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
        Command::Estimate(args) => run_estimate(args),
        Command::Validate(args) => run_validate(args),
        Command::Chat(args) => run_chat(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["lifespan-estimator-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn estimate_parses_format_and_date() {
        let cli = Cli::try_parse_from([
            "lifespan-estimator-api",
            "estimate",
            "--answers",
            "answers.json",
            "--format",
            "word",
            "--today",
            "2024-06-01",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(
                    args.format,
                    lifespan_estimator::workflows::lifespan::ExportFormat::Html
                );
                assert!(args.today.is_some());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn chat_rejects_unknown_mode() {
        let parsed = Cli::try_parse_from([
            "lifespan-estimator-api",
            "chat",
            "--mode",
            "oracle",
            "hello",
        ]);
        assert!(parsed.is_err());
    }
}
