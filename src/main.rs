use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use quizbot_creator::cli::Cli;
use quizbot_creator::config::{Credentials, Settings};
use quizbot_creator::transport::TelegramTransport;
use quizbot_creator::{logging, runner, QuizConstructor, ReplyHub};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json)?;

    let settings = Settings::from_cli(cli)?;
    info!("Quiz source: {:?}", settings.source);

    let report = if settings.check_only {
        runner::check(&settings.source)?
    } else {
        let credentials = Credentials::from_env()?;
        let transport = Arc::new(TelegramTransport::new(
            settings.bot(&credentials),
            settings.contact.clone(),
        ));

        let replies = ReplyHub::new();
        let listener = transport.spawn_listener(replies.clone());
        let constructor = QuizConstructor::new(transport, replies, settings.conversation);

        let report = runner::run(&constructor, &settings.source, settings.policy).await;
        listener.abort();
        report?
    };

    for (path, final_reply) in &report.completed {
        if let Some(reply) = final_reply {
            println!("{}:\n{reply}", path.display());
        }
    }

    let total = report.completed.len() + report.failed.len() + report.skipped.len();
    anyhow::ensure!(
        report.is_success(),
        "{} of {total} quiz files failed",
        report.failed.len()
    );
    Ok(())
}
