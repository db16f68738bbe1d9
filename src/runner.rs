use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::constructor::QuizConstructor;
use crate::error::{QuizError, Result};
use crate::quiz::Quiz;
use crate::source::Source;
use crate::transport::ChatTransport;

/// What happens to the rest of a batch once one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and go on with the next file.
    #[default]
    Continue,
    /// Stop at the first failure.
    Abort,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that went through, with QuizBot's final message.
    pub completed: Vec<(PathBuf, Option<String>)>,
    pub failed: Vec<(PathBuf, QuizError)>,
    /// Files never looked at because the batch was aborted.
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record_failure(&mut self, path: PathBuf, err: QuizError) {
        error!("{}: {err}", path.display());
        self.failed.push((path, err));
    }
}

/// Loads and validates every file of `source` without talking to the bot.
#[instrument(level = "info")]
pub fn check(source: &Source) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    for path in source.files()? {
        match Quiz::load(&path) {
            Ok(quiz) => {
                info!("{}: {quiz} is valid", path.display());
                report.completed.push((path, None));
            }
            Err(err) => report.record_failure(path, err),
        }
    }
    Ok(report)
}

/// Creates the quizzes of `source` one after another.
#[instrument(level = "info", skip(constructor))]
pub async fn run<Transport: ChatTransport>(
    constructor: &QuizConstructor<Transport>,
    source: &Source,
    policy: FailurePolicy,
) -> Result<BatchReport> {
    let files = source.files()?;
    if files.is_empty() {
        warn!("No quiz files found in {source:?}");
    }

    let mut report = BatchReport::default();
    let mut files = files.into_iter();
    while let Some(path) = files.next() {
        let outcome = match Quiz::load(&path) {
            Ok(quiz) => constructor.create_quiz(&quiz).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(final_reply) => {
                info!("{}: quiz created", path.display());
                report.completed.push((path, final_reply));
            }
            Err(err) => {
                report.record_failure(path, err);
                if policy == FailurePolicy::Abort {
                    report.skipped.extend(files.by_ref());
                    break;
                }
            }
        }
    }

    info!(
        "Batch finished: {} created, {} failed, {} skipped",
        report.completed.len(),
        report.failed.len(),
        report.skipped.len()
    );
    Ok(report)
}
