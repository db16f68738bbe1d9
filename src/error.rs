use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("reply {actual:?} does not match the expected {expected:?}")]
    ReplyMismatch { expected: String, actual: String },

    #[error(
        "no reply from the bot after {:.1}s (expected {})",
        .elapsed.as_secs_f32(),
        .expected.as_deref().unwrap_or("any reply")
    )]
    ReplyTimeout {
        expected: Option<String>,
        elapsed: Duration,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialise quiz '{title}': {source}")]
    Serialize {
        title: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid quiz in {origin}:\n{report}")]
    Invalid { origin: String, report: garde::Report },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] teloxide::RequestError),

    #[error("another exchange is already waiting for a reply")]
    ExchangeInProgress,

    #[error("the conversation was closed before the bot replied")]
    ConversationClosed,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialisation_failure_is_not_reported_as_parse() {
        let source = <serde_yaml::Error as serde::ser::Error>::custom("unsupported value");
        let err = QuizError::Serialize {
            title: "Capitals".into(),
            source,
        };
        assert_eq!(err.to_string(), "failed to serialise quiz 'Capitals': unsupported value");
        assert!(std::error::Error::source(&err).is_some());
    }
}
