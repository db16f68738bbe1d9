use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::keyboard::{ShuffleMode, TimeLimit};
use crate::quiz::Quiz;
use crate::state::{plan, Outbound, Step};
use crate::transport::ChatTransport;
use crate::waiter::{ReplyHub, TimeoutPolicy};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationSettings {
    pub timeout: TimeoutPolicy,
    pub time_limit: TimeLimit,
    pub shuffle: ShuffleMode,
    /// Pause after the last message before reading QuizBot's final answer.
    pub settle_delay: Duration,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            timeout: TimeoutPolicy::default(),
            time_limit: TimeLimit::default(),
            shuffle: ShuffleMode::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Creates quizzes by walking QuizBot through its `/newquiz` dialogue.
pub struct QuizConstructor<Transport: ChatTransport> {
    transport: Arc<Transport>,
    replies: ReplyHub,
    settings: ConversationSettings,
}

impl<Transport: ChatTransport> QuizConstructor<Transport> {
    pub fn new(transport: Arc<Transport>, replies: ReplyHub, settings: ConversationSettings) -> Self {
        Self {
            transport,
            replies,
            settings,
        }
    }

    /// Runs the dialogue for one quiz. Returns QuizBot's last message, which
    /// normally carries the link to the published quiz.
    ///
    /// The first failing exchange aborts the dialogue; whatever QuizBot has
    /// built so far stays there until the next `/cancel`.
    #[instrument(level = "info", skip_all, fields(quiz = %quiz))]
    pub async fn create_quiz(&self, quiz: &Quiz) -> Result<Option<String>> {
        let steps = plan(quiz, self.settings.time_limit, self.settings.shuffle);
        info!("Creating quiz in {} steps", steps.len());

        for step in &steps {
            self.perform(step).await?;
        }

        tokio::time::sleep(self.settings.settle_delay).await;
        let outcome = self.replies.last_reply();
        match &outcome {
            Some(reply) => info!("QuizBot: {reply}"),
            None => info!("QuizBot sent nothing after the last step"),
        }
        Ok(outcome)
    }

    async fn perform(&self, step: &Step) -> Result<()> {
        debug!("Step: {step}");
        let Some(expectation) = step.expectation() else {
            self.replies.clear_last_reply();
            return self.send(step.outbound()).await;
        };

        let waiter = self.replies.wait_for(expectation, self.settings.timeout)?;
        self.send(step.outbound()).await?;
        let reply = waiter.finish().await?;
        debug!("Reply to {step}: {reply:?}");
        Ok(())
    }

    async fn send(&self, outbound: Outbound) -> Result<()> {
        match outbound {
            Outbound::Text(text) => self.transport.send_text(&text).await,
            Outbound::Poll(poll) => self.transport.send_poll(&poll).await,
        }
    }
}
