pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;
use crate::poll::PollPayload;

pub use telegram::{BotContact, TelegramTransport};

/// Outbound side of the conversation with QuizBot. Replies come back through
/// [`crate::waiter::ReplyHub::deliver`], fed by whatever listener the
/// implementation runs.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a plain text message to the bot.
    async fn send_text(&self, text: &str) -> Result<()>;
    /// Sends a quiz-mode poll to the bot.
    async fn send_poll(&self, poll: &PollPayload) -> Result<()>;
}
