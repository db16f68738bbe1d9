use async_trait::async_trait;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::payloads::SendPollSetters;
use teloxide::prelude::*;
use teloxide::types::{PollType, Recipient};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::ChatTransport;
use crate::error::Result;
use crate::poll::PollPayload;
use crate::waiter::ReplyHub;

type HandlerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// The bot the dialogue is held with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotContact {
    username: String,
    chat_id: Option<ChatId>,
}

impl BotContact {
    /// `username` may be given with or without the leading `@`.
    pub fn new(username: &str, chat_id: Option<i64>) -> Self {
        Self {
            username: username.trim_start_matches('@').to_owned(),
            chat_id: chat_id.map(ChatId),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn recipient(&self) -> Recipient {
        match self.chat_id {
            Some(chat_id) => Recipient::Id(chat_id),
            None => Recipient::ChannelUsername(format!("@{}", self.username)),
        }
    }

    /// Whether an inbound message was written in the chat with this bot.
    pub fn is_chat(&self, chat_id: ChatId, username: Option<&str>) -> bool {
        if self.chat_id == Some(chat_id) {
            return true;
        }
        username.is_some_and(|name| name.eq_ignore_ascii_case(&self.username))
    }
}

pub struct TelegramTransport {
    bot: Bot,
    contact: BotContact,
}

impl TelegramTransport {
    pub fn new(bot: Bot, contact: BotContact) -> Self {
        Self { bot, contact }
    }

    /// Starts receiving updates in the background. Text messages from the
    /// contact's chat are handed to `hub`, everything else is ignored.
    pub fn spawn_listener(&self, hub: ReplyHub) -> JoinHandle<()> {
        let handler = Update::filter_message()
            .filter(|msg: Message, contact: BotContact| {
                contact.is_chat(msg.chat.id, msg.chat.username())
            })
            .endpoint(forward_reply);

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![hub, self.contact.clone()])
            .default_handler(|_| async {})
            .build();

        info!("Listening for replies from @{}", self.contact.username());
        tokio::spawn(async move { dispatcher.dispatch().await })
    }
}

async fn forward_reply(msg: Message, hub: ReplyHub) -> HandlerResult {
    match msg.text() {
        Some(text) => hub.deliver(text),
        None => debug!("Ignoring a non-text message {} from the bot", msg.id.0),
    }
    Ok(())
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    #[instrument(level = "debug", skip(self))]
    async fn send_text(&self, text: &str) -> Result<()> {
        self.bot.send_message(self.contact.recipient(), text).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, poll), fields(question = %poll.question))]
    async fn send_poll(&self, poll: &PollPayload) -> Result<()> {
        let options: Vec<String> = poll.option_texts().map(str::to_owned).collect();

        let mut request = self
            .bot
            .send_poll(self.contact.recipient(), poll.question.clone(), options)
            .type_(PollType::Quiz)
            .correct_option_id(poll.correct_option_index());
        if let Some(solution) = &poll.solution {
            request = request.explanation(solution.clone());
        }

        request.await?;
        Ok(())
    }
}
