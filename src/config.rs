use std::fmt;
use std::time::Duration;

use teloxide::Bot;
use url::Url;

use crate::cli::Cli;
use crate::constructor::{ConversationSettings, DEFAULT_SETTLE_DELAY};
use crate::error::{QuizError, Result};
use crate::runner::FailurePolicy;
use crate::source::Source;
use crate::transport::BotContact;
use crate::waiter::TimeoutPolicy;

/// Bot API credentials of the account that holds the dialogue.
///
/// Only a complete `TELOXIDE_TOKEN` is accepted. `API_ID` and `API_HASH`
/// identify an MTProto application and can't be turned into a bot token.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("TELOXIDE_TOKEN").ok(),
            std::env::var("API_ID").ok(),
        )
    }

    pub fn from_vars(token: Option<String>, api_id: Option<String>) -> Result<Self> {
        match token.filter(|token| !token.is_empty()) {
            Some(token) => Ok(Self { token }),
            None if api_id.is_some_and(|id| !id.is_empty()) => Err(QuizError::Config(
                "API_ID/API_HASH are MTProto app credentials, the Bot API transport needs TELOXIDE_TOKEN".into(),
            )),
            None => Err(QuizError::Config("TELOXIDE_TOKEN should be set".into())),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("token", &"<hidden>").finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub source: Source,
    pub check_only: bool,
    pub policy: FailurePolicy,
    pub conversation: ConversationSettings,
    pub contact: BotContact,
    pub api_url: Option<Url>,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let source = match cli.file {
            Some(file) => Source::File(file),
            None => Source::Directory(cli.dir),
        };

        let timeout = if cli.no_timeout {
            TimeoutPolicy::Unbounded
        } else {
            TimeoutPolicy::Strict(Duration::from_secs(cli.timeout_secs))
        };

        let api_url = cli
            .api_url
            .filter(|url| !url.is_empty())
            .map(|url| {
                url.parse::<Url>()
                    .map_err(|err| QuizError::Config(format!("BOT_API_URL {url:?} can't be parsed: {err}")))
            })
            .transpose()?;

        Ok(Self {
            source,
            check_only: cli.check,
            policy: if cli.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
            conversation: ConversationSettings {
                timeout,
                time_limit: cli.time_limit,
                shuffle: cli.shuffle,
                settle_delay: DEFAULT_SETTLE_DELAY,
            },
            contact: BotContact::new(&cli.bot, cli.bot_chat_id),
            api_url,
        })
    }

    pub fn bot(&self, credentials: &Credentials) -> Bot {
        let bot = Bot::new(credentials.token());
        match &self.api_url {
            Some(url) => bot.set_api_url(url.clone()),
            None => bot,
        }
    }
}
