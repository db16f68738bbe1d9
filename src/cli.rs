use std::path::PathBuf;

use clap::Parser;

use crate::keyboard::{ShuffleMode, TimeLimit};
use crate::source::DEFAULT_SOURCE_DIR;

#[derive(Parser, Debug, Clone)]
#[command(name = "quizbot-creator")]
#[command(about = "Creates QuizBot quizzes from YAML definitions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Username of the quiz bot.
    #[arg(long, env = "QUIZ_BOT", default_value = "QuizBot")]
    pub bot: String,

    /// Numeric chat id of the quiz bot, used instead of the username when set.
    #[arg(long, env = "QUIZ_BOT_CHAT_ID")]
    pub bot_chat_id: Option<i64>,

    /// Directory scanned for `.yml`/`.yaml` quiz files.
    #[arg(long, env = "QUIZ_SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub dir: PathBuf,

    /// Process this single file instead of scanning `--dir`.
    #[arg(long, env = "QUIZ_FILE")]
    pub file: Option<PathBuf>,

    /// Only load and validate the quiz files.
    #[arg(long)]
    pub check: bool,

    /// Stop at the first quiz that fails.
    #[arg(long)]
    pub fail_fast: bool,

    /// Seconds to wait for each reply of the bot.
    #[arg(long, env = "REPLY_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,

    /// Wait for replies indefinitely.
    #[arg(long)]
    pub no_timeout: bool,

    #[arg(long, value_enum, default_value_t)]
    pub time_limit: TimeLimit,

    #[arg(long, value_enum, default_value_t)]
    pub shuffle: ShuffleMode,

    /// Custom Bot API server.
    #[arg(long, env = "BOT_API_URL")]
    pub api_url: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}
