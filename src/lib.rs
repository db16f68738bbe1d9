pub mod cli;
pub mod commands;
pub mod config;
pub mod constructor;
pub mod error;
pub mod keyboard;
pub mod logging;
pub mod poll;
pub mod quiz;
pub mod runner;
pub mod source;
pub mod state;
pub mod transport;
pub mod waiter;

pub use constructor::{ConversationSettings, QuizConstructor};
pub use error::{QuizError, Result};
pub use poll::PollPayload;
pub use quiz::{Question, Quiz};
pub use transport::ChatTransport;
pub use waiter::{Expectation, ReplyHub, TimeoutPolicy, Waiter};
