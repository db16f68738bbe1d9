use std::fmt;

use crate::commands::Command;
use crate::keyboard::{ShuffleMode, TimeLimit};
use crate::poll::PollPayload;
use crate::quiz::Quiz;
use crate::waiter::Expectation;

pub const NEW_QUIZ_STARTED: &str = "Вы решили создать новый тест";
pub const ASKS_FOR_DESCRIPTION: &str = "пришлите описание";
pub const ASKS_FOR_FIRST_QUESTION: &str = "Отправьте мне первый вопрос";
pub const PREAMBLE_ACCEPTED: &str = "будет показываться после этого сообщения";
pub const ASKS_FOR_NEXT_QUESTION: &str = "Теперь отправьте следующий";
pub const ASKS_FOR_TIME_LIMIT: &str = "Укажите ограничение времени";
pub const ASKS_FOR_SHUFFLE_MODE: &str = "в случайном порядке";

/// What goes out to the bot in a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Poll(PollPayload),
}

/// One step of the QuizBot dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Cancel,
    NewQuiz,
    Title(String),
    Description(Option<String>),
    /// Full text of a question too long to be the poll question.
    Preamble { question: usize, text: String },
    Poll { question: usize, poll: PollPayload },
    Done,
    TimeLimit(TimeLimit),
    /// The last message, QuizBot's answer to it is not awaited.
    Shuffle(ShuffleMode),
}

impl Step {
    pub fn outbound(&self) -> Outbound {
        match self {
            Self::Cancel => Outbound::Text(Command::Cancel.to_string()),
            Self::NewQuiz => Outbound::Text(Command::NewQuiz.to_string()),
            Self::Title(title) => Outbound::Text(title.clone()),
            Self::Description(Some(description)) => Outbound::Text(description.clone()),
            Self::Description(None) => Outbound::Text(Command::Skip.to_string()),
            Self::Preamble { text, .. } => Outbound::Text(text.clone()),
            Self::Poll { poll, .. } => Outbound::Poll(poll.clone()),
            Self::Done => Outbound::Text(Command::Done.to_string()),
            Self::TimeLimit(limit) => Outbound::Text(limit.label().to_owned()),
            Self::Shuffle(mode) => Outbound::Text(mode.label().to_owned()),
        }
    }

    /// The reply that has to come back before the next step, `None` for the terminal step.
    pub fn expectation(&self) -> Option<Expectation> {
        let expected = match self {
            Self::Cancel => return Some(Expectation::Any),
            Self::NewQuiz => NEW_QUIZ_STARTED,
            Self::Title(_) => ASKS_FOR_DESCRIPTION,
            Self::Description(_) => ASKS_FOR_FIRST_QUESTION,
            Self::Preamble { .. } => PREAMBLE_ACCEPTED,
            Self::Poll { .. } => ASKS_FOR_NEXT_QUESTION,
            Self::Done => ASKS_FOR_TIME_LIMIT,
            Self::TimeLimit(_) => ASKS_FOR_SHUFFLE_MODE,
            Self::Shuffle(_) => return None,
        };
        Some(Expectation::Containing(expected))
    }

    pub fn is_terminal(&self) -> bool {
        self.expectation().is_none()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancel => f.write_str("cancel"),
            Self::NewQuiz => f.write_str("new quiz"),
            Self::Title(_) => f.write_str("title"),
            Self::Description(Some(_)) => f.write_str("description"),
            Self::Description(None) => f.write_str("skip description"),
            Self::Preamble { question, .. } => write!(f, "question #{} text", question + 1),
            Self::Poll { question, .. } => write!(f, "question #{} poll", question + 1),
            Self::Done => f.write_str("done"),
            Self::TimeLimit(limit) => write!(f, "time limit {}", limit.label()),
            Self::Shuffle(mode) => write!(f, "shuffle {}", mode.label()),
        }
    }
}

/// Lays out the whole dialogue for a quiz, in sending order.
pub fn plan(quiz: &Quiz, time_limit: TimeLimit, shuffle: ShuffleMode) -> Vec<Step> {
    let mut steps = vec![
        Step::Cancel,
        Step::NewQuiz,
        Step::Title(quiz.title().to_owned()),
        Step::Description(quiz.description().map(str::to_owned)),
    ];

    for (index, question) in quiz.questions().iter().enumerate() {
        if question.needs_preamble() {
            steps.push(Step::Preamble {
                question: index,
                text: question.title().to_owned(),
            });
        }
        steps.push(Step::Poll {
            question: index,
            poll: PollPayload::from_question(question),
        });
    }

    steps.extend([Step::Done, Step::TimeLimit(time_limit), Step::Shuffle(shuffle)]);
    steps
}
