//! Scripted stand-in for QuizBot.
//!
//! Every outbound message is recorded, then answered straight into the
//! [`ReplyHub`] the way QuizBot's `/newquiz` dialogue would answer it.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use quizbot_creator::{ChatTransport, PollPayload, ReplyHub, Result};

pub const CANCELLED: &str = "Текущее действие отменено.";
pub const NEW_QUIZ: &str = "Вы решили создать новый тест. Сначала отправьте мне название теста.";
pub const DESCRIPTION: &str = "Хорошо. Теперь пришлите описание теста или нажмите /skip.";
pub const FIRST_QUESTION: &str = "Отлично. Отправьте мне первый вопрос в виде опроса.";
pub const PREAMBLE: &str = "Этот текст будет показываться после этого сообщения. Теперь отправьте опрос.";
pub const NEXT_QUESTION: &str = "Хорошо. Теперь отправьте следующий вопрос или нажмите /done.";
pub const TIME_LIMIT: &str = "Тест создан. Укажите ограничение времени для каждого вопроса.";
pub const SHUFFLE: &str = "Перемешивать вопросы и варианты ответов в случайном порядке?";
pub const FINISHED: &str = "👍 Тест готов. Поделиться: t.me/QuizBot?start=abc123";
pub const CONFUSED: &str = "Извините, я вас не понял.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Poll(PollPayload),
}

impl Sent {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Poll(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Title,
    Description,
    Questions,
    TimeLimit,
    Shuffle,
    Finished,
}

struct State {
    phase: Phase,
    sent: Vec<Sent>,
    /// Whether a waiter was registered at the moment of each send.
    awaited: Vec<bool>,
}

pub struct MockQuizBot {
    hub: ReplyHub,
    state: Mutex<State>,
    /// Index of the send answered with [`CONFUSED`].
    confused_at: Option<usize>,
    /// Number of sends answered before the bot goes quiet.
    silent_after: Option<usize>,
}

impl MockQuizBot {
    pub fn new(hub: ReplyHub) -> Self {
        Self {
            hub,
            state: Mutex::new(State {
                phase: Phase::Idle,
                sent: Vec::new(),
                awaited: Vec::new(),
            }),
            confused_at: None,
            silent_after: None,
        }
    }

    pub fn confused_at(mut self, index: usize) -> Self {
        self.confused_at = Some(index);
        self
    }

    pub fn silent_after(mut self, answered: usize) -> Self {
        self.silent_after = Some(answered);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn awaited(&self) -> Vec<bool> {
        self.state.lock().unwrap().awaited.clone()
    }

    fn handle(&self, sent: Sent) {
        let reply = {
            let mut state = self.state.lock().unwrap();
            let index = state.sent.len();
            state.awaited.push(self.hub.has_listener());

            let reply = if self.confused_at == Some(index) {
                CONFUSED
            } else {
                let (phase, reply) = answer(state.phase, &sent);
                state.phase = phase;
                reply
            };
            state.sent.push(sent);

            let quiet = self.silent_after.is_some_and(|answered| index >= answered);
            (!quiet).then_some(reply)
        };

        if let Some(reply) = reply {
            self.hub.deliver(reply);
        }
    }
}

fn answer(phase: Phase, sent: &Sent) -> (Phase, &'static str) {
    match (phase, sent.text()) {
        (_, Some("/cancel")) => (Phase::Idle, CANCELLED),
        (Phase::Idle | Phase::Finished, Some("/newquiz")) => (Phase::Title, NEW_QUIZ),
        (Phase::Title, Some(_)) => (Phase::Description, DESCRIPTION),
        (Phase::Description, Some(_)) => (Phase::Questions, FIRST_QUESTION),
        (Phase::Questions, Some("/done")) => (Phase::TimeLimit, TIME_LIMIT),
        (Phase::Questions, Some(_)) => (Phase::Questions, PREAMBLE),
        (Phase::Questions, None) => (Phase::Questions, NEXT_QUESTION),
        (Phase::TimeLimit, Some(_)) => (Phase::Shuffle, SHUFFLE),
        (Phase::Shuffle, Some(_)) => (Phase::Finished, FINISHED),
        (phase, _) => (phase, CONFUSED),
    }
}

#[async_trait]
impl ChatTransport for MockQuizBot {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.handle(Sent::Text(text.to_owned()));
        Ok(())
    }

    async fn send_poll(&self, poll: &PollPayload) -> Result<()> {
        self.handle(Sent::Poll(poll.clone()));
        Ok(())
    }
}
