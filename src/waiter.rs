//! Pairing of one outbound message with the bot's next reply.
//!
//! [`ReplyHub`] is shared between the inbound side (the transport's update
//! listener calls [`ReplyHub::deliver`]) and the driver, which opens a
//! [`Waiter`] scope per exchange. Only one waiter can be registered at a time.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::{QuizError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a [`Waiter`] waits for the reply, measured from scope entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPolicy {
    Strict(Duration),
    Unbounded,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::Strict(DEFAULT_TIMEOUT)
    }
}

/// What the reply to an exchange has to look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Any reply completes the exchange.
    Any,
    /// The reply must contain the substring, ignoring case.
    Containing(&'static str),
}

impl Expectation {
    pub fn substring(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Containing(expected) => Some(*expected),
        }
    }

    pub fn matches(&self, reply: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Containing(expected) => reply.to_lowercase().contains(&expected.to_lowercase()),
        }
    }
}

struct Listener {
    id: u64,
    expectation: Expectation,
    tx: oneshot::Sender<Result<String>>,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    listener: Option<Listener>,
    last_reply: Option<String>,
}

#[derive(Clone, Default)]
pub struct ReplyHub {
    state: Arc<Mutex<HubState>>,
}

impl ReplyHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        // The state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens an exchange scope. The listener is live until the returned
    /// [`Waiter`] is finished or dropped.
    pub fn wait_for(&self, expectation: Expectation, policy: TimeoutPolicy) -> Result<Waiter> {
        let mut state = self.lock();
        if state.listener.is_some() {
            return Err(QuizError::ExchangeInProgress);
        }

        let id = state.next_id;
        state.next_id += 1;
        let (tx, rx) = oneshot::channel();
        state.listener = Some(Listener { id, expectation, tx });

        Ok(Waiter {
            hub: self.clone(),
            id,
            expectation,
            policy,
            started: Instant::now(),
            rx,
        })
    }

    /// Hands an inbound message from the bot to the registered waiter, if any.
    pub fn deliver(&self, text: &str) {
        let mut state = self.lock();
        state.last_reply = Some(text.to_owned());

        let Some(listener) = state.listener.take() else {
            debug!("Reply without a pending exchange: {text:?}");
            return;
        };

        let outcome = if listener.expectation.matches(text) {
            Ok(text.to_owned())
        } else {
            Err(QuizError::ReplyMismatch {
                expected: listener.expectation.substring().unwrap_or_default().to_owned(),
                actual: text.to_owned(),
            })
        };

        if listener.tx.send(outcome).is_err() {
            warn!("Waiter {} went away before its reply arrived", listener.id);
        }
    }

    pub fn has_listener(&self) -> bool {
        self.lock().listener.is_some()
    }

    pub fn last_reply(&self) -> Option<String> {
        self.lock().last_reply.clone()
    }

    pub fn clear_last_reply(&self) {
        self.lock().last_reply = None;
    }

    fn unregister(&self, id: u64) {
        let mut state = self.lock();
        if state.listener.as_ref().is_some_and(|listener| listener.id == id) {
            state.listener = None;
        }
    }
}

/// A pending exchange. Dropping it unregisters the listener.
pub struct Waiter {
    hub: ReplyHub,
    id: u64,
    expectation: Expectation,
    policy: TimeoutPolicy,
    started: Instant,
    rx: oneshot::Receiver<Result<String>>,
}

impl Waiter {
    /// Waits for the reply and returns its text.
    pub async fn finish(mut self) -> Result<String> {
        let received = match self.policy {
            TimeoutPolicy::Strict(limit) => {
                let deadline = self.started + limit;
                match tokio::time::timeout_at(deadline, &mut self.rx).await {
                    Ok(received) => received,
                    Err(_) => {
                        return Err(QuizError::ReplyTimeout {
                            expected: self.expectation.substring().map(str::to_owned),
                            elapsed: self.started.elapsed(),
                        })
                    }
                }
            }
            TimeoutPolicy::Unbounded => (&mut self.rx).await,
        };

        received.map_err(|_| QuizError::ConversationClosed)?
    }
}

impl Drop for Waiter {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn reply_matches_in_any_case() {
        let hub = ReplyHub::new();
        let waiter = hub
            .wait_for(Expectation::Containing("Отправьте"), TimeoutPolicy::default())
            .unwrap();
        hub.deliver("ОТПРАВЬТЕ мне следующий вопрос");

        let reply = waiter.finish().await.unwrap();
        assert_eq!(reply, "ОТПРАВЬТЕ мне следующий вопрос");
        assert!(!hub.has_listener());
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arriving_later_resolves() {
        let hub = ReplyHub::new();
        let waiter = hub.wait_for(Expectation::Any, TimeoutPolicy::default()).unwrap();

        let inbound = hub.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            inbound.deliver("whatever");
        });

        assert_eq!(waiter.finish().await.unwrap(), "whatever");
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_mismatch_is_an_error() {
        let hub = ReplyHub::new();
        let waiter = hub
            .wait_for(Expectation::Containing("пришлите описание"), TimeoutPolicy::default())
            .unwrap();
        hub.deliver("Извините, я не понял");

        match waiter.finish().await {
            Err(QuizError::ReplyMismatch { expected, actual }) => {
                assert_eq!(expected, "пришлите описание");
                assert_eq!(actual, "Извините, я не понял");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!hub.has_listener());
    }

    #[tokio::test(start_paused = true)]
    async fn silence_times_out_and_unregisters() {
        let hub = ReplyHub::new();
        let waiter = hub
            .wait_for(Expectation::Containing("в случайном порядке"), TimeoutPolicy::default())
            .unwrap();
        assert!(hub.has_listener());

        match waiter.finish().await {
            Err(QuizError::ReplyTimeout { expected, elapsed }) => {
                assert_eq!(expected.as_deref(), Some("в случайном порядке"));
                assert!(elapsed >= DEFAULT_TIMEOUT);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!hub.has_listener());

        // The next exchange can be opened right away.
        assert!(hub.wait_for(Expectation::Any, TimeoutPolicy::default()).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_policy_outlasts_strict_window() {
        let hub = ReplyHub::new();
        let waiter = hub.wait_for(Expectation::Any, TimeoutPolicy::Unbounded).unwrap();

        let inbound = hub.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            inbound.deliver("late but fine");
        });

        assert_eq!(waiter.finish().await.unwrap(), "late but fine");
    }

    #[test]
    fn one_exchange_at_a_time() {
        let hub = ReplyHub::new();
        let _first = hub.wait_for(Expectation::Any, TimeoutPolicy::Unbounded).unwrap();
        assert!(matches!(
            hub.wait_for(Expectation::Any, TimeoutPolicy::Unbounded),
            Err(QuizError::ExchangeInProgress)
        ));
    }

    #[test]
    fn dropping_the_scope_unregisters() {
        let hub = ReplyHub::new();
        let waiter = hub.wait_for(Expectation::Any, TimeoutPolicy::Unbounded).unwrap();
        drop(waiter);
        assert!(!hub.has_listener());
    }

    #[test]
    fn stray_replies_are_remembered() {
        let hub = ReplyHub::new();
        hub.deliver("Тест создан");
        assert_eq!(hub.last_reply().as_deref(), Some("Тест создан"));
        hub.clear_last_reply();
        assert_eq!(hub.last_reply(), None);
    }
}
