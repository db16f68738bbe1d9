use std::fmt;

/// Slash commands understood by QuizBot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drops whatever QuizBot is currently doing.
    Cancel,
    NewQuiz,
    /// Leaves the quiz description empty.
    Skip,
    /// Closes the question list.
    Done,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancel => "/cancel",
            Self::NewQuiz => "/newquiz",
            Self::Skip => "/skip",
            Self::Done => "/done",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
