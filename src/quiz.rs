use std::fmt;
use std::path::Path;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

pub const MAX_QUIZ_TITLE_LENGTH: usize = 128;
pub const MAX_QUIZ_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_QUESTION_TITLE_LENGTH: usize = 2000;
pub const MAX_ANSWER_LENGTH: usize = 100;
pub const MAX_INCORRECT_ANSWERS: usize = 9;
pub const MAX_SOLUTION_LENGTH: usize = 200;

/// Longest question title QuizBot accepts as the poll question itself.
pub const POLL_TITLE_THRESHOLD: usize = 256;

/// A quiz definition as stored in a source file.
///
/// `title` and `desc` are accepted as aliases of `quiz_title` and `quiz_desc`,
/// serialisation always writes the canonical names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Quiz {
    #[serde(alias = "title")]
    #[garde(length(chars, min = 1, max = MAX_QUIZ_TITLE_LENGTH))]
    quiz_title: String,
    #[serde(alias = "desc", default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1, max = MAX_QUIZ_DESCRIPTION_LENGTH))]
    quiz_desc: Option<String>,
    #[garde(length(min = 1), dive)]
    questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Question {
    #[garde(length(chars, min = 1, max = MAX_QUESTION_TITLE_LENGTH))]
    title: String,
    #[garde(length(chars, min = 1, max = MAX_ANSWER_LENGTH))]
    correct_answer: String,
    #[garde(
        length(min = 1, max = MAX_INCORRECT_ANSWERS),
        inner(length(chars, min = 1, max = MAX_ANSWER_LENGTH))
    )]
    incorrect_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1, max = MAX_SOLUTION_LENGTH))]
    solution: Option<String>,
}

impl Quiz {
    /// Builds and validates a quiz.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        questions: Vec<Question>,
    ) -> Result<Self> {
        let quiz = Self {
            quiz_title: title.into(),
            quiz_desc: description,
            questions,
        };
        quiz.validate()
            .map_err(|report| QuizError::Invalid {
                origin: String::from("<memory>"),
                report,
            })?;
        Ok(quiz)
    }

    /// Parses and validates a YAML document. `origin` names the document in errors.
    pub fn from_yaml_str(origin: &str, yaml: &str) -> Result<Self> {
        let quiz: Quiz = serde_yaml::from_str(yaml).map_err(|source| QuizError::Parse {
            origin: origin.to_owned(),
            source,
        })?;
        quiz.validate().map_err(|report| QuizError::Invalid {
            origin: origin.to_owned(),
            report,
        })?;
        Ok(quiz)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml_str(&path.display().to_string(), &yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| QuizError::Serialize {
            title: self.quiz_title.clone(),
            source,
        })
    }

    pub fn title(&self) -> &str {
        &self.quiz_title
    }

    pub fn description(&self) -> Option<&str> {
        self.quiz_desc.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Question {
    pub fn new(
        title: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        solution: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
            solution,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    /// Whether the title is too long for a poll question and has to be sent
    /// as a separate message ahead of the poll.
    pub fn needs_preamble(&self) -> bool {
        self.title.chars().count() > POLL_TITLE_THRESHOLD
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({} questions)", self.quiz_title, self.questions.len())
    }
}
