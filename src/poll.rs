use crate::quiz::Question;

/// Question text used for polls whose real title is sent as a preceding message.
pub const LONG_TITLE_PLACEHOLDER: &str = "Выберите ответ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    /// 1-based position of the option in the poll.
    pub id: u8,
    pub text: String,
}

/// A quiz-mode poll as QuizBot expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPayload {
    pub question: String,
    pub options: Vec<PollOption>,
    pub correct_option: u8,
    pub solution: Option<String>,
}

impl PollPayload {
    /// Options are `[correct_answer, incorrect_answers..]`, so the correct one is always `1`.
    pub fn from_question(question: &Question) -> Self {
        let text = if question.needs_preamble() {
            LONG_TITLE_PLACEHOLDER.to_owned()
        } else {
            question.title().to_owned()
        };

        let options = std::iter::once(question.correct_answer())
            .chain(question.incorrect_answers().iter().map(String::as_str))
            .zip(1u8..)
            .map(|(text, id)| PollOption {
                id,
                text: text.to_owned(),
            })
            .collect();

        Self {
            question: text,
            options,
            correct_option: 1,
            solution: question.solution().map(str::to_owned),
        }
    }

    pub fn option_texts(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.text.as_str())
    }

    /// 0-based index of the correct option, as the Bot API counts them.
    pub fn correct_option_index(&self) -> u8 {
        self.correct_option - 1
    }
}
