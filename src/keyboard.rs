//! Buttons of the reply keyboards QuizBot shows while finishing a quiz.
//! The labels are sent back verbatim as plain messages.

use clap::ValueEnum;

/// Time a participant gets for each question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TimeLimit {
    #[value(name = "10s")]
    Sec10,
    #[value(name = "15s")]
    Sec15,
    #[default]
    #[value(name = "30s")]
    Sec30,
    #[value(name = "45s")]
    Sec45,
    #[value(name = "1m")]
    Min1,
    #[value(name = "2m")]
    Min2,
    #[value(name = "3m")]
    Min3,
    #[value(name = "4m")]
    Min4,
    #[value(name = "5m")]
    Min5,
    #[value(name = "10m")]
    Min10,
    #[value(name = "none")]
    Unlimited,
}

impl TimeLimit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sec10 => "10 сек",
            Self::Sec15 => "15 сек",
            Self::Sec30 => "30 сек",
            Self::Sec45 => "45 сек",
            Self::Min1 => "1 мин",
            Self::Min2 => "2 мин",
            Self::Min3 => "3 мин",
            Self::Min4 => "4 мин",
            Self::Min5 => "5 мин",
            Self::Min10 => "10 мин",
            Self::Unlimited => "Без ограничения",
        }
    }
}

/// Which parts of the quiz QuizBot shuffles for every participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShuffleMode {
    All,
    #[value(name = "in-order")]
    InOrder,
    #[value(name = "questions")]
    QuestionsOnly,
    #[default]
    #[value(name = "answers")]
    AnswersOnly,
}

impl ShuffleMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "Перемешать всё",
            Self::InOrder => "По порядку",
            Self::QuestionsOnly => "Только вопросы",
            Self::AnswersOnly => "Только ответы",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_usual_setup() {
        assert_eq!(TimeLimit::default().label(), "30 сек");
        assert_eq!(ShuffleMode::default().label(), "Только ответы");
    }

    #[test]
    fn parses_cli_names() {
        assert_eq!(TimeLimit::from_str("2m", false), Ok(TimeLimit::Min2));
        assert_eq!(ShuffleMode::from_str("in-order", false), Ok(ShuffleMode::InOrder));
    }
}
