//! Founder questionnaire.
//!
//! A fixed catalogue of single-choice questions whose answers personalize the
//! synthesized artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One single-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

impl Question {
    pub fn accepts(&self, option: &str) -> bool {
        self.options.contains(&option)
    }
}

pub static QUESTIONS: [Question; 5] = [
    Question {
        id: "experience",
        prompt: "What is your experience level with startups?",
        options: &[
            "Complete beginner",
            "Some experience",
            "Experienced entrepreneur",
            "Industry expert",
        ],
    },
    Question {
        id: "investment",
        prompt: "What is your investment capacity?",
        options: &[
            "Bootstrapped (self-funded)",
            "Small investment ($1K-$10K)",
            "Medium investment ($10K-$100K)",
            "Large investment ($100K+)",
        ],
    },
    Question {
        id: "timeline",
        prompt: "What is your preferred timeline to launch?",
        options: &[
            "Immediately (1-3 months)",
            "Short term (3-6 months)",
            "Medium term (6-12 months)",
            "Long term (1+ years)",
        ],
    },
    Question {
        id: "team",
        prompt: "What is your team situation?",
        options: &[
            "Solo founder",
            "Small team (2-5 people)",
            "Medium team (5-20 people)",
            "Large team (20+ people)",
        ],
    },
    Question {
        id: "market",
        prompt: "What type of market are you targeting?",
        options: &["Local/Regional", "National", "International", "Global"],
    },
];

pub fn question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Answers keyed by question id. Ordered, so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionnaireAnswers(BTreeMap<String, String>);

impl QuestionnaireAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that every catalogue question has a valid answer and that no
    /// unknown question ids are present.
    pub fn validate(&self) -> Result<(), String> {
        for (id, option) in &self.0 {
            let Some(question) = question(id) else {
                return Err(format!("unknown question '{id}'"));
            };
            if !question.accepts(option) {
                return Err(format!("'{option}' is not an option of '{id}'"));
            }
        }
        match QUESTIONS.iter().find(|q| !self.0.contains_key(q.id)) {
            Some(missing) => Err(format!("question '{}' is unanswered", missing.id)),
            None => Ok(()),
        }
    }

    fn insert(&mut self, question_id: &str, option: &str) {
        self.0.insert(question_id.to_string(), option.to_string());
    }
}

/// Rejected questionnaire interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("'{option}' is not an option of '{question}'")]
    UnknownOption { question: String, option: String },
    #[error("question '{0}' must be answered first")]
    Unanswered(&'static str),
}

/// Progress of [`Questionnaire::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionnaireStep {
    /// Moved on to the question at this index.
    Question(usize),
    /// The last question was answered.
    Complete(QuestionnaireAnswers),
}

/// Cursor over the catalogue, one question at a time.
#[derive(Debug, Clone, Default)]
pub struct Questionnaire {
    cursor: usize,
    answers: QuestionnaireAnswers,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.cursor]
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Fraction of the catalogue reached, counting the current question.
    pub fn progress(&self) -> f64 {
        (self.cursor + 1) as f64 / QUESTIONS.len() as f64
    }

    pub fn answers(&self) -> &QuestionnaireAnswers {
        &self.answers
    }

    /// Records an answer. Earlier answers to the same question are replaced.
    pub fn answer(&mut self, question_id: &str, option: &str) -> Result<(), AnswerError> {
        let question =
            question(question_id).ok_or_else(|| AnswerError::UnknownQuestion(question_id.to_string()))?;
        if !question.accepts(option) {
            return Err(AnswerError::UnknownOption {
                question: question_id.to_string(),
                option: option.to_string(),
            });
        }
        self.answers.insert(question_id, option);
        Ok(())
    }

    /// Advances past the current question, which must be answered.
    pub fn next(&mut self) -> Result<QuestionnaireStep, AnswerError> {
        let current = self.current();
        if self.answers.get(current.id).is_none() {
            return Err(AnswerError::Unanswered(current.id));
        }
        if self.cursor + 1 < QUESTIONS.len() {
            self.cursor += 1;
            return Ok(QuestionnaireStep::Question(self.cursor));
        }
        Ok(QuestionnaireStep::Complete(self.answers.clone()))
    }

    /// Moves back one question. Returns `false` on the first question.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(questionnaire: &mut Questionnaire) -> QuestionnaireAnswers {
        loop {
            let current = questionnaire.current();
            questionnaire.answer(current.id, current.options[0]).unwrap();
            if let QuestionnaireStep::Complete(answers) = questionnaire.next().unwrap() {
                return answers;
            }
        }
    }

    #[test]
    fn test_next_requires_an_answer() {
        let mut questionnaire = Questionnaire::new();
        assert_eq!(questionnaire.next(), Err(AnswerError::Unanswered("experience")));

        questionnaire.answer("experience", "Some experience").unwrap();
        assert_eq!(questionnaire.next(), Ok(QuestionnaireStep::Question(1)));
        assert_eq!(questionnaire.current().id, "investment");
    }

    #[test]
    fn test_answer_rejects_unknown_option() {
        let mut questionnaire = Questionnaire::new();
        let err = questionnaire.answer("team", "A village").unwrap_err();
        assert!(matches!(err, AnswerError::UnknownOption { .. }));
        assert!(questionnaire.answers().is_empty());
    }

    #[test]
    fn test_back_keeps_answers() {
        let mut questionnaire = Questionnaire::new();
        questionnaire.answer("experience", "Industry expert").unwrap();
        questionnaire.next().unwrap();

        assert!(questionnaire.back());
        assert!(!questionnaire.back());
        assert_eq!(questionnaire.answers().get("experience"), Some("Industry expert"));
    }

    #[test]
    fn test_completed_answers_validate() {
        let mut questionnaire = Questionnaire::new();
        let answers = answer_all(&mut questionnaire);

        assert_eq!(answers.len(), 5);
        assert!(answers.validate().is_ok());
        assert_eq!(questionnaire.progress(), 1.0);
    }

    #[test]
    fn test_validate_reports_gaps_and_unknown_ids() {
        let partial: QuestionnaireAnswers =
            serde_json::from_str(r#"{"experience":"Some experience"}"#).unwrap();
        assert!(partial.validate().unwrap_err().contains("investment"));

        let unknown: QuestionnaireAnswers = serde_json::from_str(r#"{"zodiac":"Leo"}"#).unwrap();
        assert!(unknown.validate().unwrap_err().contains("zodiac"));
    }
}
