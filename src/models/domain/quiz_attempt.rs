use serde::Serialize;
use thiserror::Error;

use crate::{errors::AppError, models::domain::quiz_question::Question};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptState {
    Presenting { index: usize },
    Finished(ScoreResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("a quiz attempt needs at least one question")]
    NoQuestions,

    #[error("the attempt is already finished")]
    Finished,

    #[error("'{0}' is not one of the options for this question")]
    OptionNotOffered(String),
}

impl From<AttemptError> for AppError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::Finished => AppError::Conflict(err.to_string()),
            AttemptError::NoQuestions | AttemptError::OptionNotOffered(_) => {
                AppError::ValidationError(err.to_string())
            }
        }
    }
}

/// An answer counts only when it equals a non-empty correct answer.
pub fn is_correct(answer: &str, correct_answer: &str) -> bool {
    !correct_answer.is_empty() && answer == correct_answer
}

pub fn score_answers(questions: &[Question], answers: &[String]) -> ScoreResult {
    let score = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| is_correct(answer, &question.correct_answer))
        .count();

    ScoreResult {
        score,
        total: questions.len(),
    }
}

/// One pass through a quiz. Answers are only judged on submission, so
/// nothing here reveals a correct answer while the attempt is presenting.
#[derive(Clone, Debug)]
pub struct QuizAttempt {
    questions: Vec<Question>,
    user_answers: Vec<String>,
    state: AttemptState,
}

impl QuizAttempt {
    pub fn new(questions: Vec<Question>) -> Result<Self, AttemptError> {
        if questions.is_empty() {
            return Err(AttemptError::NoQuestions);
        }
        let user_answers = vec![String::new(); questions.len()];

        Ok(Self {
            questions,
            user_answers,
            state: AttemptState::Presenting { index: 0 },
        })
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.user_answers
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AttemptState::Finished(_))
    }

    fn presenting_index(&self) -> Result<usize, AttemptError> {
        match self.state {
            AttemptState::Presenting { index } => Ok(index),
            AttemptState::Finished(_) => Err(AttemptError::Finished),
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.presenting_index().ok()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|index| self.questions.get(index))
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.current_index()
            .and_then(|index| self.user_answers.get(index))
            .map(String::as_str)
    }

    /// Records `option` for the current question; a later answer replaces it.
    pub fn answer(&mut self, option: &str) -> Result<(), AttemptError> {
        let index = self.presenting_index()?;
        if !self.questions[index].offers(option) {
            return Err(AttemptError::OptionNotOffered(option.to_string()));
        }
        self.user_answers[index] = option.to_string();
        Ok(())
    }

    /// Moves to the next question, or submits when on the last one.
    pub fn next(&mut self) -> Result<AttemptState, AttemptError> {
        let index = self.presenting_index()?;
        if index + 1 < self.total() {
            self.state = AttemptState::Presenting { index: index + 1 };
        } else {
            self.submit();
        }
        Ok(self.state)
    }

    /// Moves back one question; stays put on the first.
    pub fn previous(&mut self) -> Result<AttemptState, AttemptError> {
        let index = self.presenting_index()?;
        if index > 0 {
            self.state = AttemptState::Presenting { index: index - 1 };
        }
        Ok(self.state)
    }

    /// Scores the attempt and finishes it. Repeated calls return the same result.
    pub fn submit(&mut self) -> ScoreResult {
        if let AttemptState::Finished(result) = self.state {
            return result;
        }
        let result = score_answers(&self.questions, &self.user_answers);
        self.state = AttemptState::Finished(result);
        result
    }
}
