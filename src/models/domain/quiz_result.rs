use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    quiz_attempt::{is_correct, ScoreResult},
    quiz_question::Question,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizResultReport {
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: usize,
    pub total: usize,
    pub summary: String, // "{score} of {total}"
    pub rows: Vec<ResultRow>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub number: usize,
    pub question: String,
    pub user_answer: Option<String>, // None when left unanswered
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>, // only shown on incorrect rows
}

impl QuizResultReport {
    pub fn build(
        quiz_id: &str,
        quiz_title: &str,
        questions: &[Question],
        answers: &[String],
        result: ScoreResult,
    ) -> Self {
        let rows = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = answers.get(index).map(String::as_str).unwrap_or_default();
                let correct = is_correct(answer, &question.correct_answer);
                ResultRow {
                    number: index + 1,
                    question: question.question.clone(),
                    user_answer: (!answer.is_empty()).then(|| answer.to_string()),
                    is_correct: correct,
                    correct_answer: (!correct).then(|| question.correct_answer.clone()),
                }
            })
            .collect();

        QuizResultReport {
            quiz_id: quiz_id.to_string(),
            quiz_title: quiz_title.to_string(),
            score: result.score,
            total: result.total,
            summary: format!("{} of {}", result.score, result.total),
            rows,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz_attempt::score_answers;

    fn question(prompt: &str, correct: &str) -> Question {
        Question {
            question: prompt.to_string(),
            options: vec![correct.to_string(), "other".to_string()],
            correct_answer: correct.to_string(),
        }
    }

    #[test]
    fn report_lists_rows_and_reveals_correct_answer_only_when_wrong() {
        let questions = vec![question("Q1", "A"), question("Q2", "X"), question("Q3", "C")];
        let answers: Vec<String> = vec!["A".into(), "B".into(), String::new()];
        let result = score_answers(&questions, &answers);

        let report = QuizResultReport::build("quiz-1", "Basics", &questions, &answers, result);

        assert_eq!(report.summary, "1 of 3");
        assert_eq!(report.rows.len(), 3);

        assert!(report.rows[0].is_correct);
        assert_eq!(report.rows[0].correct_answer, None);

        assert!(!report.rows[1].is_correct);
        assert_eq!(report.rows[1].user_answer.as_deref(), Some("B"));
        assert_eq!(report.rows[1].correct_answer.as_deref(), Some("X"));

        assert_eq!(report.rows[2].number, 3);
        assert_eq!(report.rows[2].user_answer, None);
        assert_eq!(report.rows[2].correct_answer.as_deref(), Some("C"));
    }

    #[test]
    fn report_agrees_with_score() {
        let questions = vec![question("Q1", "A"), question("Q2", "B")];
        let answers: Vec<String> = vec!["A".into(), "B".into()];
        let result = score_answers(&questions, &answers);

        let report = QuizResultReport::build("quiz-1", "Basics", &questions, &answers, result);
        let correct_rows = report.rows.iter().filter(|r| r.is_correct).count();

        assert_eq!(correct_rows, report.score);
        assert_eq!(report.summary, "2 of 2");
    }
}
