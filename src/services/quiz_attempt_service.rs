use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    constants::defaults::{ATTEMPT_IDLE_TIMEOUT_SECS, FINISHED_ATTEMPTS_KEPT},
    errors::{AppError, AppResult},
    models::{
        domain::{quiz_attempt::AttemptError, QuizAttempt, QuizResultReport, ScoreResult},
        dto::response::{AttemptResponse, AttemptView},
    },
    services::quiz_service::QuizService,
};

/// An attempt still being answered.
struct AttemptSession {
    learner: String,
    quiz_id: String,
    quiz_title: String,
    attempt: QuizAttempt,
    touched: Instant,
}

impl AttemptSession {
    fn view(&self, attempt_id: &Uuid) -> AppResult<AttemptResponse> {
        AttemptView::from_attempt(
            &attempt_id.to_string(),
            &self.quiz_id,
            &self.quiz_title,
            &self.attempt,
        )
        .map(AttemptResponse::Presenting)
        .ok_or_else(|| AppError::InternalError("attempt has no current question".to_string()))
    }

    fn report(&mut self) -> QuizResultReport {
        let result = self.attempt.submit();
        QuizResultReport::build(
            &self.quiz_id,
            &self.quiz_title,
            self.attempt.questions(),
            self.attempt.answers(),
            result,
        )
    }
}

struct FinishedAttempt {
    learner: String,
    report: QuizResultReport,
}

/// Reports of finished attempts, oldest dropped first once full.
struct FinishedAttempts {
    capacity: usize,
    order: VecDeque<Uuid>,
    reports: HashMap<Uuid, FinishedAttempt>,
}

impl FinishedAttempts {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            reports: HashMap::new(),
        }
    }

    fn insert(&mut self, id: Uuid, finished: FinishedAttempt) {
        if self.reports.insert(id, finished).is_none() {
            self.order.push_back(id);
        }
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.reports.remove(&oldest);
            }
        }
    }

    fn get(&self, id: &Uuid, learner: &str) -> Option<&QuizResultReport> {
        self.reports
            .get(id)
            .filter(|finished| finished.learner == learner)
            .map(|finished| &finished.report)
    }

    fn remove(&mut self, id: &Uuid, learner: &str) -> bool {
        if self.get(id, learner).is_none() {
            return false;
        }
        self.reports.remove(id);
        self.order.retain(|kept| kept != id);
        true
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.reports.len()
    }
}

/// In-memory attempts. A finished attempt leaves the session table and only
/// its report is kept; idle sessions are swept when a new attempt starts.
/// Every attempt belongs to the learner who started it.
pub struct QuizAttemptService {
    quiz_service: Arc<QuizService>,
    sessions: RwLock<HashMap<Uuid, AttemptSession>>,
    finished: RwLock<FinishedAttempts>,
    last_results: RwLock<HashMap<(String, String), QuizResultReport>>,
    record_scores: bool,
    idle_timeout: Duration,
}

impl QuizAttemptService {
    pub fn new(quiz_service: Arc<QuizService>, record_scores: bool) -> Self {
        Self::with_limits(
            quiz_service,
            record_scores,
            Duration::from_secs(ATTEMPT_IDLE_TIMEOUT_SECS),
            FINISHED_ATTEMPTS_KEPT,
        )
    }

    pub fn with_limits(
        quiz_service: Arc<QuizService>,
        record_scores: bool,
        idle_timeout: Duration,
        finished_kept: usize,
    ) -> Self {
        Self {
            quiz_service,
            sessions: RwLock::new(HashMap::new()),
            finished: RwLock::new(FinishedAttempts::new(finished_kept)),
            last_results: RwLock::new(HashMap::new()),
            record_scores,
            idle_timeout,
        }
    }

    pub async fn start(&self, learner: &str, quiz_id: &str) -> AppResult<(Uuid, AttemptResponse)> {
        let quiz = self.quiz_service.get_quiz(quiz_id).await?;
        let attempt = QuizAttempt::new(quiz.questions)?;

        let attempt_id = Uuid::new_v4();
        let session = AttemptSession {
            learner: learner.to_string(),
            quiz_id: quiz.id,
            quiz_title: quiz.title,
            attempt,
            touched: Instant::now(),
        };
        let response = session.view(&attempt_id)?;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.touched.elapsed() < self.idle_timeout);
        if sessions.len() < before {
            log::debug!("Dropped {} idle attempts", before - sessions.len());
        }
        sessions.insert(attempt_id, session);
        drop(sessions);

        log::debug!("Started attempt {} for quiz {}", attempt_id, quiz_id);
        Ok((attempt_id, response))
    }

    pub async fn view(&self, learner: &str, attempt_id: &str) -> AppResult<AttemptResponse> {
        let id = parse_attempt_id(attempt_id)?;
        let mut sessions = self.sessions.write().await;

        if let Some(session) = owned(sessions.get_mut(&id), learner) {
            session.touched = Instant::now();
            return session.view(&id);
        }

        self.finished
            .read()
            .await
            .get(&id, learner)
            .cloned()
            .map(AttemptResponse::Finished)
            .ok_or_else(|| attempt_not_found(attempt_id))
    }

    pub async fn answer(
        &self,
        learner: &str,
        attempt_id: &str,
        option: &str,
    ) -> AppResult<AttemptResponse> {
        self.step(learner, attempt_id, false, |attempt| attempt.answer(option))
            .await
    }

    pub async fn next(&self, learner: &str, attempt_id: &str) -> AppResult<AttemptResponse> {
        self.step(learner, attempt_id, false, |attempt| attempt.next().map(|_| ()))
            .await
    }

    pub async fn previous(&self, learner: &str, attempt_id: &str) -> AppResult<AttemptResponse> {
        self.step(learner, attempt_id, false, |attempt| {
            attempt.previous().map(|_| ())
        })
        .await
    }

    /// Submitting a finished attempt returns its existing report.
    pub async fn submit(&self, learner: &str, attempt_id: &str) -> AppResult<QuizResultReport> {
        let response = self
            .step(learner, attempt_id, true, |attempt| {
                attempt.submit();
                Ok(())
            })
            .await?;

        match response {
            AttemptResponse::Finished(report) => Ok(report),
            AttemptResponse::Presenting(_) => Err(AppError::InternalError(
                "submitted attempt is still presenting".to_string(),
            )),
        }
    }

    pub async fn result(&self, learner: &str, attempt_id: &str) -> AppResult<QuizResultReport> {
        let id = parse_attempt_id(attempt_id)?;
        let sessions = self.sessions.read().await;

        if owned_ref(sessions.get(&id), learner).is_some() {
            return Err(AppError::Conflict(
                "The attempt has not been submitted yet".to_string(),
            ));
        }

        self.finished
            .read()
            .await
            .get(&id, learner)
            .cloned()
            .ok_or_else(|| attempt_not_found(attempt_id))
    }

    pub async fn discard(&self, learner: &str, attempt_id: &str) -> AppResult<()> {
        let id = parse_attempt_id(attempt_id)?;
        let mut sessions = self.sessions.write().await;

        let removed = if owned_ref(sessions.get(&id), learner).is_some() {
            sessions.remove(&id).is_some()
        } else {
            self.finished.write().await.remove(&id, learner)
        };

        if !removed {
            return Err(attempt_not_found(attempt_id));
        }
        log::debug!("Discarded attempt {}", id);
        Ok(())
    }

    pub async fn last_result(&self, learner: &str, quiz_id: &str) -> AppResult<QuizResultReport> {
        self.last_results
            .read()
            .await
            .get(&(learner.to_string(), quiz_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("No finished attempt for quiz '{}'", quiz_id))
            })
    }

    /// Applies `action` to a presenting attempt. An attempt that ends up
    /// finished moves from the session table into the finished reports.
    async fn step<F>(
        &self,
        learner: &str,
        attempt_id: &str,
        resubmit: bool,
        action: F,
    ) -> AppResult<AttemptResponse>
    where
        F: FnOnce(&mut QuizAttempt) -> Result<(), AttemptError>,
    {
        let id = parse_attempt_id(attempt_id)?;
        let mut sessions = self.sessions.write().await;

        let Some(session) = owned(sessions.get_mut(&id), learner) else {
            let finished = self.finished.read().await;
            return match finished.get(&id, learner) {
                Some(report) if resubmit => Ok(AttemptResponse::Finished(report.clone())),
                Some(_) => Err(AttemptError::Finished.into()),
                None => Err(attempt_not_found(attempt_id)),
            };
        };

        action(&mut session.attempt)?;
        session.touched = Instant::now();
        if !session.attempt.is_finished() {
            return session.view(&id);
        }

        let report = session.report();
        sessions.remove(&id);
        self.finished.write().await.insert(
            id,
            FinishedAttempt {
                learner: learner.to_string(),
                report: report.clone(),
            },
        );
        drop(sessions);

        self.on_finished(learner, report.clone()).await;
        Ok(AttemptResponse::Finished(report))
    }

    async fn on_finished(&self, learner: &str, report: QuizResultReport) {
        log::info!("Quiz {} finished with {}", report.quiz_id, report.summary);
        let quiz_id = report.quiz_id.clone();
        let result = ScoreResult {
            score: report.score,
            total: report.total,
        };
        self.last_results
            .write()
            .await
            .insert((learner.to_string(), quiz_id.clone()), report);

        if self.record_scores {
            if let Err(err) = self.quiz_service.record_score(&quiz_id, result).await {
                log::warn!("Could not record score for quiz {}: {}", quiz_id, err);
            }
        }
    }
}

fn owned<'a>(session: Option<&'a mut AttemptSession>, learner: &str) -> Option<&'a mut AttemptSession> {
    session.filter(|session| session.learner == learner)
}

fn owned_ref<'a>(session: Option<&'a AttemptSession>, learner: &str) -> Option<&'a AttemptSession> {
    session.filter(|session| session.learner == learner)
}

fn parse_attempt_id(attempt_id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(attempt_id.trim()).map_err(|_| attempt_not_found(attempt_id))
}

fn attempt_not_found(attempt_id: &str) -> AppError {
    AppError::NotFound(format!("Attempt '{}' not found", attempt_id))
}
