pub mod flashcard;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod quiz_result;
pub mod upload;
pub use flashcard::{Flashcard, NewFlashcard};
pub use quiz::{NewQuiz, Quiz};
pub use quiz_attempt::{AttemptState, QuizAttempt, ScoreResult};
pub use quiz_question::Question;
pub use quiz_result::{QuizResultReport, ResultRow};
pub use upload::{NewUpload, Upload, UploadStatus};
