//! Property names used by the store databases.

pub mod quiz {
    pub const TITLE: &str = "Title";
    pub const TOPIC: &str = "Topic";
    pub const NUMBER_OF_QUESTIONS: &str = "Number of Questions";
    pub const QUESTIONS_CONTENT: &str = "QuestionsContent";
    pub const CREATED_AT: &str = "Created At";
    pub const LAST_SCORE: &str = "Last Score";
    pub const LAST_ATTEMPTED: &str = "Last Attempted";
}

pub mod flashcard {
    pub const QUESTION: &str = "Question";
    pub const ANSWER: &str = "Answer";
    pub const TOPIC: &str = "Topic";
    pub const LAST_REVIEWED: &str = "Last Reviewed";
}

pub mod upload {
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Status";
    pub const SUMMARY: &str = "Summary";
    pub const FILE_URL: &str = "File URL";
    pub const CREATED_AT: &str = "Created At";
}
