pub const DEFAULT_TOPIC: &str = "General";
pub const UNTITLED_QUIZ: &str = "Untitled quiz";
pub const UNTITLED_SUMMARY: &str = "Untitled summary";
pub const DEFAULT_NUMBER_OF_QUESTIONS: i16 = 10;

pub const QUESTIONS_UNAVAILABLE_PROMPT: &str = "Failed to load the questions for this quiz.";

/// Summary written by the simulated generator. `{name}` is replaced with the upload name.
pub const SIMULATED_SUMMARY_TEMPLATE: &str = "Summary of \"{name}\": this document covers its \
main ideas, key terms and the examples that support them. Review the flashcards and take a \
quiz on this topic to reinforce it. (Generated by the simulated assistant.)";

pub fn simulated_summary(name: &str) -> String {
    SIMULATED_SUMMARY_TEMPLATE.replace("{name}", name)
}

/// Reply of the simulated study assistant. `{message}` is replaced with the learner's message.
pub const SIMULATED_CHAT_REPLY_TEMPLATE: &str = "Hello! I received your message: \"{message}\". \
How can I help you today? (This is a simulated assistant reply.)";

pub fn simulated_chat_reply(message: &str) -> String {
    SIMULATED_CHAT_REPLY_TEMPLATE.replace("{message}", message)
}

/// Presenting attempts untouched for this long are dropped on the next start.
pub const ATTEMPT_IDLE_TIMEOUT_SECS: u64 = 2 * 60 * 60;
/// Finished attempts whose reports stay reachable by attempt id.
pub const FINISHED_ATTEMPTS_KEPT: usize = 512;
