use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

pub const ANONYMOUS_SUBJECT: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (learner id)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(subject: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    /// Identity attached to requests when authentication is disabled.
    pub fn anonymous() -> Self {
        Self {
            sub: ANONYMOUS_SUBJECT.to_string(),
            iat: 0,
            exp: 0,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.sub == ANONYMOUS_SUBJECT
    }
}
