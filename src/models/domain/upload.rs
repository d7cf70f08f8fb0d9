use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Upload {
    pub id: String,
    pub name: String,
    pub status: UploadStatus,
    pub summary: Option<String>,
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUpload {
    pub name: String,
    pub file_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum UploadStatus {
    Uploaded,
    Processing,
    Summarized,
}

impl UploadStatus {
    /// The select option name used by the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Uploaded => "Uploaded",
            UploadStatus::Processing => "Processing",
            UploadStatus::Summarized => "Summarized",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "processing" => UploadStatus::Processing,
            "summarized" => UploadStatus::Summarized,
            _ => UploadStatus::Uploaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip_through_store_labels() {
        for status in [
            UploadStatus::Uploaded,
            UploadStatus::Processing,
            UploadStatus::Summarized,
        ] {
            assert_eq!(UploadStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_reads_as_uploaded() {
        assert_eq!(UploadStatus::parse("Archived"), UploadStatus::Uploaded);
    }
}
