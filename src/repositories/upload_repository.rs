use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    constants::{defaults::UNTITLED_SUMMARY, properties::upload as prop},
    errors::{AppError, AppResult},
    models::domain::{NewUpload, Upload, UploadStatus},
    repositories::require_database,
    store::{properties::Properties, ContentStore, DatabaseQuery, Page, PropertyValue, SortDirection},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadRepository: Send + Sync {
    async fn list_by_status(&self, status: UploadStatus) -> AppResult<Vec<Upload>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Upload>;
    async fn create(&self, upload: NewUpload) -> AppResult<Upload>;
    async fn update_summary(&self, id: &str, summary: &str) -> AppResult<Upload>;
}

pub struct StoreUploadRepository {
    store: Arc<dyn ContentStore>,
    database_id: Option<String>,
}

impl StoreUploadRepository {
    pub fn new(store: Arc<dyn ContentStore>, database_id: Option<String>) -> Self {
        Self { store, database_id }
    }
}

/// Upload lookups only accept pages carrying the name and status columns.
pub fn has_upload_shape(page: &Page) -> bool {
    page.has_property(prop::NAME) && page.has_property(prop::STATUS)
}

pub fn upload_from_page(page: &Page) -> Upload {
    let name = page
        .text(prop::NAME)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNTITLED_SUMMARY.to_string());

    Upload {
        id: page.id.clone(),
        name,
        status: page
            .select(prop::STATUS)
            .map(UploadStatus::parse)
            .unwrap_or(UploadStatus::Uploaded),
        summary: page.text(prop::SUMMARY).filter(|s| !s.is_empty()),
        file_url: page.url(prop::FILE_URL).map(str::to_string),
        created_at: page.datetime(prop::CREATED_AT).or(page.created_time),
    }
}

#[async_trait]
impl UploadRepository for StoreUploadRepository {
    async fn list_by_status(&self, status: UploadStatus) -> AppResult<Vec<Upload>> {
        let database_id = require_database(&self.database_id, "NOTION_DATABASE_ID_UPLOADS")?;
        let query = DatabaseQuery::new()
            .filter_select(prop::STATUS, status.as_str())
            .sort(prop::CREATED_AT, SortDirection::Descending);

        let pages = self.store.query(database_id, &query).await?;
        Ok(pages.iter().map(upload_from_page).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Upload> {
        require_database(&self.database_id, "NOTION_DATABASE_ID_UPLOADS")?;
        let page = self.store.retrieve(id).await?;

        if !has_upload_shape(&page) {
            log::warn!("Page {} does not have the upload properties", id);
            return Err(AppError::NotFound(format!("Upload '{}' not found", id)));
        }
        Ok(upload_from_page(&page))
    }

    async fn create(&self, upload: NewUpload) -> AppResult<Upload> {
        let database_id = require_database(&self.database_id, "NOTION_DATABASE_ID_UPLOADS")?;

        let mut properties = Properties::new();
        properties.insert(prop::NAME.to_string(), PropertyValue::title(&upload.name));
        properties.insert(
            prop::STATUS.to_string(),
            PropertyValue::select(UploadStatus::Uploaded.as_str()),
        );
        properties.insert(
            prop::CREATED_AT.to_string(),
            PropertyValue::date(Utc::now().date_naive()),
        );
        if let Some(url) = &upload.file_url {
            properties.insert(prop::FILE_URL.to_string(), PropertyValue::url(url));
        }

        let page = self.store.create(database_id, properties).await?;
        Ok(Upload {
            id: page.id,
            name: upload.name,
            status: UploadStatus::Uploaded,
            summary: None,
            file_url: upload.file_url,
            created_at: page.created_time.or_else(|| Some(Utc::now())),
        })
    }

    async fn update_summary(&self, id: &str, summary: &str) -> AppResult<Upload> {
        require_database(&self.database_id, "NOTION_DATABASE_ID_UPLOADS")?;

        let mut properties = Properties::new();
        properties.insert(prop::SUMMARY.to_string(), PropertyValue::rich_text(summary));
        properties.insert(
            prop::STATUS.to_string(),
            PropertyValue::select(UploadStatus::Summarized.as_str()),
        );

        let page = self.store.update(id, properties).await?;
        Ok(upload_from_page(&page))
    }
}
