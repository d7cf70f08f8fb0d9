use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    store::{ContentStore, DatabaseQuery, Filter, Page, Properties, Sort},
};

const PAGE_SIZE: u32 = 100;

/// `ContentStore` backed by the Notion REST API.
pub struct NotionStore {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    notion_version: String,
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Filter>,
    #[serde(skip_serializing_if = "<[Sort]>::is_empty")]
    sorts: &'a [Sort],
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionStore {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("study-companion/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.notion_api_url.trim_end_matches('/').to_string(),
            api_key: config.notion_api_key.clone(),
            notion_version: config.notion_version.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AppError::NotConfigured("NOTION_API_KEY is not set".to_string())
        })?;

        let response = request
            .bearer_auth(api_key.expose_secret())
            .header("Notion-Version", &self.notion_version)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
            return Err(map_api_error(status, body));
        }

        Ok(response.json::<T>().await?)
    }
}

fn map_api_error(status: StatusCode, body: ApiErrorBody) -> AppError {
    let detail = if body.message.is_empty() {
        status.to_string()
    } else {
        format!("{} ({})", body.message, body.code)
    };

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(detail),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::NotConfigured(format!("Content store rejected the credential: {}", detail))
        }
        _ => AppError::StoreError(format!("{}: {}", status.as_u16(), detail)),
    }
}

#[async_trait]
impl ContentStore for NotionStore {
    async fn query(&self, database_id: &str, query: &DatabaseQuery) -> AppResult<Vec<Page>> {
        let url = self.endpoint(&format!("databases/{}/query", database_id));
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = QueryBody {
                filter: query.filter.as_ref(),
                sorts: &query.sorts,
                start_cursor: cursor.take(),
                page_size: PAGE_SIZE,
            };
            let response: QueryResponse = self.send(self.client.post(&url).json(&body)).await?;
            pages.extend(response.results);

            match response.next_cursor {
                Some(next) if response.has_more => cursor = Some(next),
                _ => break,
            }
        }

        log::debug!("Queried {} pages from database {}", pages.len(), database_id);
        Ok(pages)
    }

    async fn retrieve(&self, page_id: &str) -> AppResult<Page> {
        let url = self.endpoint(&format!("pages/{}", page_id));
        self.send(self.client.get(&url)).await
    }

    async fn create(&self, database_id: &str, properties: Properties) -> AppResult<Page> {
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        });
        let page: Page = self
            .send(self.client.post(self.endpoint("pages")).json(&body))
            .await?;
        log::info!("Created page {} in database {}", page.id, database_id);
        Ok(page)
    }

    async fn update(&self, page_id: &str, properties: Properties) -> AppResult<Page> {
        let url = self.endpoint(&format!("pages/{}", page_id));
        let body = json!({ "properties": properties });
        self.send(self.client.patch(&url).json(&body)).await
    }
}
