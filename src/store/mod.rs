pub mod cache;
pub mod notion;
pub mod properties;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

pub use cache::QueryCache;
pub use notion::NotionStore;
pub use properties::{Properties, PropertyValue};

/// One record of a store database.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Page {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub properties: Properties,
}

impl Page {
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.properties.get(name).and_then(PropertyValue::as_text)
    }

    pub fn select(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(PropertyValue::as_select)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.properties.get(name).and_then(PropertyValue::as_number)
    }

    pub fn url(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(PropertyValue::as_url)
    }

    pub fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        self.properties.get(name).and_then(PropertyValue::as_datetime)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_select(mut self, property: &str, equals: &str) -> Self {
        self.filter = Some(Filter {
            property: property.to_string(),
            condition: FilterCondition::Select {
                equals: equals.to_string(),
            },
        });
        self
    }

    pub fn sort(mut self, property: &str, direction: SortDirection) -> Self {
        self.sorts.push(Sort {
            property: property.to_string(),
            direction,
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Filter {
    pub property: String,
    #[serde(flatten)]
    pub condition: FilterCondition,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Select { equals: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The remote content store every record is persisted in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn query(&self, database_id: &str, query: &DatabaseQuery) -> AppResult<Vec<Page>>;
    async fn retrieve(&self, page_id: &str) -> AppResult<Page>;
    async fn create(&self, database_id: &str, properties: Properties) -> AppResult<Page>;
    async fn update(&self, page_id: &str, properties: Properties) -> AppResult<Page>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_serializes_filter_and_sorts() {
        let query = DatabaseQuery::new()
            .filter_select("Status", "Summarized")
            .sort("Created At", SortDirection::Descending);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": { "property": "Status", "select": { "equals": "Summarized" } },
                "sorts": [ { "property": "Created At", "direction": "descending" } ]
            })
        );
    }

    #[test]
    fn empty_query_serializes_to_empty_object() {
        assert_eq!(serde_json::to_value(DatabaseQuery::new()).unwrap(), json!({}));
    }

    #[test]
    fn page_reads_typed_properties() {
        let page: Page = serde_json::from_value(json!({
            "object": "page",
            "id": "page-1",
            "created_time": "2024-02-01T08:00:00.000Z",
            "properties": {
                "Title": { "type": "title", "title": [ { "plain_text": "Quiz" } ] },
                "Topic": { "type": "select", "select": { "id": "x", "name": "History", "color": "red" } },
                "Number of Questions": { "type": "number", "number": 5 },
                "File URL": { "type": "url", "url": null }
            }
        }))
        .expect("page should deserialize");

        assert_eq!(page.text("Title").as_deref(), Some("Quiz"));
        assert_eq!(page.select("Topic"), Some("History"));
        assert_eq!(page.number("Number of Questions"), Some(5.0));
        assert!(page.url("File URL").is_none());
        assert!(page.has_property("File URL"));
        assert!(!page.has_property("Summary"));
        assert!(page.created_time.is_some());
    }
}
