// src/services/strapi.rs
use reqwest::Client;
use serde_json::{Value, json};

use crate::errors::InterioError;
use crate::models::{CatalogRecord, ContactRequest};

pub struct StrapiService {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl StrapiService {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    pub async fn fetch_designs(&self) -> Result<Vec<CatalogRecord>, InterioError> {
        self.fetch_collection("designs").await
    }

    pub async fn fetch_portfolios(&self) -> Result<Vec<CatalogRecord>, InterioError> {
        self.fetch_collection("portfolios").await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<CatalogRecord>, InterioError> {
        self.fetch_collection("categories").await
    }

    async fn fetch_collection(&self, collection: &str) -> Result<Vec<CatalogRecord>, InterioError> {
        let url = format!(
            "{}/api/{}?populate=*&pagination[pageSize]=100",
            self.base_url, collection
        );

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| InterioError::Cms(format!("{} request failed: {}", collection, e)))?;

        if !response.status().is_success() {
            return Err(InterioError::Cms(format!(
                "{} request returned {}",
                collection,
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            InterioError::Cms(format!("failed to parse {} response: {}", collection, e))
        })?;

        let records = body["data"]
            .as_array()
            .map(|entries| entries.iter().filter_map(map_record).collect())
            .unwrap_or_default();

        Ok(records)
    }

    pub async fn submit_contact(
        &self,
        contact: &ContactRequest,
        reference: &str,
    ) -> Result<u64, InterioError> {
        let url = format!("{}/api/contact-submissions", self.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({
                "data": {
                    "name": contact.name.as_str(),
                    "email": contact.email.as_str(),
                    "phone": contact.phone.as_deref(),
                    "message": contact.message.as_str(),
                    "reference": reference
                }
            }))
            .send()
            .await
            .map_err(|e| InterioError::Cms(format!("contact submission failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(InterioError::Cms(format!(
                "contact submission returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| InterioError::Cms(format!("failed to parse contact response: {}", e)))?;

        Ok(body["data"]["id"].as_u64().unwrap_or(0))
    }
}

// Strapi wraps every entry as { id, attributes }; entries without a numeric
// id are skipped, everything else degrades to empty fields.
fn map_record(entry: &Value) -> Option<CatalogRecord> {
    let id = entry["id"].as_u64()?;
    let attrs = entry["attributes"].as_object().cloned().unwrap_or_default();

    let text = |key: &str| -> String {
        attrs
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let name = attrs
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| attrs.get("title").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let images = attrs
        .get("images")
        .and_then(|images| images["data"].as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|image| image["attributes"]["url"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let categories = attrs
        .get("categories")
        .and_then(|categories| categories["data"].as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|category| {
                    category["attributes"]["slug"].as_str().map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default();

    let slug = text("slug");
    let description = text("description");
    let location = text("location");

    Some(CatalogRecord {
        id,
        name,
        slug,
        description,
        location,
        images,
        categories,
        attrs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_a_populated_strapi_entry() {
        let entry = json!({
            "id": 14,
            "attributes": {
                "title": "Sunlit Penthouse",
                "slug": "sunlit-penthouse",
                "description": "Top-floor refit",
                "location": "Vienna",
                "publishedAt": "2024-11-02T09:00:00Z",
                "images": {
                    "data": [
                        { "id": 1, "attributes": { "url": "/uploads/penthouse-1.jpg" } },
                        { "id": 2, "attributes": { "url": "/uploads/penthouse-2.jpg" } }
                    ]
                },
                "categories": {
                    "data": [
                        { "id": 7, "attributes": { "slug": "penthouses" } }
                    ]
                }
            }
        });

        let record = map_record(&entry).expect("entry should map");
        assert_eq!(record.id, 14);
        assert_eq!(record.name, "Sunlit Penthouse", "title is the name fallback");
        assert_eq!(record.slug, "sunlit-penthouse");
        assert_eq!(record.location, "Vienna");
        assert_eq!(record.images.len(), 2);
        assert_eq!(record.categories, ["penthouses"]);
        assert!(record.attrs.contains_key("publishedAt"));
    }

    #[test]
    fn name_wins_over_title_when_both_exist() {
        let entry = json!({
            "id": 3,
            "attributes": { "name": "Atrium", "title": "Old Title" }
        });
        assert_eq!(map_record(&entry).unwrap().name, "Atrium");
    }

    #[test]
    fn bare_entries_map_to_empty_fields_and_bad_ids_are_skipped() {
        let bare = json!({ "id": 5, "attributes": {} });
        let record = map_record(&bare).unwrap();
        assert_eq!(record.name, "");
        assert!(record.images.is_empty());
        assert!(record.categories.is_empty());

        assert!(map_record(&json!({ "attributes": {} })).is_none());
        assert!(map_record(&json!({ "id": "abc" })).is_none());
    }
}
