//! Flickr API client and the repository seam the controller fetches through

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::types::PhotoItem;

pub const PER_PAGE: u32 = 20;

const API_ENDPOINT: &str = "https://api.flickr.com/services/rest/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One page of photos for a query, or a failure
///
/// A single call per invocation; retries are user-initiated upstream.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<Vec<PhotoItem>>;
}

/// Flickr REST client
///
/// An empty query browses recent photos (`flickr.photos.getRecent`), a
/// non-empty one searches (`flickr.photos.search`). Both return the same
/// paged envelope.
#[derive(Clone)]
pub struct FlickrClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    stat: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    photos: Option<PhotoPage>,
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    #[serde(default)]
    photo: Vec<RawPhoto>,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    id: String,
    secret: String,
    server: String,
    farm: u64,
    #[serde(default)]
    title: String,
}

impl RawPhoto {
    fn into_item(self) -> PhotoItem {
        let url = format!(
            "https://farm{}.staticflickr.com/{}/{}_{}.jpg",
            self.farm, self.server, self.id, self.secret
        );
        PhotoItem { id: self.id, title: self.title, url }
    }
}

impl FlickrClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl PhotoRepository for FlickrClient {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<Vec<PhotoItem>> {
        let method = if query.trim().is_empty() {
            "flickr.photos.getRecent"
        } else {
            "flickr.photos.search"
        };
        tracing::debug!(method, query, page, "fetching photo page");

        let mut params = vec![
            ("method", method.to_string()),
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        if !query.trim().is_empty() {
            params.push(("text", query.to_string()));
        }

        let response = self
            .http
            .get(API_ENDPOINT)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        if body.stat != "ok" {
            let message = body.message.unwrap_or_else(|| "unknown Flickr error".to_string());
            tracing::error!(method, query, page, reason = %message, "Flickr API rejected the request");
            return Err(anyhow!(message));
        }

        let items: Vec<PhotoItem> = body
            .photos
            .map(|p| p.photo.into_iter().map(RawPhoto::into_item).collect())
            .unwrap_or_default();
        tracing::info!(query, page, count = items.len(), "photo page fetched");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_envelope() {
        let json = r#"{
            "photos": {
                "page": 1, "pages": 3524, "perpage": 20, "total": 70462,
                "photo": [
                    {"id": "54321", "owner": "1@N01", "secret": "abc123",
                     "server": "65535", "farm": 66, "title": "A cat",
                     "ispublic": 1, "isfriend": 0, "isfamily": 0}
                ]
            },
            "stat": "ok"
        }"#;

        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.stat, "ok");
        let photos = parsed.photos.unwrap().photo;
        assert_eq!(photos.len(), 1);

        let item = photos.into_iter().next().unwrap().into_item();
        assert_eq!(item.id, "54321");
        assert_eq!(item.title, "A cat");
        assert_eq!(item.url, "https://farm66.staticflickr.com/65535/54321_abc123.jpg");
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{"stat": "fail", "code": 100, "message": "Invalid API Key"}"#;
        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.stat, "fail");
        assert_eq!(parsed.message.as_deref(), Some("Invalid API Key"));
        assert!(parsed.photos.is_none());
    }

    #[test]
    fn test_untitled_photo_defaults_to_empty_title() {
        let json = r#"{"id": "9", "secret": "s", "server": "1", "farm": 2}"#;
        let parsed: RawPhoto = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.into_item().title, "");
    }
}
