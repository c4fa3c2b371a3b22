//! # HTTP Feed Source
//!
//! Implements `FeedSource` against a JSON news API. The endpoint is a URL
//! template in which `{feed}` is replaced by the feed id; the response is a
//! newest-first list of articles, either bare or wrapped as `{"articles": [...]}`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::errors::FetchError;
use crate::domain::traits::FeedSource;
use crate::domain::types::Item;

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ArticleMedia {
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct ArticleData {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    published: i64,
    #[serde(default)]
    media: Option<ArticleMedia>,
}

impl From<ArticleData> for Item {
    fn from(article: ArticleData) -> Self {
        Item {
            id: article.id,
            title: article.title,
            body: article.description,
            published: article.published,
            media: article.media.and_then(|m| m.thumbnail).map(|t| t.url),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArticlesPayload {
    List(Vec<ArticleData>),
    Wrapped { articles: Vec<ArticleData> },
}

impl ArticlesPayload {
    fn into_items(self) -> Vec<Item> {
        let articles = match self {
            Self::List(articles) | Self::Wrapped { articles } => articles,
        };
        articles.into_iter().map(Item::from).collect()
    }
}

pub struct HttpFeedSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpFeedSource {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feedcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn feed_url(&self, feed_id: &str) -> String {
        self.url_template.replace("{feed}", feed_id)
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, feed_id: &str) -> Result<Vec<Item>, FetchError> {
        let response = self
            .client
            .get(self.feed_url(feed_id))
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let payload: ArticlesPayload = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(payload.into_items())
    }
}
