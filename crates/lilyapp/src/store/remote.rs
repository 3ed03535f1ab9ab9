//! Hosted backend: a PostgREST table for entries and a storage bucket for covers.
//!
//! ## Requests
//!
//! | operation | request |
//! |-----------|---------|
//! | list      | `GET  {url}/rest/v1/{table}?select=*&order=created_at.desc` |
//! | create    | `POST {url}/rest/v1/{table}` with `Prefer: return=representation` |
//! | upload    | `POST {url}/storage/v1/object/{bucket}/{object}` |
//!
//! Every request carries the project key in both the `apikey` header and a
//! bearer `Authorization` header. Uploaded covers are served from
//! `{url}/storage/v1/object/public/{bucket}/{object}`.
//!
//! ## Rows
//!
//! Table columns are snake_case (`cover_url`, `created_at`). The table may use
//! numeric or text primary keys; both become a string id. Null `tags` reads as
//! an empty list and empty tag strings are dropped on the way in.

use super::{BlobStore, EntryStore};
use crate::config::RemoteConfig;
use crate::draft::CoverUpload;
use crate::error::{LilyError, Result};
use crate::model::{Category, Entry, NewEntry, Rating, DEFAULT_COVER_URL};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

pub struct RemoteStore {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
    bucket: String,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let base_url = config
            .url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| LilyError::Config("remote.url is not set".to_string()))?;
        let anon_key = config
            .anon_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LilyError::Config("remote.anon_key is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            anon_key,
            table: config.table.clone(),
            bucket: config.bucket.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn list_url(&self) -> String {
        format!("{}?select=*&order=created_at.desc", self.rows_url())
    }

    fn object_url(&self, object: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, object
        )
    }

    fn public_url(&self, object: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }
}

impl EntryStore for RemoteStore {
    fn list(&self) -> Result<Vec<Entry>> {
        let url = self.list_url();
        debug!(%url, "listing remote entries");

        let response = self.authorized(self.client.get(&url)).send()?;
        let response = ensure_success(response).map_err(LilyError::Store)?;
        let rows: Vec<EntryRow> = response.json()?;

        Ok(rows.into_iter().map(EntryRow::into_entry).collect())
    }

    fn create(&mut self, entry: &NewEntry) -> Result<Entry> {
        let url = self.rows_url();
        debug!(%url, title = %entry.title, "inserting remote entry");

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(&InsertRow::from(entry))
            .send()?;
        let response = ensure_success(response).map_err(LilyError::Store)?;
        let rows: Vec<EntryRow> = response.json()?;

        let created = rows
            .into_iter()
            .next()
            .map(EntryRow::into_entry)
            .ok_or_else(|| LilyError::Store("Insert returned no rows".to_string()))?;
        info!(id = %created.id, "created remote entry");
        Ok(created)
    }
}

impl BlobStore for RemoteStore {
    fn upload(&mut self, cover: &CoverUpload) -> Result<String> {
        let object = object_name(cover);
        let url = self.object_url(&object);
        debug!(%url, bytes = cover.bytes.len(), "uploading cover");

        let response = self
            .authorized(self.client.post(&url))
            .header(CONTENT_TYPE, &cover.content_type)
            .header("x-upsert", "false")
            .body(cover.bytes.clone())
            .send()
            .map_err(|e| LilyError::Upload(e.to_string()))?;
        ensure_success(response).map_err(LilyError::Upload)?;

        Ok(self.public_url(&object))
    }
}

/// Turns a non-2xx response into its status plus body text.
fn ensure_success(response: Response) -> std::result::Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(format!("request failed with status {}: {}", status, body.trim()))
}

fn object_name(cover: &CoverUpload) -> String {
    format!("{}{}", Uuid::new_v4(), cover.extension())
}

#[derive(Debug, Deserialize)]
struct EntryRow {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    category: Category,
    rating: Rating,
    #[serde(default)]
    cover_url: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl EntryRow {
    fn into_entry(self) -> Entry {
        Entry {
            id: self.id,
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            category: self.category,
            rating: self.rating,
            cover_url: self
                .cover_url
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COVER_URL.to_string()),
            note: self.note,
            tags: self
                .tags
                .unwrap_or_default()
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    title: &'a str,
    author: &'a str,
    category: Category,
    rating: Rating,
    cover_url: &'a str,
    note: Option<&'a str>,
    tags: &'a [String],
    created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewEntry> for InsertRow<'a> {
    fn from(entry: &'a NewEntry) -> Self {
        Self {
            title: &entry.title,
            author: &entry.author,
            category: entry.category,
            rating: entry.rating,
            cover_url: &entry.cover_url,
            note: entry.note.as_deref(),
            tags: &entry.tags,
            created_at: entry.created_at,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
