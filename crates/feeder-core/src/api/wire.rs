//! Request and response payloads for the feedreader REST surface.

use serde::{Deserialize, Serialize};

use crate::models::{Entry, Feed};

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ReadPatch {
    pub read: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeedsResponse {
    pub feeds: Vec<Feed>,
}

/// `GET /feeds/:id/entries` returns entry IDs only; bodies come from a
/// second call to the entries endpoint.
#[derive(Debug, Deserialize)]
pub struct EntryIdsResponse {
    pub entries: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}
