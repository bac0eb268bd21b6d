// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `reqwest` implementation of the activity gateway.

use async_trait::async_trait;
use campus_activity_api::{ActivityGateway, BulkApproveResult, BulkRejectResult, GatewayError};
use campus_activity_domain::{Activity, ActivityId, Participant, Picture, PictureId, UserId};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::dto::{
    ActivityDto, BulkApproveRequest, BulkRejectRequest, ParticipantDto, PictureDto, convert_all,
};
use crate::error::ClientError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    /// Base URL of the backend API, e.g. `https://activities.example.edu/api`.
    pub base_url: String,
    /// Bearer token of the operator's session.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpGatewayConfig {
    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Talks to the backend over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Builds a gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is not an http(s) URL
    /// - The token cannot be sent as a header
    /// - The client cannot be built
    pub fn new(config: &HttpGatewayConfig) -> Result<Self, ClientError> {
        let base_url: &str = config.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: String::from("expected an http:// or https:// URL"),
            });
        }

        let mut headers: HeaderMap = HeaderMap::new();
        let mut auth: HeaderValue = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| ClientError::InvalidToken {
                reason: e.to_string(),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client: reqwest::Client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url: String = self.url(path);
        debug!(method = "GET", url = %url, "Sending request");
        let response: reqwest::Response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;
        let response: reqwest::Response = ensure_success(url.clone(), response).await?;
        decode_json(url, response).await
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError> {
        let url: String = self.url(path);
        debug!(method = "POST", url = %url, "Sending request");
        let mut request: reqwest::RequestBuilder = self.client.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response: reqwest::Response =
            request
                .send()
                .await
                .map_err(|source| ClientError::Request {
                    url: url.clone(),
                    source,
                })?;
        ensure_success(url, response).await
    }
}

async fn ensure_success(
    url: String,
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status: u16 = response.status().as_u16();
    if response.status().is_success() {
        return Ok(response);
    }
    let body: String = response.text().await.unwrap_or_default();
    let message: String = error_message(&body, status);
    warn!(url = %url, status, message = %message, "Backend refused request");
    Err(ClientError::Status {
        url,
        status,
        message,
    })
}

async fn decode_json<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let bytes = response.bytes().await.map_err(|e| ClientError::Decode {
        url: url.clone(),
        reason: e.to_string(),
    })?;
    serde_json::from_slice::<T>(&bytes).map_err(|e| ClientError::Decode {
        url,
        reason: e.to_string(),
    })
}

/// Extracts a human-readable message from an error body.
///
/// Uses the `message` or `error` field of a JSON object when present,
/// otherwise the raw body, otherwise a generic status line.
fn error_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    let trimmed: &str = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

fn invalid_payload(err: &campus_activity_domain::DomainError) -> GatewayError {
    GatewayError::Transport {
        message: format!("Invalid payload: {err}"),
    }
}

#[async_trait]
impl ActivityGateway for HttpGateway {
    async fn list_activities_with_participants(&self) -> Result<Vec<Activity>, GatewayError> {
        let dtos: Vec<ActivityDto> = self.get_json("/activities/with-participants").await?;
        convert_all(dtos).map_err(|e| invalid_payload(&e))
    }

    async fn list_participants(
        &self,
        activity_id: ActivityId,
    ) -> Result<Vec<Participant>, GatewayError> {
        let dtos: Vec<ParticipantDto> = self
            .get_json(&format!("/activities/{activity_id}/participants"))
            .await?;
        convert_all(dtos).map_err(|e| invalid_payload(&e))
    }

    async fn list_participant_pictures(
        &self,
        activity_id: ActivityId,
        user_id: UserId,
    ) -> Result<Vec<Picture>, GatewayError> {
        let dtos: Vec<PictureDto> = self
            .get_json(&format!(
                "/activities/{activity_id}/participants/{user_id}/pictures"
            ))
            .await?;
        convert_all(dtos).map_err(|e| invalid_payload(&e))
    }

    async fn bulk_approve_pictures(
        &self,
        picture_ids: &[PictureId],
        auto_generate_certificate: bool,
    ) -> Result<BulkApproveResult, GatewayError> {
        let body: BulkApproveRequest = BulkApproveRequest {
            picture_ids: picture_ids.iter().map(PictureId::value).collect(),
            auto_generate_certificate,
        };
        let url: String = self.url("/pictures/bulk-approve");
        let response: reqwest::Response = self.post("/pictures/bulk-approve", Some(&body)).await?;
        Ok(decode_json(url, response).await?)
    }

    async fn bulk_reject_pictures(
        &self,
        picture_ids: &[PictureId],
        reason: &str,
    ) -> Result<BulkRejectResult, GatewayError> {
        let body: BulkRejectRequest = BulkRejectRequest {
            picture_ids: picture_ids.iter().map(PictureId::value).collect(),
            reason: reason.to_string(),
        };
        let url: String = self.url("/pictures/bulk-reject");
        let response: reqwest::Response = self.post("/pictures/bulk-reject", Some(&body)).await?;
        Ok(decode_json(url, response).await?)
    }

    async fn check_in(&self, activity_id: ActivityId, user_id: UserId) -> Result<(), GatewayError> {
        self.post::<()>(
            &format!("/activities/{activity_id}/participants/{user_id}/check-in"),
            None,
        )
        .await?;
        Ok(())
    }

    async fn check_out(
        &self,
        activity_id: ActivityId,
        user_id: UserId,
    ) -> Result<(), GatewayError> {
        self.post::<()>(
            &format!("/activities/{activity_id}/participants/{user_id}/check-out"),
            None,
        )
        .await?;
        Ok(())
    }
}
