//! HTTP client for the annotation service
//!
//! No request timeout is configured: a slow server simply delays the
//! corresponding timeline update, and the caller decides whether to wait.

use crate::api::AnnotationApi;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, info};
use ytn_common::api::{
    CreateAnnotationRequest, CreateProjectRequest, CreateProjectResponse, DeleteResponse,
    ErrorResponse, ProjectResponse, StatusResponse, StatusUpdateRequest,
};
use ytn_common::models::AnnotationRecord;
use ytn_common::{Annotation, AnnotationStatus, Error, Result};

const USER_AGENT: &str = concat!("ytn/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`AnnotationApi`]
#[derive(Debug, Clone)]
pub struct HttpAnnotationApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpAnnotationApi {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:3000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into the matching error kind
    ///
    /// `what` names the resource for NotFound, `bad_request` builds the
    /// error used for 400 responses.
    async fn check(
        response: Response,
        what: &str,
        bad_request: fn(String) -> Error,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(match status {
            StatusCode::NOT_FOUND => Error::NotFound(what.to_string()),
            StatusCode::BAD_REQUEST => bad_request(message),
            _ => Error::Network(format!("HTTP {}: {}", status.as_u16(), message)),
        })
    }
}

fn network(e: reqwest::Error) -> Error {
    Error::Network(e.to_string())
}

#[async_trait]
impl AnnotationApi for HttpAnnotationApi {
    async fn create_project(&self, youtube_url: &str) -> Result<CreateProjectResponse> {
        let url = self.url("/api/projects");
        debug!(url = %url, "Creating project");

        let response = self
            .http_client
            .post(&url)
            .json(&CreateProjectRequest {
                youtube_url: youtube_url.to_string(),
            })
            .send()
            .await
            .map_err(network)?;

        let response = Self::check(response, "project", Error::InvalidInput).await?;
        let created: CreateProjectResponse = response.json().await.map_err(network)?;

        info!(project_id = %created.project_id, "Project created");
        Ok(created)
    }

    async fn get_project(&self, project_id: &str) -> Result<ProjectResponse> {
        let url = self.url(&format!("/api/projects/{project_id}"));
        debug!(url = %url, "Fetching project");

        let response = self.http_client.get(&url).send().await.map_err(network)?;
        let response = Self::check(
            response,
            &format!("project {project_id}"),
            Error::InvalidInput,
        )
        .await?;

        response.json().await.map_err(network)
    }

    async fn create_annotation(
        &self,
        project_id: &str,
        author: &str,
        text: &str,
        timecode: f64,
    ) -> Result<Annotation> {
        let url = self.url(&format!("/api/projects/{project_id}/annotations"));
        debug!(url = %url, timecode, "Creating annotation");

        let response = self
            .http_client
            .post(&url)
            .json(&CreateAnnotationRequest {
                author: author.to_string(),
                text: text.to_string(),
                timecode,
            })
            .send()
            .await
            .map_err(network)?;

        let response = Self::check(
            response,
            &format!("project {project_id}"),
            Error::InvalidInput,
        )
        .await?;
        let record: AnnotationRecord = response.json().await.map_err(network)?;
        record.normalize()
    }

    async fn delete_annotation(&self, annotation_id: &str) -> Result<()> {
        let url = self.url(&format!("/api/annotations/{annotation_id}"));
        debug!(url = %url, "Deleting annotation");

        let response = self.http_client.delete(&url).send().await.map_err(network)?;
        let response = Self::check(
            response,
            &format!("annotation {annotation_id}"),
            Error::InvalidInput,
        )
        .await?;

        // any 2xx counts; the body is informational only
        if let Ok(deleted) = response.json::<DeleteResponse>().await {
            debug!(id = %deleted.id, success = deleted.success, "Delete confirmed");
        }
        Ok(())
    }

    async fn set_status(&self, annotation_id: &str, status: AnnotationStatus) -> Result<()> {
        let url = self.url(&format!("/api/annotations/{annotation_id}/status"));
        debug!(url = %url, status = %status, "Updating annotation status");

        let response = self
            .http_client
            .patch(&url)
            .json(&StatusUpdateRequest {
                status: status.wire_code(),
            })
            .send()
            .await
            .map_err(network)?;

        let response = Self::check(
            response,
            &format!("annotation {annotation_id}"),
            Error::InvalidStatus,
        )
        .await?;

        if let Ok(confirmed) = response.json::<StatusResponse>().await {
            debug!(id = %confirmed.id, status = confirmed.status, "Status confirmed");
        }
        Ok(())
    }
}
