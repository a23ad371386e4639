//! Annotation service request/response types
//!
//! Mirrors the JSON bodies of the annotation REST endpoints:
//! - `POST   /api/projects`
//! - `GET    /api/projects/{id}`
//! - `POST   /api/projects/{id}/annotations`
//! - `DELETE /api/annotations/{id}`
//! - `PATCH  /api/annotations/{id}/status`

use crate::models::{AnnotationRecord, Project};
use serde::{Deserialize, Serialize};

// ========================================
// Project Types
// ========================================

/// Body of `POST /api/projects`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProjectRequest {
    pub youtube_url: String,
}

/// Response of `POST /api/projects`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProjectResponse {
    pub project_id: String,
    /// Absolute link collaborators open to join the project
    pub share_url: String,
}

/// Response of `GET /api/projects/{id}`
///
/// Annotations are ordered by timecode ascending by the server, but the
/// store re-sorts anyway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

// ========================================
// Annotation Types
// ========================================

/// Body of `POST /api/projects/{id}/annotations`
///
/// # Examples
///
/// ```
/// use ytn_common::api::types::CreateAnnotationRequest;
///
/// let request = CreateAnnotationRequest {
///     author: "Dana".to_string(),
///     text: "Cut here".to_string(),
///     timecode: 42.5,
/// };
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["timecode"], 42.5);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateAnnotationRequest {
    pub author: String,
    pub text: String,
    pub timecode: f64,
}

/// Body of `PATCH /api/annotations/{id}/status`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusUpdateRequest {
    /// Integer status code (0 = pending, 1 = accepted, 2 = rejected)
    pub status: i64,
}

/// Response of `PATCH /api/annotations/{id}/status`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusResponse {
    pub id: String,
    pub status: i64,
}

/// Response of `DELETE /api/annotations/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: String,
}

// ========================================
// Error Response Types
// ========================================

/// Error body returned with any non-2xx status
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ========================================
// Tests
// ========================================
