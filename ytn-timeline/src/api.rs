//! Annotation API collaborator
//!
//! The session never talks HTTP directly. It calls an [`AnnotationApi`],
//! which is [`crate::HttpAnnotationApi`] in production and
//! [`crate::MemoryApi`] in tests and offline shells.
//!
//! Every method maps failures onto the shared error taxonomy:
//! - `Error::Network`: request rejected or server unreachable
//! - `Error::NotFound`: unknown project or annotation id
//! - `Error::InvalidStatus`: server refused the status value
//! - `Error::InvalidInput`: server refused the request body

use async_trait::async_trait;
use ytn_common::api::{CreateProjectResponse, ProjectResponse};
use ytn_common::{Annotation, AnnotationStatus, Result};

#[async_trait]
pub trait AnnotationApi: Send + Sync {
    /// Create a project for a YouTube link
    async fn create_project(&self, youtube_url: &str) -> Result<CreateProjectResponse>;

    /// Fetch a project with its raw annotation records
    async fn get_project(&self, project_id: &str) -> Result<ProjectResponse>;

    /// Fetch a project's annotations, normalized
    ///
    /// Legacy `resolved` records are mapped to a status here, at the
    /// boundary; records that fail normalization fail the whole load.
    async fn list_annotations(&self, project_id: &str) -> Result<Vec<Annotation>> {
        let project = self.get_project(project_id).await?;
        project
            .annotations
            .into_iter()
            .map(|record| record.normalize())
            .collect()
    }

    /// Create an annotation; returns the server's record
    async fn create_annotation(
        &self,
        project_id: &str,
        author: &str,
        text: &str,
        timecode: f64,
    ) -> Result<Annotation>;

    /// Delete an annotation by id
    async fn delete_annotation(&self, annotation_id: &str) -> Result<()>;

    /// Set the review status of an annotation
    async fn set_status(&self, annotation_id: &str, status: AnnotationStatus) -> Result<()>;
}
