//! In-process collaborators
//!
//! [`MemoryApi`] keeps projects and annotation records in memory and
//! answers with the same error kinds as the HTTP server. [`ScriptedPlayer`]
//! reports whatever position and duration it was given and records seeks.
//! Both back the offline shell and the tests.

use crate::api::AnnotationApi;
use crate::player::Player;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;
use ytn_common::api::{CreateProjectResponse, ProjectResponse};
use ytn_common::models::{AnnotationRecord, Project};
use ytn_common::{ids, time, youtube, Annotation, AnnotationStatus, Error, Result};

const SHARE_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Default)]
struct MemoryState {
    projects: HashMap<String, Project>,
    /// Records in insertion order
    records: Vec<AnnotationRecord>,
    offline: bool,
}

impl MemoryState {
    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::Network("server unreachable".to_string()));
        }
        Ok(())
    }

    fn record_mut(&mut self, annotation_id: &str) -> Result<&mut AnnotationRecord> {
        self.records
            .iter_mut()
            .find(|r| r.id == annotation_id)
            .ok_or_else(|| Error::NotFound(format!("annotation {annotation_id}")))
    }
}

/// In-memory [`AnnotationApi`]
#[derive(Debug, Default)]
pub struct MemoryApi {
    state: Mutex<MemoryState>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project under a known id
    pub async fn insert_project(&self, project_id: &str, youtube_url: &str) {
        let mut state = self.state.lock().await;
        state.projects.insert(
            project_id.to_string(),
            Project {
                id: project_id.to_string(),
                youtube_url: youtube_url.to_string(),
                created_at: Some(time::now().to_rfc3339()),
            },
        );
    }

    /// Seed a raw record, bypassing validation (legacy `resolved` records etc.)
    ///
    /// Unknown projects are created on the fly.
    pub async fn insert_record(&self, project_id: &str, mut record: AnnotationRecord) {
        let mut state = self.state.lock().await;
        state
            .projects
            .entry(project_id.to_string())
            .or_insert_with(|| Project {
                id: project_id.to_string(),
                youtube_url: String::new(),
                created_at: None,
            });
        record.project_id = Some(project_id.to_string());
        state.records.push(record);
    }

    /// Seed a normalized annotation
    pub async fn insert_annotation(&self, project_id: &str, annotation: Annotation) {
        let record = AnnotationRecord {
            id: annotation.id,
            project_id: None,
            author: annotation.author,
            text: annotation.text,
            timecode: annotation.timecode,
            status: Some(annotation.status.wire_code()),
            resolved: None,
            created_at: None,
        };
        self.insert_record(project_id, record).await;
    }

    /// Simulate the server disappearing (or coming back)
    ///
    /// While offline every call fails with `Error::Network`.
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    /// Number of stored annotation records across all projects
    pub async fn record_count(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Current stored status of an annotation
    pub async fn status_of(&self, annotation_id: &str) -> Option<AnnotationStatus> {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .find(|r| r.id == annotation_id)
            .map(AnnotationRecord::status)
    }
}

#[async_trait]
impl AnnotationApi for MemoryApi {
    async fn create_project(&self, youtube_url: &str) -> Result<CreateProjectResponse> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;

        let youtube_url = youtube::validate_youtube_url(youtube_url)?;
        let project_id = ids::generate();
        state.projects.insert(
            project_id.clone(),
            Project {
                id: project_id.clone(),
                youtube_url: youtube_url.to_string(),
                created_at: Some(time::now().to_rfc3339()),
            },
        );

        debug!(project_id = %project_id, "Project created in memory");
        Ok(CreateProjectResponse {
            share_url: ids::share_url(SHARE_BASE_URL, &project_id),
            project_id,
        })
    }

    async fn get_project(&self, project_id: &str) -> Result<ProjectResponse> {
        let state = self.state.lock().await;
        state.ensure_online()?;

        let project = state
            .projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

        let mut annotations: Vec<AnnotationRecord> = state
            .records
            .iter()
            .filter(|r| r.project_id.as_deref() == Some(project_id))
            .cloned()
            .collect();
        annotations.sort_by(|a, b| a.timecode.total_cmp(&b.timecode));

        Ok(ProjectResponse {
            project,
            annotations,
        })
    }

    async fn create_annotation(
        &self,
        project_id: &str,
        author: &str,
        text: &str,
        timecode: f64,
    ) -> Result<Annotation> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;

        if !state.projects.contains_key(project_id) {
            return Err(Error::NotFound(format!("project {project_id}")));
        }
        if author.trim().is_empty() || text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "author and text are required".to_string(),
            ));
        }
        if !timecode.is_finite() || timecode < 0.0 {
            return Err(Error::InvalidInput(format!("invalid timecode {timecode}")));
        }

        let record = AnnotationRecord {
            id: ids::generate(),
            project_id: Some(project_id.to_string()),
            author: author.to_string(),
            text: text.to_string(),
            timecode,
            status: Some(AnnotationStatus::Pending.wire_code()),
            resolved: None,
            created_at: Some(time::now().to_rfc3339()),
        };
        state.records.push(record.clone());
        record.normalize()
    }

    async fn delete_annotation(&self, annotation_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;

        let index = state
            .records
            .iter()
            .position(|r| r.id == annotation_id)
            .ok_or_else(|| Error::NotFound(format!("annotation {annotation_id}")))?;
        state.records.remove(index);
        Ok(())
    }

    async fn set_status(&self, annotation_id: &str, status: AnnotationStatus) -> Result<()> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;

        let record = state.record_mut(annotation_id)?;
        record.status = Some(status.wire_code());
        Ok(())
    }
}

/// [`Player`] driven by test code or a CLI
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    current_time: Option<f64>,
    duration: Option<f64>,
    seeks: Vec<f64>,
}

impl ScriptedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ready player at `current_time`
    pub fn at(current_time: f64) -> Self {
        Self {
            current_time: Some(current_time),
            ..Self::default()
        }
    }

    pub fn set_current_time(&mut self, seconds: Option<f64>) {
        self.current_time = seconds;
    }

    pub fn set_duration(&mut self, seconds: Option<f64>) {
        self.duration = seconds;
    }

    /// Every seek target, oldest first
    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }
}

impl Player for ScriptedPlayer {
    fn current_time(&self) -> Option<f64> {
        self.current_time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn seek(&mut self, seconds: f64) {
        self.seeks.push(seconds);
        self.current_time = Some(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_project_validates_url() {
        let api = MemoryApi::new();
        let err = api.create_project("https://vimeo.com/123").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let created = api
            .create_project("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();
        assert!(created.share_url.ends_with(&created.project_id));

        let project = api.get_project(&created.project_id).await.unwrap();
        assert!(project.annotations.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let api = MemoryApi::new();
        assert!(matches!(
            api.get_project("nope").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            api.delete_annotation("nope").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            api.set_status("nope", AnnotationStatus::Accepted)
                .await
                .unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            api.create_annotation("nope", "A", "x", 1.0).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_created_annotation_is_pending_and_listed() {
        let api = MemoryApi::new();
        api.insert_project("p1", "https://youtu.be/abc").await;

        let created = api.create_annotation("p1", "Dana", "Cut", 12.5).await.unwrap();
        assert_eq!(created.status, AnnotationStatus::Pending);

        let listed = api.list_annotations("p1").await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let api = MemoryApi::new();
        api.insert_project("p1", "https://youtu.be/abc").await;
        let err = api.create_annotation("p1", " ", "x", 1.0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(api.record_count().await, 0);
    }

    #[tokio::test]
    async fn test_legacy_records_normalized_on_list() {
        let api = MemoryApi::new();
        let legacy: AnnotationRecord = serde_json::from_str(
            r#"{"id":"old","author":"A","text":"t","timecode":5.0,"resolved":1}"#,
        )
        .unwrap();
        api.insert_record("p1", legacy).await;

        let listed = api.list_annotations("p1").await.unwrap();
        assert_eq!(listed[0].status, AnnotationStatus::Accepted);
    }

    #[tokio::test]
    async fn test_unknown_status_code_does_not_fail_listing() {
        let api = MemoryApi::new();
        let odd: AnnotationRecord = serde_json::from_str(
            r#"{"id":"odd","author":"A","text":"t","timecode":3.0,"status":3}"#,
        )
        .unwrap();
        api.insert_record("p1", odd).await;
        api.insert_project("p1", "https://youtu.be/abc").await;
        api.create_annotation("p1", "B", "fine", 8.0).await.unwrap();

        let listed = api.list_annotations("p1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "odd");
        assert_eq!(listed[0].status, AnnotationStatus::Pending);
    }

    #[tokio::test]
    async fn test_offline_fails_with_network_error() {
        let api = MemoryApi::new();
        api.insert_project("p1", "https://youtu.be/abc").await;
        api.set_offline(true).await;
        assert!(matches!(
            api.get_project("p1").await.unwrap_err(),
            Error::Network(_)
        ));

        api.set_offline(false).await;
        assert!(api.get_project("p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_set_status_persists() {
        let api = MemoryApi::new();
        api.insert_project("p1", "https://youtu.be/abc").await;
        let created = api.create_annotation("p1", "A", "t", 1.0).await.unwrap();

        api.set_status(&created.id, AnnotationStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(
            api.status_of(&created.id).await,
            Some(AnnotationStatus::Rejected)
        );
    }

    #[test]
    fn test_scripted_player_records_seeks() {
        let mut player = ScriptedPlayer::new();
        assert_eq!(player.current_time(), None);

        player.seek(42.0);
        player.seek(7.5);
        assert_eq!(player.seeks(), &[42.0, 7.5]);
        assert_eq!(player.current_time(), Some(7.5));
    }
}
