//! Offline project input
//!
//! A project can be rendered from a JSON file instead of a server. Two
//! shapes are accepted:
//! - the `GET /api/projects/{id}` response body (`{project, annotations}`)
//! - a bare array of annotation records, loaded as project [`LOCAL_PROJECT_ID`]

use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use ytn_common::api::ProjectResponse;
use ytn_common::models::{AnnotationRecord, Project};
use ytn_common::Result;
use ytn_timeline::MemoryApi;

/// Project id used for bare record arrays
pub const LOCAL_PROJECT_ID: &str = "local";

#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    Project(ProjectResponse),
    Records(Vec<AnnotationRecord>),
}

/// Parse an input document
pub fn parse_input(json: &str) -> Result<ProjectResponse> {
    let parsed = match serde_json::from_str::<InputFile>(json)? {
        InputFile::Project(project) => project,
        InputFile::Records(annotations) => ProjectResponse {
            project: Project {
                id: LOCAL_PROJECT_ID.to_string(),
                youtube_url: String::new(),
                created_at: None,
            },
            annotations,
        },
    };
    Ok(parsed)
}

/// Read and parse an input file
pub fn read_input(path: &Path) -> Result<ProjectResponse> {
    let json = std::fs::read_to_string(path)?;
    let project = parse_input(&json)?;
    debug!(
        path = %path.display(),
        annotations = project.annotations.len(),
        "Read project input"
    );
    Ok(project)
}

/// Load a parsed project into an in-memory API
///
/// Returns the project id to open a session on.
pub async fn seed(api: &MemoryApi, input: ProjectResponse) -> String {
    let project_id = input.project.id.clone();
    api.insert_project(&project_id, &input.project.youtube_url)
        .await;
    for record in input.annotations {
        api.insert_record(&project_id, record).await;
    }
    project_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytn_common::{AnnotationStatus, Error};
    use ytn_timeline::AnnotationApi;

    #[test]
    fn test_parse_project_response() {
        let project = parse_input(
            r#"{
                "project": {"id": "p9", "youtube_url": "https://youtu.be/abc"},
                "annotations": [
                    {"id": "a", "author": "Dana", "text": "x", "timecode": 4.0, "status": 2}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(project.project.id, "p9");
        assert_eq!(project.annotations.len(), 1);
    }

    #[test]
    fn test_parse_bare_records() {
        let project = parse_input(
            r#"[{"id": "a", "author": "Dana", "text": "x", "timecode": 4.0, "resolved": true}]"#,
        )
        .unwrap();
        assert_eq!(project.project.id, LOCAL_PROJECT_ID);
        assert_eq!(
            project.annotations[0].status(),
            AnnotationStatus::Accepted
        );
    }

    #[test]
    fn test_parse_garbage_is_parse_error() {
        let err = parse_input(r#"{"hello": 1}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_input(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_seed_memory_api() {
        let input = parse_input(
            r#"[{"id": "a", "author": "Dana", "text": "x", "timecode": 4.0},
                {"id": "b", "author": "Sam", "text": "y", "timecode": 2.0, "status": 1}]"#,
        )
        .unwrap();

        let api = MemoryApi::new();
        let project_id = seed(&api, input).await;
        let annotations = api.list_annotations(&project_id).await.unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].id, "b");
    }
}
