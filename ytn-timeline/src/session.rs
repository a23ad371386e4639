//! Timeline session controller
//!
//! One [`Session`] per open project. It owns the annotation store, the
//! current video duration, the last rendered timeline and the expansion
//! slot, and it is the only code that mutates any of them.
//!
//! Every mutation follows the same shape:
//!
//! 1. validate locally (no network call on bad input)
//! 2. await the API
//! 3. on success only: update the store, re-render, emit an event
//!
//! A failed call leaves the store exactly as it was and is reported both as
//! the returned error and as an `OperationFailed` event. Nothing is retried.

use crate::api::AnnotationApi;
use crate::expansion::{ExpansionState, ExpansionView, Overlay};
use crate::player::Player;
use crate::render::{render, RenderedTimeline, TimelineMarker};
use crate::scale::is_usable_duration;
use crate::status::validate_transition;
use crate::store::AnnotationStore;
use serde::Serialize;
use tracing::{debug, info, warn};
use ytn_common::api::CreateProjectResponse;
use ytn_common::events::{EventBus, StatusCue, TimelineEvent};
use ytn_common::time::{self, format_timecode};
use ytn_common::{youtube, Annotation, AnnotationStatus, Error, Result};

/// Result of clicking a timeline marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerClick {
    /// Player was sent to this timecode
    Seeked(f64),
    /// Badge, hidden marker or unknown index
    Ignored,
}

/// One row of the annotation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationListItem {
    pub id: String,
    pub author: String,
    pub text: String,
    pub timecode: f64,
    /// `MM:SS`
    pub timecode_label: String,
    pub status: AnnotationStatus,
    /// `Pending`, `✓ Accept` or `✗ Reject`
    pub status_label: &'static str,
    /// `pending`, `accepted` or `rejected`
    pub status_class: &'static str,
}

impl From<&Annotation> for AnnotationListItem {
    fn from(annotation: &Annotation) -> Self {
        Self {
            id: annotation.id.clone(),
            author: annotation.author.clone(),
            text: annotation.text.clone(),
            timecode: annotation.timecode,
            timecode_label: format_timecode(annotation.timecode),
            status: annotation.status,
            status_label: annotation.status.label(),
            status_class: annotation.status.as_str(),
        }
    }
}

/// Create a project for a YouTube link
///
/// The link is validated before any request is made.
pub async fn create_project<A: AnnotationApi + ?Sized>(
    api: &A,
    youtube_url: &str,
) -> Result<CreateProjectResponse> {
    let youtube_url = youtube::validate_youtube_url(youtube_url)?;
    debug!(
        video_id = youtube::extract_video_id(youtube_url).unwrap_or("unknown"),
        "Creating project"
    );
    let created = api.create_project(youtube_url).await?;
    info!(
        project_id = %created.project_id,
        share_url = %created.share_url,
        "Project ready"
    );
    Ok(created)
}

/// Timeline state for one project
pub struct Session<A: AnnotationApi, P: Player> {
    project_id: String,
    api: A,
    player: P,
    store: AnnotationStore,
    /// Last positive duration reported by the player
    video_duration: Option<f64>,
    rendered: RenderedTimeline,
    expansion: ExpansionView,
    events: EventBus,
    last_author: Option<String>,
}

impl<A: AnnotationApi, P: Player> Session<A, P> {
    pub fn new(project_id: impl Into<String>, api: A, player: P) -> Self {
        Self::with_event_bus(project_id, api, player, EventBus::default())
    }

    /// Create a session publishing on an existing bus
    pub fn with_event_bus(
        project_id: impl Into<String>,
        api: A,
        player: P,
        events: EventBus,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            api,
            player,
            store: AnnotationStore::new(),
            video_duration: None,
            rendered: RenderedTimeline::default(),
            expansion: ExpansionView::new(),
            events,
            last_author: None,
        }
    }

    /// Pre-fill the remembered author
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.last_author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn rendered(&self) -> &RenderedTimeline {
        &self.rendered
    }

    pub fn expansion_state(&self) -> ExpansionState {
        self.expansion.state()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.expansion.overlay()
    }

    pub fn video_duration(&self) -> Option<f64> {
        self.video_duration
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Author used for the previous successful annotation
    pub fn last_author(&self) -> Option<&str> {
        self.last_author.as_deref()
    }

    // ========================================
    // API-backed operations
    // ========================================

    /// Replace the store with the project's annotations and render
    pub async fn load(&mut self) -> Result<()> {
        let annotations = match self.api.list_annotations(&self.project_id).await {
            Ok(annotations) => annotations,
            Err(e) => return Err(self.fail("load", e)),
        };

        self.store.replace_all(annotations);
        info!(
            project_id = %self.project_id,
            count = self.store.len(),
            "Annotations loaded"
        );
        self.events.emit_lossy(TimelineEvent::AnnotationsLoaded {
            project_id: self.project_id.clone(),
            count: self.store.len(),
            timestamp: time::now(),
        });

        self.render();
        Ok(())
    }

    /// Create an annotation at the player's current position
    pub async fn add_annotation(&mut self, author: &str, text: &str) -> Result<Annotation> {
        let author = author.trim();
        let text = text.trim();
        if author.is_empty() || text.is_empty() {
            return Err(self.fail(
                "add_annotation",
                Error::InvalidInput("author and text are required".to_string()),
            ));
        }

        let timecode = match self.player.current_time() {
            Some(t) if t.is_finite() && t >= 0.0 => t,
            _ => return Err(self.fail("add_annotation", Error::PlayerNotReady)),
        };

        let created = match self
            .api
            .create_annotation(&self.project_id, author, text, timecode)
            .await
        {
            Ok(created) => created,
            Err(e) => return Err(self.fail("add_annotation", e)),
        };

        info!(
            annotation_id = %created.id,
            timecode = created.timecode,
            "Annotation added"
        );
        self.last_author = Some(author.to_string());
        self.store.insert(created.clone());
        self.events.emit_lossy(TimelineEvent::AnnotationAdded {
            annotation_id: created.id.clone(),
            timecode: created.timecode,
            timestamp: time::now(),
        });

        self.render();
        Ok(created)
    }

    /// Delete an annotation
    ///
    /// On `NotFound` the local record stays visible until the next load.
    pub async fn delete_annotation(&mut self, annotation_id: &str) -> Result<()> {
        if let Err(e) = self.api.delete_annotation(annotation_id).await {
            return Err(self.fail("delete_annotation", e));
        }

        if self.store.remove(annotation_id).is_none() {
            debug!(annotation_id, "Deleted annotation was not in the local store");
        }
        info!(annotation_id, "Annotation deleted");
        self.events.emit_lossy(TimelineEvent::AnnotationDeleted {
            annotation_id: annotation_id.to_string(),
            timestamp: time::now(),
        });

        self.render();
        Ok(())
    }

    /// Request a status change and apply it once confirmed
    pub async fn set_status(
        &mut self,
        annotation_id: &str,
        status: AnnotationStatus,
    ) -> Result<()> {
        let Some(current) = self.store.get(annotation_id).map(|a| a.status) else {
            return Err(self.fail(
                "set_status",
                Error::NotFound(format!("annotation {annotation_id}")),
            ));
        };
        if let Err(e) = validate_transition(current, status) {
            return Err(self.fail("set_status", e));
        }

        if let Err(e) = self.api.set_status(annotation_id, status).await {
            return Err(self.fail("set_status", e));
        }

        let old_status = self
            .store
            .set_status(annotation_id, status)
            .unwrap_or(current);
        let cue = StatusCue::for_status(status);
        info!(
            annotation_id,
            old_status = %old_status,
            new_status = %status,
            "Annotation status changed"
        );
        self.events.emit_lossy(TimelineEvent::StatusChanged {
            annotation_id: annotation_id.to_string(),
            old_status,
            new_status: status,
            cue,
            timestamp: time::now(),
        });

        self.render();
        Ok(())
    }

    // ========================================
    // Duration
    // ========================================

    /// Apply a duration reported by the player
    ///
    /// Non-positive and non-finite values mean "unknown" and are ignored, as
    /// is a value equal to the current one. Returns `true` if the timeline
    /// was re-rendered.
    pub fn set_video_duration(&mut self, seconds: f64) -> bool {
        if !is_usable_duration(seconds) || self.video_duration == Some(seconds) {
            return false;
        }

        let old_duration = self.video_duration.replace(seconds);
        debug!(?old_duration, new_duration = seconds, "Video duration changed");
        self.events.emit_lossy(TimelineEvent::DurationChanged {
            old_duration,
            new_duration: seconds,
            timestamp: time::now(),
        });

        self.render();
        true
    }

    /// Read the player's duration and apply it
    pub fn refresh_duration(&mut self) -> bool {
        match self.player.duration() {
            Some(seconds) => self.set_video_duration(seconds),
            None => false,
        }
    }

    // ========================================
    // Rendering and interaction
    // ========================================

    /// Re-cluster and redraw from the current store and duration
    ///
    /// Clusters carry no identity across renders, so any open overlay is
    /// collapsed.
    pub fn render(&mut self) -> &RenderedTimeline {
        self.expansion.collapse();
        self.rendered = render(self.store.annotations(), self.video_duration);

        debug!(
            max_time = ?self.rendered.max_time,
            clusters = self.rendered.clusters.len(),
            annotations = self.rendered.annotation_count(),
            "Timeline rendered"
        );
        self.events.emit_lossy(TimelineEvent::TimelineRendered {
            max_time: self.rendered.max_time,
            cluster_count: self.rendered.clusters.len(),
            annotation_count: self.rendered.annotation_count(),
            timestamp: time::now(),
        });
        &self.rendered
    }

    /// Fan out a cluster of the last render
    pub fn expand(&mut self, cluster_index: usize) -> Option<&Overlay> {
        self.expansion.expand(&self.rendered, cluster_index)
    }

    pub fn collapse(&mut self) -> bool {
        self.expansion.collapse()
    }

    /// Forward a pointer move; see [`ExpansionView::pointer_moved`]
    pub fn pointer_moved(&mut self, inside_overlay: bool) -> bool {
        self.expansion.pointer_moved(inside_overlay)
    }

    /// Handle a click on marker `index` of the last render
    ///
    /// Single markers seek the player. Badges expand on hover and do nothing
    /// on click; a marker hidden under an open overlay ignores input.
    pub fn click_marker(&mut self, index: usize) -> MarkerClick {
        let timecode = match self.rendered.marker(index) {
            Some(TimelineMarker::Single {
                cluster_index,
                timecode,
                ..
            }) if !self.expansion.hides_marker(*cluster_index) => *timecode,
            _ => return MarkerClick::Ignored,
        };

        debug!(index, timecode, "Seeking from marker");
        self.player.seek(timecode);
        MarkerClick::Seeked(timecode)
    }

    /// Handle a click on dot `dot_index` of the open overlay
    ///
    /// The overlay stays open.
    pub fn click_dot(&mut self, dot_index: usize) -> MarkerClick {
        match self.expansion.click_dot(dot_index) {
            Some(timecode) => {
                debug!(dot_index, timecode, "Seeking from expanded dot");
                self.player.seek(timecode);
                MarkerClick::Seeked(timecode)
            }
            None => MarkerClick::Ignored,
        }
    }

    /// Annotations in timecode order, ready for a list view
    pub fn annotation_list(&self) -> Vec<AnnotationListItem> {
        self.store
            .annotations()
            .iter()
            .map(AnnotationListItem::from)
            .collect()
    }

    fn fail(&self, operation: &str, err: Error) -> Error {
        warn!(
            operation,
            kind = err.kind(),
            error = %err,
            project_id = %self.project_id,
            "Timeline operation failed"
        );
        self.events.emit_lossy(TimelineEvent::OperationFailed {
            operation: operation.to_string(),
            kind: err.kind().to_string(),
            message: err.to_string(),
            timestamp: time::now(),
        });
        err
    }
}
