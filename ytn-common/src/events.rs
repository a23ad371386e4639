//! Event types for the YTN timeline event system
//!
//! A session announces every confirmed mutation and every redraw on an
//! [`EventBus`]. Shells subscribe to drive side effects that are not part of
//! the timeline itself (sound cues, toasts, list refreshes).

use crate::models::AnnotationStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Feedback cue attached to a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCue {
    /// Rising three-note chime
    Chime,
    /// Low two-note tone
    LowTone,
    /// No cue
    Silent,
}

impl StatusCue {
    /// Cue for a newly applied status
    pub fn for_status(status: AnnotationStatus) -> Self {
        match status {
            AnnotationStatus::Accepted => StatusCue::Chime,
            AnnotationStatus::Rejected => StatusCue::LowTone,
            AnnotationStatus::Pending => StatusCue::Silent,
        }
    }
}

/// Timeline event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimelineEvent {
    /// Store replaced wholesale from the API
    AnnotationsLoaded {
        project_id: String,
        count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Server confirmed a new annotation
    AnnotationAdded {
        annotation_id: String,
        timecode: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Server confirmed a deletion
    ///
    /// Triggers:
    /// - Shell: play the discard sound
    AnnotationDeleted {
        annotation_id: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Server confirmed a status change
    StatusChanged {
        annotation_id: String,
        old_status: AnnotationStatus,
        new_status: AnnotationStatus,
        cue: StatusCue,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Player reported a new positive duration
    DurationChanged {
        old_duration: Option<f64>,
        new_duration: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Timeline was re-clustered and redrawn
    TimelineRendered {
        max_time: Option<f64>,
        cluster_count: usize,
        annotation_count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A user action failed; local state was left unchanged
    OperationFailed {
        operation: String,
        kind: String,
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl TimelineEvent {
    /// Event type name (matches the serialized `type` tag)
    pub fn event_type(&self) -> &'static str {
        match self {
            TimelineEvent::AnnotationsLoaded { .. } => "AnnotationsLoaded",
            TimelineEvent::AnnotationAdded { .. } => "AnnotationAdded",
            TimelineEvent::AnnotationDeleted { .. } => "AnnotationDeleted",
            TimelineEvent::StatusChanged { .. } => "StatusChanged",
            TimelineEvent::DurationChanged { .. } => "DurationChanged",
            TimelineEvent::TimelineRendered { .. } => "TimelineRendered",
            TimelineEvent::OperationFailed { .. } => "OperationFailed",
        }
    }
}

/// Central event distribution for a session
///
/// Uses tokio::broadcast internally: publishing never blocks, slow
/// subscribers see `Lagged`, and dropped receivers are cleaned up
/// automatically.
///
/// # Examples
///
/// ```
/// use ytn_common::events::{EventBus, TimelineEvent};
///
/// let event_bus = EventBus::new(16);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(TimelineEvent::AnnotationDeleted {
///     annotation_id: "a1".to_string(),
///     timestamp: chrono::Utc::now(),
/// });
///
/// let event = rx.try_recv().unwrap();
/// assert_eq!(event.event_type(), "AnnotationDeleted");
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<TimelineEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<TimelineEvent> {
        self.tx.subscribe()
    }

    /// Emit an event
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: TimelineEvent,
    ) -> Result<usize, broadcast::error::SendError<TimelineEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: TimelineEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_for_status() {
        assert_eq!(StatusCue::for_status(AnnotationStatus::Accepted), StatusCue::Chime);
        assert_eq!(StatusCue::for_status(AnnotationStatus::Rejected), StatusCue::LowTone);
        assert_eq!(StatusCue::for_status(AnnotationStatus::Pending), StatusCue::Silent);
    }

    #[test]
    fn test_emit_without_subscribers_is_error() {
        let bus = EventBus::new(10);
        let result = bus.emit(TimelineEvent::AnnotationDeleted {
            annotation_id: "a".into(),
            timestamp: chrono::Utc::now(),
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(TimelineEvent::StatusChanged {
            annotation_id: "a".into(),
            old_status: AnnotationStatus::Pending,
            new_status: AnnotationStatus::Accepted,
            cue: StatusCue::Chime,
            timestamp: chrono::Utc::now(),
        })
        .unwrap();

        match rx.recv().await.unwrap() {
            TimelineEvent::StatusChanged { new_status, cue, .. } => {
                assert_eq!(new_status, AnnotationStatus::Accepted);
                assert_eq!(cue, StatusCue::Chime);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = TimelineEvent::DurationChanged {
            old_duration: None,
            new_duration: 125.0,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DurationChanged");
        assert_eq!(json["new_duration"], 125.0);
        assert_eq!(event.event_type(), "DurationChanged");
    }
}
