//! Session event logging
//!
//! The shell has no speaker, so status cues are written to the log instead
//! of being played.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use ytn_common::events::{EventBus, StatusCue, TimelineEvent};

/// Log every event on `events` until the bus is dropped
pub fn spawn_event_logger(events: &EventBus) -> JoinHandle<()> {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Wait for the logger task to drain
///
/// Returns false (after logging a warning) if the task panicked or was
/// cancelled.
pub async fn finish_event_logger(logger: JoinHandle<()>) -> bool {
    match logger.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Event logger task failed");
            false
        }
    }
}

pub fn log_event(event: &TimelineEvent) {
    match event {
        TimelineEvent::StatusChanged {
            annotation_id,
            new_status,
            cue,
            ..
        } => {
            let cue = match cue {
                StatusCue::Chime => "chime",
                StatusCue::LowTone => "low tone",
                StatusCue::Silent => "none",
            };
            info!(annotation_id = %annotation_id, status = %new_status, cue, "Status changed");
        }
        TimelineEvent::AnnotationDeleted { annotation_id, .. } => {
            info!(annotation_id = %annotation_id, cue = "discard", "Annotation deleted");
        }
        TimelineEvent::OperationFailed {
            operation,
            kind,
            message,
            ..
        } => {
            error!(operation = %operation, kind = %kind, "{}", message);
        }
        other => debug!(event = other.event_type(), "Timeline event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytn_common::time;

    #[tokio::test]
    async fn test_logger_ends_when_bus_dropped() {
        let bus = EventBus::new(8);
        let logger = spawn_event_logger(&bus);
        bus.emit_lossy(TimelineEvent::AnnotationDeleted {
            annotation_id: "a1".to_string(),
            timestamp: time::now(),
        });
        drop(bus);

        assert!(finish_event_logger(logger).await);
    }

    #[tokio::test]
    async fn test_panicked_logger_is_reported() {
        let logger: JoinHandle<()> = tokio::spawn(async { panic!("logger blew up") });
        assert!(!finish_event_logger(logger).await);
    }

    #[tokio::test]
    async fn test_aborted_logger_is_reported() {
        let bus = EventBus::new(8);
        let logger = spawn_event_logger(&bus);
        logger.abort();

        assert!(!finish_event_logger(logger).await);
    }
}
