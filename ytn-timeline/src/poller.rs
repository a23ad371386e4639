//! Periodic video duration polling
//!
//! Players report their duration late (after metadata loads) and may change
//! it (live streams, source swaps). The poller reads it at a fixed interval
//! and hands it to the session, which re-renders only on a real change.

use crate::api::AnnotationApi;
use crate::player::Player;
use crate::session::Session;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};
use ytn_common::time::millis_to_duration;

pub struct DurationPoller {
    interval: Interval,
}

impl DurationPoller {
    /// Poll every `period`; the first tick completes immediately
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(millis_to_duration(millis))
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Wait for the next tick, then refresh the session's duration
    ///
    /// Returns `true` if the timeline was re-rendered.
    pub async fn tick<A: AnnotationApi, P: Player>(&mut self, session: &mut Session<A, P>) -> bool {
        self.interval.tick().await;
        session.refresh_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryApi, ScriptedPlayer};
    use ytn_common::{Annotation, AnnotationStatus};

    #[tokio::test]
    async fn test_poller_applies_late_duration() {
        let api = MemoryApi::new();
        api.insert_project("p1", "https://youtu.be/abc").await;
        api.insert_annotation(
            "p1",
            Annotation {
                id: "a".to_string(),
                author: "Dana".to_string(),
                text: "intro".to_string(),
                timecode: 10.0,
                status: AnnotationStatus::Pending,
            },
        )
        .await;

        let mut session = Session::new("p1", api, ScriptedPlayer::new());
        session.load().await.unwrap();
        let mut poller = DurationPoller::from_millis(5);
        assert_eq!(poller.period(), Duration::from_millis(5));

        // metadata not loaded yet
        session.player_mut().set_duration(Some(0.0));
        assert!(!poller.tick(&mut session).await);
        assert_eq!(session.rendered().max_time, Some(70.0));

        session.player_mut().set_duration(Some(125.0));
        assert!(poller.tick(&mut session).await);
        assert_eq!(session.rendered().max_time, Some(125.0));

        // unchanged
        assert!(!poller.tick(&mut session).await);
    }
}
