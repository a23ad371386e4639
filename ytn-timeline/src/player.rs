//! Video player collaborator

/// Playback control surface the timeline needs from an embedded player
pub trait Player {
    /// Current playback position in seconds, `None` until the player is ready
    fn current_time(&self) -> Option<f64>;

    /// Video duration in seconds, `None` while unavailable
    ///
    /// Players may report 0 before metadata has loaded; callers treat any
    /// non-positive value as unavailable.
    fn duration(&self) -> Option<f64>;

    /// Jump to a position (and resume playback)
    fn seek(&mut self, seconds: f64);
}
