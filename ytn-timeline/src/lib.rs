//! ytn-timeline - annotation timeline core
//!
//! Pipeline, in dependency order:
//!
//! ```text
//! AnnotationStore → scale → cluster → render → ExpansionView
//! ```
//!
//! [`Session`] owns one project's store, the last rendered timeline and the
//! expansion slot, and is the only place any of them are mutated. External
//! collaborators (the annotation API and the video player) are reached
//! through the [`AnnotationApi`] and [`Player`] traits.

pub mod api;
pub mod cluster;
pub mod expansion;
pub mod http_client;
pub mod memory;
pub mod player;
pub mod poller;
pub mod render;
pub mod scale;
pub mod session;
pub mod status;
pub mod store;

pub use api::AnnotationApi;
pub use cluster::{cluster_annotations, Cluster, CLUSTER_RADIUS};
pub use expansion::{ExpansionState, ExpansionView, Overlay, OverlayDot};
pub use http_client::HttpAnnotationApi;
pub use memory::{MemoryApi, ScriptedPlayer};
pub use player::Player;
pub use poller::DurationPoller;
pub use render::{
    aggregate_color, render, status_color, MarkerColor, RenderedTimeline, TimelineMarker,
};
pub use scale::{max_time, FALLBACK_PADDING_SECS};
pub use session::{create_project, AnnotationListItem, MarkerClick, Session};
pub use store::AnnotationStore;
