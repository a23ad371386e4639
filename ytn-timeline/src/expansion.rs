//! Cluster expansion overlay
//!
//! Hovering a cluster badge fans its members out on a small circle so each
//! one can be clicked individually. The overlay is a single slot:
//!
//! ```text
//!            expand(i), cluster i has ≥2 members
//! Collapsed ─────────────────────────────────────▶ Expanded(i)
//!     ▲                                                │
//!     └──── pointer leaves overlay / collapse() ───────┘
//! ```
//!
//! Expanding while already expanded replaces the old overlay. Containment is
//! decided by the host: it reports whether the pointer is still inside the
//! overlay region, and only leaving the whole region collapses. Moving from
//! one dot to another stays inside the region and changes nothing.

use crate::render::{status_color, MarkerColor, RenderedTimeline};
use serde::Serialize;
use std::f64::consts::PI;
use tracing::debug;
use ytn_common::AnnotationStatus;

/// Radius of the circle the dots are placed on, in pixels
pub const CLOUD_RADIUS_PX: f64 = 40.0;

/// Overlay region size, centered on the cluster, in pixels
pub const OVERLAY_WIDTH_PX: f64 = 150.0;
pub const OVERLAY_HEIGHT_PX: f64 = 160.0;

/// Which cluster, if any, is currently fanned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "cluster_index", rename_all = "snake_case")]
pub enum ExpansionState {
    Collapsed,
    Expanded(usize),
}

/// One member of an expanded cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayDot {
    pub annotation_id: String,
    /// Seek target on click
    pub timecode: f64,
    pub status: AnnotationStatus,
    pub color: MarkerColor,
    /// `author: text`
    pub tooltip: String,
    /// Angle on the circle, radians
    pub angle: f64,
    /// Offset from the overlay center, pixels
    pub offset_x: f64,
    pub offset_y: f64,
}

/// The expanded view of one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub cluster_index: usize,
    /// Timeline position (percent) the overlay is centered on
    pub center_position: f64,
    pub dots: Vec<OverlayDot>,
}

impl Overlay {
    /// Whether a point, given as a pixel offset from the overlay center,
    /// falls inside the overlay region
    pub fn contains(&self, dx: f64, dy: f64) -> bool {
        dx.abs() <= OVERLAY_WIDTH_PX / 2.0 && dy.abs() <= OVERLAY_HEIGHT_PX / 2.0
    }
}

/// Lay out members evenly on a circle, first member at angle 0
fn layout_dots(members: &[ytn_common::Annotation]) -> Vec<OverlayDot> {
    let angle_step = 2.0 * PI / members.len() as f64;

    members
        .iter()
        .enumerate()
        .map(|(i, annotation)| {
            let angle = angle_step * i as f64;
            OverlayDot {
                annotation_id: annotation.id.clone(),
                timecode: annotation.timecode,
                status: annotation.status,
                color: status_color(annotation.status),
                tooltip: annotation.tooltip(),
                angle,
                offset_x: angle.cos() * CLOUD_RADIUS_PX,
                offset_y: angle.sin() * CLOUD_RADIUS_PX,
            }
        })
        .collect()
}

/// Single-slot holder for the expansion overlay
#[derive(Debug, Clone, Default)]
pub struct ExpansionView {
    overlay: Option<Overlay>,
}

impl ExpansionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ExpansionState {
        match &self.overlay {
            Some(overlay) => ExpansionState::Expanded(overlay.cluster_index),
            None => ExpansionState::Collapsed,
        }
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Fan out cluster `cluster_index` of the last rendered timeline
    ///
    /// Any overlay already shown is removed first. Unknown indexes and
    /// clusters with fewer than two members leave the view collapsed.
    pub fn expand(
        &mut self,
        rendered: &RenderedTimeline,
        cluster_index: usize,
    ) -> Option<&Overlay> {
        self.overlay = None;

        let cluster = rendered.cluster(cluster_index)?;
        if cluster.members.len() <= 1 {
            debug!(cluster_index, "Ignoring expand for non-aggregate cluster");
            return None;
        }

        debug!(cluster_index, members = cluster.members.len(), "Expanding cluster");
        self.overlay = Some(Overlay {
            cluster_index,
            center_position: cluster.position,
            dots: layout_dots(&cluster.members),
        });
        self.overlay.as_ref()
    }

    /// Remove the overlay
    ///
    /// Returns `true` if an overlay was shown.
    pub fn collapse(&mut self) -> bool {
        self.overlay.take().is_some()
    }

    /// Report pointer movement while an overlay may be shown
    ///
    /// `inside_overlay` is the host's containment test for the whole overlay
    /// region. Returns `true` exactly when this movement collapsed the view.
    pub fn pointer_moved(&mut self, inside_overlay: bool) -> bool {
        if inside_overlay {
            return false;
        }
        let collapsed = self.collapse();
        if collapsed {
            debug!("Pointer left overlay, collapsing");
        }
        collapsed
    }

    /// Whether the marker for `cluster_index` is hidden and ignores input
    pub fn hides_marker(&self, cluster_index: usize) -> bool {
        self.state() == ExpansionState::Expanded(cluster_index)
    }

    /// Timecode to seek to when dot `dot_index` is clicked
    ///
    /// The click is consumed by the dot; the hidden badge underneath never
    /// sees it.
    pub fn click_dot(&self, dot_index: usize) -> Option<f64> {
        self.overlay
            .as_ref()
            .and_then(|overlay| overlay.dots.get(dot_index))
            .map(|dot| dot.timecode)
    }
}
