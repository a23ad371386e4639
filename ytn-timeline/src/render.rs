//! Timeline rendering: clusters to visual markers
//!
//! The rendered timeline keeps the clusters it was drawn from, so later
//! interaction (expansion, seek-on-click) reads the exact data that was
//! drawn instead of reconstructing it from presentation state.

use crate::cluster::{cluster_annotations, Cluster};
use crate::scale::max_time;
use serde::Serialize;
use ytn_common::time::format_timecode;
use ytn_common::{Annotation, AnnotationStatus};

/// Marker fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    Amber,
    Green,
    Red,
}

impl MarkerColor {
    /// CSS hex value
    pub fn hex(self) -> &'static str {
        match self {
            MarkerColor::Amber => "#ffd700",
            MarkerColor::Green => "#52b788",
            MarkerColor::Red => "#e74c3c",
        }
    }
}

/// Color of a single annotation
pub fn status_color(status: AnnotationStatus) -> MarkerColor {
    match status {
        AnnotationStatus::Pending => MarkerColor::Amber,
        AnnotationStatus::Accepted => MarkerColor::Green,
        AnnotationStatus::Rejected => MarkerColor::Red,
    }
}

/// Color of a group of annotations
///
/// Green only if every member is accepted, red only if every member is
/// rejected, amber for anything else (any pending member, or accepted and
/// rejected mixed). An empty group is amber.
pub fn aggregate_color(members: &[Annotation]) -> MarkerColor {
    let Some(first) = members.first() else {
        return MarkerColor::Amber;
    };

    let uniform = members.iter().all(|a| a.status == first.status);
    match (uniform, first.status) {
        (true, AnnotationStatus::Accepted) => MarkerColor::Green,
        (true, AnnotationStatus::Rejected) => MarkerColor::Red,
        _ => MarkerColor::Amber,
    }
}

/// One drawable timeline element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineMarker {
    /// A cluster with exactly one member, drawn as a plain dot
    Single {
        cluster_index: usize,
        /// Percent from the left edge
        position: f64,
        annotation_id: String,
        /// Seek target on click
        timecode: f64,
        status: AnnotationStatus,
        color: MarkerColor,
        /// `author: text (MM:SS)`
        tooltip: String,
    },
    /// A cluster with several members, drawn as a counted badge
    Badge {
        cluster_index: usize,
        /// Percent from the left edge
        position: f64,
        count: usize,
        color: MarkerColor,
        /// One `author: text` line per member
        tooltip: String,
        members: Vec<Annotation>,
    },
}

impl TimelineMarker {
    pub fn cluster_index(&self) -> usize {
        match self {
            TimelineMarker::Single { cluster_index, .. }
            | TimelineMarker::Badge { cluster_index, .. } => *cluster_index,
        }
    }

    pub fn position(&self) -> f64 {
        match self {
            TimelineMarker::Single { position, .. } | TimelineMarker::Badge { position, .. } => {
                *position
            }
        }
    }

    pub fn color(&self) -> MarkerColor {
        match self {
            TimelineMarker::Single { color, .. } | TimelineMarker::Badge { color, .. } => *color,
        }
    }

    pub fn is_badge(&self) -> bool {
        matches!(self, TimelineMarker::Badge { .. })
    }
}

/// Output of one render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedTimeline {
    /// Scale used for this pass (`None` when there was nothing to draw)
    pub max_time: Option<f64>,
    /// Markers in cluster creation order
    pub markers: Vec<TimelineMarker>,
    /// Clusters the markers were drawn from, indexed by `cluster_index`
    pub clusters: Vec<Cluster>,
}

impl RenderedTimeline {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn cluster(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn marker(&self, index: usize) -> Option<&TimelineMarker> {
        self.markers.get(index)
    }

    /// Total number of annotations drawn
    pub fn annotation_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }
}

/// Draw already-computed clusters
pub fn render_clusters(clusters: Vec<Cluster>, max_time: Option<f64>) -> RenderedTimeline {
    let markers = clusters
        .iter()
        .enumerate()
        .filter_map(|(cluster_index, cluster)| marker_for(cluster_index, cluster))
        .collect();

    RenderedTimeline {
        max_time,
        markers,
        clusters,
    }
}

/// Scale, cluster and draw a set of annotations
///
/// `annotations` must already be in store order (timecode ascending).
pub fn render(annotations: &[Annotation], video_duration: Option<f64>) -> RenderedTimeline {
    if annotations.is_empty() {
        return RenderedTimeline::default();
    }

    match max_time(annotations, video_duration) {
        Some(scale) => render_clusters(cluster_annotations(annotations, scale), Some(scale)),
        None => RenderedTimeline::default(),
    }
}

fn marker_for(cluster_index: usize, cluster: &Cluster) -> Option<TimelineMarker> {
    match cluster.members.as_slice() {
        [] => None,
        [only] => Some(TimelineMarker::Single {
            cluster_index,
            position: cluster.position,
            annotation_id: only.id.clone(),
            timecode: only.timecode,
            status: only.status,
            color: status_color(only.status),
            tooltip: format!("{} ({})", only.tooltip(), format_timecode(only.timecode)),
        }),
        members => Some(TimelineMarker::Badge {
            cluster_index,
            position: cluster.position,
            count: members.len(),
            color: aggregate_color(members),
            tooltip: members
                .iter()
                .map(Annotation::tooltip)
                .collect::<Vec<_>>()
                .join("\n"),
            members: members.to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytn_common::AnnotationStatus::{Accepted, Pending, Rejected};

    fn note(id: &str, timecode: f64, status: AnnotationStatus) -> Annotation {
        Annotation {
            id: id.to_string(),
            author: format!("author-{id}"),
            text: format!("text-{id}"),
            timecode,
            status,
        }
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let colors = [status_color(Pending), status_color(Accepted), status_color(Rejected)];
        assert_eq!(colors, [MarkerColor::Amber, MarkerColor::Green, MarkerColor::Red]);
        assert_ne!(MarkerColor::Amber.hex(), MarkerColor::Green.hex());
        assert_ne!(MarkerColor::Green.hex(), MarkerColor::Red.hex());
        assert_ne!(MarkerColor::Amber.hex(), MarkerColor::Red.hex());
    }

    #[test]
    fn test_aggregate_all_accepted_is_green() {
        let members = vec![note("a", 1.0, Accepted), note("b", 1.5, Accepted)];
        assert_eq!(aggregate_color(&members), MarkerColor::Green);
    }

    #[test]
    fn test_aggregate_all_rejected_is_red() {
        let members = vec![
            note("a", 1.0, Rejected),
            note("b", 1.2, Rejected),
            note("c", 1.4, Rejected),
        ];
        assert_eq!(aggregate_color(&members), MarkerColor::Red);
    }

    #[test]
    fn test_aggregate_accepted_and_rejected_is_amber() {
        let members = vec![note("a", 1.0, Accepted), note("b", 1.2, Rejected)];
        assert_eq!(aggregate_color(&members), MarkerColor::Amber);
    }

    #[test]
    fn test_aggregate_any_pending_is_amber() {
        assert_eq!(
            aggregate_color(&[note("a", 1.0, Accepted), note("b", 1.2, Pending)]),
            MarkerColor::Amber
        );
        assert_eq!(
            aggregate_color(&[note("a", 1.0, Pending), note("b", 1.2, Pending)]),
            MarkerColor::Amber
        );
        assert_eq!(aggregate_color(&[]), MarkerColor::Amber);
    }

    #[test]
    fn test_render_empty() {
        let rendered = render(&[], Some(120.0));
        assert!(rendered.is_empty());
        assert_eq!(rendered.max_time, None);
    }

    #[test]
    fn test_render_single_and_badge() {
        let annotations = vec![
            note("a", 10.0, Accepted),
            note("b", 11.0, Rejected),
            note("c", 50.0, Rejected),
        ];
        let rendered = render(&annotations, Some(100.0));

        assert_eq!(rendered.max_time, Some(100.0));
        assert_eq!(rendered.markers.len(), 2);
        assert_eq!(rendered.annotation_count(), 3);

        match &rendered.markers[0] {
            TimelineMarker::Badge {
                cluster_index,
                count,
                color,
                tooltip,
                members,
                ..
            } => {
                assert_eq!(*cluster_index, 0);
                assert_eq!(*count, 2);
                assert_eq!(*color, MarkerColor::Amber);
                assert_eq!(tooltip, "author-a: text-a\nauthor-b: text-b");
                assert_eq!(members.len(), 2);
            }
            other => panic!("expected badge, got {other:?}"),
        }

        match &rendered.markers[1] {
            TimelineMarker::Single {
                annotation_id,
                timecode,
                color,
                tooltip,
                position,
                ..
            } => {
                assert_eq!(annotation_id, "c");
                assert_eq!(*timecode, 50.0);
                assert_eq!(*color, MarkerColor::Red);
                assert_eq!(*position, 50.0);
                assert_eq!(tooltip, "author-c: text-c (00:50)");
            }
            other => panic!("expected single marker, got {other:?}"),
        }
    }

    #[test]
    fn test_render_uses_fallback_scale() {
        let rendered = render(&[note("a", 40.0, Pending)], None);
        assert_eq!(rendered.max_time, Some(100.0));
        assert_eq!(rendered.markers[0].position(), 40.0);
    }

    #[test]
    fn test_rendered_keeps_clusters_for_lookup() {
        let rendered = render(
            &[note("a", 10.0, Pending), note("b", 10.5, Pending)],
            Some(100.0),
        );
        let cluster = rendered.cluster(0).unwrap();
        assert_eq!(cluster.members.len(), 2);
        assert!(rendered.cluster(1).is_none());
        assert!(rendered.marker(0).unwrap().is_badge());
    }

    #[test]
    fn test_marker_serialization_shape() {
        let rendered = render(&[note("a", 30.0, Accepted)], Some(60.0));
        let json = serde_json::to_value(&rendered).unwrap();
        assert_eq!(json["markers"][0]["kind"], "single");
        assert_eq!(json["markers"][0]["color"], "green");
        assert_eq!(json["markers"][0]["status"], 1);
        assert_eq!(json["markers"][0]["position"], 50.0);
    }
}
