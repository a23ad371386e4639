//! Text and JSON rendering of a timeline

use serde_json::{json, Value};
use ytn_common::time::format_timecode;
use ytn_common::AnnotationStatus;
use ytn_timeline::{AnnotationListItem, Overlay, RenderedTimeline, TimelineMarker};

/// Width of the ASCII timeline strip, in columns
pub const STRIP_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn status_glyph(status: AnnotationStatus) -> char {
    match status {
        AnnotationStatus::Pending => 'o',
        AnnotationStatus::Accepted => '+',
        AnnotationStatus::Rejected => 'x',
    }
}

fn marker_glyph(marker: &TimelineMarker) -> char {
    match marker {
        TimelineMarker::Single { status, .. } => status_glyph(*status),
        TimelineMarker::Badge { count, .. } => char::from_digit(*count as u32, 10).unwrap_or('#'),
    }
}

/// Column of a 0-100 position on the strip
pub fn strip_column(position: f64) -> usize {
    let last = (STRIP_WIDTH - 1) as f64;
    (position / 100.0 * last).round().clamp(0.0, last) as usize
}

/// One-line ASCII strip: `|--o----3-----x--|`
///
/// Markers drawn later overwrite earlier ones in the same column.
pub fn strip(rendered: &RenderedTimeline) -> String {
    let mut cells = vec!['-'; STRIP_WIDTH];
    for marker in &rendered.markers {
        cells[strip_column(marker.position())] = marker_glyph(marker);
    }
    format!("|{}|", cells.into_iter().collect::<String>())
}

/// Human-readable timeline: strip, then one block per marker
pub fn timeline_text(rendered: &RenderedTimeline) -> String {
    let Some(max_time) = rendered.max_time else {
        return "No annotations\n".to_string();
    };

    let mut out = format!(
        "Timeline 00:00 - {} ({} markers, {} annotations)\n{}\n",
        format_timecode(max_time),
        rendered.markers.len(),
        rendered.annotation_count(),
        strip(rendered)
    );

    for marker in &rendered.markers {
        match marker {
            TimelineMarker::Single {
                cluster_index,
                position,
                status,
                color,
                tooltip,
                ..
            } => {
                out.push_str(&format!(
                    "#{:<3} {:>5.1}%  {:<9} {}  {}\n",
                    cluster_index,
                    position,
                    status.as_str(),
                    color.hex(),
                    tooltip
                ));
            }
            TimelineMarker::Badge {
                cluster_index,
                position,
                count,
                color,
                members,
                ..
            } => {
                out.push_str(&format!(
                    "#{:<3} {:>5.1}%  {:<9} {}\n",
                    cluster_index,
                    position,
                    format!("x{count}"),
                    color.hex()
                ));
                for member in members {
                    out.push_str(&format!(
                        "        {}  {:<9} {}\n",
                        format_timecode(member.timecode),
                        member.status.as_str(),
                        member.tooltip()
                    ));
                }
            }
        }
    }
    out
}

/// Expanded cluster, one dot per line with its angle in degrees
pub fn overlay_text(overlay: &Overlay) -> String {
    let mut out = format!(
        "Cluster #{} at {:.1}% ({} members)\n",
        overlay.cluster_index,
        overlay.center_position,
        overlay.dots.len()
    );
    for (i, dot) in overlay.dots.iter().enumerate() {
        out.push_str(&format!(
            "  [{}] {:>5.1}°  {}  {}  {}\n",
            i,
            dot.angle.to_degrees(),
            format_timecode(dot.timecode),
            dot.color.hex(),
            dot.tooltip
        ));
    }
    out
}

/// Annotation list, timecode order
pub fn list_text(items: &[AnnotationListItem]) -> String {
    let mut out = format!("{} annotations\n", items.len());
    for item in items {
        out.push_str(&format!(
            "{}  {:<9} {}: {}  [{}]\n",
            item.timecode_label, item.status_label, item.author, item.text, item.id
        ));
    }
    out
}

/// Everything the shell knows, as one JSON document
pub fn timeline_json(
    rendered: &RenderedTimeline,
    list: &[AnnotationListItem],
    overlay: Option<&Overlay>,
) -> Value {
    json!({
        "max_time": rendered.max_time,
        "markers": rendered.markers,
        "annotations": list,
        "count": list.len(),
        "overlay": overlay,
    })
}
