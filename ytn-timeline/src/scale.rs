//! Timeline scale (the `maxTime` denominator)

use ytn_common::Annotation;

/// Padding added past the last annotation when the video duration is unknown,
/// so the last marker does not sit on the right edge
pub const FALLBACK_PADDING_SECS: f64 = 60.0;

/// Whether a player-reported duration is usable as the scale
pub fn is_usable_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Compute the scale denominator for normalizing timecodes to 0-100
///
/// Uses the video duration when known and positive, otherwise the largest
/// annotation timecode plus [`FALLBACK_PADDING_SECS`]. Returns `None` when
/// neither is available (no duration and no annotations).
pub fn max_time(annotations: &[Annotation], video_duration: Option<f64>) -> Option<f64> {
    if let Some(duration) = video_duration.filter(|d| is_usable_duration(*d)) {
        return Some(duration);
    }

    annotations
        .iter()
        .map(|a| a.timecode)
        .reduce(f64::max)
        .map(|max| max + FALLBACK_PADDING_SECS)
}

/// Position of a timecode on the 0-100 axis
pub fn position(timecode: f64, max_time: f64) -> f64 {
    timecode / max_time * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytn_common::AnnotationStatus;

    fn at(timecode: f64) -> Annotation {
        Annotation {
            id: format!("t{timecode}"),
            author: "A".into(),
            text: "x".into(),
            timecode,
            status: AnnotationStatus::Pending,
        }
    }

    #[test]
    fn test_known_duration_wins() {
        assert_eq!(max_time(&[at(10.0)], Some(125.0)), Some(125.0));
    }

    #[test]
    fn test_zero_duration_uses_fallback() {
        assert_eq!(max_time(&[at(10.0), at(40.0)], Some(0.0)), Some(100.0));
        assert_eq!(max_time(&[at(10.0)], None), Some(70.0));
    }

    #[test]
    fn test_nonsense_duration_uses_fallback() {
        assert_eq!(max_time(&[at(5.0)], Some(-3.0)), Some(65.0));
        assert_eq!(max_time(&[at(5.0)], Some(f64::NAN)), Some(65.0));
    }

    #[test]
    fn test_nothing_to_scale() {
        assert_eq!(max_time(&[], None), None);
        assert_eq!(max_time(&[], Some(30.0)), Some(30.0));
    }

    #[test]
    fn test_position() {
        assert_eq!(position(25.0, 100.0), 25.0);
        assert_eq!(position(0.0, 42.0), 0.0);
        assert_eq!(position(62.5, 125.0), 50.0);
    }
}
