//! Annotation model
//!
//! Records arrive from the API in two shapes: current records carry an
//! integer `status`, legacy records carry a `resolved` flag (stored by
//! SQLite as 0/1, occasionally as a JSON boolean). [`AnnotationRecord`]
//! accepts both, and [`AnnotationRecord::normalize`] collapses them into a
//! single [`AnnotationStatus`] so nothing downstream ever looks at `resolved`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Review status of an annotation
///
/// Serialized as the integer wire code used by the API
/// (0 = Pending, 1 = Accepted, 2 = Rejected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AnnotationStatus {
    /// Not yet reviewed (initial state)
    Pending,
    /// Accepted by a reviewer
    Accepted,
    /// Rejected by a reviewer
    Rejected,
}

impl AnnotationStatus {
    /// Integer code used on the wire
    pub fn wire_code(self) -> i64 {
        match self {
            AnnotationStatus::Pending => 0,
            AnnotationStatus::Accepted => 1,
            AnnotationStatus::Rejected => 2,
        }
    }

    /// Parse an integer wire code
    pub fn from_wire(code: i64) -> Result<Self> {
        match code {
            0 => Ok(AnnotationStatus::Pending),
            1 => Ok(AnnotationStatus::Accepted),
            2 => Ok(AnnotationStatus::Rejected),
            other => Err(Error::InvalidStatus(format!(
                "unknown status code {other} (expected 0, 1 or 2)"
            ))),
        }
    }

    /// Status implied by a legacy `resolved` flag
    pub fn from_resolved(resolved: bool) -> Self {
        if resolved {
            AnnotationStatus::Accepted
        } else {
            AnnotationStatus::Pending
        }
    }

    /// Lowercase name, used as a CSS-style class in rendered output
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationStatus::Pending => "pending",
            AnnotationStatus::Accepted => "accepted",
            AnnotationStatus::Rejected => "rejected",
        }
    }

    /// Label shown next to an annotation in the list view
    pub fn label(self) -> &'static str {
        match self {
            AnnotationStatus::Pending => "Pending",
            AnnotationStatus::Accepted => "✓ Accept",
            AnnotationStatus::Rejected => "✗ Reject",
        }
    }
}

impl TryFrom<i64> for AnnotationStatus {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        AnnotationStatus::from_wire(code)
    }
}

impl From<AnnotationStatus> for i64 {
    fn from(status: AnnotationStatus) -> i64 {
        status.wire_code()
    }
}

impl std::fmt::Display for AnnotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized, timestamped review comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Opaque identifier assigned by the server
    pub id: String,
    /// Display name of the commenter
    pub author: String,
    /// Comment body
    pub text: String,
    /// Playback position in seconds (non-negative)
    pub timecode: f64,
    /// Review status
    pub status: AnnotationStatus,
}

impl Annotation {
    /// Tooltip text shared by markers and expansion dots
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.author, self.text)
    }
}

/// Annotation as returned by the API, before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub author: String,
    pub text: String,
    pub timecode: f64,
    /// Current status representation (integer wire code)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// Legacy status representation (0/1 or boolean)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl AnnotationRecord {
    /// Status of this record with the legacy mapping applied
    ///
    /// An explicit `status` always wins; otherwise a truthy `resolved`
    /// means Accepted and anything else means Pending. An unknown status
    /// code is shown as Pending rather than failing the whole project load.
    pub fn status(&self) -> AnnotationStatus {
        if let Some(code) = self.status {
            return AnnotationStatus::from_wire(code).unwrap_or_else(|e| {
                warn!(id = %self.id, code, error = %e, "Treating unknown status as pending");
                AnnotationStatus::Pending
            });
        }

        let resolved = match &self.resolved {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            _ => false,
        };
        AnnotationStatus::from_resolved(resolved)
    }

    /// Convert into a normalized [`Annotation`]
    pub fn normalize(self) -> Result<Annotation> {
        if !self.timecode.is_finite() || self.timecode < 0.0 {
            return Err(Error::InvalidInput(format!(
                "annotation {} has invalid timecode {}",
                self.id, self.timecode
            )));
        }

        let status = self.status();
        Ok(Annotation {
            id: self.id,
            author: self.author,
            text: self.text,
            timecode: self.timecode,
            status,
        })
    }
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub youtube_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> AnnotationRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_status_wire_codes() {
        assert_eq!(AnnotationStatus::from_wire(0).unwrap(), AnnotationStatus::Pending);
        assert_eq!(AnnotationStatus::from_wire(1).unwrap(), AnnotationStatus::Accepted);
        assert_eq!(AnnotationStatus::from_wire(2).unwrap(), AnnotationStatus::Rejected);
        assert!(matches!(
            AnnotationStatus::from_wire(3),
            Err(Error::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_status_serializes_as_integer() {
        let json = serde_json::to_string(&AnnotationStatus::Rejected).unwrap();
        assert_eq!(json, "2");
        let parsed: AnnotationStatus = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, AnnotationStatus::Accepted);
        assert!(serde_json::from_str::<AnnotationStatus>("7").is_err());
    }

    #[test]
    fn test_record_with_status() {
        let r = record(r#"{"id":"a","author":"Ann","text":"hi","timecode":12.5,"status":2}"#);
        let a = r.normalize().unwrap();
        assert_eq!(a.status, AnnotationStatus::Rejected);
        assert_eq!(a.timecode, 12.5);
    }

    #[test]
    fn test_legacy_resolved_integer() {
        let accepted = record(r#"{"id":"a","author":"A","text":"t","timecode":1,"resolved":1}"#);
        assert_eq!(accepted.status(), AnnotationStatus::Accepted);

        let pending = record(r#"{"id":"b","author":"A","text":"t","timecode":1,"resolved":0}"#);
        assert_eq!(pending.status(), AnnotationStatus::Pending);
    }

    #[test]
    fn test_legacy_resolved_boolean() {
        let r = record(r#"{"id":"a","author":"A","text":"t","timecode":1,"resolved":true}"#);
        assert_eq!(r.status(), AnnotationStatus::Accepted);
    }

    #[test]
    fn test_status_wins_over_resolved() {
        let r = record(
            r#"{"id":"a","author":"A","text":"t","timecode":1,"resolved":1,"status":2}"#,
        );
        assert_eq!(r.status(), AnnotationStatus::Rejected);
    }

    #[test]
    fn test_null_status_falls_back_to_resolved() {
        let r = record(
            r#"{"id":"a","author":"A","text":"t","timecode":1,"status":null,"resolved":1}"#,
        );
        assert_eq!(r.status(), AnnotationStatus::Accepted);
    }

    #[test]
    fn test_missing_both_is_pending() {
        let r = record(r#"{"id":"a","author":"A","text":"t","timecode":1}"#);
        assert_eq!(r.status(), AnnotationStatus::Pending);
    }

    #[test]
    fn test_unknown_status_code_is_pending() {
        let r = record(r#"{"id":"a","author":"A","text":"t","timecode":1,"status":3}"#);
        assert_eq!(r.status(), AnnotationStatus::Pending);
        assert_eq!(r.normalize().unwrap().status, AnnotationStatus::Pending);
    }

    #[test]
    fn test_negative_timecode_rejected() {
        let r = record(r#"{"id":"a","author":"A","text":"t","timecode":-1}"#);
        assert!(matches!(r.normalize(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_tooltip_format() {
        let a = Annotation {
            id: "x".into(),
            author: "Mia".into(),
            text: "too loud".into(),
            timecode: 3.0,
            status: AnnotationStatus::Pending,
        };
        assert_eq!(a.tooltip(), "Mia: too loud");
    }
}
