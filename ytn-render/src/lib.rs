//! ytn-render - command-line shell for the annotation timeline
//!
//! Loads a project from the annotation server or a JSON file, optionally
//! applies one review action, and prints the rendered timeline.

pub mod events;
pub mod input;
pub mod output;

pub use events::{finish_event_logger, log_event, spawn_event_logger};
pub use input::{parse_input, read_input, seed, LOCAL_PROJECT_ID};
pub use output::{list_text, overlay_text, strip, timeline_json, timeline_text, OutputFormat};
