//! # YTN Common Library
//!
//! Shared code for the YTN review-annotation crates including:
//! - Annotation model and status normalization
//! - API request/response wire types
//! - Configuration loading
//! - Timeline event bus
//! - Timecode formatting and YouTube URL handling

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod models;
pub mod time;
pub mod youtube;

pub use error::{Error, Result};
pub use models::{Annotation, AnnotationStatus};
