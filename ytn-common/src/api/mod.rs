//! API module for the annotation service wire format
//!
//! # Design Principle
//!
//! This module contains ONLY shared request/response types. It has no HTTP
//! framework or client dependencies; `ytn-timeline` wraps these with its
//! reqwest client, and test servers wrap them with axum handlers.

pub mod types;

pub use types::{
    CreateAnnotationRequest, CreateProjectRequest, CreateProjectResponse, DeleteResponse,
    ErrorResponse, ProjectResponse, StatusResponse, StatusUpdateRequest,
};
