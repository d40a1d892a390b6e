//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between the
//! email and analytics collaborators. They provide a clean boundary between
//! the MCP handlers and the HTTP clients.

mod submission_service;

pub use submission_service::{SubmissionService, SubmissionServiceImpl, SubmissionSettings};
