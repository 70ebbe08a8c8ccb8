//! Upload Record Domain Module
//!
//! Состояние загрузки каждого вложения: pending → uploading → success | error.

pub mod aggregate;
pub mod tracker;

pub use aggregate::{UploadRecord, UploadState};
pub use tracker::{TransitionError, UploadTracker};
