//! Utility modules for error handling, configuration and markup helpers

pub mod config;
pub mod error;
pub mod html;

// Re-export for convenience
pub use config::ExtractorSettings;
pub use error::ExtractorError;
