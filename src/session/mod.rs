//! The frame-sequence driver.

/// Per-frame progress reporting.
pub mod progress;
/// Render-then-encode orchestration.
pub mod shoot;
