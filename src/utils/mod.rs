// ============================================================================
// Utilities Module
// Helpers for embedding applications (enabled by the `logging` feature)
// ============================================================================

mod logging;

pub use logging::init_logging;
