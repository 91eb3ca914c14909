//! Tracing/logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// Call once at startup; extra calls are no-ops, so tests can call it
/// freely.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
