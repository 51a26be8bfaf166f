//! Machine-readable error codes shared by every service error.

/// Implemented by service errors so the HTTP layer can surface a stable code
/// and tell clients whether retrying the same request may succeed.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
