//! Structured error types for colsize.
//!
//! The sizing core never fails: ranges are normalized and host teardown is a
//! silent abort. Errors only surface at the edges (settings, browser glue).

/// All errors that can occur while configuring or wiring up colsize.
#[derive(Debug, thiserror::Error)]
pub enum ColsizeError {
    /// Settings JSON could not be parsed.
    #[error("Settings: {0}")]
    Config(#[from] serde_json::Error),

    /// A percentage sync limit such as `"50%"` that is not a number.
    #[error("Invalid sync limit: {0}")]
    InvalidSyncLimit(String),

    /// The off-screen measurement surface could not be created.
    #[error("Measurement surface: {0}")]
    Measure(String),

    /// The host refused to schedule a frame or deferred task.
    #[error("Scheduler: {0}")]
    Scheduler(String),

    /// I/O error (CLI input).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColsizeError>;

#[cfg(target_arch = "wasm32")]
impl From<ColsizeError> for wasm_bindgen::JsValue {
    fn from(e: ColsizeError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
