//! Structured error types for xlgrid.
//!
//! Interaction handlers never surface these to the host: they log and drop
//! them. Construction and configuration loading propagate them.

/// All errors that can occur in xlgrid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A width or height that is negative or not finite.
    #[error("Invalid size: {0}")]
    InvalidSize(f64),

    /// Configuration rejected during validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be decoded.
    #[error("Configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A JS call across the wasm boundary failed.
    #[error("JS error: {0}")]
    Js(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
