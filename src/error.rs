//! Error types for mounting the backdrop and loading its config.
//!
//! The simulation and renderer themselves cannot fail. A missing 2D
//! context is not an error either: the component just stays stopped.

use std::fmt;

/// Errors that can occur while mounting or configuring the backdrop.
#[derive(Debug)]
pub enum BackdropError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// No element with the given id.
    CanvasNotFound(String),
    /// The element with the given id is not a `<canvas>`.
    NotACanvas(String),
    /// A JS call threw.
    Js(String),
    /// Failed to read a config file.
    Io(std::io::Error),
    /// Failed to parse a config file.
    Config(serde_json::Error),
}

impl fmt::Display for BackdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropError::NoWindow => write!(f, "No global window available"),
            BackdropError::NoDocument => write!(f, "Window has no document"),
            BackdropError::CanvasNotFound(id) => write!(f, "No element with id '{}'", id),
            BackdropError::NotACanvas(id) => write!(f, "Element '{}' is not a canvas", id),
            BackdropError::Js(msg) => write!(f, "JS error: {}", msg),
            BackdropError::Io(e) => write!(f, "Failed to read config: {}", e),
            BackdropError::Config(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for BackdropError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackdropError::Io(e) => Some(e),
            BackdropError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BackdropError {
    fn from(e: std::io::Error) -> Self {
        BackdropError::Io(e)
    }
}

impl From<serde_json::Error> for BackdropError {
    fn from(e: serde_json::Error) -> Self {
        BackdropError::Config(e)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for BackdropError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        BackdropError::Js(format!("{:?}", v))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BackdropError> for wasm_bindgen::JsValue {
    fn from(e: BackdropError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_element() {
        let err = BackdropError::NotACanvas("particle-bg".to_string());
        assert_eq!(err.to_string(), "Element 'particle-bg' is not a canvas");
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;
        let err = BackdropError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(BackdropError::NoWindow.source().is_none());
    }
}
