use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("Element not found: {0}")]
    MissingElement(String),
    #[error("Browser call failed: {0}")]
    Js(String),
    #[error("Invalid landing config: {0}")]
    Config(#[from] serde_json::Error),
}

impl LandingError {
    pub fn missing(what: impl Into<String>) -> Self {
        LandingError::MissingElement(what.into())
    }

    /// Markup that simply isn't on this page. Never surfaced.
    pub fn is_expected_absence(&self) -> bool {
        matches!(self, LandingError::MissingElement(_))
    }
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        LandingError::Js(message)
    }
}

/// Sink for errors that can't propagate any further (event handlers, start-up).
pub fn report(context: &str, err: LandingError) {
    if err.is_expected_absence() {
        return;
    }
    log::warn!("{}: {}", context, err);
}
