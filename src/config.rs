use serde::Deserialize;
use web_sys::Document;

use crate::error::LandingError;

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Page contract and tunables. Defaults match the shipped landing page markup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub menu_button_id: String,
    pub menu_id: String,
    pub faq_question_selector: String,
    pub faq_answer_selector: String,
    pub faq_icon_selector: String,
    pub anchor_selector: String,
    pub header_selector: String,
    pub lazy_image_selector: String,
    /// Height kept clear for the fixed header when scrolling to a fragment.
    pub header_offset: f64,
    /// Scroll offset past which the header gets its shadow.
    pub shadow_threshold: f64,
    pub shadow_debounce_ms: u32,
    pub underline_active_label: bool,
    pub log_level: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            menu_button_id: "mobile-menu-button".to_string(),
            menu_id: "mobile-menu".to_string(),
            faq_question_selector: ".faq-question".to_string(),
            faq_answer_selector: ".faq-answer".to_string(),
            faq_icon_selector: ".faq-icon".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            header_selector: "nav".to_string(),
            lazy_image_selector: "img[data-src]".to_string(),
            header_offset: 80.0,
            shadow_threshold: 100.0,
            shadow_debounce_ms: 10,
            underline_active_label: false,
            log_level: "info".to_string(),
        }
    }
}

impl LandingConfig {
    pub fn parse(raw: &str) -> Result<Self, LandingError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

/// Reads overrides from the page. No config block means defaults.
pub fn load(document: &Document) -> Result<LandingConfig, LandingError> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    {
        Some(raw) => LandingConfig::parse(&raw),
        None => Ok(LandingConfig::default()),
    }
}
