use std::cell::Cell;

use web_sys::{Document, Element, Event};

use crate::config::LandingConfig;
use crate::error::{self, LandingError};
use crate::utils::debounce::{BrowserTimers, Debouncer};
use crate::utils::dom;

const SHADOW: &str = "shadow-lg";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderShadow {
    threshold: f64,
    shadowed: bool,
}

impl HeaderShadow {
    /// `shadowed` is whatever the markup currently shows.
    pub fn new(threshold: f64, shadowed: bool) -> Self {
        Self {
            threshold,
            shadowed,
        }
    }

    pub fn is_shadowed(&self) -> bool {
        self.shadowed
    }

    /// Returns the new flag only when it changed.
    pub fn update(&mut self, scroll_y: f64) -> Option<bool> {
        let shadowed = scroll_y > self.threshold;
        if shadowed == self.shadowed {
            return None;
        }
        self.shadowed = shadowed;
        Some(shadowed)
    }
}

fn evaluate(header: &Element, state: &Cell<HeaderShadow>) -> Result<(), LandingError> {
    let scroll_y = dom::window()?.scroll_y()?;
    let mut shadow = state.get();
    if let Some(on) = shadow.update(scroll_y) {
        dom::set_marker(header, SHADOW, on)?;
    }
    state.set(shadow);
    Ok(())
}

pub fn attach(document: &Document, config: &LandingConfig) -> Result<(), LandingError> {
    let header = document
        .query_selector(&config.header_selector)?
        .ok_or_else(|| LandingError::missing(config.header_selector.clone()))?;
    let state = Cell::new(HeaderShadow::new(
        config.shadow_threshold,
        dom::has_marker(&header, SHADOW),
    ));

    // Initial call
    evaluate(&header, &state)?;

    let debouncer = Debouncer::new(BrowserTimers, config.shadow_debounce_ms, move |()| {
        if let Err(e) = evaluate(&header, &state) {
            error::report("header shadow", e);
        }
    });
    let window = dom::window()?;
    dom::listen(&window, "scroll", move |_: Event| {
        debouncer.call(());
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_only_past_threshold() {
        let mut shadow = HeaderShadow::new(100.0, false);
        assert_eq!(shadow.update(0.0), None);
        assert_eq!(shadow.update(100.0), None);
        assert_eq!(shadow.update(100.5), Some(true));
        assert!(shadow.is_shadowed());
    }

    #[test]
    fn reports_changes_only() {
        let mut shadow = HeaderShadow::new(100.0, false);
        assert_eq!(shadow.update(250.0), Some(true));
        assert_eq!(shadow.update(400.0), None);
        assert_eq!(shadow.update(40.0), Some(false));
        assert_eq!(shadow.update(10.0), None);
    }

    #[test]
    fn shadow_from_markup_is_removed_below_threshold() {
        let mut shadow = HeaderShadow::new(100.0, true);
        assert_eq!(shadow.update(0.0), Some(false));
        assert!(!shadow.is_shadowed());
        assert_eq!(shadow.update(50.0), None);
        assert_eq!(shadow.update(20.0), None);
    }

    #[test]
    fn shadow_from_markup_is_kept_past_threshold() {
        let mut shadow = HeaderShadow::new(100.0, true);
        assert_eq!(shadow.update(300.0), None);
        assert!(shadow.is_shadowed());
    }
}
