//! Client-side behaviour for the marketing landing page: mobile menu, FAQ
//! accordion, smooth in-page scrolling, header shadow, lazy images, load-time
//! logging and broken-image fallback.

use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event};

pub mod components;
pub mod config;
pub mod error;
pub mod utils;

use components::{accordion, header, image_fallback, lazy_images, load_time, menu, smooth_scroll};
use config::LandingConfig;
use error::report;
use utils::dom;

// Set once the page has been wired; later calls are no-ops.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() {
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => return report("start", e),
    };
    if document.ready_state() != "loading" {
        initialize();
        return;
    }
    if let Err(e) = dom::listen(&document, "DOMContentLoaded", |_: Event| {
        initialize();
        Ok(())
    }) {
        report("start", e);
    }
}

/// Attaches every component to the current page. Safe to call more than once.
#[wasm_bindgen(js_name = initLandingPage)]
pub fn initialize() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => return report("initialize", e),
    };

    let (config, config_err) = match config::load(&document) {
        Ok(config) => (config, None),
        Err(e) => (LandingConfig::default(), Some(e)),
    };
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Some(e) = config_err {
        log::warn!("Using default landing config: {}", e);
    }

    attach_all(&document, &config);
    log::debug!("Landing page initialized");
}

fn attach_all(document: &Document, config: &LandingConfig) {
    let menu = match menu::attach(document, config) {
        Ok(menu) => Some(menu),
        Err(e) => {
            report("mobile menu", e);
            None
        }
    };
    if let Err(e) = accordion::attach(document, config) {
        report("faq accordion", e);
    }
    if let Err(e) = smooth_scroll::attach(document, config, menu) {
        report("smooth scroll", e);
    }
    if let Err(e) = header::attach(document, config) {
        report("header shadow", e);
    }
    if let Err(e) = lazy_images::attach(document, config) {
        report("lazy images", e);
    }
    if let Err(e) = image_fallback::attach(document) {
        report("image fallback", e);
    }
    if let Err(e) = load_time::attach(document) {
        report("load time", e);
    }
}
