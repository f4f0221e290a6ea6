use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{
    Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
};

use crate::config::LandingConfig;
use crate::error::{self, LandingError};
use crate::utils::dom;

const DEFERRED_SOURCE_ATTR: &str = "data-src";
const PLACEHOLDER: &str = "image-placeholder";

/// A source held back until the image is first seen. Hands it out once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredSource {
    source: Option<String>,
}

impl DeferredSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_none()
    }

    pub fn on_intersection(&mut self, is_intersecting: bool) -> Option<String> {
        if is_intersecting {
            self.source.take()
        } else {
            None
        }
    }
}

struct Watched {
    image: HtmlImageElement,
    source: RefCell<DeferredSource>,
}

impl Watched {
    fn reveal(&self, is_intersecting: bool) -> Result<bool, LandingError> {
        let Some(src) = self.source.borrow_mut().on_intersection(is_intersecting) else {
            return Ok(false);
        };
        self.image.set_src(&src);
        dom::set_marker(&self.image, PLACEHOLDER, false)?;
        Ok(true)
    }
}

fn on_entries(watched: &[Watched], entries: js_sys::Array, observer: &IntersectionObserver) {
    for entry in entries.iter() {
        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
            continue;
        };
        let target = entry.target();
        let Some(item) = watched
            .iter()
            .find(|w| w.image.unchecked_ref::<Element>() == &target)
        else {
            continue;
        };
        match item.reveal(entry.is_intersecting()) {
            Ok(true) => observer.unobserve(&target),
            Ok(false) => {}
            Err(e) => error::report("lazy image", e),
        }
    }
}

pub fn attach(document: &Document, config: &LandingConfig) -> Result<(), LandingError> {
    let watched: Vec<Watched> = dom::query_all(document, &config.lazy_image_selector)?
        .into_iter()
        .filter_map(|element| {
            let source = element.get_attribute(DEFERRED_SOURCE_ATTR)?;
            let image = element.dyn_into::<HtmlImageElement>().ok()?;
            Some(Watched {
                image,
                source: RefCell::new(DeferredSource::new(source)),
            })
        })
        .collect();
    if watched.is_empty() {
        return Ok(());
    }
    let watched = Rc::new(watched);

    let callback = {
        let watched = Rc::clone(&watched);
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                on_entries(&watched, entries, &observer);
            },
        )
    };
    let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(_) => {
            // No IntersectionObserver: load everything up front.
            log::debug!(
                "IntersectionObserver unavailable, loading {} images eagerly",
                watched.len()
            );
            for item in watched.iter() {
                item.reveal(true)?;
            }
            return Ok(());
        }
    };
    callback.forget();

    for item in watched.iter() {
        observer.observe(&item.image);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_handed_out_once() {
        let mut deferred = DeferredSource::new("/assets/hero.webp");
        assert_eq!(deferred.on_intersection(false), None);
        assert!(!deferred.is_loaded());

        assert_eq!(
            deferred.on_intersection(true),
            Some("/assets/hero.webp".to_string())
        );
        assert!(deferred.is_loaded());

        for visible in [false, true, false, true] {
            assert_eq!(deferred.on_intersection(visible), None);
        }
    }
}
