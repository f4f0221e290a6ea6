use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlImageElement};

use crate::error::LandingError;
use crate::utils::dom;

pub const FALLBACK_ALT: &str = "Image not available";

/// Grey card with a darker block in the middle.
const PLACEHOLDER_SVG: &str = concat!(
    r##"<svg width="100" height="100" viewBox="0 0 100 100" fill="none" "##,
    r##"xmlns="http://www.w3.org/2000/svg">"##,
    "\n",
    r##"<rect width="100" height="100" fill="#F3F4F6"/>"##,
    "\n",
    r##"<path d="M35.5 40H64.5V60H35.5V40Z" fill="#9CA3AF"/>"##,
    "\n",
    "</svg>",
);

pub fn fallback_src() -> String {
    format!("data:image/svg+xml;base64,{}", BASE64.encode(PLACEHOLDER_SVG))
}

/// The placeholder itself can't fail, but never reassign it in a loop.
pub fn needs_fallback(current_src: &str, fallback: &str) -> bool {
    current_src != fallback
}

/// What a broken image ends up showing. `src` is `None` when it already shows
/// the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement<'a> {
    pub src: Option<&'a str>,
    pub alt: &'static str,
}

pub fn replacement<'a>(current_src: &str, fallback: &'a str) -> Replacement<'a> {
    Replacement {
        src: needs_fallback(current_src, fallback).then_some(fallback),
        alt: FALLBACK_ALT,
    }
}

/// Every image on the page, lazy ones included, swaps to the placeholder on error.
pub fn attach(document: &Document) -> Result<(), LandingError> {
    let fallback: Rc<str> = fallback_src().into();
    for element in dom::query_all(document, "img")? {
        let Ok(image) = element.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        let fallback = Rc::clone(&fallback);
        let target = image.clone();
        dom::listen(&image, "error", move |_: Event| {
            let swap = replacement(&target.src(), &fallback);
            if let Some(src) = swap.src {
                target.set_src(src);
            }
            target.set_alt(swap.alt);
            Ok(())
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED_PLACEHOLDER: &str = concat!(
        "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTAwIiBoZWlnaHQ9IjEwMCIgdmlld0JveD",
        "0iMCAwIDEwMCAxMDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3",
        "N2ZyI+CjxyZWN0IHdpZHRoPSIxMDAiIGhlaWdodD0iMTAwIiBmaWxsPSIjRjNGNEY2Ii8+CjxwYX",
        "RoIGQ9Ik0zNS41IDQwSDY0LjVWNjBIMzUuNVY0MFoiIGZpbGw9IiM5Q0EzQUYiLz4KPC9zdmc+",
    );

    #[test]
    fn placeholder_matches_shipped_data_uri() {
        assert_eq!(fallback_src(), SHIPPED_PLACEHOLDER);
    }

    #[test]
    fn placeholder_is_not_reassigned() {
        let fallback = fallback_src();
        assert!(needs_fallback("https://cdn.example.com/missing.png", &fallback));
        assert!(!needs_fallback(&fallback, &fallback));
    }

    #[test]
    fn broken_image_gets_placeholder_and_alt_text() {
        let fallback = fallback_src();
        for src in ["https://cdn.example.com/missing.png", "/assets/hero.webp", ""] {
            let swap = replacement(src, &fallback);
            assert_eq!(swap.src, Some(fallback.as_str()));
            assert_eq!(swap.alt, "Image not available");
        }
    }

    #[test]
    fn placeholder_error_only_resets_alt() {
        let fallback = fallback_src();
        let swap = replacement(&fallback, &fallback);
        assert_eq!(swap.src, None);
        assert_eq!(swap.alt, "Image not available");
    }
}
