use std::rc::Rc;

use web_sys::{Document, Element, MouseEvent, ScrollBehavior, ScrollToOptions};

use crate::components::menu::{MenuEvent, MenuToggler};
use crate::config::LandingConfig;
use crate::error::LandingError;
use crate::utils::dom;

/// Id addressed by an in-page href, e.g. `#pricing` -> `pricing`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Where to scroll so the target sits just below the fixed header.
pub fn scroll_destination(target_top: f64, current_scroll: f64, header_offset: f64) -> f64 {
    target_top + current_scroll - header_offset
}

fn follow(
    document: &Document,
    anchor: &Element,
    header_offset: f64,
    menu: Option<&MenuToggler>,
) -> Result<(), LandingError> {
    let href = anchor.get_attribute("href").unwrap_or_default();
    let Some(target) = fragment_id(&href).and_then(|id| document.get_element_by_id(id)) else {
        return Ok(());
    };

    let window = dom::window()?;
    let top = scroll_destination(
        target.get_bounding_client_rect().top(),
        window.scroll_y()?,
        header_offset,
    );
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    if let Some(menu) = menu {
        menu.handle(MenuEvent::LinkFollowed)?;
    }
    Ok(())
}

pub fn attach(
    document: &Document,
    config: &LandingConfig,
    menu: Option<Rc<MenuToggler>>,
) -> Result<(), LandingError> {
    for anchor in dom::query_all(document, &config.anchor_selector)? {
        let document = document.clone();
        let menu = menu.clone();
        let header_offset = config.header_offset;
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event: MouseEvent| {
            event.prevent_default();
            follow(&document, &link, header_offset, menu.as_deref())
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_clears_the_header() {
        assert_eq!(scroll_destination(640.0, 1200.0, 80.0), 1760.0);
        assert_eq!(scroll_destination(-300.0, 900.0, 80.0), 520.0);
    }

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#pricing"), Some("pricing"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("/faq#pricing"), None);
    }
}
