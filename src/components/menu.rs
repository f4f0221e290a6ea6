use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::config::LandingConfig;
use crate::error::LandingError;
use crate::utils::dom;

pub const HAMBURGER_PATH: &str = "M4 6h16M4 12h16M4 18h16";
pub const CLOSE_PATH: &str = "M6 18L18 6M6 6l12 12";
const HIDDEN: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleActivated,
    OutsideClick,
    Escape,
    /// An in-page link was followed while the menu may be open.
    LinkFollowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    Unchanged,
    Render,
    RenderAndFocusToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: bool,
}

/// Everything the page shows for one menu state. Rendered as a unit so the
/// panel and `aria-expanded` can't disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub panel_hidden: bool,
    pub aria_expanded: &'static str,
    pub icon_path: &'static str,
}

impl MenuState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn apply(&mut self, event: MenuEvent) -> MenuEffect {
        match event {
            MenuEvent::ToggleActivated => {
                self.open = !self.open;
                MenuEffect::Render
            }
            MenuEvent::OutsideClick | MenuEvent::LinkFollowed if self.open => {
                self.open = false;
                MenuEffect::Render
            }
            MenuEvent::Escape if self.open => {
                self.open = false;
                MenuEffect::RenderAndFocusToggle
            }
            _ => MenuEffect::Unchanged,
        }
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            panel_hidden: !self.open,
            aria_expanded: if self.open { "true" } else { "false" },
            icon_path: if self.open { CLOSE_PATH } else { HAMBURGER_PATH },
        }
    }
}

pub struct MenuToggler {
    button: HtmlElement,
    panel: Element,
    state: Cell<MenuState>,
}

impl MenuToggler {
    pub fn is_open(&self) -> bool {
        self.state.get().is_open()
    }

    pub fn handle(&self, event: MenuEvent) -> Result<(), LandingError> {
        let mut state = self.state.get();
        let effect = state.apply(event);
        self.state.set(state);
        match effect {
            MenuEffect::Unchanged => Ok(()),
            MenuEffect::Render => self.render(),
            MenuEffect::RenderAndFocusToggle => {
                self.render()?;
                self.button.focus()?;
                Ok(())
            }
        }
    }

    fn render(&self) -> Result<(), LandingError> {
        let view = self.state.get().view();
        dom::set_marker(&self.panel, HIDDEN, view.panel_hidden)?;
        self.button.set_attribute("aria-expanded", view.aria_expanded)?;
        if let Some(icon) = dom::find_within(&self.button, "svg path") {
            icon.set_attribute("d", view.icon_path)?;
        }
        Ok(())
    }

    fn is_outside(&self, target: Option<&Node>) -> bool {
        !self.button.contains(target) && !self.panel.contains(target)
    }
}

/// Wires the toggle button, outside clicks and Escape. Missing button or panel
/// means this page has no mobile menu.
pub fn attach(
    document: &Document,
    config: &LandingConfig,
) -> Result<Rc<MenuToggler>, LandingError> {
    let button_selector = format!("#{}", config.menu_button_id);
    let button = document
        .get_element_by_id(&config.menu_button_id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| LandingError::missing(button_selector))?;
    let panel = document
        .get_element_by_id(&config.menu_id)
        .ok_or_else(|| LandingError::missing(format!("#{}", config.menu_id)))?;

    let open = !dom::has_marker(&panel, HIDDEN);
    let menu = Rc::new(MenuToggler {
        button,
        panel,
        state: Cell::new(MenuState::new(open)),
    });
    menu.render()?;

    {
        let menu = Rc::clone(&menu);
        let button = menu.button.clone();
        dom::listen(&button, "click", move |_: MouseEvent| {
            menu.handle(MenuEvent::ToggleActivated)
        })?;
    }
    {
        let menu = Rc::clone(&menu);
        dom::listen(document, "click", move |event: MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            if menu.is_open() && menu.is_outside(target.as_ref()) {
                menu.handle(MenuEvent::OutsideClick)?;
            }
            Ok(())
        })?;
    }
    {
        let menu = Rc::clone(&menu);
        dom::listen(document, "keydown", move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                menu.handle(MenuEvent::Escape)?;
            }
            Ok(())
        })?;
    }

    Ok(menu)
}
