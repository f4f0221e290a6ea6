use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::config::LandingConfig;
use crate::error::LandingError;
use crate::utils::dom;

pub const PLUS_PATH: &str =
    "M10 3a1 1 0 011 1v5h5a1 1 0 110 2h-5v5a1 1 0 11-2 0v-5H4a1 1 0 110-2h5V4a1 1 0 011-1z";
pub const MINUS_PATH: &str = "M4 10h12a1 1 0 110 2H4a1 1 0 110-2z";

const HIDDEN: &str = "hidden";
const ICON_DEFAULT: &str = "text-gray-500";
const ICON_ACTIVE: &str = "text-indigo-600";
const ICON_LEGACY: &str = "text-white";
const LABEL_ACTIVE: &str = "text-indigo-600";
const LABEL_POINTER: &str = "cursor-pointer";
const LABEL_UNDERLINE: &str = "underline";

/// Single-open accordion: zero or one item open at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemView {
    pub answer_hidden: bool,
    pub highlighted: bool,
    pub icon_path: &'static str,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// Starts from whatever the markup shows; out-of-range indices are ignored.
    pub fn with_open(len: usize, open: Option<usize>) -> Self {
        Self {
            len,
            open: open.filter(|&i| i < len),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    /// Closes everything, then reopens `index` unless it was the one open.
    pub fn activate(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let was_open = self.open == Some(index);
        self.open = None;
        if !was_open {
            self.open = Some(index);
        }
    }

    pub fn view(&self, index: usize) -> ItemView {
        let open = self.open == Some(index);
        ItemView {
            answer_hidden: !open,
            highlighted: open,
            icon_path: if open { MINUS_PATH } else { PLUS_PATH },
        }
    }
}

/// Enter and Space act on a focused question exactly like a click.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

struct FaqItem {
    question: HtmlElement,
    answer: Element,
    icon: Option<Element>,
    label: Option<Element>,
}

impl FaqItem {
    fn render(&self, view: ItemView, underline: bool) -> Result<(), LandingError> {
        dom::set_marker(&self.answer, HIDDEN, view.answer_hidden)?;
        if let Some(icon) = &self.icon {
            dom::set_marker(icon, ICON_LEGACY, false)?;
            dom::set_marker(icon, ICON_DEFAULT, !view.highlighted)?;
            dom::set_marker(icon, ICON_ACTIVE, view.highlighted)?;
            if let Some(path) = dom::find_within(icon, "path") {
                path.set_attribute("d", view.icon_path)?;
            }
        }
        if let Some(label) = &self.label {
            dom::set_marker(label, LABEL_ACTIVE, view.highlighted)?;
            dom::set_marker(label, LABEL_POINTER, view.highlighted)?;
            dom::set_marker(label, LABEL_UNDERLINE, view.highlighted && underline)?;
        }
        Ok(())
    }
}

pub struct AccordionController {
    items: Vec<FaqItem>,
    state: RefCell<Accordion>,
    underline: bool,
}

impl AccordionController {
    fn activate(&self, index: usize) -> Result<(), LandingError> {
        self.state.borrow_mut().activate(index);
        self.render()
    }

    fn render(&self) -> Result<(), LandingError> {
        let state = self.state.borrow();
        for (index, item) in self.items.iter().enumerate() {
            item.render(state.view(index), self.underline)?;
        }
        Ok(())
    }
}

fn collect_item(question: Element, config: &LandingConfig) -> Option<FaqItem> {
    let answer = question
        .parent_element()
        .and_then(|parent| dom::find_within(&parent, &config.faq_answer_selector))?;
    let question = question.dyn_into::<HtmlElement>().ok()?;
    let icon = dom::find_within(&question, &config.faq_icon_selector);
    let label = dom::find_within(&question, "span");
    Some(FaqItem {
        question,
        answer,
        icon,
        label,
    })
}

/// Binds click and Enter/Space on every question. Questions without an answer
/// next to them are left alone.
pub fn attach(document: &Document, config: &LandingConfig) -> Result<(), LandingError> {
    let items: Vec<FaqItem> = dom::query_all(document, &config.faq_question_selector)?
        .into_iter()
        .filter_map(|question| collect_item(question, config))
        .collect();
    if items.is_empty() {
        return Err(LandingError::missing(config.faq_question_selector.clone()));
    }

    let initially_open = items
        .iter()
        .position(|item| !dom::has_marker(&item.answer, HIDDEN));
    let controller = Rc::new(AccordionController {
        state: RefCell::new(Accordion::with_open(items.len(), initially_open)),
        items,
        underline: config.underline_active_label,
    });

    for (index, item) in controller.items.iter().enumerate() {
        {
            let controller = Rc::clone(&controller);
            dom::listen(&item.question, "click", move |_: MouseEvent| {
                controller.activate(index)
            })?;
        }
        let question = item.question.clone();
        dom::listen(&item.question, "keydown", move |event: KeyboardEvent| {
            if is_activation_key(&event.key()) {
                event.prevent_default();
                question.click();
            }
            Ok(())
        })?;
    }

    Ok(())
}
