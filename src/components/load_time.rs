use std::sync::atomic::{AtomicBool, Ordering};

use gloo_timers::callback::Timeout;
use web_sys::{Document, Event};

use crate::error::{self, LandingError};
use crate::utils::dom;

static PAGE_LOAD_REPORT: ReportOnce = ReportOnce::new();

/// Lets exactly one caller through.
pub struct ReportOnce(AtomicBool);

impl ReportOnce {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn claim(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}

impl Default for ReportOnce {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds from navigation start to the end of the load event. Falls back
/// to `now` (time since the page's time origin) while `loadEventEnd` is unset.
pub fn load_duration_ms(navigation_start: f64, load_event_end: f64, now: f64) -> f64 {
    if load_event_end > 0.0 && load_event_end >= navigation_start {
        load_event_end - navigation_start
    } else {
        now
    }
}

fn report() -> Result<(), LandingError> {
    if !PAGE_LOAD_REPORT.claim() {
        return Ok(());
    }
    let performance = dom::window()?
        .performance()
        .ok_or_else(|| LandingError::missing("window.performance"))?;
    let timing = performance.timing();
    let elapsed = load_duration_ms(
        timing.navigation_start(),
        timing.load_event_end(),
        performance.now(),
    );
    log::info!("Page load time: {}ms", elapsed.round());
    Ok(())
}

/// Reports once the load event has finished, or right away if it already has.
pub fn attach(document: &Document) -> Result<(), LandingError> {
    if document.ready_state() == "complete" {
        return report();
    }
    let window = dom::window()?;
    dom::listen(&window, "load", |_: Event| {
        // loadEventEnd is only set after the load handlers return
        Timeout::new(0, || {
            if let Err(e) = report() {
                error::report("load time", e);
            }
        })
        .forget();
        Ok(())
    })
}
