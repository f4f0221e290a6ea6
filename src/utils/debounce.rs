//! Trailing-edge debouncing.
//!
//! Every call cancels whatever is pending and schedules the action again, so a
//! burst of calls runs the action once, `delay_ms` after the last call, with
//! the last call's argument.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Something that can run an action later. Dropping the returned handle must
/// cancel the action if it hasn't run yet.
pub trait TimerBackend {
    type Pending;

    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Self::Pending;
}

/// `setTimeout` through gloo. `Timeout` clears itself on drop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl TimerBackend for BrowserTimers {
    type Pending = Timeout;

    fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, action)
    }
}

pub struct Debouncer<T, B: TimerBackend = BrowserTimers> {
    backend: B,
    delay_ms: u32,
    action: Rc<dyn Fn(T)>,
    pending: RefCell<Option<B::Pending>>,
}

impl<T: 'static, B: TimerBackend> Debouncer<T, B> {
    pub fn new(backend: B, delay_ms: u32, action: impl Fn(T) + 'static) -> Self {
        Self {
            backend,
            delay_ms,
            action: Rc::new(action),
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self, arg: T) {
        self.cancel();
        let action = Rc::clone(&self.action);
        let handle = self
            .backend
            .schedule(self.delay_ms, Box::new(move || action(arg)));
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        drop(previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Scheduled {
        due: u64,
        cancelled: Rc<Cell<bool>>,
        action: Box<dyn FnOnce()>,
    }

    /// Virtual clock; time only moves through `advance`.
    #[derive(Clone, Default)]
    struct ManualTimers {
        now: Rc<Cell<u64>>,
        queue: Rc<RefCell<Vec<Scheduled>>>,
    }

    struct ManualHandle(Rc<Cell<bool>>);

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    impl TimerBackend for ManualTimers {
        type Pending = ManualHandle;

        fn schedule(&self, delay_ms: u32, action: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            self.queue.borrow_mut().push(Scheduled {
                due: self.now.get() + u64::from(delay_ms),
                cancelled: Rc::clone(&cancelled),
                action,
            });
            ManualHandle(cancelled)
        }
    }

    impl ManualTimers {
        fn advance(&self, ms: u64) {
            self.now.set(self.now.get() + ms);
            let now = self.now.get();
            let due: Vec<Scheduled> = {
                let mut queue = self.queue.borrow_mut();
                queue.retain(|s| !s.cancelled.get());
                let (due, waiting): (Vec<_>, Vec<_>) =
                    queue.drain(..).partition(|s| s.due <= now);
                *queue = waiting;
                due
            };
            for scheduled in due {
                (scheduled.action)();
            }
        }
    }

    fn recording(
        timers: &ManualTimers,
        delay_ms: u32,
    ) -> (Debouncer<f64, ManualTimers>, Rc<RefCell<Vec<f64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let debouncer = Debouncer::new(timers.clone(), delay_ms, move |y: f64| {
            sink.borrow_mut().push(y);
        });
        (debouncer, seen)
    }

    #[test]
    fn burst_collapses_to_one_trailing_call() {
        let timers = ManualTimers::default();
        let (debouncer, seen) = recording(&timers, 10);

        for i in 0..20 {
            debouncer.call(f64::from(i) * 7.0);
            timers.advance(5);
        }
        assert!(seen.borrow().is_empty());

        timers.advance(5);
        assert_eq!(*seen.borrow(), vec![19.0 * 7.0]);

        timers.advance(100);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn separated_bursts_each_fire() {
        let timers = ManualTimers::default();
        let (debouncer, seen) = recording(&timers, 10);

        debouncer.call(1.0);
        debouncer.call(2.0);
        timers.advance(10);
        debouncer.call(3.0);
        timers.advance(10);

        assert_eq!(*seen.borrow(), vec![2.0, 3.0]);
    }

    #[test]
    fn nothing_fires_before_the_delay() {
        let timers = ManualTimers::default();
        let (debouncer, seen) = recording(&timers, 10);

        debouncer.call(1.0);
        timers.advance(9);
        assert!(seen.borrow().is_empty());
        timers.advance(1);
        assert_eq!(*seen.borrow(), vec![1.0]);
    }

    #[test]
    fn cancel_drops_the_pending_call() {
        let timers = ManualTimers::default();
        let (debouncer, seen) = recording(&timers, 10);

        debouncer.call(1.0);
        debouncer.cancel();
        timers.advance(50);
        assert!(seen.borrow().is_empty());
    }
}
