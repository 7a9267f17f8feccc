use crate::notification::Notification;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A bus subscriber.
pub trait Observer {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Handles one notification. Returned notifications are dispatched
    /// by the bus after the current delivery completes; an `Err` is
    /// logged and never interrupts delivery to later subscribers.
    fn on_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<Vec<Notification>, String>;
}

pub type SharedObserver = Rc<RefCell<dyn Observer>>;

/// Publish/subscribe hub connecting the table, the form and the
/// coordinator. Constructed explicitly and passed by reference; holds
/// no domain state of its own.
#[derive(Default)]
pub struct Bus {
    observers: RefCell<Vec<SharedObserver>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Subscribing the same observer twice is a
    /// no-op.
    pub fn subscribe(&self, observer: SharedObserver) {
        let mut observers = self.observers.borrow_mut();
        if observers.iter().any(|existing| Rc::ptr_eq(existing, &observer)) {
            return;
        }
        observers.push(observer);
    }

    pub fn unsubscribe(&self, observer: &SharedObserver) {
        self.observers
            .borrow_mut()
            .retain(|existing| !Rc::ptr_eq(existing, observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Delivers `notification` to every subscriber in subscription
    /// order, then drains follow-up notifications the handlers
    /// returned, in the order they were produced.
    pub fn notify(&self, notification: Notification) {
        let mut pending = VecDeque::from([notification]);

        while let Some(current) = pending.pop_front() {
            log::debug!("notify: {}", current.tag());
            let subscribers: Vec<SharedObserver> = self.observers.borrow().clone();

            for observer in subscribers {
                let Ok(mut handler) = observer.try_borrow_mut() else {
                    // A handler triggered dispatch back into itself.
                    // Skipping it keeps delivery to the others alive.
                    log::warn!("skipping re-entrant dispatch of {}", current.tag());
                    continue;
                };
                match handler.on_notification(&current) {
                    Ok(follow_ups) => pending.extend(follow_ups),
                    Err(err) => {
                        log::error!("{} failed on {}: {err}", handler.name(), current.tag());
                    }
                }
            }
        }
    }
}
