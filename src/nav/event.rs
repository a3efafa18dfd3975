//! Navigation events and their subscribers.

use std::fmt;
use std::sync::Arc;

use super::Navigation;
use crate::route::RouteEntry;

/// Events published during navigation.
#[derive(Debug, Clone)]
pub enum NavEvent {
    /// A route is about to render (`None` for the not-found view).
    Route(Option<Arc<RouteEntry>>),
    /// A navigation was observed: the route rendered, or was already shown.
    Navigate(Navigation),
}

impl NavEvent {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Route(_) => "route",
            Self::Navigate(_) => "navigate",
        }
    }
}

impl fmt::Display for NavEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route(Some(entry)) => write!(f, "route {}", entry.id),
            Self::Route(None) => f.write_str("route <not found>"),
            Self::Navigate(nav) => write!(f, "navigate {nav}"),
        }
    }
}

type Subscriber = Box<dyn FnMut(&NavEvent)>;

/// Synchronous fan-out to subscribers, in subscription order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn subscribe(&mut self, f: impl FnMut(&NavEvent) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    pub fn emit(&mut self, event: &NavEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |event| seen.borrow_mut().push(format!("{tag} {}", event.name())));
        }
        assert_eq!(format!("{bus:?}"), "EventBus { subscribers: 2 }");

        bus.emit(&NavEvent::Route(None));
        assert_eq!(*seen.borrow(), ["first route", "second route"]);
    }

    #[test]
    fn test_display() {
        let event = NavEvent::Navigate(Navigation::parse("/guide/#intro"));
        assert_eq!(event.to_string(), "navigate /guide/#intro");
        assert_eq!(NavEvent::Route(None).to_string(), "route <not found>");
    }
}
