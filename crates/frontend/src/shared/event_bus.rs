//! In-app event bus for chat activity.
//!
//! One bus is created by `App` and handed out through context. Components
//! subscribe and keep the returned [`Subscription`]; dropping it removes the
//! listener.

use contracts::domain::a009_chat::aggregate::{ChatMessage, ChatSession};
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// A message not seen before arrived in a polled thread.
    MessageReceived(ChatMessage),
    /// The agent's message was accepted by the chat service.
    MessageSent { session_id: String },
    /// A session changed state (claimed, closed).
    SessionUpdated(ChatSession),
    /// The session list was refreshed.
    SessionsRefreshed { waiting: usize },
}

type Listener = Rc<dyn Fn(&ChatEvent)>;

#[derive(Default)]
struct BusState {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Clone, Default)]
pub struct ChatEventBus {
    state: Rc<RefCell<BusState>>,
}

impl ChatEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe(&self, listener: impl Fn(&ChatEvent) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.state),
        }
    }

    /// Deliver `event` to every listener registered at the time of the call.
    pub fn emit(&self, event: ChatEvent) {
        // Listeners may subscribe or unsubscribe while handling the event.
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Handle for one listener. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusState>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.bus.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// ============================================================================
// Leptos context
// ============================================================================

pub fn provide_chat_bus() -> ChatEventBus {
    let bus = ChatEventBus::new();
    provide_context(StoredValue::new_local(bus.clone()));
    bus
}

pub fn use_chat_bus() -> ChatEventBus {
    use_context::<StoredValue<ChatEventBus, LocalStorage>>()
        .expect("ChatEventBus not provided")
        .get_value()
}

/// Subscribe for the lifetime of the current component.
pub fn subscribe_scoped(listener: impl Fn(&ChatEvent) + 'static) {
    let subscription = use_chat_bus().subscribe(listener);
    let slot = StoredValue::new_local(Some(subscription));
    on_cleanup(move || {
        slot.update_value(|s| {
            s.take();
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_listeners() {
        let bus = ChatEventBus::new();
        let hits = Rc::new(Cell::new(0));

        let h1 = Rc::clone(&hits);
        let _a = bus.subscribe(move |_| h1.set(h1.get() + 1));
        let h2 = Rc::clone(&hits);
        let _b = bus.subscribe(move |_| h2.set(h2.get() + 10));

        bus.emit(ChatEvent::SessionsRefreshed { waiting: 2 });
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = ChatEventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = Rc::clone(&seen);
        let sub = bus.subscribe(move |e| {
            if let ChatEvent::SessionsRefreshed { waiting } = e {
                s.borrow_mut().push(*waiting);
            }
        });
        bus.emit(ChatEvent::SessionsRefreshed { waiting: 1 });
        assert_eq!(bus.listener_count(), 1);

        drop(sub);
        assert_eq!(bus.listener_count(), 0);
        bus.emit(ChatEvent::SessionsRefreshed { waiting: 5 });
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_subscription_outliving_bus() {
        let bus = ChatEventBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        sub.unsubscribe();
    }

    #[test]
    fn test_listener_may_unsubscribe_during_emit() {
        let bus = ChatEventBus::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot_in = Rc::clone(&slot);
        let sub = bus.subscribe(move |_| {
            slot_in.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        bus.emit(ChatEvent::MessageSent {
            session_id: "s".into(),
        });
        assert_eq!(bus.listener_count(), 0);
    }
}
