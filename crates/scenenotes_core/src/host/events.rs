//! Document lifecycle subscription.
//!
//! The host fires `Opened`/`New` when the user switches documents. Panels
//! subscribe while visible and drop the returned [`Subscription`] when hidden,
//! which unregisters the callback. Everything here runs on the UI thread.

use log::debug;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Host document lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// An existing document was opened.
    Opened { document: String },
    /// A new, unsaved document was created.
    New,
}

impl DocumentEvent {
    /// Slot key the event refers to; `None` for untitled documents.
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::Opened { document } => Some(document.as_str()),
            Self::New => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::New => "new",
        }
    }
}

type Listener = Rc<dyn Fn(&DocumentEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Registry of lifecycle listeners owned by the host integration.
#[derive(Clone, Default)]
pub struct DocumentEvents {
    registry: Rc<RefCell<Registry>>,
}

impl DocumentEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned handle is dropped.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe(&self, listener: impl Fn(&DocumentEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        debug!("event=lifecycle_subscribe module=host id={id}");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every listener registered at call time.
    ///
    /// Listeners may subscribe or unsubscribe while being notified.
    pub fn emit(&self, event: &DocumentEvent) {
        let snapshot: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        debug!(
            "event=lifecycle_emit module=host kind={} listeners={}",
            event.name(),
            snapshot.len()
        );
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Disposable handle for one lifecycle listener.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // `emit` iterates a snapshot, so no borrow is held while listeners run.
        let borrowed = registry.try_borrow_mut();
        if let Ok(mut state) = borrowed {
            state.listeners.retain(|(id, _)| *id != self.id);
            debug!("event=lifecycle_unsubscribe module=host id={}", self.id);
        }
    }
}
