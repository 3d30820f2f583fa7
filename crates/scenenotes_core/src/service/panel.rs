//! Notes panel lifecycle binding.
//!
//! A panel listens to host document events only while it is shown. Hiding or
//! dropping the panel releases its subscription.

use crate::host::events::{DocumentEvents, Subscription};
use crate::host::metadata::{DocumentMetadata, UNTITLED_DOCUMENT};
use crate::service::note_service::NoteService;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;

pub struct NotesPanel<M: DocumentMetadata + 'static> {
    service: Rc<RefCell<NoteService<M>>>,
    subscription: Option<Subscription>,
}

impl<M: DocumentMetadata + 'static> NotesPanel<M> {
    pub fn new(service: NoteService<M>) -> Self {
        Self {
            service: Rc::new(RefCell::new(service)),
            subscription: None,
        }
    }

    /// Shared handle to the panel's service.
    pub fn service(&self) -> Rc<RefCell<NoteService<M>>> {
        Rc::clone(&self.service)
    }

    pub fn is_shown(&self) -> bool {
        self.subscription.is_some()
    }

    /// Loads the current document and starts following lifecycle events.
    ///
    /// Calling `show` on a shown panel is a no-op.
    pub fn show(&mut self, events: &DocumentEvents) {
        if self.is_shown() {
            return;
        }
        self.service.borrow_mut().load();

        let service = Rc::downgrade(&self.service);
        self.subscription = Some(events.subscribe(move |event| {
            let Some(service) = service.upgrade() else {
                return;
            };
            match service.try_borrow_mut() {
                Ok(mut service) => service.reload(event),
                // The switch is not replayed; the panel shows stale notes until
                // the next lifecycle event.
                Err(_) => warn!(
                    "event=panel_reload module=service status=lost reason=service_busy document={}",
                    event.document().unwrap_or(UNTITLED_DOCUMENT)
                ),
            };
        }));
        debug!("event=panel_show module=service");
    }

    /// Stops following lifecycle events.
    pub fn hide(&mut self) {
        if self.subscription.take().is_some() {
            debug!("event=panel_hide module=service");
        }
    }
}
