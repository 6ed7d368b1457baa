// src/application/document.rs
//
// Pointer-down source shared by whatever view is mounted. Views subscribe for
// their lifetime and receive events through a queue they drain themselves.
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// Where a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Inside the overflow menu (or its toggle) of the card with this note id.
    Menu(i64),
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    pub target: Target,
}

type Listeners = RefCell<BTreeMap<u64, UnboundedSender<PointerDown>>>;

#[derive(Default)]
pub struct Document {
    listeners: Rc<Listeners>,
    next_id: Cell<u64>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pointer-down listener. It stays registered until the
    /// returned guard is dropped.
    pub fn add_pointer_listener(&self) -> PointerListener {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.borrow_mut().insert(id, tx);
        trace!(listener = id, "Registered pointer listener");
        PointerListener {
            id,
            rx,
            registry: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver a pointer-down to every registered listener.
    pub fn pointer_down(&self, target: Target) -> usize {
        let event = PointerDown { target };
        self.listeners
            .borrow()
            .values()
            .filter(|tx| tx.send(event).is_ok())
            .count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

pub struct PointerListener {
    id: u64,
    rx: UnboundedReceiver<PointerDown>,
    registry: Weak<Listeners>,
}

impl PointerListener {
    /// Take every event queued since the last drain.
    pub fn drain(&mut self) -> Vec<PointerDown> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(&self.id);
            trace!(listener = self.id, "Deregistered pointer listener");
        }
    }
}
