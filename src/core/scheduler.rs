use std::sync::atomic::{AtomicU64, Ordering};

use crate::frame::FrameInfo;

static NEXT_SCHEDULER: AtomicU64 = AtomicU64::new(0);

/// Handle returned by [`FrameScheduler::register`].
/// Only meaningful to the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId {
    scheduler: u64,
    slot: u64,
}

/// Returns whether the callback wants to stay registered
type FrameCallback = Box<dyn FnMut(&FrameInfo) -> bool>;

/// Host-side per-frame scheduler.
///
/// Callbacks run in registration order, one after another, once per
/// [`tick`](Self::tick). A callback removed with [`deregister`](Self::deregister),
/// or one that returns `false` from a tick, is dropped immediately and never
/// invoked again.
pub struct FrameScheduler {
    id: u64,
    next_slot: u64,
    callbacks: Vec<(CallbackId, FrameCallback)>,
    ticks: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self {
            id: NEXT_SCHEDULER.fetch_add(1, Ordering::Relaxed),
            next_slot: 0,
            callbacks: Vec::new(),
            ticks: 0,
        }
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: impl FnMut(&FrameInfo) -> bool + 'static) -> CallbackId {
        let id = CallbackId {
            scheduler: self.id,
            slot: self.next_slot,
        };
        self.next_slot += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Whether `id` was issued by this scheduler
    pub fn owns(&self, id: CallbackId) -> bool {
        id.scheduler == self.id
    }

    /// Returns false if the id was not registered here
    pub fn deregister(&mut self, id: CallbackId) -> bool {
        if !self.owns(id) {
            return false;
        }
        let before = self.callbacks.len();
        self.callbacks.retain(|(registered, _)| *registered != id);
        self.callbacks.len() != before
    }

    pub fn is_registered(&self, id: CallbackId) -> bool {
        self.callbacks.iter().any(|(registered, _)| *registered == id)
    }

    /// Run every registered callback for one display frame,
    /// dropping those that decline to continue
    pub fn tick(&mut self, frame: &FrameInfo) {
        self.ticks += 1;
        self.callbacks.retain_mut(|(_, callback)| callback(frame));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Frames dispatched so far, including frames with no callbacks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("callbacks", &self.callbacks.len())
            .field("ticks", &self.ticks)
            .finish()
    }
}
