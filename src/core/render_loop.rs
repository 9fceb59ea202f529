use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use super::scheduler::{CallbackId, FrameScheduler};
use crate::frame::FrameInfo;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Drives a mounted [`Scene`] from the host's frame scheduler.
///
/// The scheduler callback only holds a weak reference to the scene and checks
/// the loop state before every write, so once [`teardown`](Self::teardown) has
/// run (or the loop has been dropped) no frame can reach the scene again.
/// A callback that finds the loop stopped or gone asks the scheduler to drop it.
/// The shared state is `Rc`-based: a loop can only be driven from the thread that mounted it.
pub struct RenderLoop {
    scene: Rc<RefCell<Scene>>,
    state: Rc<Cell<LoopState>>,
    callback: Option<CallbackId>,
}

impl RenderLoop {
    /// Mount the scene and register its frame callback
    pub fn mount(scene: Scene, scheduler: &mut FrameScheduler) -> Self {
        let scene = Rc::new(RefCell::new(scene));
        let state = Rc::new(Cell::new(LoopState::Running));

        let weak_scene = Rc::downgrade(&scene);
        let weak_state = Rc::downgrade(&state);
        let id = scheduler.register(move |frame| {
            // Either side gone means the loop was dropped without teardown
            match (weak_scene.upgrade(), weak_state.upgrade()) {
                (Some(scene), Some(state)) => {
                    advance(&scene, &state, frame);
                    state.get() == LoopState::Running
                }
                _ => false,
            }
        });

        log::info!("render loop mounted ({} objects)", scene.borrow().objects().len());

        Self {
            scene,
            state,
            callback: Some(id),
        }
    }

    /// Direct entry point for hosts that drive frames themselves.
    /// Returns whether the scene was updated.
    pub fn on_frame(&self, elapsed: f32) -> bool {
        advance(&self.scene, &self.state, &FrameInfo::at(elapsed))
    }

    /// Deregister the frame callback and stop. Idempotent.
    pub fn teardown(&mut self, scheduler: &mut FrameScheduler) {
        self.state.set(LoopState::Stopped);
        if let Some(id) = self.callback.take() {
            if scheduler.owns(id) {
                scheduler.deregister(id);
            } else {
                // Stopped callback unregisters itself on its own scheduler's next tick
                log::warn!("render loop torn down on a scheduler that did not mount it");
            }
            log::info!("render loop torn down");
        }
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    pub fn callback_id(&self) -> Option<CallbackId> {
        self.callback
    }

    /// Read access to the scene, e.g. for building the frame graph
    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.state.set(LoopState::Stopped);
    }
}

fn advance(scene: &RefCell<Scene>, state: &Cell<LoopState>, frame: &FrameInfo) -> bool {
    if state.get() != LoopState::Running {
        return false;
    }

    match scene.try_borrow_mut() {
        Ok(mut scene) => {
            scene.update(frame.time);
            true
        }
        Err(_) => {
            log::warn!("frame {} dropped: scene is borrowed", frame.number);
            false
        }
    }
}
