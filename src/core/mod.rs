pub mod animator;
pub mod clock;
pub mod display_context;
pub mod float;
pub mod gpu_context;
pub mod particles;
pub mod render_loop;
pub mod scheduler;

pub use animator::{base_rotation, RotationRates};
pub use clock::Clock;
pub use display_context::DisplayContext;
pub use float::{float_offset, FloatOffset, FloatParams};
pub use gpu_context::GpuContext;
pub use particles::{FieldRotation, ParticleField};
pub use render_loop::{LoopState, RenderLoop};
pub use scheduler::{CallbackId, FrameScheduler};
