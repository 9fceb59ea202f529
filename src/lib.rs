pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod geometry;
pub mod lights;
pub mod material;
pub mod math;
pub mod primitive;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod types;

pub use scene::{FrameGraph, Scene, SceneBuilder};
pub use scenes::create_hero_scene;
