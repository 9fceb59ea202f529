mod hero;

pub use hero::{create_hero_scene, hero_topology, palette};
