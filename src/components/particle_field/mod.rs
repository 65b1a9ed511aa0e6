mod component;
mod config;
mod driver;
mod render;
mod state;
mod surface;

pub use component::ParticleFieldCanvas;
pub use config::{FieldConfig, Palette, Rgba};
pub use render::RenderMode;
