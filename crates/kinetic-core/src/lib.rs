pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod gesture;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod shapes;
pub mod simulation;
pub mod state;
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use color::*;
pub use config::*;
pub use controls::*;
pub use error::*;
pub use gesture::*;
pub use scene::*;
pub use shapes::*;
pub use simulation::*;
pub use state::*;
