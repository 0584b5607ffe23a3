pub mod image;
pub mod keyframe;
pub mod node;
pub mod params;

pub use image::*;
pub use keyframe::*;
pub use node::*;
pub use params::*;
