pub mod camera;
pub mod sun;
