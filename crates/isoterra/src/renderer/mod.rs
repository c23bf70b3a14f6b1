pub mod camera;
pub mod draw;
pub mod shared;
