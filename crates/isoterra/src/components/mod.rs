pub mod animation;
pub mod entity;
pub mod group;
pub mod shape;
pub mod sprite;
pub mod tilemap;
