pub mod manifest;
pub mod map;
pub mod registry;
