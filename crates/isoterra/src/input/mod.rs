pub mod intent;
pub mod queue;
