pub mod core;
pub mod events;
pub mod plugin;
