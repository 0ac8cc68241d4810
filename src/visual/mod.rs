pub mod controls;
pub mod interactions;
pub mod plugin;
pub mod render;
pub mod session;
