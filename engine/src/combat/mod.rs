pub mod actions;
pub mod enemy;
