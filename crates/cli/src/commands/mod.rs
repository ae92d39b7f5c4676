pub mod actions;
pub mod check;
pub mod common;
pub mod fix;
pub mod rules;
