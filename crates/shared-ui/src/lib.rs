//! Presentational components shared by the admin and student portals.

pub mod components;
pub mod focus;
pub mod theme;

pub use components::*;
