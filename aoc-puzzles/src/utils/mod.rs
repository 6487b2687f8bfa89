//! Helpers shared by several days

pub mod dp;
pub mod grid;
pub mod math;
pub mod text;
