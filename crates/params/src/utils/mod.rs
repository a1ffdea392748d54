//! Constants grouped by algorithm family

pub mod symmetric;
