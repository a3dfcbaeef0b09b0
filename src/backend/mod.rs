//! Backend communication layer

pub mod api;
pub mod types;
