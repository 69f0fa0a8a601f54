//! Domain types and request orchestration for the node file manager.

pub mod domain;

pub use domain::*;
