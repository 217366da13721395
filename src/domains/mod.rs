//! Business logic organized by bounded contexts.

pub mod catalog;
pub mod handoff;
pub mod tools;
