//! Domain Layer
//!
//! Entities, value objects, the error taxonomy and the outbound ports
//! the workflow talks to. Nothing in here knows about HTTP or terminals.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;
