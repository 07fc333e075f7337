//! Application Layer
//!
//! Use cases that orchestrate the domain ports.

mod workflow;

pub use workflow::{LocationAddressWorkflow, WorkflowEvent, WorkflowPorts};
