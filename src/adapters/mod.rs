//! Adapters
//!
//! Inbound adapters drive the workflow; outbound adapters implement the
//! domain ports against HTTP services, local programs and the terminal.

pub mod inbound;
pub mod outbound;
