//! # Ports
//!
//! Hexagonal boundaries of the registry:
//!
//! - `inbound` - the API the dispatch layer drives
//! - `outbound` - capabilities the registry depends on (vault, event sink,
//!   clock), implemented by adapters

pub mod inbound;
pub mod outbound;
