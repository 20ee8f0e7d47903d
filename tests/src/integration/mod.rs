//! Cross-crate integration flows.

pub mod confidential;
pub mod flows;
