//! # FoodGuard Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/        # Cross-crate flows
//!     ├── flows.rs        # Report lifecycle end to end
//!     └── confidential.rs # Sealed-vault deployments
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fg-tests
//!
//! # By category
//! cargo test -p fg-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
