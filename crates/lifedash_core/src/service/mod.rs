//! Use-case services over the persistence layer.
//!
//! # Responsibility
//! - Provide stable entry points for dump-box capture flows.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Services never bypass repository validation contracts.
//! - The service layer stays storage-agnostic.

pub mod dump_service;
