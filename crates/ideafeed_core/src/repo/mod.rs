//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/session orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Idea::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `AlreadySupported`,
//!   `DuplicateId`) in addition to DB transport errors.

pub mod idea_repo;
