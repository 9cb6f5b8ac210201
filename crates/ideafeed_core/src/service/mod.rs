//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep session/CLI layers decoupled from storage details.

pub mod feed_service;
