//! EquipDesk console core.
//!
//! Headless client for an equipment assignment and movement-tracking
//! backend. This library provides:
//! - An authenticated HTTP client with centralized session invalidation
//! - A session provider over injectable storage
//! - A per-endpoint domain service layer
//! - The dashboard aggregation store (concurrent loads, per-category
//!   loading/error state, optimistic approve/deny)
//! - A route table and pre-navigation authorization guard
//! - API-error to user-notice mapping for the presentation layer

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod guard;
pub mod notify;
pub mod services;
pub mod session;
pub mod store;
