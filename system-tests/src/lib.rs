// system-tests/src/lib.rs
// ============================================================================
// Module: Foody System Tests Library
// Description: Shared configuration for the Food API system tests.
// Purpose: Provide common settings for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the Food API system-test
//! binaries in `system-tests/tests`. Stub-backed suites run by default; the
//! live-API suite needs the `system-tests` feature and credentials.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
