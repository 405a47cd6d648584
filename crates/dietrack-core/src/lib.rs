// ABOUTME: Core types for the dietrack nutrition tracking platform
// ABOUTME: Foundation crate with error handling, domain models and macro arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

#![deny(unsafe_code)]

//! # Dietrack Core
//!
//! Foundation crate providing shared types for the dietrack nutrition
//! pipeline. Everything here is pure data or pure arithmetic; no I/O.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Food queries, lookup results, diet plans, meal logs and weekly progress
//! - **macros**: Total arithmetic over `MacroVector` (add, subtract, scale, divide, percentages)

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models shared by the lookup pipeline and the progress calculator
pub mod models;

/// Macro vector arithmetic used for meal, day and week aggregation
pub mod macros;
