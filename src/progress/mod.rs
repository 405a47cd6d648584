// ABOUTME: Weekly adherence tracking against the active diet plan
// ABOUTME: Week window math, progress aggregation, recommendations and data access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

/// Week window and progress aggregation
pub mod calculator;

/// Deficit-driven recommendation heuristics
pub mod recommendations;

/// Plan and meal log access
pub mod repository;

/// User-facing progress operations
pub mod service;

pub use calculator::{compute_week_progress, week_start_for};
pub use recommendations::generate_recommendations;
pub use repository::{InMemoryProgressRepository, ProgressRepository};
pub use service::ProgressService;
