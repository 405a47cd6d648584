// ABOUTME: Unified error types re-exported from dietrack-core
// ABOUTME: AppError, ErrorCode and the JSON error envelope used by HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

pub use dietrack_core::errors::*;
