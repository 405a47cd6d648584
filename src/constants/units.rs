// ABOUTME: Gram conversion factors for the kitchen units used in Italian diet plans
// ABOUTME: Provides named constants to eliminate magic numbers in quantity scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

/// Grams per unit for mass, volume and household measures.
/// Volumes are treated as grams.
pub const UNIT_GRAMS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("gr", 1.0),
    ("ml", 1.0),
    ("kg", 1000.0),
    ("l", 1000.0),
    ("cucchiaio", 15.0),
    ("cucchiai", 15.0),
    ("cucchiaino", 5.0),
    ("cucchiaini", 5.0),
    ("tazza", 240.0),
    ("tazze", 240.0),
    ("fetta", 30.0),
    ("fette", 30.0),
    ("porzione", 150.0),
    ("porzioni", 150.0),
    ("manciata", 30.0),
    ("pizzico", 1.0),
];

/// Grams in one can
pub const CAN_GRAMS: f64 = 80.0;

/// Piece weight when neither the food entry nor the serving list knows it
pub const DEFAULT_PIECE_GRAMS: f64 = 100.0;

/// Multiplier for unit strings nobody recognizes
pub const UNKNOWN_UNIT_GRAMS: f64 = 1.0;

/// Grams per 100 g basis
pub const GRAMS_PER_BASIS: f64 = 100.0;
