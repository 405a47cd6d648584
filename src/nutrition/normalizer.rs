// ABOUTME: Food-name normalization that maps free-text Italian names onto local table keys
// ABOUTME: Strips articles, trailing adjectives and parentheticals, then matches by containment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::food_table;

/// Leading articles, including elided forms such as `l'` and `dell'`
static LEADING_ARTICLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:un|l|dell|all|nell|sull)['’]\s*|(?:un|una|uno|dei|delle|dello|della|il|la|lo|i|le|gli)\s)",
    )
    .ok()
});

/// Trailing qualifiers that do not change the nutrition lookup
static TRAILING_ADJECTIVE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\s+(?:fresco|fresca|freschi|fresche|biologico|bio|surgelato|surgelata)$").ok()
});

static PARENTHETICAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").ok());

/// Lowercase, drop diacritics and collapse runs of whitespace
#[must_use]
pub fn fold(raw: &str) -> String {
    let stripped: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Folded name with articles, qualifiers and parentheticals removed
#[must_use]
pub fn clean(raw: &str) -> String {
    let mut name = fold(raw);
    for pattern in [&*LEADING_ARTICLE, &*TRAILING_ADJECTIVE, &*PARENTHETICAL]
        .into_iter()
        .flatten()
    {
        name = pattern.replace_all(&name, "").into_owned();
    }
    name.trim().to_owned()
}

/// Map a raw food name to the local table key it designates.
///
/// Exact matches on the cleaned name win. Otherwise the first key in table
/// order that is contained in the name, or that contains it, is used. When
/// nothing matches the cleaned name itself is returned.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let cleaned = clean(raw);
    if let Some(key) = food_table::exact_key(&cleaned) {
        return key.to_owned();
    }
    food_table::first_containing(&cleaned).map_or(cleaned, str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_drops_accents_and_spaces() {
        assert_eq!(fold("  Caffè   Lungo "), "caffe lungo");
    }

    #[test]
    fn test_clean_applies_every_rule() {
        assert_eq!(clean("Il Pollo (petto) fresco"), "pollo");
        assert_eq!(clean("l'uovo"), "uovo");
        assert_eq!(clean("delle mandorle"), "mandorle");
    }

    #[test]
    fn test_adjective_needs_word_boundary() {
        assert_eq!(clean("rombo"), "rombo");
        assert_eq!(clean("mirtilli bio"), "mirtilli");
    }
}
