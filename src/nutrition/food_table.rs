// ABOUTME: Static per-100g macro table for common Italian foods with piece weights
// ABOUTME: Insertion order is preserved and drives first-match substring resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dietrack Contributors

//! Local nutrition table
//!
//! Values are per 100 g. Entries that are usually counted in pieces carry a
//! default piece weight. Keys are written with their Italian accents and
//! indexed through the same folding as queries, so `caffè` is reachable from
//! `caffe` and from `Caffè`.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::normalizer::fold;

/// Per-100g reference values for one food
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFoodEntry {
    /// kcal per 100 g
    pub calories_per_100g: f64,
    /// Protein grams per 100 g
    pub protein_per_100g: f64,
    /// Carbohydrate grams per 100 g
    pub carbs_per_100g: f64,
    /// Fat grams per 100 g
    pub fat_per_100g: f64,
    /// Weight of one piece, used for count units
    pub default_serving_grams: Option<f64>,
}

const fn per_100g(calories: f64, protein: f64, carbs: f64, fat: f64) -> LocalFoodEntry {
    LocalFoodEntry {
        calories_per_100g: calories,
        protein_per_100g: protein,
        carbs_per_100g: carbs,
        fat_per_100g: fat,
        default_serving_grams: None,
    }
}

const fn served(calories: f64, protein: f64, carbs: f64, fat: f64, grams: f64) -> LocalFoodEntry {
    LocalFoodEntry {
        calories_per_100g: calories,
        protein_per_100g: protein,
        carbs_per_100g: carbs,
        fat_per_100g: fat,
        default_serving_grams: Some(grams),
    }
}

/// The table, in lookup order
pub static LOCAL_FOODS: &[(&str, LocalFoodEntry)] = &[
    // Cereals and bakery
    ("avena", per_100g(389.0, 16.9, 66.3, 6.9)),
    ("fiocchi di avena", per_100g(389.0, 16.9, 66.3, 6.9)),
    ("fiocchi avena", per_100g(389.0, 16.9, 66.3, 6.9)),
    ("farina avena", per_100g(389.0, 16.9, 66.3, 6.9)),
    ("farina/fiocchi avena", per_100g(389.0, 16.9, 66.3, 6.9)),
    ("riso", per_100g(130.0, 2.7, 28.0, 0.3)),
    ("riso basmati", per_100g(121.0, 3.5, 25.2, 0.4)),
    ("riso integrale", per_100g(111.0, 2.6, 23.0, 0.9)),
    ("spaghetti di riso", per_100g(109.0, 0.9, 25.0, 0.2)),
    ("pasta", per_100g(131.0, 5.0, 25.0, 1.1)),
    ("pasta integrale", per_100g(124.0, 5.3, 25.0, 0.9)),
    ("pasta di lenticchi", per_100g(120.0, 9.0, 20.0, 1.5)),
    ("pasta di ceci", per_100g(130.0, 8.0, 22.0, 2.0)),
    ("gnocchi", per_100g(133.0, 3.2, 28.0, 0.8)),
    ("gnocchi di patate", per_100g(133.0, 3.2, 28.0, 0.8)),
    ("piadina", served(310.0, 8.0, 48.0, 10.0, 80.0)),
    ("piadina integrale", served(290.0, 9.0, 45.0, 8.0, 80.0)),
    ("pane", per_100g(265.0, 9.0, 49.0, 3.2)),
    ("pane integrale", per_100g(247.0, 13.0, 41.0, 4.2)),
    ("fette biscottate", served(408.0, 11.0, 75.0, 6.0, 10.0)),
    ("fette biscottate integrali", served(395.0, 12.0, 68.0, 7.0, 10.0)),
    ("fetta di pane", served(265.0, 9.0, 49.0, 3.2, 40.0)),
    ("crackers", served(428.0, 10.0, 72.0, 10.0, 7.0)),
    ("crackers integrali", served(410.0, 12.0, 65.0, 12.0, 12.0)),
    ("gallette", served(387.0, 8.0, 81.0, 2.8, 9.0)),
    ("gallette di riso", served(387.0, 8.0, 81.0, 2.8, 9.0)),
    ("biscotti", served(450.0, 6.0, 70.0, 16.0, 10.0)),
    ("biscotti secchi", served(416.0, 8.0, 77.0, 8.5, 10.0)),
    ("biscotti proteici", served(380.0, 15.0, 50.0, 12.0, 8.0)),
    ("cereali", per_100g(378.0, 8.0, 80.0, 3.0)),
    ("muesli", per_100g(367.0, 10.0, 66.0, 6.0)),
    ("corn flakes", per_100g(378.0, 7.0, 84.0, 0.9)),
    ("cornflakes", per_100g(378.0, 7.0, 84.0, 0.9)),

    // Meat and fish
    ("pollo", per_100g(165.0, 31.0, 0.0, 3.6)),
    ("petto di pollo", per_100g(165.0, 31.0, 0.0, 3.6)),
    ("tacchino", per_100g(135.0, 29.0, 0.0, 1.6)),
    ("petto di tacchino", per_100g(135.0, 29.0, 0.0, 1.6)),
    ("manzo", per_100g(250.0, 26.0, 0.0, 15.0)),
    ("vitello", per_100g(172.0, 33.0, 0.0, 4.8)),
    ("maiale", per_100g(242.0, 27.0, 0.0, 14.0)),
    ("agnello", per_100g(294.0, 25.0, 0.0, 21.0)),
    ("prosciutto crudo", per_100g(195.0, 26.0, 0.3, 10.0)),
    ("prosciutto cotto", per_100g(132.0, 19.8, 0.9, 5.4)),
    ("bresaola", per_100g(151.0, 33.1, 0.0, 2.6)),
    ("tonno", per_100g(130.0, 29.0, 0.0, 1.0)),
    ("tonno in scatola", per_100g(198.0, 25.0, 0.0, 10.0)),
    ("tonno al naturale", per_100g(130.0, 29.0, 0.0, 1.0)),
    ("salmone", per_100g(208.0, 20.0, 0.0, 13.0)),
    ("merluzzo", per_100g(82.0, 18.0, 0.0, 0.7)),
    ("orata", per_100g(100.0, 19.0, 0.0, 2.5)),
    ("sgombro", per_100g(205.0, 19.0, 0.0, 14.0)),
    ("pesce", per_100g(100.0, 20.0, 0.0, 2.0)),
    ("pesce bianco", per_100g(82.0, 18.0, 0.0, 0.7)),
    ("gamberi", per_100g(85.0, 18.0, 0.9, 0.9)),
    ("calamari", per_100g(92.0, 15.6, 3.1, 1.4)),
    ("carne", per_100g(200.0, 26.0, 0.0, 10.0)),

    // Eggs and dairy
    ("uovo", served(155.0, 13.0, 1.1, 11.0, 50.0)),
    ("uova", served(155.0, 13.0, 1.1, 11.0, 50.0)),
    ("albume", served(52.0, 11.0, 0.7, 0.2, 33.0)),
    ("albumi", served(52.0, 11.0, 0.7, 0.2, 33.0)),
    ("latte", per_100g(42.0, 3.4, 5.0, 1.0)),
    ("latte intero", per_100g(64.0, 3.3, 4.9, 3.6)),
    ("latte parzialmente scremato", per_100g(46.0, 3.3, 5.0, 1.5)),
    ("latte scremato", per_100g(34.0, 3.4, 5.0, 0.1)),
    ("latte avena", per_100g(47.0, 1.0, 8.0, 1.5)),
    ("latte di avena", per_100g(47.0, 1.0, 8.0, 1.5)),
    ("latte mandorla", per_100g(24.0, 0.5, 3.0, 1.1)),
    ("latte di mandorla", per_100g(24.0, 0.5, 3.0, 1.1)),
    ("latte soia", per_100g(54.0, 3.3, 6.0, 1.8)),
    ("yogurt", served(61.0, 3.5, 4.7, 3.3, 125.0)),
    ("yogurt greco", served(97.0, 9.0, 3.6, 5.0, 150.0)),
    ("yogurt magro", served(57.0, 10.0, 4.0, 0.7, 125.0)),
    ("yogurt bianco", served(61.0, 3.5, 4.7, 3.3, 125.0)),
    ("yogurt proteico", served(70.0, 10.0, 5.0, 0.5, 150.0)),
    ("skyr", served(63.0, 11.0, 4.0, 0.2, 150.0)),
    ("ricotta", per_100g(174.0, 11.0, 3.0, 13.0)),
    ("mozzarella", per_100g(280.0, 22.0, 2.2, 20.0)),
    ("parmigiano", per_100g(431.0, 38.0, 0.0, 29.0)),
    ("grana", per_100g(398.0, 33.0, 0.0, 29.0)),
    ("formaggio", per_100g(350.0, 25.0, 1.0, 27.0)),
    ("formaggio spalmabile", per_100g(253.0, 5.5, 4.6, 24.0)),
    ("philadelphia", per_100g(253.0, 5.5, 4.6, 24.0)),
    ("fiocchi di latte", per_100g(98.0, 11.0, 3.4, 4.3)),
    ("feta", per_100g(264.0, 14.0, 4.0, 21.0)),
    ("burro", per_100g(717.0, 0.9, 0.1, 81.0)),

    // Fruit
    ("banana", served(89.0, 1.1, 23.0, 0.3, 120.0)),
    ("mela", served(52.0, 0.3, 14.0, 0.2, 180.0)),
    ("pera", served(57.0, 0.4, 15.0, 0.1, 170.0)),
    ("arancia", served(47.0, 0.9, 12.0, 0.1, 200.0)),
    ("mandarino", served(53.0, 0.8, 13.0, 0.3, 80.0)),
    ("kiwi", served(61.0, 1.1, 15.0, 0.5, 75.0)),
    ("fragole", per_100g(32.0, 0.7, 7.7, 0.3)),
    ("mirtilli", per_100g(57.0, 0.7, 14.0, 0.3)),
    ("lamponi", per_100g(52.0, 1.2, 12.0, 0.7)),
    ("uva", per_100g(69.0, 0.7, 18.0, 0.2)),
    ("pesca", served(39.0, 0.9, 10.0, 0.3, 150.0)),
    ("albicocca", served(48.0, 1.4, 11.0, 0.4, 40.0)),
    ("anguria", per_100g(30.0, 0.6, 8.0, 0.2)),
    ("melone", per_100g(34.0, 0.8, 8.0, 0.2)),
    ("ananas", per_100g(50.0, 0.5, 13.0, 0.1)),
    ("avocado", served(160.0, 2.0, 9.0, 15.0, 150.0)),
    ("limone", per_100g(29.0, 1.1, 9.0, 0.3)),
    ("pompelmo", per_100g(42.0, 0.8, 11.0, 0.1)),
    ("frutti di bosco", per_100g(43.0, 0.9, 10.0, 0.4)),
    ("frutta", per_100g(50.0, 0.6, 12.0, 0.2)),
    ("frutta secca mista", per_100g(607.0, 20.0, 17.0, 54.0)),
    ("frutta secca", served(607.0, 20.0, 17.0, 54.0, 30.0)),

    // Vegetables and legumes
    ("insalata", per_100g(15.0, 1.4, 2.9, 0.2)),
    ("insalata mista", per_100g(15.0, 1.4, 2.9, 0.2)),
    ("lattuga", per_100g(15.0, 1.4, 2.9, 0.2)),
    ("pomodoro", per_100g(18.0, 0.9, 3.9, 0.2)),
    ("pomodori", per_100g(18.0, 0.9, 3.9, 0.2)),
    ("cetriolo", per_100g(16.0, 0.7, 3.6, 0.1)),
    ("carote", per_100g(41.0, 0.9, 10.0, 0.2)),
    ("zucchine", per_100g(17.0, 1.2, 3.1, 0.3)),
    ("melanzane", per_100g(25.0, 1.0, 6.0, 0.2)),
    ("peperoni", per_100g(31.0, 1.0, 6.0, 0.3)),
    ("spinaci", per_100g(23.0, 2.9, 3.6, 0.4)),
    ("broccoli", per_100g(34.0, 2.8, 7.0, 0.4)),
    ("cavolfiore", per_100g(25.0, 1.9, 5.0, 0.3)),
    ("cavolo", per_100g(25.0, 1.3, 6.0, 0.1)),
    ("funghi", per_100g(22.0, 3.1, 3.3, 0.3)),
    ("asparagi", per_100g(20.0, 2.2, 3.9, 0.1)),
    ("fagiolini", per_100g(31.0, 1.8, 7.0, 0.1)),
    ("piselli", per_100g(81.0, 5.4, 14.0, 0.4)),
    ("ceci", per_100g(164.0, 8.9, 27.0, 2.6)),
    ("lenticchie", per_100g(116.0, 9.0, 20.0, 0.4)),
    ("fagioli", per_100g(127.0, 8.7, 22.0, 0.5)),
    ("patate", per_100g(77.0, 2.0, 17.0, 0.1)),
    ("patate dolci", per_100g(86.0, 1.6, 20.0, 0.1)),
    ("cipolla", per_100g(40.0, 1.1, 9.0, 0.1)),
    ("aglio", per_100g(149.0, 6.4, 33.0, 0.5)),
    ("verdure", per_100g(25.0, 1.5, 5.0, 0.3)),
    ("verdure grigliate", per_100g(35.0, 1.5, 7.0, 0.5)),
    ("verdure miste", per_100g(30.0, 1.5, 6.0, 0.3)),
    ("contorno verdure", per_100g(30.0, 1.5, 6.0, 0.3)),

    // Nuts and seeds
    ("mandorle", per_100g(579.0, 21.0, 22.0, 50.0)),
    ("noci", per_100g(654.0, 15.0, 14.0, 65.0)),
    ("nocciole", per_100g(628.0, 15.0, 17.0, 61.0)),
    ("anacardi", per_100g(553.0, 18.0, 30.0, 44.0)),
    ("pistacchi", per_100g(560.0, 20.0, 28.0, 45.0)),
    ("arachidi", per_100g(567.0, 26.0, 16.0, 49.0)),
    ("burro di arachidi", per_100g(588.0, 25.0, 20.0, 50.0)),
    ("semi di chia", per_100g(486.0, 17.0, 42.0, 31.0)),
    ("semi di lino", per_100g(534.0, 18.0, 29.0, 42.0)),
    ("semi di zucca", per_100g(559.0, 30.0, 11.0, 49.0)),
    ("semi di girasole", per_100g(584.0, 21.0, 20.0, 51.0)),

    // Condiments and oils
    ("olio", per_100g(884.0, 0.0, 0.0, 100.0)),
    ("olio evo", per_100g(884.0, 0.0, 0.0, 100.0)),
    ("olio extravergine", per_100g(884.0, 0.0, 0.0, 100.0)),
    ("olio di oliva", per_100g(884.0, 0.0, 0.0, 100.0)),
    ("miele", per_100g(304.0, 0.3, 82.0, 0.0)),
    ("marmellata", per_100g(250.0, 0.4, 60.0, 0.1)),
    ("marmellata zero", per_100g(120.0, 0.4, 28.0, 0.1)),
    ("zucchero", per_100g(387.0, 0.0, 100.0, 0.0)),
    ("nutella", per_100g(539.0, 6.3, 56.0, 31.0)),
    ("cioccolato", per_100g(546.0, 5.0, 60.0, 31.0)),
    ("cioccolato fondente", per_100g(546.0, 5.0, 46.0, 31.0)),
    ("cacao", per_100g(228.0, 20.0, 58.0, 14.0)),
    ("aceto", per_100g(21.0, 0.0, 0.9, 0.0)),
    ("aceto balsamico", per_100g(88.0, 0.5, 17.0, 0.0)),
    ("salsa di soia", per_100g(53.0, 8.0, 5.0, 0.0)),

    // Drinks
    ("caffè", per_100g(2.0, 0.1, 0.0, 0.0)),
    ("tè", per_100g(1.0, 0.0, 0.3, 0.0)),
    ("succo arancia", per_100g(45.0, 0.7, 10.0, 0.2)),
    ("spremuta", per_100g(45.0, 0.7, 10.0, 0.2)),

    // Other
    ("hummus", per_100g(166.0, 8.0, 14.0, 10.0)),
    ("tofu", per_100g(76.0, 8.0, 1.9, 4.8)),
    ("tempeh", per_100g(193.0, 19.0, 9.4, 11.0)),
    ("seitan", per_100g(370.0, 75.0, 14.0, 1.9)),
    ("quinoa", per_100g(120.0, 4.4, 21.0, 1.9)),
    ("farro", per_100g(338.0, 14.6, 72.0, 2.5)),
    ("couscous", per_100g(112.0, 3.8, 23.0, 0.2)),
    ("polenta", per_100g(70.0, 1.5, 15.0, 0.3)),
    ("wasa", served(410.0, 12.0, 65.0, 12.0, 12.0)),
    ("wasa integrali", served(410.0, 12.0, 65.0, 12.0, 12.0)),

    // Supplements
    ("proteine", served(120.0, 24.0, 3.0, 1.0, 30.0)),
    ("proteine in polvere", served(120.0, 24.0, 3.0, 1.0, 30.0)),
    ("shake proteine", served(120.0, 24.0, 3.0, 1.0, 30.0)),
    ("shake proteico", served(120.0, 24.0, 3.0, 1.0, 30.0)),
    ("multivit", served(0.0, 0.0, 0.0, 0.0, 1.0)),
    ("multivitaminico", served(0.0, 0.0, 0.0, 0.0, 1.0)),
    ("omega 3", served(10.0, 0.0, 0.0, 1.0, 1.0)),
];

/// Piece weights for foods counted with `pz`, in lookup order
pub static SERVING_SIZES: &[(&str, f64)] = &[
    ("uovo", 50.0),
    ("uova", 50.0),
    ("banana", 120.0),
    ("mela", 180.0),
    ("pera", 170.0),
    ("arancia", 200.0),
    ("kiwi", 75.0),
    ("pesca", 150.0),
    ("albicocca", 40.0),
    ("mandarino", 80.0),
    ("yogurt", 125.0),
    ("yogurt greco", 150.0),
    ("skyr", 150.0),
    ("biscotti", 10.0),
    ("biscotto", 10.0),
    ("biscotti proteici", 8.0),
    ("crackers", 7.0),
    ("crackers integrali", 12.0),
    ("wasa", 12.0),
    ("fette biscottate", 10.0),
    ("gallette", 9.0),
    ("gallette di riso", 9.0),
    ("piadina", 80.0),
    ("fetta di pane", 40.0),
    ("pane", 40.0),
    ("mandorle", 1.2),
    ("noci", 5.0),
    ("nocciole", 2.0),
    ("scatoletta", 80.0),
    ("tonno in scatola", 80.0),
    ("frutta secca", 30.0),
];

/// Folded key of every table entry, in table order
static FOLDED_KEYS: LazyLock<Vec<String>> =
    LazyLock::new(|| LOCAL_FOODS.iter().map(|(key, _)| fold(key)).collect());

/// Folded key to table position; the first entry wins on collisions
static FOLDED_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let mut index = HashMap::with_capacity(FOLDED_KEYS.len());
    for (position, folded) in FOLDED_KEYS.iter().enumerate() {
        index.entry(folded.as_str()).or_insert(position);
    }
    index
});

/// Entry for a canonical or folded key
#[must_use]
pub fn get(key: &str) -> Option<&'static LocalFoodEntry> {
    exact_position(key).map(|position| &LOCAL_FOODS[position].1)
}

/// Canonical key whose folded form equals `folded`
#[must_use]
pub fn exact_key(folded: &str) -> Option<&'static str> {
    exact_position(folded).map(|position| LOCAL_FOODS[position].0)
}

fn exact_position(key: &str) -> Option<usize> {
    FOLDED_INDEX.get(fold(key).as_str()).copied()
}

/// First key, in table order, contained in `folded` or containing it
#[must_use]
pub fn first_containing(folded: &str) -> Option<&'static str> {
    if folded.is_empty() {
        return None;
    }
    FOLDED_KEYS
        .iter()
        .position(|key| folded.contains(key.as_str()) || key.contains(folded))
        .map(|position| LOCAL_FOODS[position].0)
}

/// Canonical keys matching `folded` by containment in either direction
pub fn keys_containing(folded: &str) -> impl Iterator<Item = &'static str> + '_ {
    LOCAL_FOODS
        .iter()
        .zip(FOLDED_KEYS.iter())
        .filter(move |(_, key)| {
            !folded.is_empty() && (key.contains(folded) || folded.contains(key.as_str()))
        })
        .map(|((key, _), _)| *key)
}

/// Piece weight from the serving table: exact key first, then the first
/// table key contained in `name`
#[must_use]
pub fn serving_size_for(name: &str) -> Option<f64> {
    SERVING_SIZES
        .iter()
        .find(|(key, _)| *key == name)
        .or_else(|| SERVING_SIZES.iter().find(|(key, _)| name.contains(key)))
        .map(|(_, grams)| *grams)
}

/// Number of entries in the table
#[must_use]
pub fn len() -> usize {
    LOCAL_FOODS.len()
}
