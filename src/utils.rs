//! Utility functions for the team generator

/// Calculate the absolute difference between two role ratings
pub fn rating_difference(rating1: u8, rating2: u8) -> u8 {
    rating1.abs_diff(rating2)
}

/// Check if two role ratings are within the given tolerance
pub fn ratings_within_tolerance(rating1: u8, rating2: u8, tolerance: u8) -> bool {
    rating_difference(rating1, rating2) <= tolerance
}

/// Number of ordered pairs that can be drawn from `n` players
pub fn ordered_pairs(n: u64) -> u64 {
    n.saturating_mul(n.saturating_sub(1))
}
