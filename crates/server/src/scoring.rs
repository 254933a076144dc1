use std::collections::HashMap;

use rand::Rng;
use shared::domain::ScoringMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessScore {
    pub numbers_correct: u32,
    pub positions_correct: u32,
}

impl GuessScore {
    pub fn is_exact(&self, secret_len: usize) -> bool {
        self.positions_correct as usize == secret_len
    }
}

/// Scores `guess` against `secret`. Callers are expected to have checked
/// that both have the same length.
pub fn score_guess(secret: &str, guess: &str, mode: ScoringMode) -> GuessScore {
    let positions_correct = secret
        .chars()
        .zip(guess.chars())
        .filter(|(a, b)| a == b)
        .count() as u32;

    let numbers_correct = match mode {
        ScoringMode::Presence => guess.chars().filter(|d| secret.contains(*d)).count() as u32,
        ScoringMode::Traditional => {
            let secret_counts = digit_counts(secret);
            let guess_counts = digit_counts(guess);
            secret_counts
                .iter()
                .map(|(digit, n)| (*n).min(guess_counts.get(digit).copied().unwrap_or(0)))
                .sum()
        }
    };

    GuessScore {
        numbers_correct,
        positions_correct,
    }
}

fn digit_counts(value: &str) -> HashMap<char, u32> {
    let mut counts = HashMap::new();
    for c in value.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Draws `num_digits` independent decimal digits; leading zeros are allowed.
pub fn generate_secret<R: Rng + ?Sized>(rng: &mut R, num_digits: u32) -> String {
    (0..num_digits)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
