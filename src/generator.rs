//! Random username generation.

use rand::Rng;

/// Letters a generated name is drawn from: `A-Z` followed by `a-z`.
pub const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of characters in every generated name.
pub const NAME_LEN: usize = 5;

/// Generates a 5-letter name using the thread-local RNG.
///
/// Each position is drawn independently and uniformly from [`ALPHABET`].
/// Names are not unique across calls.
#[must_use]
pub fn generate_random_name() -> String {
    generate_random_name_with(&mut rand::thread_rng())
}

/// Generates a 5-letter name from the given RNG.
#[must_use]
pub fn generate_random_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..NAME_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Whether `name` has the shape of a generated name: 5 letters from [`ALPHABET`].
#[must_use]
pub fn is_generated_name(name: &str) -> bool {
    name.len() == NAME_LEN && name.bytes().all(|b| ALPHABET.contains(&b))
}
