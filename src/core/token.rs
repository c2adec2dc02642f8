//! Public token generation for externally shared references.

use rand::{Rng, distributions::Alphanumeric};

/// Number of random characters appended after the prefix.
pub const TOKEN_RANDOM_LENGTH: usize = 20;

/// Generates `prefix` followed by [`TOKEN_RANDOM_LENGTH`] random alphanumeric characters.
#[must_use]
pub fn random_token_with_prefix(prefix: &str) -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_LENGTH)
        .map(char::from)
        .collect();
    format!("{prefix}{random}")
}
