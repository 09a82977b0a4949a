//! Short public identifiers for channels (`channel_id`) and videos (`watch_id`).

use rand::Rng;

/// Length of every public identifier.
pub const PUBLIC_ID_LEN: usize = 11;

/// URL-safe alphabet used for public identifiers.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate a new random public identifier.
pub fn generate_public_id() -> String {
    let mut rng = rand::rng();
    (0..PUBLIC_ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Check that `id` has the shape of a public identifier.
pub fn is_valid_public_id(id: &str) -> bool {
    id.len() == PUBLIC_ID_LEN && id.bytes().all(|b| ALPHABET.contains(&b))
}
