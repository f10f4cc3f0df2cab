//! Id generation for new records.

use rand::Rng;

/// Draws a fresh id: the decimal form of a random `u64`.
///
/// Uniqueness is enforced by the store, which re-draws on collision.
pub fn generate_id() -> String {
    rand::thread_rng().gen::<u64>().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_decimal() {
        for _ in 0..100 {
            let id = generate_id();
            assert!(!id.is_empty());
            assert!(id.chars().all(|c| c.is_ascii_digit()), "bad id: {}", id);
            assert!(id.parse::<u64>().is_ok());
        }
    }

    #[test]
    fn test_generate_id_varies() {
        let first = generate_id();
        assert!((0..10).any(|_| generate_id() != first));
    }
}
