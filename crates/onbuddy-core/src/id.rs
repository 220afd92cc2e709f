//! Opaque record ids of the form `<prefix>-<six base36 chars>`.

use rand_core::{OsRng, RngCore};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Generate a fresh id for `prefix`, e.g. `uid("dept")` → `"dept-k3x09q"`.
///
/// Globally unique in practice (36^6 ≈ 2.2 billion suffixes per prefix);
/// collisions surface as primary-key violations at insert time.
pub fn uid(prefix: &str) -> String {
  let mut n = OsRng.next_u64();
  let mut suffix = String::with_capacity(SUFFIX_LEN);
  for _ in 0..SUFFIX_LEN {
    suffix.push(ALPHABET[(n % 36) as usize] as char);
    n /= 36;
  }
  format!("{prefix}-{suffix}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uid_has_prefix_and_six_base36_chars() {
    let id = uid("dept");
    let suffix = id.strip_prefix("dept-").expect("prefix");
    assert_eq!(suffix.len(), 6);
    assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
  }

  #[test]
  fn uids_differ_between_calls() {
    let ids: std::collections::HashSet<String> = (0..64).map(|_| uid("kb")).collect();
    assert!(ids.len() > 1);
  }
}
