use rand::Rng;

// No 0/O/1/I so codes survive being read out loud
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 8;

/// Generate a join code for a private league.
///
/// Uniqueness is enforced by the unique index on `leagues.join_code`;
/// a collision surfaces as a conflict at insert time.
pub fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
