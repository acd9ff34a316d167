use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Generates an opaque identifier such as `_k3j9x0a2b`.
///
/// Collisions are not checked; 36^9 possibilities keep them negligible for a
/// single profile's diaries and entries.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(ID_LEN + 1);
    id.push('_');
    for _ in 0..ID_LEN {
        let idx = rng.gen_range(0..ID_ALPHABET.len());
        id.push(ID_ALPHABET[idx] as char);
    }
    id
}
