//! Stateless per-cell pseudo-randomness.
//!
//! Every "organic" variation in the animation (impulse jitter, hold spread,
//! hot tiles) is a pure function of the cell index, so nothing random has to
//! be stored per cell and two runs over the same input are bit-identical.

/// Salt for the static brightness offset of a cell.
pub const SALT_BASE: u32 = 73_856_093;
/// Salt for the phase of a cell's wobble.
pub const SALT_PHASE: u32 = 19_349_663;
/// Salt for the per-cell hold duration spread.
pub const SALT_HOLD: u32 = 83_492_791;
/// Salt for the "hot tile" lottery used by ripples.
pub const SALT_HOT: u32 = 97_531;

/// xorshift32 folded into `[0, 1)` with six decimal digits of resolution.
#[inline]
pub fn hash01(key: u32) -> f32 {
    let mut x = key;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (x % 1_000_000) as f32 / 1_000_000.0
}

/// [`hash01`] keyed by a cell index scaled by `salt` (32-bit wrapping).
#[inline]
pub fn cell_hash(idx: usize, salt: u32) -> f32 {
    hash01((idx as u32).wrapping_mul(salt))
}
