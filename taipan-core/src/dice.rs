//! Random draws shared by every engine.
//!
//! All functions take the session RNG by `&mut` so a single seeded source
//! drives the whole voyage. Ranges are inclusive, matching the classic
//! game's `random(lo, hi)`.

use rand::Rng;

/// True with probability `1/n`. `n == 0` never fires.
pub fn one_in<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    n > 0 && rng.gen_range(0..n) == 0
}

/// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
pub fn between<R: Rng + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> u32 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Uniform integer in `lo..=hi` for money-sized values.
pub fn between_u64<R: Rng + ?Sized>(rng: &mut R, lo: u64, hi: u64) -> u64 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Uniform integer in `0..n`. Returns 0 when `n == 0`.
pub fn below_u64<R: Rng + ?Sized>(rng: &mut R, n: u64) -> u64 {
    if n == 0 {
        0
    } else {
        rng.gen_range(0..n)
    }
}

/// Uniform float in `[0, 1)`.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}
