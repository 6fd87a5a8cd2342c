//! Process-wide trigonometric lookup tables.
//!
//! Two read-only tables back the transform: a `B×B` cosine/sine matrix used
//! by the base-block kernels, and a quantized half-turn sample table used by
//! the forward merge stage. Both are built exactly once behind a [`OnceLock`]
//! and shared by every transform call and thread thereafter.

use core::f32::consts::TAU;
use std::sync::OnceLock;

/// Width of the brute-force transform unit. Lengths below this are rejected.
pub const BASE_BLOCK: usize = 32;

/// Number of entries in the quantized half-turn sample table.
pub(crate) const SAMPLE_SIZE: usize = 1024;
pub(crate) const HALF_SAMPLE: usize = SAMPLE_SIZE / 2;

/// Cosine and sine matrices for the direct base-block transform.
///
/// Entry `[n + k * BASE_BLOCK]` holds `trig(τ·n·k / BASE_BLOCK)`, so each
/// output bin `k` reads one contiguous row of both tables.
pub(crate) struct BaseTables {
    pub cos: Box<[f32]>,
    pub sin: Box<[f32]>,
}

static BASE_TABLES: OnceLock<BaseTables> = OnceLock::new();

pub(crate) fn base_tables() -> &'static BaseTables {
    BASE_TABLES.get_or_init(|| {
        #[cfg(feature = "verbose-logging")]
        log::debug!("building {0}x{0} base trig tables", BASE_BLOCK);
        let mut cos = vec![0.0f32; BASE_BLOCK * BASE_BLOCK];
        let mut sin = vec![0.0f32; BASE_BLOCK * BASE_BLOCK];
        for k in 0..BASE_BLOCK {
            for n in 0..BASE_BLOCK {
                let angle = TAU * (n * k) as f32 / BASE_BLOCK as f32;
                let (s, c) = angle.sin_cos();
                cos[n + k * BASE_BLOCK] = c;
                sin[n + k * BASE_BLOCK] = s;
            }
        }
        BaseTables {
            cos: cos.into_boxed_slice(),
            sin: sin.into_boxed_slice(),
        }
    })
}

/// Quantized angle → (cos, sin) lookup for forward-merge twiddle factors.
///
/// `cos[i] = cos(τ·(i − 512)/512)` and `sin[i] = sqrt(1 − cos²)`. Merge-stage
/// angles lie in `[0, π)`, which maps onto indices `512..768` where the
/// non-negative root is the true sine. Angles that fall between grid points
/// are truncated to the next-lower sample; the resulting error is bounded by
/// one grid step (τ/512) and is an accepted precision/speed trade-off.
pub(crate) struct SampleTable {
    cos: Box<[f32]>,
    sin: Box<[f32]>,
}

impl SampleTable {
    /// Look up `(cos θ, sin θ)` for `θ` in `[0, π)`.
    #[inline]
    pub fn lookup(&self, theta: f32) -> (f32, f32) {
        let fraction = theta / TAU;
        let index = (HALF_SAMPLE as f32 * fraction) as usize % HALF_SAMPLE + HALF_SAMPLE;
        (self.cos[index], self.sin[index])
    }
}

static SAMPLE_TABLE: OnceLock<SampleTable> = OnceLock::new();

pub(crate) fn sample_table() -> &'static SampleTable {
    SAMPLE_TABLE.get_or_init(|| {
        #[cfg(feature = "verbose-logging")]
        log::debug!("building {SAMPLE_SIZE}-entry twiddle sample table");
        let mut cos = vec![0.0f32; SAMPLE_SIZE];
        let mut sin = vec![0.0f32; SAMPLE_SIZE];
        for (i, (c, s)) in cos.iter_mut().zip(sin.iter_mut()).enumerate() {
            let angle = TAU * (i as f32 - HALF_SAMPLE as f32) / HALF_SAMPLE as f32;
            *c = angle.cos();
            *s = (1.0 - *c * *c).max(0.0).sqrt();
        }
        SampleTable {
            cos: cos.into_boxed_slice(),
            sin: sin.into_boxed_slice(),
        }
    })
}
