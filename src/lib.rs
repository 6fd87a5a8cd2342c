//! In-place complex FFT over split real/imaginary `f32` planes.
//!
//! The transform decomposes a power-of-two signal into 32-sample base
//! blocks, runs a brute-force DFT on each block with a runtime-selected
//! SIMD kernel, then recombines the blocks with radix-2 butterfly merges.
//! Trig tables are built once per process and shared; auxiliary buffers
//! come from a grow-only pool, so repeated calls allocate only when the
//! signal outgrows every pooled buffer.
//!
//! ```
//! let mut re: Vec<f32> = (0..64).map(|n| (n as f32 * 0.3).sin()).collect();
//! let mut im = vec![0.0f32; 64];
//! let original = re.clone();
//!
//! blockfft::forward(&mut re, &mut im).unwrap();
//! blockfft::inverse(&mut re, &mut im).unwrap();
//!
//! for (a, b) in re.iter().zip(&original) {
//!     assert!((a - b).abs() < 1e-3);
//! }
//! ```

pub mod fft;
pub mod kernels;
mod merge;
mod permute;
mod scratch;
mod tables;

pub use fft::{forward, inverse, FftError};
#[cfg(feature = "parallel")]
pub use fft::set_parallel_section_threshold;
pub use kernels::{available_backends, kernel_for, selected_backend, Backend, BlockKernel};
pub use tables::BASE_BLOCK;


#[cfg(all(test, feature = "internal-tests"))]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip_any_signal(values in proptest::collection::vec(-1.0f32..1.0, 256)) {
            let re_orig = values.clone();
            let im_orig: Vec<f32> = values.iter().rev().copied().collect();
            let mut re = re_orig.clone();
            let mut im = im_orig.clone();
            forward(&mut re, &mut im).unwrap();
            inverse(&mut re, &mut im).unwrap();
            for i in 0..256 {
                prop_assert!((re[i] - re_orig[i]).abs() < 1e-2);
                prop_assert!((im[i] - im_orig[i]).abs() < 1e-2);
            }
        }
    }
}
