//! Public transform entry points and the transform pipeline.
//!
//! [`forward`] and [`inverse`] convert a pair of equal-length `f32`
//! sequences (real and imaginary planes) between time and frequency domain
//! in place. Lengths must be powers of two and at least [`BASE_BLOCK`].
//!
//! Pipeline: validate → shared tables → scratch checkout → permute into
//! scratch → direct transform of every 32-sample base block (parallel when
//! profitable) → radix-2 butterfly merges → inverse-only 1/N normalization.

#[cfg(feature = "parallel")]
use core::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::kernels::{selected_kernel, BlockKernel};
use crate::merge::merge_blocks;
use crate::permute::{decimate, section_order};
use crate::scratch;
use crate::tables::{base_tables, sample_table, BaseTables, BASE_BLOCK};

/// Errors reported before any sample is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Real and imaginary sequences differ in length.
    MismatchedLengths,
    /// Length is not a power of two, or is smaller than the base block size.
    InvalidLength,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MismatchedLengths => {
                "real and imaginary sequences must have the same length".fmt(f)
            }
            Self::InvalidLength => "transform length must be a power of two of at least 32".fmt(f),
        }
    }
}

impl std::error::Error for FftError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Inverse,
}

/// In-place forward transform of the split complex signal.
pub fn forward(real: &mut [f32], imaginary: &mut [f32]) -> Result<(), FftError> {
    transform(real, imaginary, Direction::Forward)
}

/// In-place inverse transform of the split complex signal, scaled by 1/N.
pub fn inverse(real: &mut [f32], imaginary: &mut [f32]) -> Result<(), FftError> {
    transform(real, imaginary, Direction::Inverse)
}

fn transform(re: &mut [f32], im: &mut [f32], direction: Direction) -> Result<(), FftError> {
    if re.len() != im.len() {
        return Err(FftError::MismatchedLengths);
    }
    let n = re.len();
    if !n.is_power_of_two() || n < BASE_BLOCK {
        return Err(FftError::InvalidLength);
    }

    let tables = base_tables();
    if direction == Direction::Forward {
        // Warm the twiddle samples before any merge stage needs them.
        sample_table();
    }

    let section_count = n / BASE_BLOCK;
    let mut guard = scratch::acquire(n);
    let (aux_re, aux_im) = guard.planes_mut(n);

    let order = section_order(section_count);
    decimate(re, im, aux_re, aux_im, &order);
    transform_blocks(direction, aux_re, aux_im, re, im, tables);
    merge_blocks(direction, re, im, aux_re, aux_im, section_count);

    if direction == Direction::Inverse {
        normalize(re);
        normalize(im);
    }
    Ok(())
}

/// Override for the minimum section count that triggers parallel block
/// dispatch. `0` means no override and the built-in policy applies.
#[cfg(feature = "parallel")]
static PARALLEL_SECTION_OVERRIDE: AtomicUsize = AtomicUsize::new(0);

/// Set a custom minimum section count for parallel base-block dispatch.
///
/// The built-in policy parallelizes above two sections when more than one
/// core is available. Passing `0` reverts to it; `usize::MAX` forces
/// sequential execution.
#[cfg(feature = "parallel")]
pub fn set_parallel_section_threshold(sections: usize) {
    PARALLEL_SECTION_OVERRIDE.store(sections, Ordering::Relaxed);
}

/// Core count, probed once per process like the backend selection.
#[cfg(feature = "parallel")]
fn core_count() -> usize {
    static CORES: OnceLock<usize> = OnceLock::new();
    *CORES.get_or_init(num_cpus::get)
}

#[cfg(feature = "parallel")]
fn use_parallel(section_count: usize) -> bool {
    let override_thr = PARALLEL_SECTION_OVERRIDE.load(Ordering::Relaxed);
    if override_thr != 0 {
        return section_count >= override_thr;
    }
    section_count > 2 && core_count() > 1
}

#[cfg(not(feature = "parallel"))]
fn use_parallel(_section_count: usize) -> bool {
    false
}

/// Direct-transform every base block from the decimated source plane into
/// the destination plane. Sections occupy disjoint 32-wide spans, so they
/// need no cross-section synchronization when dispatched in parallel.
fn transform_blocks(
    direction: Direction,
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    tables: &BaseTables,
) {
    let kernel = selected_kernel();
    let section_count = src_re.len() / BASE_BLOCK;

    if section_count == 1 {
        run_block(kernel, direction, src_re, src_im, dst_re, dst_im, tables);
        return;
    }

    if use_parallel(section_count) {
        #[cfg(feature = "parallel")]
        {
            dst_re
                .par_chunks_exact_mut(BASE_BLOCK)
                .zip(dst_im.par_chunks_exact_mut(BASE_BLOCK))
                .zip(src_re.par_chunks_exact(BASE_BLOCK))
                .zip(src_im.par_chunks_exact(BASE_BLOCK))
                .for_each(|(((out_re, out_im), in_re), in_im)| {
                    run_block(kernel, direction, in_re, in_im, out_re, out_im, tables);
                });
            return;
        }
    }

    dst_re
        .chunks_exact_mut(BASE_BLOCK)
        .zip(dst_im.chunks_exact_mut(BASE_BLOCK))
        .zip(src_re.chunks_exact(BASE_BLOCK))
        .zip(src_im.chunks_exact(BASE_BLOCK))
        .for_each(|(((out_re, out_im), in_re), in_im)| {
            run_block(kernel, direction, in_re, in_im, out_re, out_im, tables);
        });
}

#[inline]
fn run_block(
    kernel: &dyn BlockKernel,
    direction: Direction,
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    tables: &BaseTables,
) {
    match direction {
        Direction::Forward => {
            kernel.forward(src_re, src_im, dst_re, dst_im, &tables.cos, &tables.sin)
        }
        Direction::Inverse => {
            kernel.inverse(src_re, src_im, dst_re, dst_im, &tables.cos, &tables.sin)
        }
    }
}

fn normalize(data: &mut [f32]) {
    let scale = data.len() as f32;
    for v in data.iter_mut() {
        *v /= scale;
    }
}
