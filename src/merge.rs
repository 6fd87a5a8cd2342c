//! Radix-2 butterfly merges of transformed base blocks.
//!
//! Starting from `(div, section_count) = (32, N/32)`, each stage combines
//! adjacent section pairs into sections of twice the width, ping-ponging
//! between the caller's buffers and the scratch plane, until a single
//! section spans the whole signal. Forward twiddles come from the quantized
//! sample table; inverse twiddles are computed directly with a signed sine.

use core::f32::consts::TAU;

use crate::fft::Direction;
use crate::tables::{sample_table, BASE_BLOCK};

/// Run all merge stages. On entry the block-transformed data lives in
/// `re`/`im`; on exit it lives there again, copied back from the scratch
/// plane if an odd number of stages ran.
pub(crate) fn merge_blocks(
    direction: Direction,
    re: &mut [f32],
    im: &mut [f32],
    aux_re: &mut [f32],
    aux_im: &mut [f32],
    mut section_count: usize,
) {
    debug_assert_eq!(re.len(), aux_re.len());
    let mut div = BASE_BLOCK;
    let mut flipped = false;
    while section_count > 1 {
        if flipped {
            merge_stage(direction, aux_re, aux_im, re, im, div, section_count);
        } else {
            merge_stage(direction, re, im, aux_re, aux_im, div, section_count);
        }
        div *= 2;
        section_count /= 2;
        flipped = !flipped;
    }
    if flipped {
        re.copy_from_slice(aux_re);
        im.copy_from_slice(aux_im);
    }
}

fn merge_stage(
    direction: Direction,
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    div: usize,
    section_count: usize,
) {
    match direction {
        Direction::Forward => forward_stage(src_re, src_im, dst_re, dst_im, div, section_count),
        Direction::Inverse => inverse_stage(src_re, src_im, dst_re, dst_im, div, section_count),
    }
}

fn forward_stage(
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    div: usize,
    section_count: usize,
) {
    let table = sample_table();
    let span = (2 * div) as f32;
    for s in (0..section_count).step_by(2) {
        let start = div * s;
        for k in 0..div {
            let i = start + k;
            let j = start + div + k;
            let (cos, sin) = table.lookup(TAU * k as f32 / span);

            let w_re = src_re[j] * cos + src_im[j] * sin;
            dst_re[i] = src_re[i] + w_re;
            dst_re[j] = src_re[i] - w_re;

            let w_im = src_im[j] * cos - src_re[j] * sin;
            dst_im[i] = src_im[i] + w_im;
            dst_im[j] = src_im[i] - w_im;
        }
    }
}

fn inverse_stage(
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    div: usize,
    section_count: usize,
) {
    let span = (2 * div) as f32;
    for s in (0..section_count).step_by(2) {
        let start = div * s;
        for k in 0..div {
            let i = start + k;
            let j = start + div + k;
            // The angle stays in [0, π), where sine is non-negative; sin_cos
            // keeps the sign correct without a separate sqrt derivation.
            let (sin, cos) = (TAU * k as f32 / span).sin_cos();

            let w_re = src_re[j] * cos - src_im[j] * sin;
            dst_re[i] = src_re[i] + w_re;
            dst_re[j] = src_re[i] - w_re;

            let w_im = src_im[j] * cos + src_re[j] * sin;
            dst_im[i] = src_im[i] + w_im;
            dst_im[j] = src_im[i] - w_im;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One forward stage over two width-32 spectra must equal the radix-2
    // butterfly written out longhand.
    #[test]
    fn forward_stage_matches_longhand_butterfly() {
        let n = 2 * BASE_BLOCK;
        let src_re: Vec<f32> = (0..n).map(|i| (i as f32 * 0.21).sin()).collect();
        let src_im: Vec<f32> = (0..n).map(|i| (i as f32 * 0.34).cos()).collect();
        let mut dst_re = vec![0.0; n];
        let mut dst_im = vec![0.0; n];
        forward_stage(&src_re, &src_im, &mut dst_re, &mut dst_im, BASE_BLOCK, 2);

        for k in 0..BASE_BLOCK {
            let theta = TAU * k as f32 / n as f32;
            let (cos, sin) = sample_table().lookup(theta);
            let j = BASE_BLOCK + k;
            let w_re = src_re[j] * cos + src_im[j] * sin;
            let w_im = src_im[j] * cos - src_re[j] * sin;
            assert!((dst_re[k] - (src_re[k] + w_re)).abs() < 1e-6);
            assert!((dst_re[j] - (src_re[k] - w_re)).abs() < 1e-6);
            assert!((dst_im[k] - (src_im[k] + w_im)).abs() < 1e-6);
            assert!((dst_im[j] - (src_im[k] - w_im)).abs() < 1e-6);
        }
    }

    #[test]
    fn even_stage_count_leaves_result_in_place() {
        // Four sections -> two stages -> even flip count, no copy-back.
        let n = 4 * BASE_BLOCK;
        let mut re: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let mut im = vec![0.0; n];
        let mut aux_re = vec![f32::NAN; n];
        let mut aux_im = vec![f32::NAN; n];
        merge_blocks(
            Direction::Forward,
            &mut re,
            &mut im,
            &mut aux_re,
            &mut aux_im,
            4,
        );
        assert!(re.iter().all(|v| v.is_finite()));
        assert!(im.iter().all(|v| v.is_finite()));
    }
}
