//! Sample reordering for the block decomposition.
//!
//! The transform splits an N-point signal into `N / BASE_BLOCK` sections of
//! 32 samples. For the later radix-2 merges to recombine correctly, section
//! `s` must hold the stride-`section_count` subsequence starting at the
//! even/odd-split position of `s`. The split order is computed per call as a
//! pure function over the section index range.

use crate::tables::BASE_BLOCK;

/// Ordering of section indices produced by recursively splitting
/// `0..section_count` into even and odd positions down to single elements.
pub(crate) fn section_order(section_count: usize) -> Vec<usize> {
    debug_assert!(section_count.is_power_of_two());
    let mut order: Vec<usize> = (0..section_count).collect();
    let mut buf = vec![0usize; section_count];
    split_recursive(&mut order, &mut buf, 0, section_count);
    order
}

fn split_recursive(data: &mut [usize], buf: &mut [usize], offset: usize, len: usize) {
    if len == 1 {
        return;
    }
    split_even_odd(data, buf, offset, len);
    split_recursive(data, buf, offset, len / 2);
    split_recursive(data, buf, offset + len / 2, len / 2);
}

/// Stable partition of `data[offset..offset + len]`: even positions first,
/// odd positions second.
fn split_even_odd(data: &mut [usize], buf: &mut [usize], offset: usize, len: usize) {
    let half = len / 2;
    for i in 0..half {
        buf[offset + i] = data[offset + 2 * i];
        buf[offset + half + i] = data[offset + 2 * i + 1];
    }
    data[offset..offset + len].copy_from_slice(&buf[offset..offset + len]);
}

/// Gather the input signal into block-decimated order.
///
/// Output index `i` (section `i / 32`, slot `i % 32`) receives the input
/// sample at `section_count * slot + order[section]`, so each contiguous
/// 32-wide output span forms one independent base block.
pub(crate) fn decimate(
    re_in: &[f32],
    im_in: &[f32],
    re_out: &mut [f32],
    im_out: &mut [f32],
    order: &[usize],
) {
    let n = re_in.len();
    let section_count = order.len();
    debug_assert_eq!(n, section_count * BASE_BLOCK);
    debug_assert!(re_out.len() >= n && im_out.len() >= n);
    for i in 0..n {
        let section = i / BASE_BLOCK;
        let slot = i % BASE_BLOCK;
        let src = section_count * slot + order[section];
        re_out[i] = re_in[src];
        im_out[i] = im_in[src];
    }
}
