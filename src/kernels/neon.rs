//! AArch64 NEON base-block kernel.
//!
//! Same four-lane structure and horizontal-sum order as the x86 kernels.

use core::arch::aarch64::*;

use super::BlockKernel;
use crate::tables::BASE_BLOCK;

pub(crate) struct NeonKernel;

pub(crate) static NEON: NeonKernel = NeonKernel;

impl BlockKernel for NeonKernel {
    fn forward(
        &self,
        src_re: &[f32],
        src_im: &[f32],
        dst_re: &mut [f32],
        dst_im: &mut [f32],
        cos: &[f32],
        sin: &[f32],
    ) {
        debug_assert!(src_re.len() == BASE_BLOCK && src_im.len() == BASE_BLOCK);
        // Safety: `kernel_for` hands this kernel out only after runtime
        // detection confirmed NEON support.
        unsafe { forward_neon(src_re, src_im, dst_re, dst_im, cos, sin) }
    }

    fn inverse(
        &self,
        src_re: &[f32],
        src_im: &[f32],
        dst_re: &mut [f32],
        dst_im: &mut [f32],
        cos: &[f32],
        sin: &[f32],
    ) {
        debug_assert!(src_re.len() == BASE_BLOCK && src_im.len() == BASE_BLOCK);
        // Safety: as above.
        unsafe { inverse_neon(src_re, src_im, dst_re, dst_im, cos, sin) }
    }
}

#[target_feature(enable = "neon")]
unsafe fn forward_neon(
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    cos: &[f32],
    sin: &[f32],
) {
    unsafe {
        let mut lanes = [0.0f32; 4];
        for k in 0..BASE_BLOCK {
            let row = k * BASE_BLOCK;
            let mut re_sum = 0.0f32;
            let mut im_sum = 0.0f32;
            let mut n = 0;
            while n < BASE_BLOCK {
                let c = vld1q_f32(cos.as_ptr().add(row + n));
                let s = vld1q_f32(sin.as_ptr().add(row + n));
                let re_v = vld1q_f32(src_re.as_ptr().add(n));
                let im_v = vld1q_f32(src_im.as_ptr().add(n));

                let sum = vaddq_f32(vmulq_f32(c, re_v), vmulq_f32(s, im_v));
                vst1q_f32(lanes.as_mut_ptr(), sum);
                re_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                let sum = vsubq_f32(vmulq_f32(im_v, c), vmulq_f32(re_v, s));
                vst1q_f32(lanes.as_mut_ptr(), sum);
                im_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                n += 4;
            }
            dst_re[k] = re_sum;
            dst_im[k] = im_sum;
        }
    }
}

#[target_feature(enable = "neon")]
unsafe fn inverse_neon(
    src_re: &[f32],
    src_im: &[f32],
    dst_re: &mut [f32],
    dst_im: &mut [f32],
    cos: &[f32],
    sin: &[f32],
) {
    unsafe {
        let mut lanes = [0.0f32; 4];
        for k in 0..BASE_BLOCK {
            let row = k * BASE_BLOCK;
            let mut re_sum = 0.0f32;
            let mut im_sum = 0.0f32;
            let mut n = 0;
            while n < BASE_BLOCK {
                let c = vld1q_f32(cos.as_ptr().add(row + n));
                let s = vld1q_f32(sin.as_ptr().add(row + n));
                let re_v = vld1q_f32(src_re.as_ptr().add(n));
                let im_v = vld1q_f32(src_im.as_ptr().add(n));

                let sum = vsubq_f32(vmulq_f32(c, re_v), vmulq_f32(s, im_v));
                vst1q_f32(lanes.as_mut_ptr(), sum);
                re_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                let sum = vaddq_f32(vmulq_f32(im_v, c), vmulq_f32(re_v, s));
                vst1q_f32(lanes.as_mut_ptr(), sum);
                im_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                n += 4;
            }
            dst_re[k] = re_sum;
            dst_im[k] = im_sum;
        }
    }
}
