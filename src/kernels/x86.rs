//! x86-64 128-bit base-block kernels.
//!
//! The four variants share one body and differ only in the feature set the
//! compiler may assume; all of them process four samples per step and reduce
//! with the same explicit 4-term horizontal sum as the scalar kernel.

use core::arch::x86_64::*;

use super::BlockKernel;
use crate::tables::BASE_BLOCK;

macro_rules! x86_block_kernel {
    ($kernel:ident, $static_name:ident, $forward:ident, $inverse:ident, $feature:literal) => {
        pub(crate) struct $kernel;

        pub(crate) static $static_name: $kernel = $kernel;

        impl BlockKernel for $kernel {
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
                // Safety: `kernel_for` hands this kernel out only after
                // runtime detection confirmed the feature.
                unsafe { $forward(src_re, src_im, dst_re, dst_im, cos, sin) }
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
                unsafe { $inverse(src_re, src_im, dst_re, dst_im, cos, sin) }
            }
        }

        #[target_feature(enable = $feature)]
        unsafe fn $forward(
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
                        let c = _mm_loadu_ps(cos.as_ptr().add(row + n));
                        let s = _mm_loadu_ps(sin.as_ptr().add(row + n));
                        let re_v = _mm_loadu_ps(src_re.as_ptr().add(n));
                        let im_v = _mm_loadu_ps(src_im.as_ptr().add(n));

                        let sum = _mm_add_ps(_mm_mul_ps(c, re_v), _mm_mul_ps(s, im_v));
                        _mm_storeu_ps(lanes.as_mut_ptr(), sum);
                        re_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                        let sum = _mm_sub_ps(_mm_mul_ps(im_v, c), _mm_mul_ps(re_v, s));
                        _mm_storeu_ps(lanes.as_mut_ptr(), sum);
                        im_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                        n += 4;
                    }
                    dst_re[k] = re_sum;
                    dst_im[k] = im_sum;
                }
            }
        }

        #[target_feature(enable = $feature)]
        unsafe fn $inverse(
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
                        let c = _mm_loadu_ps(cos.as_ptr().add(row + n));
                        let s = _mm_loadu_ps(sin.as_ptr().add(row + n));
                        let re_v = _mm_loadu_ps(src_re.as_ptr().add(n));
                        let im_v = _mm_loadu_ps(src_im.as_ptr().add(n));

                        let sum = _mm_sub_ps(_mm_mul_ps(c, re_v), _mm_mul_ps(s, im_v));
                        _mm_storeu_ps(lanes.as_mut_ptr(), sum);
                        re_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                        let sum = _mm_add_ps(_mm_mul_ps(im_v, c), _mm_mul_ps(re_v, s));
                        _mm_storeu_ps(lanes.as_mut_ptr(), sum);
                        im_sum += lanes[3] + lanes[2] + lanes[1] + lanes[0];

                        n += 4;
                    }
                    dst_re[k] = re_sum;
                    dst_im[k] = im_sum;
                }
            }
        }
    };
}

x86_block_kernel!(Sse3Kernel, SSE3, forward_sse3, inverse_sse3, "sse3");
x86_block_kernel!(Sse41Kernel, SSE41, forward_sse41, inverse_sse41, "sse4.1");
x86_block_kernel!(Sse42Kernel, SSE42, forward_sse42, inverse_sse42, "sse4.2");
x86_block_kernel!(Avx2Kernel, AVX2, forward_avx2, inverse_avx2, "avx2,fma");
