//! Base-block transform kernels and runtime backend selection.
//!
//! Every kernel computes the direct O(B²) DFT/IDFT of one 32-sample block
//! against the shared cosine/sine matrices. The vector kernels consume four
//! samples per step and reduce each step with the same 4-term horizontal sum,
//! so all backends agree with the scalar loop up to ordinary floating-point
//! summation order. The backend is probed once per process and cached; no
//! per-call re-branching.

use std::sync::OnceLock;

use crate::tables::BASE_BLOCK;

#[cfg(target_arch = "x86_64")]
mod x86;

#[cfg(target_arch = "aarch64")]
mod neon;

/// Numeric backends for the base-block transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Portable scalar loop, always available.
    Scalar,
    /// x86-64 128-bit kernel gated on SSE3.
    Sse3,
    /// x86-64 128-bit kernel gated on SSE4.1.
    Sse41,
    /// x86-64 128-bit kernel gated on SSE4.2.
    Sse42,
    /// x86-64 128-bit kernel gated on AVX2+FMA.
    Avx2,
    /// AArch64 NEON kernel.
    Neon,
}

/// Direct transform of a single base block.
///
/// `src_*` and `dst_*` are exactly [`BASE_BLOCK`] elements; `cos`/`sin` are
/// the B×B matrices from [`crate::tables`].
pub trait BlockKernel: Send + Sync {
    fn forward(
        &self,
        src_re: &[f32],
        src_im: &[f32],
        dst_re: &mut [f32],
        dst_im: &mut [f32],
        cos: &[f32],
        sin: &[f32],
    );
    fn inverse(
        &self,
        src_re: &[f32],
        src_im: &[f32],
        dst_re: &mut [f32],
        dst_im: &mut [f32],
        cos: &[f32],
        sin: &[f32],
    );
}

pub(crate) struct ScalarKernel;

static SCALAR: ScalarKernel = ScalarKernel;

impl BlockKernel for ScalarKernel {
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
        for k in 0..BASE_BLOCK {
            let cos_row = &cos[k * BASE_BLOCK..(k + 1) * BASE_BLOCK];
            let sin_row = &sin[k * BASE_BLOCK..(k + 1) * BASE_BLOCK];
            let mut re_sum = 0.0f32;
            let mut im_sum = 0.0f32;
            for n in 0..BASE_BLOCK {
                let c = cos_row[n];
                let s = sin_row[n];
                let re = src_re[n];
                let im = src_im[n];
                re_sum += re * c + im * s;
                im_sum += im * c - re * s;
            }
            dst_re[k] = re_sum;
            dst_im[k] = im_sum;
        }
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
        for k in 0..BASE_BLOCK {
            let cos_row = &cos[k * BASE_BLOCK..(k + 1) * BASE_BLOCK];
            let sin_row = &sin[k * BASE_BLOCK..(k + 1) * BASE_BLOCK];
            let mut re_sum = 0.0f32;
            let mut im_sum = 0.0f32;
            for n in 0..BASE_BLOCK {
                let c = cos_row[n];
                let s = sin_row[n];
                let re = src_re[n];
                let im = src_im[n];
                re_sum += re * c - im * s;
                im_sum += im * c + re * s;
            }
            dst_re[k] = re_sum;
            dst_im[k] = im_sum;
        }
    }
}

/// Whether `backend` is usable on the running CPU.
fn backend_available(backend: Backend) -> bool {
    match backend {
        Backend::Scalar => true,
        #[cfg(target_arch = "x86_64")]
        Backend::Sse3 => std::arch::is_x86_feature_detected!("sse3"),
        #[cfg(target_arch = "x86_64")]
        Backend::Sse41 => std::arch::is_x86_feature_detected!("sse4.1"),
        #[cfg(target_arch = "x86_64")]
        Backend::Sse42 => std::arch::is_x86_feature_detected!("sse4.2"),
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 => {
            std::arch::is_x86_feature_detected!("avx2")
                && std::arch::is_x86_feature_detected!("fma")
        }
        #[cfg(target_arch = "aarch64")]
        Backend::Neon => std::arch::is_aarch64_feature_detected!("neon"),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn detect_backend() -> Backend {
    #[cfg(target_arch = "x86_64")]
    {
        for candidate in [Backend::Avx2, Backend::Sse42, Backend::Sse41, Backend::Sse3] {
            if backend_available(candidate) {
                return candidate;
            }
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if backend_available(Backend::Neon) {
            return Backend::Neon;
        }
    }
    Backend::Scalar
}

static SELECTED: OnceLock<Backend> = OnceLock::new();

/// The preferred backend for this process, probed once and fixed thereafter.
pub fn selected_backend() -> Backend {
    *SELECTED.get_or_init(|| {
        let backend = detect_backend();
        #[cfg(feature = "verbose-logging")]
        log::debug!("selected base-block backend {backend:?}");
        backend
    })
}

/// All backends usable on the running CPU, scalar first.
pub fn available_backends() -> Vec<Backend> {
    let mut backends = vec![Backend::Scalar];
    for candidate in [
        Backend::Sse3,
        Backend::Sse41,
        Backend::Sse42,
        Backend::Avx2,
        Backend::Neon,
    ] {
        if backend_available(candidate) {
            backends.push(candidate);
        }
    }
    backends
}

/// Kernel for `backend`, falling back to the scalar loop when the backend is
/// not usable on the running CPU. The returned kernel is therefore always
/// safe to invoke.
pub fn kernel_for(backend: Backend) -> &'static dyn BlockKernel {
    if !backend_available(backend) {
        return &SCALAR;
    }
    match backend {
        Backend::Scalar => &SCALAR,
        #[cfg(target_arch = "x86_64")]
        Backend::Sse3 => &x86::SSE3,
        #[cfg(target_arch = "x86_64")]
        Backend::Sse41 => &x86::SSE41,
        #[cfg(target_arch = "x86_64")]
        Backend::Sse42 => &x86::SSE42,
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 => &x86::AVX2,
        #[cfg(target_arch = "aarch64")]
        Backend::Neon => &neon::NEON,
        #[allow(unreachable_patterns)]
        _ => &SCALAR,
    }
}

/// The process-wide resolved kernel.
pub(crate) fn selected_kernel() -> &'static dyn BlockKernel {
    kernel_for(selected_backend())
}
