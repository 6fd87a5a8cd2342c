//! Reusable scratch buffers for the transform's auxiliary plane.
//!
//! Buffers are checked out of a process-wide pool and handed back when the
//! guard drops, so concurrent transform calls always work on disjoint
//! memory. A checked-out buffer only ever grows; contents are not cleared
//! between calls, and every reader must restrict itself to indices it wrote
//! during the current transform.

use std::sync::Mutex;

pub(crate) struct Scratch {
    re: Vec<f32>,
    im: Vec<f32>,
}

static POOL: Mutex<Vec<Scratch>> = Mutex::new(Vec::new());

/// Checked-out scratch buffer; returns itself to the pool on drop.
pub(crate) struct ScratchGuard {
    buf: Scratch,
}

impl ScratchGuard {
    /// Mutable views over the real and imaginary planes, trimmed to `len`.
    pub fn planes_mut(&mut self, len: usize) -> (&mut [f32], &mut [f32]) {
        (&mut self.buf.re[..len], &mut self.buf.im[..len])
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        let buf = Scratch {
            re: core::mem::take(&mut self.buf.re),
            im: core::mem::take(&mut self.buf.im),
        };
        POOL.lock().unwrap_or_else(|e| e.into_inner()).push(buf);
    }
}

/// Check a scratch buffer of at least `min_len` elements per plane out of
/// the pool, growing a pooled buffer (or allocating a fresh one) as needed.
pub(crate) fn acquire(min_len: usize) -> ScratchGuard {
    let buf = POOL.lock().unwrap_or_else(|e| e.into_inner()).pop();
    let mut buf = buf.unwrap_or(Scratch {
        re: Vec::new(),
        im: Vec::new(),
    });
    if buf.re.len() < min_len {
        buf.re.resize(min_len, 0.0);
        buf.im.resize(min_len, 0.0);
    }
    ScratchGuard { buf }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_grows_and_reuses() {
        {
            let mut guard = acquire(64);
            let (re, im) = guard.planes_mut(64);
            assert_eq!(re.len(), 64);
            assert_eq!(im.len(), 64);
            re[0] = 1.5;
        }
        // A larger request after return must still be satisfied.
        let mut guard = acquire(256);
        let (re, _) = guard.planes_mut(256);
        assert_eq!(re.len(), 256);
    }

    #[test]
    fn concurrent_checkouts_are_disjoint() {
        let mut a = acquire(32);
        let mut b = acquire(32);
        let (a_re, _) = a.planes_mut(32);
        let (b_re, _) = b.planes_mut(32);
        assert_ne!(a_re.as_ptr(), b_re.as_ptr());
    }
}
