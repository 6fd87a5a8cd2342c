// Test intent: verifies parallel and sequential base-block dispatch produce
// identical transforms. Kept as the only test in this binary because it
// mutates the process-wide threshold override.
//
// Both dispatch modes run the one process-selected kernel; kernels are not
// injectable into the pipeline. Agreement of every available backend over a
// section-sized batch of blocks is covered in backend_parity.rs.
#![cfg(feature = "parallel")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn parallel_matches_sequential() {
    let n = 4096;
    let mut rng = StdRng::seed_from_u64(42);
    let re_orig: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let im_orig: Vec<f32> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();

    blockfft::set_parallel_section_threshold(usize::MAX);
    let mut seq_re = re_orig.clone();
    let mut seq_im = im_orig.clone();
    blockfft::forward(&mut seq_re, &mut seq_im).unwrap();

    blockfft::set_parallel_section_threshold(1);
    let mut par_re = re_orig.clone();
    let mut par_im = im_orig.clone();
    blockfft::forward(&mut par_re, &mut par_im).unwrap();

    blockfft::set_parallel_section_threshold(0);

    // Each section is transformed independently in both modes, so the
    // results agree beyond floating-point reordering noise.
    for i in 0..n {
        assert!((seq_re[i] - par_re[i]).abs() < 1e-5, "re[{i}]");
        assert!((seq_im[i] - par_im[i]).abs() < 1e-5, "im[{i}]");
    }
}
