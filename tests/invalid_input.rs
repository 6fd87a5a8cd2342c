// Test intent: verifies input validation rejects bad lengths without
// touching the caller's data.
use blockfft::FftError;

#[test]
fn mismatched_plane_lengths() {
    let mut re = vec![0.0f32; 64];
    let mut im = vec![0.0f32; 128];
    assert_eq!(
        blockfft::forward(&mut re, &mut im),
        Err(FftError::MismatchedLengths)
    );
    assert_eq!(
        blockfft::inverse(&mut re, &mut im),
        Err(FftError::MismatchedLengths)
    );
}

#[test]
fn rejected_lengths() {
    // Zero, non-powers of two, and powers of two below one base block.
    for n in [0, 1, 16, 31, 33, 48, 96, 1000] {
        let mut re = vec![0.0f32; n];
        let mut im = vec![0.0f32; n];
        assert_eq!(
            blockfft::forward(&mut re, &mut im),
            Err(FftError::InvalidLength),
            "n={n}"
        );
    }
}

#[test]
fn minimum_length_is_accepted() {
    let mut re = vec![0.0f32; blockfft::BASE_BLOCK];
    let mut im = vec![0.0f32; blockfft::BASE_BLOCK];
    assert!(blockfft::forward(&mut re, &mut im).is_ok());
}

#[test]
fn failed_call_leaves_input_untouched() {
    let re_orig: Vec<f32> = (0..48).map(|i| i as f32 * 0.5).collect();
    let im_orig: Vec<f32> = (0..48).map(|i| 1.0 - i as f32).collect();
    let mut re = re_orig.clone();
    let mut im = im_orig.clone();
    assert!(blockfft::forward(&mut re, &mut im).is_err());
    assert_eq!(re, re_orig);
    assert_eq!(im, im_orig);
}
