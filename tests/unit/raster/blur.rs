use super::*;

#[test]
fn radius_zero_is_identity() {
    let src: Vec<u8> = (0..8).collect();
    let mut dst = vec![0u8; 8];
    let mut engine = BlurEngine::new();
    engine.blur(&src, &mut dst, 1, 2, 0, 1.0).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20, 30, 40];
    let src = px.repeat((w * h) as usize);
    let mut dst = vec![0u8; src.len()];
    let mut engine = BlurEngine::new();
    engine.blur(&src, &mut dst, w, h, 3, 2.0).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn energy_spreads_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let mut dst = vec![0u8; src.len()];
    let mut engine = BlurEngine::new();
    engine.blur(&src, &mut dst, w, h, 2, 1.2).unwrap();

    let nonzero = dst.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = dst.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn rejects_mismatched_buffers() {
    let src = vec![0u8; 16];
    let mut dst = vec![0u8; 12];
    let mut engine = BlurEngine::new();
    assert!(engine.blur(&src, &mut dst, 2, 2, 1, 1.0).is_err());
}

#[test]
fn rejects_bad_sigma() {
    let src = vec![0u8; 16];
    let mut dst = vec![0u8; 16];
    let mut engine = BlurEngine::new();
    assert!(engine.blur(&src, &mut dst, 2, 2, 1, 0.0).is_err());
    assert!(engine.blur(&src, &mut dst, 2, 2, 1, f32::NAN).is_err());
}

#[test]
fn kernel_weights_sum_to_one() {
    for radius in [1u32, 2, 5, 10] {
        let k = gaussian_kernel_q16(radius, radius as f32 / 2.0).unwrap();
        assert_eq!(k.len(), (2 * radius + 1) as usize);
        let sum: u64 = k.iter().map(|&w| u64::from(w)).sum();
        assert_eq!(sum, 65536);
    }
}
