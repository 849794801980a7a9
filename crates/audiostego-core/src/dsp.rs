use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// forward transform of a real signal
pub(crate) fn forward(signal: &[f64]) -> Vec<Complex<f64>> {
    let mut spectrum: Vec<Complex<f64>> = signal.iter().map(|s| Complex::new(*s, 0.0)).collect();
    if !spectrum.is_empty() {
        FftPlanner::new()
            .plan_fft_forward(spectrum.len())
            .process(&mut spectrum);
    }
    spectrum
}

/// inverse transform, scaled by `1/N` and reduced to the real part
pub(crate) fn inverse_real(mut spectrum: Vec<Complex<f64>>) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }
    FftPlanner::new().plan_fft_inverse(n).process(&mut spectrum);
    spectrum.into_iter().map(|c| c.re / n as f64).collect()
}

/// Pearson correlation coefficient of two equally long series, 0 when
/// either series has no variance
pub(crate) fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let (mut covariance, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }

    covariance / (var_a * var_b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_component_is_sum() {
        let spectrum = forward(&[1.0, 2.0, 3.0, 4.0]);

        assert!((spectrum[0].re - 10.0).abs() < 1e-9);
        assert!(spectrum[0].im.abs() < 1e-9);
    }

    #[test]
    fn correlation_of_scaled_and_inverted_series() {
        let a = [1.0, 2.0, 4.0, 8.0];
        let b: Vec<f64> = a.iter().map(|x| x * 3.0 + 1.0).collect();
        let c: Vec<f64> = a.iter().map(|x| -x).collect();

        assert!((correlation(&a, &b) - 1.0).abs() < 1e-12);
        assert!((correlation(&a, &c) + 1.0).abs() < 1e-12);
        assert_eq!(correlation(&a, &[5.0; 4]), 0.0);
        assert_eq!(correlation(&[], &[]), 0.0);
    }

    #[test]
    fn forward_inverse_roundtrip() {
        let signal: Vec<f64> = (0..64).map(|i| ((i * 7) % 13) as f64 - 6.0).collect();
        let restored = inverse_real(forward(&signal));

        for (a, b) in signal.iter().zip(&restored) {
            assert!((a - b).abs() < 1e-9, "{a} != {b}");
        }
    }
}
