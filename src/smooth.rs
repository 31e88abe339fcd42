// src/smooth.rs
// 1-D Gaussian kernel smoothing with mirrored edges.

/// Normalised Gaussian weights over `-radius..=radius`,
/// `radius = round(truncate * sigma)`.
pub fn gaussian_kernel(sigma: f64, truncate: f64) -> Vec<f64> {
    let radius = (truncate * sigma + 0.5) as i64;
    if sigma <= 0.0 || radius == 0 {
        return vec![1.0];
    }
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

/// Index into `0..n` for a position past either edge, mirroring about the
/// edge sample (`d c b a | a b c d | d c b a`).
fn reflect(i: i64, n: i64) -> usize {
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m < n { m } else { period - 1 - m }) as usize
}

/// Smooth `values` with a Gaussian kernel. Output has the same length.
pub fn gaussian_filter1d(values: &[f64], sigma: f64, truncate: f64) -> Vec<f64> {
    let n = values.len() as i64;
    if n == 0 {
        return Vec::new();
    }
    let kernel = gaussian_kernel(sigma, truncate);
    let radius = (kernel.len() / 2) as i64;

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * values[reflect(i + k as i64 - radius, n)])
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let k = gaussian_kernel(3.0, 4.0);
        assert_eq!(k.len(), 25);
        assert!((k.iter().sum::<f64>() - 1.0).abs() < EPS);
        for i in 0..k.len() / 2 {
            assert!((k[i] - k[k.len() - 1 - i]).abs() < EPS);
        }
        assert!(k[12] > k[11]);
    }

    #[test]
    fn reflection_mirrors_edges() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-2, 4), 1);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(5, 4), 2);
        // further than one period away
        assert_eq!(reflect(-9, 4), 0);
        assert_eq!(reflect(0, 1), 0);
        assert_eq!(reflect(7, 1), 0);
    }

    #[test]
    fn constant_series_is_unchanged() {
        let out = gaussian_filter1d(&[5.0; 10], 3.0, 4.0);
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|v| (v - 5.0).abs() < EPS));
    }

    #[test]
    fn smoothing_preserves_mean_of_symmetric_step() {
        let input = [-10.0, -10.0, -10.0, 10.0, 10.0, 10.0];
        let out = gaussian_filter1d(&input, 1.0, 4.0);
        assert!(out[0] < 0.0 && out[5] > 0.0);
        assert!((out[2] + out[3]).abs() < EPS);
        assert!(out[2].abs() < 10.0);
        assert!(gaussian_filter1d(&[], 3.0, 4.0).is_empty());
    }
}
