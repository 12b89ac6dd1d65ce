// src/stats.rs
//
// Small, dependency-free online statistics helper.
// Welford running mean/variance + max. Order-independent for the
// aggregates we report (mean, max), deterministic, ignores non-finite input.

#[derive(Debug, Clone, Copy)]
pub struct OnlineStats {
    n: u64,
    mean: f64,
    m2: f64,
    max: f64,
}

impl Default for OnlineStats {
    fn default() -> Self {
        Self {
            n: 0,
            mean: 0.0,
            m2: 0.0,
            max: f64::NEG_INFINITY,
        }
    }
}

impl OnlineStats {
    /// Adds a sample if finite. Non-finite samples are ignored.
    pub fn add(&mut self, x: f64) {
        if !x.is_finite() {
            return;
        }

        self.n += 1;
        self.max = self.max.max(x);

        // Welford online variance.
        let delta = x - self.mean;
        self.mean += delta / (self.n as f64);
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn max(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.max
        }
    }

    /// Population variance (divide by n).
    pub fn variance_population(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.m2 / (self.n as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_direct_population_variance() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut s = OnlineStats::default();
        for &x in &xs {
            s.add(x);
        }

        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;

        assert_eq!(s.n(), 5);
        assert!((s.mean() - mean).abs() < 1e-12);
        assert!((s.variance_population() - var).abs() < 1e-12);
        assert_eq!(s.max(), 5.0);
    }

    #[test]
    fn ignores_non_finite() {
        let mut s = OnlineStats::default();
        s.add(f64::NAN);
        s.add(f64::INFINITY);
        s.add(2.0);
        assert_eq!(s.n(), 1);
        assert_eq!(s.mean(), 2.0);
    }

    #[test]
    fn empty_is_zeroed() {
        let s = OnlineStats::default();
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.variance_population(), 0.0);
        assert_eq!(s.max(), 0.0);
    }
}
