use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Flat draw on `[lo, hi)`; returns `lo` when the interval is degenerate.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return lo;
    }
    lo + (hi - lo) * rng.gen::<f64>()
}

/// Isotropic unit direction: flat in `cos theta` and `phi`.
pub fn sample_isotropic<R: Rng + ?Sized>(rng: &mut R) -> [f64; 3] {
    let (mu, phi) = sample_polar(rng);
    direction_from_polar(mu, phi)
}

/// Draw `(cos theta, phi)` uniformly on `[-1, 1) x [0, 2pi)`.
pub fn sample_polar<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let mu = uniform(rng, -1.0, 1.0);
    let phi = uniform(rng, 0.0, 2.0 * std::f64::consts::PI);
    (mu, phi)
}

pub fn direction_from_polar(mu: f64, phi: f64) -> [f64; 3] {
    let sin_theta = (1.0 - mu * mu).max(0.0).sqrt();
    [sin_theta * phi.cos(), sin_theta * phi.sin(), mu]
}

/// Shape of the per-event time jitter around the configured mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JitterShape {
    /// Flat on `[mean - jitter/2, mean + jitter/2]`
    #[default]
    Flat,
    /// Gaussian with sigma = jitter
    Gaussian,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeDistribution {
    pub mean: f64,
    pub jitter: f64,
    pub shape: JitterShape,
}

impl TimeDistribution {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.jitter <= 0.0 {
            return self.mean;
        }
        match self.shape {
            JitterShape::Flat => uniform(
                rng,
                self.mean - 0.5 * self.jitter,
                self.mean + 0.5 * self.jitter,
            ),
            // jitter > 0 is checked above, so the distribution is always valid
            JitterShape::Gaussian => match Normal::new(self.mean, self.jitter) {
                Ok(normal) => normal.sample(rng),
                Err(_) => self.mean,
            },
        }
    }
}
