//! vocd-D: lexical diversity from random-sampling TTR curves.
//!
//! TTR falls as sample size grows. McKee, Malvern & Richards model the fall with a single
//! parameter `D`:
//!
//! \[
//! \mathrm{TTR}(n, D) = \frac{D}{n}\left(\sqrt{1 + \frac{2n}{D}} - 1\right)
//! \]
//!
//! vocd-D estimates that curve empirically and reports the best-fitting `D`:
//! 1. For each sample size `n` in `35..=max_sample_size`, draw `samples_per_size` random
//!    samples of `n` tokens (without replacement) and average their TTRs.
//! 2. Fit `D` to the `(n, mean TTR)` points by nonlinear least squares.
//! 3. Repeat `iterations` times and average `D`.
//!
//! References:
//! - McKee, Malvern & Richards (2000), "Measuring vocabulary diversity using dedicated software".
//! - McCarthy & Jarvis (2007), "vocd: A theoretical and empirical evaluation".
//!
//! Notes:
//! - Every call owns its RNG ([`ChaCha8Rng`] seeded from [`VocdParams::seed`]); there is no
//!   global RNG state, so concurrent calls never interfere.
//! - `*_with_rng` entrypoints take a caller-supplied RNG instead.

use crate::text::LexicalRichness;
use crate::Error;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Smallest sample size on the curve.
pub const VOCD_MIN_SAMPLE_SIZE: usize = 35;

const FIT_INITIAL_D: f64 = 1.0;
const FIT_MAX_ITERATIONS: usize = 200;
const FIT_REL_TOLERANCE: f64 = 1e-10;
const FIT_MAX_DAMPING: f64 = 1e16;
// Past this the fit is treated as divergent.
const FIT_MAX_D: f64 = 1e9;

/// vocd-D parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocdParams {
    /// Largest sample size on the curve (inclusive). Must be at least 35.
    pub max_sample_size: usize,
    /// Random samples drawn per sample size.
    pub samples_per_size: usize,
    /// Independent curve fits averaged into the result.
    pub iterations: usize,
    /// RNG seed.
    pub seed: u64,
}

impl Default for VocdParams {
    fn default() -> Self {
        Self {
            max_sample_size: 50,
            samples_per_size: 100,
            iterations: 3,
            seed: 42,
        }
    }
}

impl VocdParams {
    /// Default parameters with a different seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// One point of the TTR-vs-sample-size curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Tokens per random sample.
    pub sample_size: usize,
    /// Mean TTR over the random samples of this size.
    pub empirical_ttr: f64,
    /// `ttr_nd(sample_size, d)` for the fitted `d`.
    pub fitted_ttr: f64,
}

/// Empirical and fitted curve from a single vocd-D iteration, for plotting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocdCurve {
    /// Best-fitting `D`.
    pub d: f64,
    /// One point per sample size, ascending.
    pub points: Vec<CurvePoint>,
}

/// Modelled TTR of an `n`-token sample from a text with diversity `d`.
///
/// Evaluated as `2 / (1 + √(1 + 2n/D))`, which equals the textbook form without its
/// cancellation for large `D`.
pub fn ttr_nd(n: f64, d: f64) -> f64 {
    2.0 / (1.0 + (1.0 + 2.0 * n / d).sqrt())
}

/// `d ttr_nd / dD`.
fn ttr_nd_grad(n: f64, d: f64) -> f64 {
    let s = (1.0 + 2.0 * n / d).sqrt();
    2.0 * n / (s * d * d * (1.0 + s) * (1.0 + s))
}

impl LexicalRichness {
    /// vocd-D, seeded from `params.seed`.
    pub fn vocd(&self, params: VocdParams) -> Result<f64, Error> {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        self.vocd_with_rng(params, &mut rng)
    }

    /// vocd-D using a caller-supplied RNG (`params.seed` is ignored).
    pub fn vocd_with_rng<R: Rng + ?Sized>(
        &self,
        params: VocdParams,
        rng: &mut R,
    ) -> Result<f64, Error> {
        self.check_vocd_params(&params)?;
        if params.iterations == 0 {
            return Err(Error::InvalidParameter {
                param: "iterations",
                message: "must be a positive integer; try iterations=3".to_string(),
            });
        }

        let mut d_sum = 0.0;
        for iteration in 0..params.iterations {
            let (sizes, ttrs) = self.sample_ttr_curve(&params, rng)?;
            let d = fit_d(&sizes, &ttrs)?;
            log::debug!("vocd iteration {iteration}: D = {d:.4}");
            d_sum += d;
        }
        Ok(d_sum / params.iterations as f64)
    }

    /// Curve data for one vocd-D iteration, seeded from `params.seed`.
    ///
    /// `params.iterations` is ignored.
    pub fn vocd_curve(&self, params: VocdParams) -> Result<VocdCurve, Error> {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        self.vocd_curve_with_rng(params, &mut rng)
    }

    /// Curve data for one vocd-D iteration using a caller-supplied RNG.
    pub fn vocd_curve_with_rng<R: Rng + ?Sized>(
        &self,
        params: VocdParams,
        rng: &mut R,
    ) -> Result<VocdCurve, Error> {
        self.check_vocd_params(&params)?;
        let (sizes, ttrs) = self.sample_ttr_curve(&params, rng)?;
        let d = fit_d(&sizes, &ttrs)?;
        let points = sizes
            .iter()
            .zip(&ttrs)
            .map(|(&n, &empirical_ttr)| CurvePoint {
                sample_size: n as usize,
                empirical_ttr,
                fitted_ttr: ttr_nd(n, d),
            })
            .collect();
        Ok(VocdCurve { d, points })
    }

    fn check_vocd_params(&self, params: &VocdParams) -> Result<(), Error> {
        if params.max_sample_size < VOCD_MIN_SAMPLE_SIZE {
            return Err(Error::InvalidParameter {
                param: "max_sample_size",
                message: format!(
                    "must be at least {VOCD_MIN_SAMPLE_SIZE}; try max_sample_size=50"
                ),
            });
        }
        if self.word_count() <= params.max_sample_size {
            return Err(Error::InvalidParameter {
                param: "max_sample_size",
                message: format!(
                    "text of {} tokens is too short to sample {} tokens",
                    self.word_count(),
                    params.max_sample_size
                ),
            });
        }
        if params.samples_per_size == 0 {
            return Err(Error::InvalidParameter {
                param: "samples_per_size",
                message: "must be a positive integer; try samples_per_size=100".to_string(),
            });
        }
        if self.term_count() == self.word_count() {
            return Err(Self::degenerate("vocd", "every token is distinct; TTR curve is flat"));
        }
        Ok(())
    }

    /// `(sample sizes, mean TTR per size)` for one pass over `35..=max_sample_size`.
    ///
    /// A curve with every mean TTR at 1 has no finite `D`.
    fn sample_ttr_curve<R: Rng + ?Sized>(
        &self,
        params: &VocdParams,
        rng: &mut R,
    ) -> Result<(Vec<f64>, Vec<f64>), Error> {
        let words = self.words();
        let mut sizes = Vec::with_capacity(params.max_sample_size - VOCD_MIN_SAMPLE_SIZE + 1);
        let mut ttrs = Vec::with_capacity(sizes.capacity());
        let mut distinct: HashSet<&str> = HashSet::with_capacity(params.max_sample_size);

        for size in VOCD_MIN_SAMPLE_SIZE..=params.max_sample_size {
            let mut ttr_sum = 0.0;
            for _ in 0..params.samples_per_size {
                distinct.clear();
                for idx in rand::seq::index::sample(rng, words.len(), size) {
                    distinct.insert(words[idx].as_str());
                }
                ttr_sum += distinct.len() as f64 / size as f64;
            }
            let mean = ttr_sum / params.samples_per_size as f64;
            log::trace!("vocd sample size {size}: mean TTR = {mean:.6}");
            sizes.push(size as f64);
            ttrs.push(mean);
        }
        if ttrs.iter().all(|&ttr| ttr == 1.0) {
            return Err(Self::degenerate(
                "vocd",
                "every sample is all-distinct; TTR curve is flat",
            ));
        }
        Ok((sizes, ttrs))
    }
}

fn sum_sq_residuals(xs: &[f64], ys: &[f64], d: f64) -> f64 {
    xs.iter()
        .zip(ys)
        .map(|(&n, &y)| (y - ttr_nd(n, d)).powi(2))
        .sum()
}

/// Least-squares `D` for `ys ≈ ttr_nd(xs, D)` (one-parameter Levenberg–Marquardt).
fn fit_d(xs: &[f64], ys: &[f64]) -> Result<f64, Error> {
    let mut d = FIT_INITIAL_D;
    let mut damping = 1e-3;
    let mut sse = sum_sq_residuals(xs, ys, d);

    for _ in 0..FIT_MAX_ITERATIONS {
        if sse == 0.0 {
            return Ok(d);
        }
        let (mut g, mut h) = (0.0, 0.0);
        for (&n, &y) in xs.iter().zip(ys) {
            let j = ttr_nd_grad(n, d);
            g += j * (y - ttr_nd(n, d));
            h += j * j;
        }
        if !(g.is_finite() && h.is_finite()) || h == 0.0 {
            return Err(Error::CurveFit(format!("degenerate jacobian at D = {d}")));
        }

        // Raise damping until a step lands at D > 0 and lowers the residual.
        loop {
            let step = g / (h * (1.0 + damping));
            let candidate = d + step;
            let candidate_sse = if candidate > 0.0 {
                sum_sq_residuals(xs, ys, candidate)
            } else {
                f64::INFINITY
            };

            if candidate_sse < sse {
                d = candidate;
                sse = candidate_sse;
                damping = (damping / 10.0).max(1e-12);
                if d > FIT_MAX_D {
                    return Err(Error::CurveFit(format!(
                        "D diverges (> {FIT_MAX_D:e}); sampled TTR curve is flat"
                    )));
                }
                if step.abs() <= FIT_REL_TOLERANCE * d {
                    return Ok(d);
                }
                break;
            }

            damping *= 10.0;
            if damping > FIT_MAX_DAMPING {
                // No descent direction left: local minimum.
                return Ok(d);
            }
        }
    }

    Err(Error::CurveFit(format!(
        "no convergence after {FIT_MAX_ITERATIONS} iterations (last D = {d})"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A text with a stable, moderately repetitive vocabulary.
    fn zipf_text(len: usize) -> LexicalRichness {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let words: Vec<String> = (0..len)
            .map(|_| {
                let rank = (1.0 / rng.random_range(0.005f64..1.0)).floor() as usize;
                format!("w{rank}")
            })
            .collect();
        LexicalRichness::from_tokens(words)
    }

    #[test]
    fn ttr_nd_shape() {
        // Large D approaches TTR 1; TTR falls with n.
        assert!(ttr_nd(40.0, 1e9) > 0.9999);
        assert!(ttr_nd(35.0, 50.0) > ttr_nd(50.0, 50.0));
        let textbook = (50.0 / 35.0) * ((1.0 + 70.0 / 50.0_f64).sqrt() - 1.0);
        assert!((ttr_nd(35.0, 50.0) - textbook).abs() < 1e-12);
    }

    #[test]
    fn grad_matches_finite_difference() {
        for &(n, d) in &[(35.0, 10.0), (50.0, 80.0), (42.0, 1.0)] {
            let h = 1e-6 * d;
            let numeric = (ttr_nd(n, d + h) - ttr_nd(n, d - h)) / (2.0 * h);
            assert!((ttr_nd_grad(n, d) - numeric).abs() < 1e-7);
        }
    }

    #[test]
    fn fit_recovers_exact_d() {
        let xs: Vec<f64> = (35..=50).map(|n| n as f64).collect();
        for true_d in [5.0, 42.0, 120.0] {
            let ys: Vec<f64> = xs.iter().map(|&n| ttr_nd(n, true_d)).collect();
            let d = fit_d(&xs, &ys).unwrap();
            assert!((d - true_d).abs() / true_d < 1e-6, "fit {d} for {true_d}");
        }
    }

    #[test]
    fn fit_fails_on_all_unique_curve() {
        let xs: Vec<f64> = (35..=50).map(|n| n as f64).collect();
        let ys = vec![1.0; xs.len()];
        assert!(matches!(fit_d(&xs, &ys), Err(Error::CurveFit(_))));
    }

    #[test]
    fn all_distinct_text_is_degenerate() {
        let lex = LexicalRichness::from_tokens((0..200).map(|i| format!("u{i}")));
        assert!(matches!(
            lex.vocd(VocdParams::default()),
            Err(Error::DegenerateInput { measure: "vocd", .. })
        ));
        assert!(matches!(
            lex.vocd_curve(VocdParams::default()),
            Err(Error::DegenerateInput { measure: "vocd", .. })
        ));
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let lex = zipf_text(400);
        let params = VocdParams::default();
        let a = lex.vocd(params).unwrap();
        let b = lex.vocd(params).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
        assert!(a.is_finite() && a > 0.0);

        let c = lex.vocd(VocdParams::with_seed(43)).unwrap();
        assert_ne!(a.to_bits(), c.to_bits());
    }

    #[test]
    fn curve_exposes_one_point_per_size() {
        let lex = zipf_text(300);
        let curve = lex.vocd_curve(VocdParams::default()).unwrap();
        assert_eq!(curve.points.len(), 16);
        assert_eq!(curve.points[0].sample_size, 35);
        assert_eq!(curve.points[15].sample_size, 50);
        for p in &curve.points {
            assert!(p.empirical_ttr > 0.0 && p.empirical_ttr <= 1.0);
            assert!((p.fitted_ttr - ttr_nd(p.sample_size as f64, curve.d)).abs() < 1e-15);
        }

        // A single-iteration vocd with the same seed fits the same curve.
        let single = VocdParams {
            iterations: 1,
            ..VocdParams::default()
        };
        assert_eq!(lex.vocd(single).unwrap(), curve.d);
    }

    #[test]
    fn rejects_short_text_and_bad_params() {
        let short = LexicalRichness::from_tokens((0..50).map(|i| format!("t{}", i % 7)));
        assert!(matches!(
            short.vocd(VocdParams::default()),
            Err(Error::InvalidParameter { param: "max_sample_size", .. })
        ));

        let lex = zipf_text(100);
        let defaults = VocdParams::default();
        let bad = [
            VocdParams {
                max_sample_size: 34,
                ..defaults
            },
            VocdParams {
                samples_per_size: 0,
                ..defaults
            },
            VocdParams {
                iterations: 0,
                ..defaults
            },
        ];
        for params in bad {
            assert!(matches!(lex.vocd(params), Err(Error::InvalidParameter { .. })));
        }
    }
}
