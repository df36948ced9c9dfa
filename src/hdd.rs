//! Hypergeometric distribution diversity (HD-D).
//!
//! For each term with frequency `f` in a text of `N` tokens, take the probability that a
//! random draw of `n` tokens (without replacement) contains the term at least once:
//!
//! \[
//! p_t = 1 - \frac{\binom{N - f}{n}}{\binom{N}{n}}
//! \]
//!
//! HD-D is \( \sum_t p_t / n \), i.e. the expected TTR of an `n`-token sample.
//!
//! The binomial ratio is evaluated in log space (`statrs` log-binomials), so it does not
//! overflow on long texts.
//!
//! References:
//! - McCarthy & Jarvis (2007), "vocd: A theoretical and empirical evaluation", pp. 465-466.

use crate::text::LexicalRichness;
use crate::Error;
use statrs::function::factorial::ln_binomial;

/// Default sample size.
pub const HDD_DEFAULT_DRAWS: usize = 42;

impl LexicalRichness {
    /// HD-D with samples of `draws` tokens, `0 < draws < word_count`.
    pub fn hdd(&self, draws: usize) -> Result<f64, Error> {
        let n = self.word_count();
        if n < 2 {
            return Err(Error::InvalidParameter {
                param: "draws",
                message: format!("text of {n} tokens is too short; HD-D needs at least 2 tokens"),
            });
        }
        if draws == 0 || draws >= n {
            let suggestion = if self.term_count() < HDD_DEFAULT_DRAWS {
                n / 2
            } else {
                HDD_DEFAULT_DRAWS.min(n - 1)
            };
            return Err(Error::InvalidParameter {
                param: "draws",
                message: format!(
                    "must be a positive integer smaller than the text size of {n}; try draws={suggestion}"
                ),
            });
        }

        Ok(self
            .term_frequencies()
            .into_values()
            .map(|freq| (1.0 - prob_absent(n, freq, draws)) / draws as f64)
            .sum())
    }
}

/// `P(X = 0)` for `X ~ Hypergeometric(population, successes, draws)`.
fn prob_absent(population: usize, successes: usize, draws: usize) -> f64 {
    let failures = population - successes;
    if failures < draws {
        return 0.0;
    }
    let (population, failures, draws) = (population as u64, failures as u64, draws as u64);
    // C(N - f, n) / C(N, n)
    (ln_binomial(failures, draws) - ln_binomial(population, draws))
        .exp()
        .min(1.0)
}
