//! Measure of Textual Lexical Diversity (MTLD).
//!
//! The text is cut into "factors": maximal runs whose running TTR stays above a threshold.
//! MTLD is the mean factor length, computed front-to-back and back-to-front and averaged.
//!
//! References:
//! - McCarthy (2005); McCarthy & Jarvis (2010), "MTLD, vocd-D, and HD-D", p. 385
//!   (recommended threshold range 0.660 to 0.750).

use crate::text::LexicalRichness;
use crate::Error;
use std::collections::HashSet;

/// Default factor threshold.
pub const MTLD_DEFAULT_THRESHOLD: f64 = 0.72;

impl LexicalRichness {
    /// MTLD with the given factor threshold, `0 <= threshold < 1`.
    pub fn mtld(&self, threshold: f64) -> Result<f64, Error> {
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(Error::InvalidParameter {
                param: "threshold",
                message: format!(
                    "must be in [0, 1), got {threshold}; try threshold={MTLD_DEFAULT_THRESHOLD}"
                ),
            });
        }
        if self.word_count() == 0 {
            return Err(Self::degenerate("mtld", "text is empty"));
        }

        let forward = self.directional_mtld(self.words().iter(), threshold);
        let reverse = self.directional_mtld(self.words().iter().rev(), threshold);
        Ok((forward + reverse) / 2.0)
    }

    fn directional_mtld<'a>(
        &self,
        words: impl Iterator<Item = &'a String>,
        threshold: f64,
    ) -> f64 {
        let mut terms: HashSet<&str> = HashSet::new();
        let mut counter = 0usize;
        let mut factors = 0.0;
        let mut ttr = 1.0;

        for word in words {
            counter += 1;
            terms.insert(word.as_str());
            ttr = terms.len() as f64 / counter as f64;
            // The token that pulls TTR down to the threshold closes its own factor.
            if ttr <= threshold {
                factors += 1.0;
                counter = 0;
                terms.clear();
            }
        }

        // Partial factor: how far the open segment's TTR got toward the threshold.
        if counter > 0 {
            factors += (1.0 - ttr) / (1.0 - threshold);
        }

        // Never crossed the threshold (and the open segment was all-unique).
        if factors == 0.0 {
            let global = self.term_count() as f64 / self.word_count() as f64;
            factors = if global == 1.0 {
                1.0
            } else {
                (1.0 - global) / (1.0 - threshold)
            };
        }

        self.word_count() as f64 / factors
    }
}
