//! Closed-form measures over word/term counts and the frequency spectrum.
//!
//! Notation: `w` = word count, `t` = term count, `V(i)` = number of terms occurring
//! exactly `i` times, `M2 = Σ i²·V(i)`.
//!
//! Every measure returns [`Error::DegenerateInput`] instead of `NaN`/`inf` when a
//! logarithm argument or denominator would be zero.
//!
//! References:
//! - Templin (1957): TTR
//! - Guiraud (1960): root TTR
//! - Carroll (1964): corrected TTR
//! - Herdan (1960, 1964): C; Herdan (1955): Vm
//! - Summer (1966), Dugast (1978), Maas (1972)
//! - Yule (1944), Tweedie & Baayen (1998): K, I
//! - Simpson (1949): D

use crate::text::LexicalRichness;
use crate::Error;

impl LexicalRichness {
    /// Type-token ratio: `t / w`.
    pub fn ttr(&self) -> Result<f64, Error> {
        self.require_words("ttr")?;
        Ok(self.term_count() as f64 / self.word_count() as f64)
    }

    /// Root TTR (Guiraud's R): `t / √w`.
    pub fn rttr(&self) -> Result<f64, Error> {
        self.require_words("rttr")?;
        Ok(self.term_count() as f64 / (self.word_count() as f64).sqrt())
    }

    /// Corrected TTR (Carroll): `t / √(2w)`.
    pub fn cttr(&self) -> Result<f64, Error> {
        self.require_words("cttr")?;
        Ok(self.term_count() as f64 / (2.0 * self.word_count() as f64).sqrt())
    }

    /// Herdan's C: `ln t / ln w`.
    pub fn herdan(&self) -> Result<f64, Error> {
        let (ln_w, ln_t) = self.log_counts("herdan")?;
        Ok(ln_t / ln_w)
    }

    /// Summer's S: `ln ln t / ln ln w`.
    pub fn summer(&self) -> Result<f64, Error> {
        let (ln_w, ln_t) = self.log_counts("summer")?;
        if self.term_count() < 2 {
            return Err(Self::degenerate("summer", "fewer than two terms"));
        }
        Ok(ln_t.ln() / ln_w.ln())
    }

    /// Dugast's U: `(ln w)² / (ln w − ln t)`.
    pub fn dugast(&self) -> Result<f64, Error> {
        if self.word_count() == self.term_count() {
            return Err(Self::degenerate("dugast", "word count equals term count"));
        }
        let (ln_w, ln_t) = self.log_counts("dugast")?;
        Ok(ln_w * ln_w / (ln_w - ln_t))
    }

    /// Maas's a²: `(ln w − ln t) / (ln w)²`. Lower means richer.
    pub fn maas(&self) -> Result<f64, Error> {
        let (ln_w, ln_t) = self.log_counts("maas")?;
        Ok((ln_w - ln_t) / (ln_w * ln_w))
    }

    /// Yule's K: `10⁴ · (M2 − w) / w²`. Lower means richer.
    pub fn yule_k(&self) -> Result<f64, Error> {
        self.require_words("yule_k")?;
        let w = self.word_count() as f64;
        Ok(1e4 * (self.m2() - w) / (w * w))
    }

    /// Yule's I: `t² / (M2 − t)`.
    pub fn yule_i(&self) -> Result<f64, Error> {
        let t = self.term_count() as f64;
        let denom = self.m2() - t;
        if denom <= 0.0 {
            return Err(Self::degenerate("yule_i", "no term occurs more than once"));
        }
        Ok(t * t / denom)
    }

    /// Herdan's Vm: `√(Σ V(i)·(i/w)² − 1/t)`.
    pub fn herdan_vm(&self) -> Result<f64, Error> {
        if self.term_count() == 0 {
            return Err(Self::degenerate("herdan_vm", "text has no terms"));
        }
        let w = self.word_count() as f64;
        let sum: f64 = self
            .frequency_spectrum()
            .into_iter()
            .map(|(i, v)| v as f64 * (i as f64 / w).powi(2))
            .sum();
        // Σ f² / w² ≥ 1/t always holds; clamp rounding noise below zero.
        Ok((sum - 1.0 / self.term_count() as f64).max(0.0).sqrt())
    }

    /// Simpson's D: `Σ V(i) · (i/w) · ((i − 1)/(w − 1))`.
    pub fn simpson_d(&self) -> Result<f64, Error> {
        if self.word_count() < 2 {
            return Err(Self::degenerate("simpson_d", "fewer than two words"));
        }
        let w = self.word_count() as f64;
        Ok(self
            .frequency_spectrum()
            .into_iter()
            .map(|(i, v)| {
                let i = i as f64;
                v as f64 * (i / w) * ((i - 1.0) / (w - 1.0))
            })
            .sum())
    }

    fn require_words(&self, measure: &'static str) -> Result<(), Error> {
        if self.word_count() == 0 {
            return Err(Self::degenerate(measure, "text is empty"));
        }
        Ok(())
    }

    /// `(ln w, ln t)`, rejecting texts where `ln w` is zero or `ln t` undefined.
    fn log_counts(&self, measure: &'static str) -> Result<(f64, f64), Error> {
        if self.term_count() == 0 {
            return Err(Self::degenerate(measure, "text is empty"));
        }
        if self.word_count() < 2 {
            return Err(Self::degenerate(measure, "fewer than two words"));
        }
        Ok((
            (self.word_count() as f64).ln(),
            (self.term_count() as f64).ln(),
        ))
    }

    fn m2(&self) -> f64 {
        self.frequency_spectrum()
            .into_iter()
            .map(|(i, v)| (i * i * v) as f64)
            .sum()
    }
}
