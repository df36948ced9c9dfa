//! Segment-averaged TTR: MSTTR (non-overlapping chunks) and MATTR (sliding window).
//!
//! References:
//! - Johnson (1944): mean segmental TTR.
//! - Covington (2007), Covington & McFall (2010): moving-average TTR.

use crate::text::{slice_ttr, LexicalRichness};
use crate::Error;
use std::collections::HashMap;

/// Default MATTR window.
pub const MATTR_DEFAULT_WINDOW: usize = 100;

/// MSTTR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MsttrParams {
    /// Tokens per segment.
    pub segment_window: usize,
    /// Drop a trailing segment shorter than `segment_window`.
    pub discard: bool,
}

impl Default for MsttrParams {
    fn default() -> Self {
        Self {
            segment_window: 100,
            discard: true,
        }
    }
}

impl MsttrParams {
    /// Segments of `segment_window` tokens, short remainder discarded.
    pub fn new(segment_window: usize) -> Self {
        Self {
            segment_window,
            discard: true,
        }
    }

    /// Segments of `segment_window` tokens, short remainder averaged in.
    pub fn keep_remainder(segment_window: usize) -> Self {
        Self {
            segment_window,
            discard: false,
        }
    }
}

impl LexicalRichness {
    /// Mean segmental TTR.
    ///
    /// Requires `0 < segment_window < word_count`.
    pub fn msttr(&self, params: MsttrParams) -> Result<f64, Error> {
        let window = params.segment_window;
        let n = self.word_count();
        if n < 2 {
            return Err(Error::InvalidParameter {
                param: "segment_window",
                message: format!("text of {n} tokens is too short; MSTTR needs at least 2 tokens"),
            });
        }
        if window == 0 {
            return Err(Error::InvalidParameter {
                param: "segment_window",
                message: format!("must be a positive integer; try segment_window={}", n / 2),
            });
        }
        if window >= n {
            return Err(Error::InvalidParameter {
                param: "segment_window",
                message: format!(
                    "must be smaller than the text size of {n}; try segment_window={}",
                    n / 2
                ),
            });
        }

        let scores: Vec<f64> = self
            .words()
            .chunks(window)
            .filter(|segment| !params.discard || segment.len() == window)
            .map(slice_ttr)
            .collect();
        // window < n, so at least one full segment survives.
        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Moving-average TTR over every window of `window_size` consecutive tokens.
    ///
    /// Requires `0 < window_size <= word_count`.
    pub fn mattr(&self, window_size: usize) -> Result<f64, Error> {
        let n = self.word_count();
        if n == 0 {
            return Err(Error::InvalidParameter {
                param: "window_size",
                message: "text is empty; MATTR needs at least 1 token".to_string(),
            });
        }
        if window_size == 0 {
            return Err(Error::InvalidParameter {
                param: "window_size",
                message: format!("must be a positive integer; try window_size={}", (n / 2).max(1)),
            });
        }
        if window_size > n {
            return Err(Error::InvalidParameter {
                param: "window_size",
                message: format!(
                    "must not exceed the text size of {n}; try window_size={}",
                    (n / 2).max(1)
                ),
            });
        }
        if window_size == n {
            return self.ttr();
        }

        let words = self.words();
        let mut counts: HashMap<&str, usize> = HashMap::with_capacity(window_size);
        for w in &words[..window_size] {
            *counts.entry(w.as_str()).or_insert(0) += 1;
        }

        let mut distinct_sum = counts.len();
        for (outgoing, incoming) in words.iter().zip(&words[window_size..]) {
            if let Some(c) = counts.get_mut(outgoing.as_str()) {
                *c -= 1;
                if *c == 0 {
                    counts.remove(outgoing.as_str());
                }
            }
            *counts.entry(incoming.as_str()).or_insert(0) += 1;
            distinct_sum += counts.len();
        }

        let windows = n - window_size + 1;
        Ok(distinct_sum as f64 / (windows * window_size) as f64)
    }
}
