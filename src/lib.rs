//! `lexrich`: lexical richness (lexical diversity) measures.
//!
//! This crate computes vocabulary-variety statistics for a single text:
//! - closed-form ratios (`ratio`): TTR, Guiraud's R, Carroll's CTTR, Herdan, Summer,
//!   Dugast, Maas, Yule's K / I, Herdan's Vm, Simpson's D
//! - segmental averages (`segmental`): MSTTR, MATTR
//! - threshold factoring (`mtld`): MTLD
//! - hypergeometric sampling (`hdd`): HD-D
//! - random sampling + curve fitting (`vocd`): vocd-D
//!
//! Scope:
//! - One immutable engine per text ([`LexicalRichness`])
//! - Caller-provided token streams, or a small built-in tokenizer for raw text
//! - Deterministic results (vocd-D is seeded per call)
//!
//! Non-goals:
//! - Tokenization beyond simple lower-casing / punctuation splitting
//! - Plotting (vocd-D exposes its curve data, rendering is up to the caller)
//!
//! References:
//! - Templin (1957), Guiraud (1960), Carroll (1964), Herdan (1960): TTR family
//! - Johnson (1944): MSTTR; Covington & McFall (2010): MATTR
//! - McCarthy & Jarvis (2007, 2010): HD-D, MTLD
//! - McKee, Malvern & Richards (2000): vocd-D
//! - Tweedie & Baayen (1998): Yule's K / I, Herdan's Vm

pub mod hdd;
pub mod mtld;
pub mod ratio;
pub mod segmental;
pub mod text;
pub mod tokenize;
pub mod vocd;

pub use error::Error;
pub use segmental::MsttrParams;
pub use text::{LexicalRichness, TextInput};
pub use tokenize::{preprocess, tokenize, DefaultTokenizer, Pretokenized, Tokenizer};
pub use vocd::{ttr_nd, CurvePoint, VocdCurve, VocdParams};

mod error {
    /// Errors for lexical richness measures.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        /// Constructor input did not match the tokenizer setup.
        #[error("invalid input: {0}")]
        InvalidInput(&'static str),
        /// A measure parameter was out of range for this text.
        #[error("invalid parameter `{param}`: {message}")]
        InvalidParameter {
            /// Parameter name, as spelled in the measure's signature.
            param: &'static str,
            /// What was wrong, with a suggested value where one exists.
            message: String,
        },
        /// Text statistics leave the measure undefined (e.g. log of zero).
        #[error("{measure} is undefined for this text: {reason}")]
        DegenerateInput {
            /// Measure name.
            measure: &'static str,
            /// Which statistic made it undefined.
            reason: &'static str,
        },
        /// vocd-D least squares did not converge.
        #[error("curve fit failed: {0}")]
        CurveFit(String),
    }
}
