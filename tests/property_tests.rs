use lexrich::{LexicalRichness, MsttrParams, VocdParams};
use proptest::prelude::*;
use std::collections::HashSet;

/// Token streams over a small vocabulary, so repetition is common.
fn tokens(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(0u8..12, 1..max_len)
        .prop_map(|ids| ids.into_iter().map(|i| format!("w{i}")).collect())
}

fn ttr(segment: &[String]) -> f64 {
    segment.iter().collect::<HashSet<_>>().len() as f64 / segment.len() as f64
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

proptest! {
    #[test]
    fn prop_ttr_in_unit_interval(words in tokens(60)) {
        let all_distinct = words.iter().collect::<HashSet<_>>().len() == words.len();
        let lex = LexicalRichness::from_tokens(words);
        let ttr = lex.ttr().unwrap();

        prop_assert!(ttr > 0.0 && ttr <= 1.0);
        prop_assert_eq!(ttr == 1.0, all_distinct);
    }

    #[test]
    fn prop_mattr_full_window_is_ttr(words in tokens(60)) {
        let lex = LexicalRichness::from_tokens(words);
        prop_assert_eq!(lex.mattr(lex.word_count()).unwrap(), lex.ttr().unwrap());
    }

    #[test]
    fn prop_mattr_bounded(words in tokens(60), window in 1usize..60) {
        let lex = LexicalRichness::from_tokens(words);
        prop_assume!(window <= lex.word_count());
        let m = lex.mattr(window).unwrap();
        prop_assert!(m > 0.0 && m <= 1.0 + 1e-12);
    }

    #[test]
    fn prop_msttr_discard_averages_fewer_segments(
        words in tokens(80),
        window in 2usize..20,
    ) {
        let lex = LexicalRichness::from_tokens(words);
        let n = lex.word_count();
        prop_assume!(window < n && n % window != 0);

        let segment_ttrs: Vec<f64> = lex.words().chunks(window).map(ttr).collect();
        prop_assert_eq!(segment_ttrs.len(), n / window + 1);
        let full = &segment_ttrs[..n / window];

        // Discarding averages the n / window full segments; keeping adds the short tail.
        let dropped = lex.msttr(MsttrParams::new(window)).unwrap();
        let kept = lex.msttr(MsttrParams::keep_remainder(window)).unwrap();
        prop_assert!((dropped - mean(full)).abs() < 1e-12);
        prop_assert!((kept - mean(&segment_ttrs)).abs() < 1e-12);

        // Adding one segment moves the mean toward that segment's TTR.
        let tail = segment_ttrs[n / window];
        prop_assert!(kept >= dropped.min(tail) - 1e-12 && kept <= dropped.max(tail) + 1e-12);
    }

    #[test]
    fn prop_mtld_all_unique_is_word_count(len in 1usize..60, threshold in 0.0f64..0.999) {
        let lex = LexicalRichness::from_tokens((0..len).map(|i| format!("u{i}")));
        prop_assert_eq!(lex.mtld(threshold).unwrap(), len as f64);
    }

    #[test]
    fn prop_mtld_is_mean_of_directions(words in tokens(60), threshold in 0.5f64..0.9) {
        let forward = LexicalRichness::from_tokens(words.clone());
        let mut reversed_words = words;
        reversed_words.reverse();
        let reversed = LexicalRichness::from_tokens(reversed_words);

        // Reversing the text swaps the two directions; the mean is unchanged.
        let a = forward.mtld(threshold).unwrap();
        let b = reversed.mtld(threshold).unwrap();
        prop_assert!((a - b).abs() < 1e-9 * a.max(1.0));
    }

    #[test]
    fn prop_hdd_bounded_and_order_invariant(words in tokens(60), draws in 1usize..40) {
        let lex = LexicalRichness::from_tokens(words.clone());
        prop_assume!(draws < lex.word_count());
        let h = lex.hdd(draws).unwrap();
        prop_assert!(h >= 0.0 && h <= lex.term_count() as f64);

        let mut sorted = words;
        sorted.sort();
        let h_sorted = LexicalRichness::from_tokens(sorted).hdd(draws).unwrap();
        prop_assert!((h - h_sorted).abs() < 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_vocd_same_seed_identical(
        words in prop::collection::vec(0u8..60, 80..120),
        seed in any::<u64>(),
    ) {
        let lex = LexicalRichness::from_tokens(words.into_iter().map(|i| format!("w{i}")));
        let params = VocdParams {
            iterations: 1,
            samples_per_size: 20,
            ..VocdParams::with_seed(seed)
        };
        let a = lex.vocd(params).unwrap();
        let b = lex.vocd(params).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }
}
