use bigramstat::config::TableParams;
use bigramstat::corpus;
use bigramstat::pipeline::{count_tokens, count_tokens_parallel};
use bigramstat::ranker::{Ranker, SortStrategy, TieBreak};
use bigramstat::table::HashKind;
use proptest::prelude::*;
use std::collections::BTreeMap;

// --- STRATEGIES ---

// Small vocabulary so bigrams repeat and ties are common
prop_compose! {
    fn arb_words()(
        words in proptest::collection::vec("[a-eA-E]{1,3}", 0..200)
    ) -> Vec<String> {
        words
    }
}

prop_compose! {
    fn arb_corpus()(
        words in arb_words(),
        seps in proptest::collection::vec(prop_oneof![
            Just(" "), Just(", "), Just(".\n"), Just(" - "), Just("\t("), Just(")! ")
        ], 200)
    ) -> String {
        let mut text = String::new();
        for (w, s) in words.iter().zip(seps.iter().cycle()) {
            text.push_str(w);
            text.push_str(s);
        }
        text
    }
}

prop_compose! {
    fn arb_params()(
        bucket_count in 1usize..300,
        fixed_buckets in any::<bool>(),
        fnv in any::<bool>(),
        max_load_factor in 0.25f64..8.0,
    ) -> TableParams {
        TableParams {
            bucket_count,
            fixed_buckets,
            max_load_factor,
            hash: if fnv { HashKind::Fnv } else { HashKind::Djb2 },
            threads: 1,
        }
    }
}

fn tokens_of(text: &str) -> (String, usize) {
    let lowered = corpus::normalized(text);
    let n = corpus::tokenize(&lowered).count();
    (lowered, n)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_count_conservation(text in arb_corpus(), params in arb_params()) {
        let (lowered, n) = tokens_of(&text);
        let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();
        let table = count_tokens(&tokens, &params).unwrap();

        let sum: u64 = table.entries().map(|e| e.frequency()).sum();
        prop_assert_eq!(sum, n.saturating_sub(1) as u64);
        prop_assert_eq!(sum, table.total_observations());
        prop_assert_eq!(table.all_entries().len(), table.entry_count());
    }

    #[test]
    fn test_counts_independent_of_table_shape(text in arb_corpus(), params in arb_params()) {
        let (lowered, _) = tokens_of(&text);
        let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();

        let reference: BTreeMap<String, u64> = count_tokens(&tokens, &TableParams::default())
            .unwrap()
            .entries()
            .map(|e| (e.bigram().to_string(), e.frequency()))
            .collect();
        let got: BTreeMap<String, u64> = count_tokens(&tokens, &params)
            .unwrap()
            .entries()
            .map(|e| (e.bigram().to_string(), e.frequency()))
            .collect();

        prop_assert_eq!(got, reference);
    }

    #[test]
    fn test_parallel_conserves_counts(text in arb_corpus(), threads in 2usize..9) {
        let (lowered, n) = tokens_of(&text);
        let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();
        let params = TableParams { threads, ..TableParams::default() };
        let table = count_tokens_parallel(&tokens, &params).unwrap();

        prop_assert_eq!(table.total_observations(), n.saturating_sub(1) as u64);
    }

    #[test]
    fn test_ranked_list_is_sorted_permutation(
        text in arb_corpus(),
        params in arb_params(),
        bubble in any::<bool>(),
        lexical in any::<bool>(),
    ) {
        let (lowered, _) = tokens_of(&text);
        let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();
        let table = count_tokens(&tokens, &params).unwrap();

        let strategy = if bubble { SortStrategy::Bubble } else { SortStrategy::Merge };
        let tie_break = if lexical { TieBreak::Lexical } else { TieBreak::None };
        let ranked = Ranker::new(strategy, tie_break).rank_table(&table);

        prop_assert_eq!(ranked.len(), table.entry_count());
        let freqs: Vec<u64> = ranked.iter().map(|(_, f)| f).collect();
        prop_assert!(freqs.windows(2).all(|w| w[0] >= w[1]));

        let mut a: Vec<(&str, u64)> = ranked.iter().collect();
        let mut b: Vec<(&str, u64)> = table.entries().map(|e| (e.bigram(), e.frequency())).collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }
}
