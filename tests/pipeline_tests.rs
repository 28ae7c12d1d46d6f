use bigramstat::config::{Config, TableParams};
use bigramstat::corpus;
use bigramstat::error::BigramError;
use bigramstat::pipeline::{self, count_text, count_tokens, count_tokens_parallel};
use bigramstat::ranker::Ranker;
use rstest::rstest;
use std::collections::BTreeMap;
use std::fs;

const SAMPLE: &str = "The Cat Sat. The cat ran.";

fn as_map(table: &bigramstat::table::BigramTable) -> BTreeMap<String, u64> {
    table
        .entries()
        .map(|e| (e.bigram().to_string(), e.frequency()))
        .collect()
}

#[test]
fn test_case_folded_sample_counts() {
    let table = count_text(SAMPLE, &TableParams::default()).unwrap();
    let counts = as_map(&table);

    let expected: BTreeMap<String, u64> = [
        ("the cat", 2),
        ("cat sat", 1),
        ("sat the", 1),
        ("cat ran", 1),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    assert_eq!(counts, expected);

    let ranked = Ranker::default().rank_table(&table);
    assert_eq!(ranked.len(), 4);
    let first = ranked.get(0).unwrap();
    assert_eq!((first.bigram(), first.frequency()), ("the cat", 2));
    assert!(ranked.iter().skip(1).all(|(_, f)| f == 1));
}

#[rstest]
#[case("")]
#[case("   ...  ")]
#[case("lonely")]
#[case("  (Lonely)!  ")]
fn test_degenerate_input_yields_empty_table(#[case] text: &str) {
    let table = count_text(text, &TableParams::default()).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.total_observations(), 0);
}

#[test]
fn test_pair_count_is_tokens_minus_one() {
    let text = "one two three, two three four; three four five - one two";
    let lowered = corpus::normalized(text);
    let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();

    let table = count_tokens(&tokens, &TableParams::default()).unwrap();
    assert_eq!(table.total_observations(), tokens.len() as u64 - 1);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(8)]
#[case(64)]
fn test_parallel_matches_sequential(#[case] threads: usize) {
    let text = "a b c a b c d a b a b c d e f a b c ".repeat(25);
    let lowered = corpus::normalized(&text);
    let tokens: Vec<&str> = corpus::tokenize(&lowered).collect();

    let sequential = count_tokens(&tokens, &TableParams::default()).unwrap();
    let params = TableParams {
        threads,
        ..TableParams::default()
    };
    let parallel = count_tokens_parallel(&tokens, &params).unwrap();

    assert_eq!(as_map(&parallel), as_map(&sequential));
    assert_eq!(parallel.total_observations(), tokens.len() as u64 - 1);
}

#[test]
fn test_parallel_handles_tiny_inputs() {
    let params = TableParams {
        threads: 4,
        ..TableParams::default()
    };
    assert!(count_tokens_parallel(&[], &params).unwrap().is_empty());
    assert!(count_tokens_parallel(&["x"], &params).unwrap().is_empty());
    assert_eq!(
        count_tokens_parallel(&["x", "y"], &params).unwrap().get("x y"),
        Some(1)
    );
}

#[test]
fn test_run_writes_ranked_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("corpus.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, SAMPLE).unwrap();

    let summary = pipeline::run(&Config::default(), &input, &output).unwrap();
    assert_eq!(summary.tokens, 6);
    assert_eq!(summary.distinct, 4);
    assert_eq!(summary.stats.total_observations, 5);

    let report = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Bigram Frequency");
    assert_eq!(lines[1], "the cat: 2");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_run_on_empty_corpus_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "").unwrap();

    pipeline::run(&Config::default(), &input, &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "Bigram Frequency\n");
}

#[test]
fn test_missing_input_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.txt");
    let output = dir.path().join("output.txt");

    let err = pipeline::run(&Config::default(), &input, &output).unwrap_err();
    assert!(matches!(err, BigramError::Input { .. }), "{:?}", err);
    assert!(!output.exists());
}

#[test]
fn test_counts_are_stable_across_configurations() {
    let text = fs::read_to_string(file!()).unwrap();
    let baseline = as_map(&count_text(&text, &TableParams::default()).unwrap());

    for (bucket_count, fixed_buckets, threads) in [(1, true, 1), (13, false, 1), (1000, true, 4)] {
        let params = TableParams {
            bucket_count,
            fixed_buckets,
            threads,
            ..TableParams::default()
        };
        let counts = as_map(&count_text(&text, &params).unwrap());
        assert_eq!(counts, baseline, "buckets={} threads={}", bucket_count, threads);
    }
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("latin1.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, b"The \xff cat sat. The cat sat.").unwrap();

    let summary = pipeline::run(&Config::default(), &input, &output).unwrap();
    assert_eq!(summary.tokens, 7);

    let report = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Bigram Frequency");
    assert_eq!(lines[1], "cat sat: 2");
    assert!(lines.contains(&"the \u{FFFD}: 1"), "{:?}", lines);
    assert!(lines.contains(&"\u{FFFD} cat: 1"), "{:?}", lines);
}
