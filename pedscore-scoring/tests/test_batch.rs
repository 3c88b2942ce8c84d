//! End-to-end scoring of the fixture pedigrees: loading, pairing, scoring
//! and exporting through the public API.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;

use pedscore_core::Pedigree;
use pedscore_scoring::{
    BatchOptions, PairEntry, PairOutcome, ScoreBand, ScoringPolicy, Side, Tier, compare_files,
    compare_pedigrees, discover_pairs, run_batch, write_batch_csv,
};

fn data_path(rel: &str) -> PathBuf {
    PathBuf::from("../tests/data").join(rel)
}

#[fixture]
fn policy() -> ScoringPolicy {
    ScoringPolicy::default()
}

#[rstest]
fn test_fixture_pair_score(policy: ScoringPolicy) {
    let report = compare_files(
        &data_path("pedigree/small_golden.json"),
        &data_path("pedigree/small_detectron.json"),
        &policy,
    )
    .unwrap();

    assert_eq!(report.golden_file, "small_golden.json");
    assert_eq!(report.test_file, "small_detectron.json");
    assert!((report.foundation.raw_deduction - 2.549450549).abs() < 1e-6);
    assert!((report.relationship.raw_deduction - 7.0).abs() < 1e-9);
    assert!((report.attribute.raw_deduction - 4.0).abs() < 1e-9);
    assert!((report.total_deduction - 4.474725275).abs() < 1e-6);
    assert!((report.final_score - 95.525274725).abs() < 1e-6);
    assert_eq!(report.band, ScoreBand::Excellent);

    let divorces = report
        .deltas_for(Tier::Relationship)
        .find(|d| d.metric == "divorces")
        .unwrap();
    assert_eq!((divorces.golden, divorces.test, divorces.difference), (1, 0, 1));
}

#[rstest]
fn test_fixture_pair_with_legacy_policy() {
    let policy = ScoringPolicy::try_from(data_path("config/legacy.toml").as_path()).unwrap();
    let report = compare_files(
        &data_path("pedigree/small_golden.json"),
        &data_path("pedigree/small_detectron.json"),
        &policy,
    )
    .unwrap();

    assert!((report.foundation.raw_deduction - 1.549450549).abs() < 1e-6);
    assert!((report.relationship.raw_deduction - 24.0).abs() < 1e-9);
    assert!((report.attribute.raw_deduction - 2.0).abs() < 1e-9);
    assert!((report.final_score - 89.425274725).abs() < 1e-6);
    assert_eq!(report.band, ScoreBand::Good);
}

#[rstest]
#[case("pedigree/small_golden.json")]
#[case("pedigree/small_detectron.json")]
#[case("pedigree/updated.json")]
fn test_self_comparison_is_perfect(policy: ScoringPolicy, #[case] rel: &str) {
    let pedigree = Pedigree::try_from(data_path(rel)).unwrap();
    let report = compare_pedigrees(&pedigree, &pedigree, &policy);
    assert_eq!(report.final_score, 100.0);
    assert!(report.deltas.iter().all(|d| d.deduction == 0.0));
}

#[rstest]
fn test_score_ignores_node_order(policy: ScoringPolicy) {
    let golden = Pedigree::try_from(data_path("pedigree/small_golden.json")).unwrap();
    let test = Pedigree::try_from(data_path("pedigree/small_detectron.json")).unwrap();

    let mut reversed = test.clone();
    reversed.nodes.reverse();

    let a = compare_pedigrees(&golden, &test, &policy);
    let b = compare_pedigrees(&golden, &reversed, &policy);
    assert_eq!(a.final_score, b.final_score);
    assert_eq!(a.deltas, b.deltas);
}

#[rstest]
fn test_discover_pairs() {
    let pairs = discover_pairs(&data_path("batch/golden"), &data_path("batch/detectron")).unwrap();

    let ids: Vec<&str> = pairs.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "10"]);

    assert!(matches!(pairs[0], PairEntry::Complete { .. }));
    assert!(matches!(
        pairs[2],
        PairEntry::Missing {
            which: Side::Candidate,
            ..
        }
    ));
    assert!(matches!(
        pairs[3],
        PairEntry::Missing {
            which: Side::Golden,
            ..
        }
    ));
}

#[rstest]
#[case(None)]
#[case(Some(1))]
#[case(Some(4))]
fn test_run_batch(policy: ScoringPolicy, #[case] threads: Option<usize>) {
    let pairs = discover_pairs(&data_path("batch/golden"), &data_path("batch/detectron")).unwrap();
    let options = BatchOptions {
        threads,
        show_progress: false,
    };
    let records = run_batch(&pairs, &policy, &options).unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "10"]);

    let first = records[0].report().unwrap();
    assert!((first.final_score - 95.525274725).abs() < 1e-6);
    assert_eq!(records[1].report().unwrap().final_score, 100.0);
    assert!(matches!(records[2].outcome, PairOutcome::Skipped(_)));
    assert!(matches!(records[3].outcome, PairOutcome::Skipped(_)));
    assert!(matches!(records[4].outcome, PairOutcome::Failed(_)));
    assert_eq!(records[4].golden_file, "10_golden.json");
}

#[rstest]
fn test_batch_to_csv(policy: ScoringPolicy) {
    let pairs = discover_pairs(&data_path("batch/golden"), &data_path("batch/detectron")).unwrap();
    let records = run_batch(&pairs, &policy, &BatchOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results.csv");
    write_batch_csv(&records, Path::new(&out)).unwrap();

    let text = read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("1_golden.json,1_detectron.json,95.53,"));
    assert!(lines[2].starts_with("2_golden.json,2_detectron.json,100.00,"));
    assert!(lines[5].starts_with("10_golden.json,10_detectron.json,Error,"));
}
