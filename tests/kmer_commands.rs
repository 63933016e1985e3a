use std::fs;
use std::path::Path;

use rlstats::command::{AggregateKmers, FilterKmers, ThresholdKmers};

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let p = dir.join(name);
    fs::write(&p, content).unwrap();
    p
}

#[test]
fn test_aggregate_merges_reverse_complements() {
    let dir = tempfile::tempdir().unwrap();
    let path_in = write(
        dir.path(),
        "stats.csv",
        "AAAA,1,0,0,0,0,0,0,3,1,\nTTTT,2,1,0,0,0,0,0,4,0,\nACGT,0,0,0,0,0,0,0,7,0,\n",
    );
    let path_out = dir.path().join("stats_bidirectional.csv");

    AggregateKmers::run(&AggregateKmers {
        path_in,
        path_out: path_out.clone(),
    })
    .unwrap();

    let out = fs::read_to_string(&path_out).unwrap();
    assert_eq!(out, "AAAA,3,1,0,0,0,0,0,7,1\nACGT,0,0,0,0,0,0,0,7,0\n");
}

#[test]
fn test_aggregate_reports_bad_line() {
    let dir = tempfile::tempdir().unwrap();
    let path_in = write(
        dir.path(),
        "bad.csv",
        "AAAA,1,0,0,0,0,0,0,3,1\nAANA,1,0,0,0,0,0,0,3,1\n",
    );

    let err = AggregateKmers::run(&AggregateKmers {
        path_in,
        path_out: dir.path().join("bad_bidirectional.csv"),
    })
    .unwrap_err();

    let msg = format!("{:#}", err);
    assert!(msg.contains("line 2"), "{}", msg);
    assert!(err.downcast_ref::<rlstats::Error>().is_some());
}

#[test]
fn test_filter_drops_unaligned() {
    let dir = tempfile::tempdir().unwrap();
    let path_in = write(
        dir.path(),
        "stats.csv",
        "AAAA,5,0,0,0,0,0,0,0,0\nACGT,5,0,0,0,0,0,0,4,1\nCCCC,0,0,1,0,0,0,0,0,0\n",
    );
    let path_out = dir.path().join("stats_filtered.csv");

    let stats = FilterKmers::run(&FilterKmers {
        path_in,
        path_out: path_out.clone(),
    })
    .unwrap();

    assert_eq!(stats.num_kept, 2);
    assert_eq!(stats.num_dropped, 1);
    let out = fs::read_to_string(&path_out).unwrap();
    assert_eq!(out, "ACGT,5,0,0,0,0,0,0,4,1\nCCCC,0,0,1,0,0,0,0,0,0\n");
}

#[test]
fn test_threshold_selects_and_names_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let path_in = write(
        dir.path(),
        "stats.csv",
        //identities 0.9, 0.5, 1.0 (with 50 matches), undefined
        "AAAA,0,0,0,0,0,0,0,9,1\nACGT,0,1,0,0,0,0,0,1,0\nCCCC,0,0,0,0,0,0,0,50,0\nGGGG,3,0,0,0,0,0,0,0,0\n",
    );

    let params = ThresholdKmers::new(&path_in, dir.path(), 0.8, Some(20));
    assert_eq!(
        params.path_out_stats,
        dir.path().join("stats_identity-0.8_match-20.csv")
    );
    assert_eq!(
        params.path_out_kmers,
        dir.path().join("stats_identity-0.8_match-20_KMERS_ONLY.csv")
    );

    let stats = ThresholdKmers::run(&params).unwrap();
    assert_eq!(stats.num_found, 1);
    assert_eq!(stats.num_unaligned, 1);

    let out = fs::read_to_string(&params.path_out_stats).unwrap();
    assert_eq!(out, "AAAA,0,0,0,0,0,0,0,9,1,0.9\n");
    let kmers = fs::read_to_string(&params.path_out_kmers).unwrap();
    assert_eq!(kmers, "AAAA\n");
}

#[test]
fn test_threshold_without_match_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    let path_in = write(
        dir.path(),
        "stats.csv",
        "AAAA,0,0,0,0,0,0,0,9,1\nCCCC,0,0,0,0,0,0,0,50,0\n",
    );

    let params = ThresholdKmers::new(&path_in, dir.path(), 0.5, None);
    assert_eq!(params.path_out_stats, dir.path().join("stats_identity-0.5.csv"));

    let stats = ThresholdKmers::run(&params).unwrap();
    assert_eq!(stats.num_found, 2);
}
