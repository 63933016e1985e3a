use std::fs;

use rlstats::command::SamIdentity;

const SAM: &str = "@HD\tVN:1.6\tSO:unsorted
@SQ\tSN:chr1\tLN:1000
r1\t0\tchr1\t1\t60\t10=2X3I1D5=\t*\t0\t0\tACGTACGTACGTACGTACGT\t*
r2\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\t*
r3\t16\tchr1\t100\t60\t2S4=600D4=\t*\t0\t0\tACGTACGTAC\t*
r4\t256\tchr1\t200\t60\t10=\t*\t0\t0\tACGTACGTAC\t*
";

#[test]
fn test_sam_identity_counts_accepted_alignments() {
    let dir = tempfile::tempdir().unwrap();
    let path_in = dir.path().join("reads.sam");
    fs::write(&path_in, SAM).unwrap();
    let path_out = dir.path().join("reads_identity.csv");

    let counts = SamIdentity::run(&SamIdentity {
        path_in,
        path_out: path_out.clone(),
        max_indel: 500,
    })
    .unwrap();

    //r2 is unmapped, r4 secondary, and the 600bp deletion of r3 is skipped
    assert_eq!(counts.n_match, 23);
    assert_eq!(counts.n_mismatch, 2);
    assert_eq!(counts.n_insert, 3);
    assert_eq!(counts.n_delete, 1);
    assert_eq!(counts.n_softclip, 2);

    let out = fs::read_to_string(&path_out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "operation,count,rate,per_100kb");
    assert!(lines[1].starts_with("X,2,"));
    assert!(lines[4].starts_with("=,23,"));
}
