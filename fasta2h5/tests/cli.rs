use assert_cmd::Command;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_convert_creates_derived_output() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("genome.fa");
    fs::write(&input, ">seq1\nATG\n>seq2\nacgnx\n").unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input).arg("--quiet").assert().success();

    let output = temp.path().join("genome.h5");
    assert!(output.exists());
    let file = hdf5::File::open(&output).unwrap();
    assert_eq!(file.dataset("seq1").unwrap().shape(), vec![3, 6]);
    assert_eq!(file.dataset("seq2").unwrap().shape(), vec![5, 6]);
}

#[test]
fn test_convert_with_options() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("reads.fasta");
    let output = temp.path().join("custom.h5");
    fs::write(&input, ">r1 some read\nACGT\n>r2\n\n").unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--no-compression")
        .arg("--threads")
        .arg("2")
        .arg("-q")
        .assert()
        .success();

    let file = hdf5::File::open(&output).unwrap();
    assert_eq!(file.dataset("r1").unwrap().shape(), vec![4, 6]);
    assert_eq!(file.dataset("r2").unwrap().shape(), vec![0, 6]);
    assert!(!temp.path().join("reads.h5").exists());
}

#[test]
fn test_missing_input_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("missing.fa");

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_malformed_input_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("bad.fa");
    fs::write(&input, "ACGT\nACGT\n").unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid FASTA at line 1"));

    assert!(!temp.path().join("bad.h5").exists());
}

#[test]
fn test_duplicate_identifiers_fail() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("dup.fa");
    fs::write(&input, ">a\nAC\n>a\nGT\n").unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate record identifier"));

    assert!(!temp.path().join("dup.h5").exists());
}

#[test]
fn test_invalid_level() {
    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg("x.fa").arg("--level").arg("12").assert().failure();
}

#[test]
fn test_convert_gzip_input() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("genome.fa.gz");
    fs::write(&input, gzip(b">s1\nACGT\n>s2\nnn\n")).unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input).arg("-q").assert().success();

    let file = hdf5::File::open(temp.path().join("genome.h5")).unwrap();
    let s1 = file.dataset("s1").unwrap();
    assert_eq!(s1.shape(), vec![4, 6]);
    assert_eq!(
        s1.read_2d::<i32>().unwrap().iter().copied().collect::<Vec<_>>(),
        vec![
            1, 0, 0, 0, 0, 0, //
            0, 0, 0, 1, 0, 0, //
            0, 0, 1, 0, 0, 0, //
            0, 1, 0, 0, 0, 0,
        ]
    );
    let s2 = file.dataset("s2").unwrap().read_2d::<i32>().unwrap();
    assert_eq!(s2.shape(), &[2, 6]);
    assert!(s2.rows().into_iter().all(|row| row[4] == 1));
}

#[test]
fn test_unreadable_input_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("broken.fa.gz");
    let mut data = vec![0x1f, 0x8b, 0x08, 0, 0, 0, 0, 0, 0, 0xff];
    data.extend_from_slice(&[0xff; 32]);
    fs::write(&input, data).unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read input"));

    assert!(!temp.path().join("broken.h5").exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_directory_input_fails() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("reads.fa");
    fs::create_dir(&input).unwrap();

    let mut cmd = Command::cargo_bin("fasta2h5").unwrap();
    cmd.arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read input"));

    assert!(!temp.path().join("reads.h5").exists());
}
