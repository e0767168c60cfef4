//! Coverage Report Integration Tests
//!
//! This test suite drives the `depth` subcommand end to end: real FASTA,
//! PAF, and configuration files go in, and the JSON coverage report (or a
//! diagnostic failure) comes out. Every cross-validation rule between the
//! alignments and the assembly is exercised through the binary.

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn asm_qc() -> Command {
    Command::cargo_bin("asm-qc").expect("Failed to find asm-qc binary")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test input");
    path
}

fn write_gzipped(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).expect("Failed to create test input");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("Failed to write gzipped test input");
    encoder.finish().expect("Failed to finish gzip stream");
    path
}

fn read_report(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("Failed to read report file");
    serde_json::from_str(&text).expect("Report should be valid JSON")
}

/// Test a complete run: two reads tile one contig end to end
#[test]
fn test_depth_full_coverage_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", &format!(">ctgA\n{}\n", "A".repeat(1000)));
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t500\t0\t500\t+\tctgA\t1000\t0\t500\t480\t500\t60\n\
         read2\t500\t0\t500\t-\tctgA\t1000\t500\t1000\t490\t510\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "sample: s1\ninput_read_count: 2\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let report = read_report(&output);
    assert_eq!(report["analysis_type"], "coverage_report");

    let metrics = &report["input_metrics"];
    assert_eq!(metrics["input_reads_total"], 2);
    assert_eq!(metrics["reads_mapped_count"], 2);
    assert_eq!(metrics["reads_unmapped_count"], 0);
    assert_eq!(metrics["reads_unmapped_percent"], 0.0);
    assert_eq!(metrics["total_assembly_length_bp"], 1000);

    let ctg = &report["contig_coverage"]["ctgA"];
    assert_eq!(ctg["length_bp"], 1000);
    assert_eq!(ctg["total_aligned_bases"], 1000);
    assert_eq!(ctg["average_depth"], 1.0);
}

/// Test that a read aligned in several places is counted as mapped once
#[test]
fn test_depth_counts_each_read_once() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", &format!(">ctgA\n{}\n", "C".repeat(400)));
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t200\t0\t200\t+\tctgA\t400\t0\t200\t190\t200\t60\n\
         read1\t200\t0\t200\t+\tctgA\t400\t200\t400\t180\t200\t30\n\
         read2\t100\t0\t100\t-\tctgA\t400\t100\t200\t95\t100\t60\n\
         read3\t100\t0\t100\t+\tctgA\t400\t300\t400\t90\t100\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 10\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    // read1 aligns twice but is one mapped read
    let report = read_report(&output);
    let metrics = &report["input_metrics"];
    assert_eq!(metrics["reads_mapped_count"], 3);
    assert_eq!(metrics["reads_unmapped_count"], 7);
    assert_eq!(metrics["reads_unmapped_percent"], 70.0);

    // All four alignments still contribute bases
    let ctg = &report["contig_coverage"]["ctgA"];
    assert_eq!(ctg["total_aligned_bases"], 600);
}

/// Test that contigs without a single alignment still appear with zeros
#[test]
fn test_depth_reports_unaligned_contigs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(
        dir.path(),
        "asm.fasta",
        &format!(">ctgA\n{}\n>ctgB\n{}\n", "A".repeat(100), "G".repeat(50)),
    );
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t100\t0\t100\t+\tctgA\t100\t0\t100\t99\t100\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report = read_report(&output);
    let ctg_b = &report["contig_coverage"]["ctgB"];
    assert_eq!(ctg_b["length_bp"], 50);
    assert_eq!(ctg_b["total_aligned_bases"], 0);
    assert_eq!(ctg_b["average_depth"], 0.0);
}

/// Test that gzip-compressed FASTA and PAF inputs produce the same report
#[test]
fn test_depth_reads_gzipped_inputs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_gzipped(
        dir.path(),
        "asm.fasta.gz",
        &format!(">ctgA\n{}\n", "T".repeat(200)),
    );
    let paf = write_gzipped(
        dir.path(),
        "reads.paf.gz",
        "read1\t100\t0\t100\t+\tctgA\t200\t0\t100\t95\t100\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 4\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report = read_report(&output);
    assert_eq!(report["contig_coverage"]["ctgA"]["total_aligned_bases"], 100);
    assert_eq!(report["input_metrics"]["reads_unmapped_percent"], 75.0);
}

/// Test that an alignment to a contig missing from the assembly is fatal
#[test]
fn test_depth_rejects_unknown_target() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", ">ctgA\nACGTACGT\n");
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t8\t0\t8\t+\tctgZ\t8\t0\t8\t8\t8\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found among assembly contigs"));

    // A failed run must not leave a partial report behind
    assert!(!output.exists(), "No report should be written on failure");
}

/// Test that a target length disagreement between PAF and FASTA is fatal
#[test]
fn test_depth_rejects_target_length_mismatch() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", &format!(">ctgA\n{}\n", "A".repeat(1000)));
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t100\t0\t100\t+\tctgA\t999\t0\t100\t95\t100\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("declares length 999"));
}

/// Test that an alignment line with the wrong column count is fatal
#[test]
fn test_depth_rejects_malformed_alignment() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", ">ctgA\nACGTACGT\n");
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t8\t0\t8\t+\tctgA\t8\t0\t8\t8\t8\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 12"));
}

/// Test that more mapped reads than declared input reads is fatal
#[test]
fn test_depth_rejects_mapped_exceeding_total() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", &format!(">ctgA\n{}\n", "A".repeat(100)));
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t50\t0\t50\t+\tctgA\t100\t0\t50\t48\t50\t60\n\
         read2\t50\t0\t50\t+\tctgA\t100\t50\t100\t47\t50\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed the declared input total"));
}

/// Test that a configuration file without the read count key is fatal
#[test]
fn test_depth_rejects_missing_read_count_key() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", ">ctgA\nACGT\n");
    let paf = write_file(dir.path(), "reads.paf", "");
    let yaml = write_file(dir.path(), "run.yaml", "sample: s1\nthreads: 8\n");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input_read_count"));
}

/// Test that an assembly with no usable sequences is fatal
#[test]
fn test_depth_rejects_empty_assembly() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", "");
    let paf = write_file(dir.path(), "reads.paf", "");
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 0\n");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No non-empty sequences"));
}

/// Test that zero-length contigs are left out of the report entirely
#[test]
fn test_depth_excludes_zero_length_contigs() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(
        dir.path(),
        "asm.fasta",
        &format!(">ctgEmpty\n>ctgA\n{}\n", "A".repeat(100)),
    );
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t50\t0\t50\t+\tctgA\t100\t0\t50\t49\t50\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let report = read_report(&output);
    let coverage = report["contig_coverage"]
        .as_object()
        .expect("contig_coverage should be an object");
    assert!(coverage.contains_key("ctgA"));
    assert!(!coverage.contains_key("ctgEmpty"));
    assert_eq!(report["input_metrics"]["total_assembly_length_bp"], 100);
}

/// Test that the unmapped percentage and depth round to two decimals
#[test]
fn test_depth_rounds_to_two_decimals() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", &format!(">ctgA\n{}\n", "G".repeat(300)));
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t50\t0\t50\t+\tctgA\t300\t0\t50\t50\t50\t60\n\
         read2\t50\t0\t50\t+\tctgA\t300\t50\t100\t50\t50\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 3\n");
    let output = dir.path().join("report.json");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    // 1 of 3 reads unmapped -> 33.333...% -> 33.33
    // 100 bases over 300 bp -> 0.333...x -> 0.33
    let report = read_report(&output);
    assert_eq!(report["input_metrics"]["reads_unmapped_percent"], 33.33);
    assert_eq!(report["contig_coverage"]["ctgA"]["average_depth"], 0.33);
}

/// Test that two runs over the same inputs produce byte-identical reports
#[test]
fn test_depth_report_is_deterministic() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    // Contigs deliberately out of lexicographic order in the FASTA
    let fasta = write_file(
        dir.path(),
        "asm.fasta",
        &format!(">ctgB\n{}\n>ctgA\n{}\n", "C".repeat(80), "A".repeat(120)),
    );
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t40\t0\t40\t+\tctgB\t80\t0\t40\t39\t40\t60\n\
         read2\t60\t0\t60\t-\tctgA\t120\t60\t120\t58\t60\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 5\n");

    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    for output in [&first, &second] {
        asm_qc()
            .args(["depth", "--yaml"])
            .arg(&yaml)
            .arg("--fasta")
            .arg(&fasta)
            .arg("--paf")
            .arg(&paf)
            .arg("--output")
            .arg(output)
            .assert()
            .success();
    }

    let first_bytes = fs::read(&first).expect("Failed to read first report");
    let second_bytes = fs::read(&second).expect("Failed to read second report");
    assert_eq!(first_bytes, second_bytes, "Reports should be byte-identical");

    // Contig keys are emitted in sorted order regardless of FASTA order
    let text = String::from_utf8(first_bytes).expect("Report should be UTF-8");
    let pos_a = text.find("\"ctgA\"").expect("ctgA should be present");
    let pos_b = text.find("\"ctgB\"").expect("ctgB should be present");
    assert!(pos_a < pos_b, "Contig keys should be sorted");
}

/// Test that the report lands in coverage_report.json when --output is omitted
#[test]
fn test_depth_default_output_name() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", ">ctgA\nACGTACGT\n");
    let paf = write_file(
        dir.path(),
        "reads.paf",
        "read1\t8\t0\t8\t+\tctgA\t8\t0\t8\t8\t8\t60\n",
    );
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");

    asm_qc()
        .current_dir(dir.path())
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(&paf)
        .assert()
        .success()
        .stdout(predicate::str::contains("coverage_report.json"));

    assert!(dir.path().join("coverage_report.json").exists());
}

/// Test that a missing alignment file fails with the offending path
#[test]
fn test_depth_rejects_missing_alignment_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let fasta = write_file(dir.path(), "asm.fasta", ">ctgA\nACGT\n");
    let yaml = write_file(dir.path(), "run.yaml", "input_read_count: 1\n");

    asm_qc()
        .args(["depth", "--yaml"])
        .arg(&yaml)
        .arg("--fasta")
        .arg(&fasta)
        .arg("--paf")
        .arg(dir.path().join("missing.paf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("aggregating alignments"));
}
