//! End-to-end tests for the `srtalign` binary, covering spec §8 scenarios
//! S1 (identity) and S2 (2:1 merge) through the actual CLI surface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn xml_doc(sentences: &[(&str, &str, &str, &str)]) -> String {
    let mut body = String::from("<doc>\n");
    for (id, first, last, text) in sentences {
        body.push_str(&format!(
            "<s id=\"{id}\"><time value=\"{first}\"/>{}<time value=\"{last}\"/></s>\n",
            text.split_whitespace()
                .map(|w| format!("<w>{w}</w>"))
                .collect::<Vec<_>>()
                .join("")
        ));
    }
    body.push_str("</doc>\n");
    body
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::with_suffix(".xml").unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

#[test]
fn test_identity_alignment_produces_one_to_one_links() {
    let doc = xml_doc(&[
        ("1", "00:00:00,000", "00:00:02,000", "hello world"),
        ("2", "00:00:02,000", "00:00:04,000", "second line"),
        ("3", "00:00:04,000", "00:00:06,000", "third line"),
    ]);
    let src = write_temp(&doc);
    let trg = write_temp(&doc);

    let mut cmd = Command::cargo_bin("srtalign").unwrap();
    let assert = cmd.arg(src.path()).arg(trg.path()).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(output.contains("<cesAlign"));
    assert_eq!(output.matches("<link ").count(), 3);
    assert!(output.contains(r#"overlap="1.000""#));
}

#[test]
fn test_two_to_one_merge_over_cli() {
    let src_doc = xml_doc(&[
        ("1", "00:00:00,000", "00:00:02,000", "a"),
        ("2", "00:00:02,000", "00:00:04,000", "b"),
        ("3", "00:00:04,000", "00:00:06,000", "c"),
        ("4", "00:00:06,000", "00:00:08,000", "d"),
    ]);
    let trg_doc = xml_doc(&[
        ("1", "00:00:00,000", "00:00:04,000", "uno"),
        ("2", "00:00:04,000", "00:00:08,000", "dos"),
    ]);
    let src = write_temp(&src_doc);
    let trg = write_temp(&trg_doc);

    let mut cmd = Command::cargo_bin("srtalign").unwrap();
    let assert = cmd.arg(src.path()).arg(trg.path()).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(output.contains(r#"xtargets="1 2 ; 1""#));
    assert!(output.contains(r#"xtargets="3 4 ; 2""#));
}

#[test]
fn test_missing_source_file_is_input_error() {
    let trg = write_temp(&xml_doc(&[("1", "00:00:00,000", "00:00:01,000", "x")]));
    let mut cmd = Command::cargo_bin("srtalign").unwrap();
    cmd.arg("/no/such/file.xml")
        .arg(trg.path())
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Input error"));
}

#[test]
fn test_best_align_flag_accepted() {
    let doc = xml_doc(&[
        ("1", "00:00:00,000", "00:00:02,000", "hello world"),
        ("2", "00:00:02,000", "00:00:04,000", "goodbye friend"),
    ]);
    let src = write_temp(&doc);
    let trg = write_temp(&doc);
    let mut cmd = Command::cargo_bin("srtalign").unwrap();
    cmd.arg("-b")
        .arg("-v")
        .arg(src.path())
        .arg(trg.path())
        .assert()
        .success();
}
