use pretty_assertions::assert_eq;
use ragdoll_core::files::{newest_matching, read_jsonl, unique_file_name, write_jsonl};
use ragdoll_core::model::QaPairEvaluation;

fn sample_evaluations() -> Vec<QaPairEvaluation> {
    (0..3)
        .map(|i| QaPairEvaluation {
            question: format!("What is property {i}?"),
            answer: format!("Reference answer {i}"),
            llm_answer: format!("Generated answer {i}"),
            score: i,
            reason: "Accurate - matches the reference".to_string(),
        })
        .collect()
}

#[test]
fn jsonl_round_trip_preserves_every_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let originals = sample_evaluations();
    let path = write_jsonl(dir.path(), "results.jsonl", &originals).expect("write");
    let restored: Vec<QaPairEvaluation> = read_jsonl(&path).expect("read");
    assert_eq!(restored, originals);
}

#[test]
fn jsonl_lines_contain_no_embedded_newlines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let items = vec![QaPairEvaluation {
        question: "multi\nline\nquestion".to_string(),
        answer: "a".to_string(),
        llm_answer: "b".to_string(),
        score: 5,
        reason: "Accurate".to_string(),
    }];
    let path = write_jsonl(dir.path(), "results.jsonl", &items).expect("write");
    let raw = std::fs::read_to_string(&path).expect("raw");
    // One record, one line: embedded newlines must be escaped.
    assert_eq!(raw.lines().count(), 1);
    let restored: Vec<QaPairEvaluation> = read_jsonl(&path).expect("read");
    assert_eq!(restored, items);
}

#[test]
fn missing_input_file_is_reported_as_such() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_jsonl::<QaPairEvaluation>(&dir.path().join("absent.jsonl"))
        .expect_err("should fail");
    assert_eq!(err.code, "IO_MISSING_INPUT");
}

#[test]
fn undecodable_line_reports_its_line_number() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.jsonl");
    std::fs::write(&path, "{\"question\":\"q\",\"answer\":\"a\",\"llmAnswer\":\"l\",\"score\":5,\"reason\":\"r\"}\nnot json\n").expect("write");
    let err = read_jsonl::<QaPairEvaluation>(&path).expect_err("should fail");
    assert_eq!(err.code, "IO_READ_FAILED");
    assert!(err.details.unwrap_or_default().contains("line=2"));
}

#[test]
fn unique_names_carry_a_unix_timestamp_prefix() {
    let name = unique_file_name("judge_results.jsonl");
    assert!(name.ends_with("_judge_results.jsonl"));
    let prefix = name.split('_').next().expect("prefix");
    assert!(prefix.parse::<i64>().is_ok(), "prefix is not an integer: {prefix}");
}

#[test]
fn newest_matching_prefers_the_most_recently_modified_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_jsonl(dir.path(), "100_judge_results.jsonl", &sample_evaluations()).expect("write");
    std::thread::sleep(std::time::Duration::from_millis(50));
    let second =
        write_jsonl(dir.path(), "200_judge_results.jsonl", &sample_evaluations()).expect("write");
    let newest = newest_matching(dir.path(), "_judge_results.jsonl")
        .expect("scan")
        .expect("some file");
    assert_eq!(newest, second);
}

#[test]
fn newest_matching_on_missing_directory_is_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let newest =
        newest_matching(&dir.path().join("never_created"), ".jsonl").expect("scan");
    assert!(newest.is_none());
}

#[test]
fn rewriting_a_stage_file_replaces_it_wholesale() {
    let dir = tempfile::tempdir().expect("tempdir");
    let many = sample_evaluations();
    write_jsonl(dir.path(), "qa_pairs.jsonl", &many).expect("write");
    let fewer = vec![many[0].clone()];
    let path = write_jsonl(dir.path(), "qa_pairs.jsonl", &fewer).expect("rewrite");
    let restored: Vec<QaPairEvaluation> = read_jsonl(&path).expect("read");
    assert_eq!(restored, fewer);
}
