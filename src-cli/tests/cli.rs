use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn ragqa(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ragqa").expect("binary");
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn render_prints_html_with_numbered_citation() {
    let dir = tempfile::tempdir().expect("tempdir");
    ragqa(&dir)
        .arg("render")
        .write_stdin("See [report.pdf] for <details>.")
        .assert()
        .success()
        .stdout(predicate::str::contains("See <a class=\"supContainer\""))
        .stdout(predicate::str::contains("<sup>1</sup></a> for &lt;details&gt;."));
}

#[test]
fn streaming_render_hides_partial_marker() {
    let dir = tempfile::tempdir().expect("tempdir");
    ragqa(&dir)
        .args(["render", "--streaming"])
        .write_stdin("See [rep")
        .assert()
        .success()
        .stdout("See \n");
}

#[test]
fn json_render_lists_sources_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(".ragqa.toml"),
        "content_base = \"https://qa.example.com\"\n",
    )
    .expect("write config");
    let out = ragqa(&dir)
        .args(["render", "--json"])
        .write_stdin("[a.pdf][b.pdf] combined")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(value["citations"], serde_json::json!(["a.pdf", "b.pdf"]));
    assert_eq!(
        value["sources"][1]["path"],
        "https://qa.example.com/content/b.pdf"
    );
    assert_eq!(value["sources"][0]["label"], "1. a.pdf");
}

#[test]
fn strip_removes_markers() {
    let dir = tempfile::tempdir().expect("tempdir");
    ragqa(&dir)
        .arg("strip")
        .write_stdin("Refer to [doc.pdf] now.")
        .assert()
        .success()
        .stdout("Refer to  now.");
}

#[test]
fn replay_emits_one_frame_per_growth_plus_final() {
    let dir = tempfile::tempdir().expect("tempdir");
    let body = [
        r#"{"choices":[{"delta":{"role":"assistant"},"context":{"data_points":[],"thoughts":[]}}]}"#,
        r#"{"choices":[{"delta":{"content":"See [rep"}}]}"#,
        r#"{"choices":[{"delta":{"content":"ort.pdf]"}}]}"#,
    ]
    .join("\n");
    let out = ragqa(&dir)
        .arg("replay")
        .write_stdin(body)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let frames: Vec<String> = String::from_utf8(out)
        .expect("utf8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("frame"))
        .collect();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], "See ");
    assert!(frames[1].ends_with("<sup>1</sup></a>"));
    assert_eq!(frames[1], frames[2]);
}

#[test]
fn replay_fails_on_error_chunk() {
    let dir = tempfile::tempdir().expect("tempdir");
    ragqa(&dir)
        .arg("replay")
        .write_stdin("{\"error\": \"throttled\"}\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("STREAM_ERROR"));
}

#[test]
fn invalid_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[delimiters]\nopen = \"]\"\nclose = \"]\"\n").expect("write config");
    ragqa(&dir)
        .arg("--config")
        .arg(&path)
        .arg("strip")
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_INVALID"));
}

#[test]
fn eval_reports_flagged_samples() {
    let dir = tempfile::tempdir().expect("tempdir");
    let experiment = r#"{
      "evaluate_parameters": {},
      "eval_results": [
        { "question": "fine", "relevance_score": 5, "coherence_score": 5, "groundedness_score": 5 },
        { "question": "shaky", "relevance_score": 4, "coherence_score": 5, "groundedness_score": 1 }
      ],
      "summary": {
        "groundedness": { "mean_rating": 3.0 },
        "relevance": { "mean_rating": 4.5 },
        "coherence": { "mean_rating": 5.0 },
        "latency": { "mean": 2.0 },
        "answer_length": { "mean": 100.0 }
      }
    }"#;
    ragqa(&dir)
        .args(["eval", "--name", "baseline"])
        .write_stdin(experiment)
        .assert()
        .success()
        .stdout(predicate::str::contains("# baseline"))
        .stdout(predicate::str::contains("Samples needing attention: 1/2"))
        .stdout(predicate::str::contains("- shaky (groundedness=1"));
}

#[test]
fn feedback_renders_stored_answers_with_any_kind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let answer = |text: &str| {
        serde_json::json!({
            "choices": [{ "index": 0, "message": { "content": text, "role": "assistant" } }]
        })
    };
    let list = serde_json::json!({
        "feedbacks": [
            { "id": "f1", "feedback": "good", "question": "q1",
              "answer": answer("Up [q3.pdf]."), "comment": "" },
            { "id": "f2", "feedback": "neutral", "question": "q2",
              "answer": answer("Flat [q4.pdf] and [q3.pdf"), "comment": "unsure" }
        ]
    });
    let assert = ragqa(&dir)
        .arg("feedback")
        .write_stdin(list.to_string())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["good"], true);
    assert_eq!(lines[0]["citations"], serde_json::json!(["q3.pdf"]));
    assert_eq!(lines[1]["feedback"], "neutral");
    assert_eq!(lines[1]["good"], false);
    // Stored answers are final, so the dangling marker stays literal.
    assert_eq!(lines[1]["citations"], serde_json::json!(["q4.pdf"]));
    assert!(lines[1]["html"]
        .as_str()
        .expect("html")
        .ends_with(" and [q3.pdf"));
}

#[test]
fn malformed_feedback_list_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    ragqa(&dir)
        .arg("feedback")
        .write_stdin("{\"feedbacks\": [{\"id\": \"x\"}]}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RESPONSE_INVALID"));
}
