use pretty_assertions::assert_eq;
use rqa_core::config::EmailConfig;
use rqa_core::models::{ChatAppResponse, Feedback, FeedbackKind};
use rqa_render::{compose_followup_email, render_feedback, strip_citations, Delimiters};

#[test]
fn strip_removes_marker_and_keeps_spaces() {
    assert_eq!(
        strip_citations("Refer to [doc.pdf] now.", Delimiters::default()),
        "Refer to  now."
    );
}

#[test]
fn strip_handles_adjacent_and_repeated_markers() {
    assert_eq!(
        strip_citations("A[a.pdf][b.pdf] B [a.pdf]", Delimiters::default()),
        "A B "
    );
}

#[test]
fn strip_leaves_unterminated_and_empty_brackets() {
    assert_eq!(
        strip_citations("x [] y [z.pdf] [open", Delimiters::default()),
        "x [] y  [open"
    );
    assert_eq!(strip_citations("no markers", Delimiters::default()), "no markers");
}

#[test]
fn followup_email_quotes_prose_without_citations() {
    let email = EmailConfig {
        recipients: vec!["a@example.com".to_string(), "b@example.com".to_string()],
        subject: "Question Follow-up".to_string(),
    };
    let mail = compose_followup_email(
        "What grew?",
        "Revenue grew [q3.pdf].",
        &email,
        Delimiters::default(),
    );
    assert_eq!(
        mail.body,
        "Dear [Recipient's Name]\n\nI hope you are doing well. We're contacting you regarding the question you asked: \n\nWhat grew?\n\nRevenue grew .\n\nThank you for your time.\n\nKind Regards,\n[Your Name]\n[Your Position]\n[Your Company]\n[Your Contact Information]"
    );
    assert!(mail
        .mailto
        .starts_with("mailto:a@example.com;b@example.com?subject=Question%20Follow-up&body=Dear%20%5BRecipient"));
    assert!(!mail.mailto.contains(' '));
    assert!(!mail.mailto.contains("q3.pdf"));
}

#[test]
fn feedback_answers_render_as_final_text() {
    let answer = ChatAppResponse::from_json(
        r#"{"choices":[{"index":0,"message":{"content":"Half-typed [note","role":"assistant"},"context":{"data_points":[],"followup_questions":null,"thoughts":[]},"session_state":null}]}"#,
    )
    .expect("parse");
    let fb = Feedback::new(FeedbackKind::Bad, "q", answer, "cut off");
    let r = render_feedback(&fb, Delimiters::default()).expect("render");
    assert_eq!(r.html, "Half-typed [note");
}
