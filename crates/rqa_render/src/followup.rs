use rqa_core::config::{Delimiters, EmailConfig};
use serde::{Deserialize, Serialize};

use crate::strip::strip_citations;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowUpEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub mailto: String,
}

fn email_body(question: &str, answer: &str) -> String {
    format!(
        "Dear [Recipient's Name]\n\n\
         I hope you are doing well. We're contacting you regarding the question you asked: \n\n\
         {question}\n\n\
         {answer}\n\n\
         Thank you for your time.\n\n\
         Kind Regards,\n\
         [Your Name]\n\
         [Your Position]\n\
         [Your Company]\n\
         [Your Contact Information]"
    )
}

/// Draft a follow-up email quoting the question and the answer prose.
///
/// Citation markers are stripped from the answer before it is quoted; the
/// bracketed placeholders in the template itself are left for the sender.
pub fn compose_followup_email(
    question: &str,
    answer_text: &str,
    email: &EmailConfig,
    delimiters: Delimiters,
) -> FollowUpEmail {
    let answer = strip_citations(answer_text, delimiters);
    let body = email_body(question, &answer);
    let mailto = format!(
        "mailto:{}?subject={}&body={}",
        email.recipients.join(";"),
        urlencoding::encode(&email.subject),
        urlencoding::encode(&body)
    );
    FollowUpEmail {
        recipients: email.recipients.clone(),
        subject: email.subject.clone(),
        body,
        mailto,
    }
}
