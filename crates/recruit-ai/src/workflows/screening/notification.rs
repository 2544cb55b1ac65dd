use serde::{Deserialize, Serialize};
use tracing::info;

const SELECTED_SUBJECT: &str = "🎉 Congratulations! You've been shortlisted";
const REJECTED_SUBJECT: &str = "Thank you for your application";

/// Outbound message handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Transport acknowledgement for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub accepted_for: String,
}

/// Delivery summary surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sent_to: Option<String>,
}

/// Trait describing outbound mail hooks. Retries, if any, belong to the implementation.
pub trait Mailer: Send + Sync {
    fn send(&self, message: &EmailMessage) -> Result<EmailReceipt, MailError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("recipient rejected: {0}")]
    Rejected(String),
}

/// Mailer that records the message in the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &EmailMessage) -> Result<EmailReceipt, MailError> {
        info!(to = %message.to, subject = %message.subject, "result email logged (not delivered)");
        Ok(EmailReceipt {
            accepted_for: message.to.clone(),
        })
    }
}

/// Build the shortlisted / not-shortlisted notification for a screening result.
pub fn compose_result_email(
    name: &str,
    email: &str,
    role: &str,
    score: u8,
    selected: bool,
) -> EmailMessage {
    let (subject, body) = if selected {
        (SELECTED_SUBJECT, selected_body(name, role, score))
    } else {
        (REJECTED_SUBJECT, rejected_body(name, role, score))
    };

    EmailMessage {
        to: email.to_string(),
        subject: subject.to_string(),
        body,
    }
}

fn selected_body(name: &str, role: &str, score: u8) -> String {
    format!(
        "Dear {name},

🎉 Congratulations! We are pleased to inform you that your resume has been successfully shortlisted for the {role} position.

Your application scored {score}% in our AI-powered resume analysis, which exceeds our selection criteria. Our team was impressed by your qualifications and experience.

Next Steps:
• Our hiring team will contact you within 2-3 business days
• Please prepare for technical and behavioral interview rounds
• We'll send you detailed information about the role and interview process

We look forward to discussing this exciting opportunity with you!

Best regards,
The Hiring Team"
    )
}

fn rejected_body(name: &str, role: &str, score: u8) -> String {
    format!(
        "Dear {name},

Thank you for your interest in the {role} position and for taking the time to submit your application.

After careful review of your qualifications, we have decided to move forward with other candidates whose experience more closely aligns with our current requirements.

Your application scored {score}% in our assessment. While this doesn't meet our current threshold, we encourage you to:
• Continue developing skills in areas that would strengthen your candidacy
• Apply for future openings that may be a better fit
• Keep your resume updated with new experiences and skills

We appreciate your interest in our company and wish you the best of luck in your career journey.

Best regards,
The Hiring Team"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_template_mentions_role_and_score() {
        let message = compose_result_email("Ada", "ada@x.com", "Backend Engineer", 88, true);
        assert_eq!(message.to, "ada@x.com");
        assert_eq!(message.subject, SELECTED_SUBJECT);
        assert!(message.body.starts_with("Dear Ada,"));
        assert!(message.body.contains("shortlisted for the Backend Engineer position"));
        assert!(message.body.contains("scored 88%"));
    }

    #[test]
    fn rejected_template_uses_its_own_subject() {
        let message = compose_result_email("Alan", "alan@x.com", "Data Scientist", 40, false);
        assert_eq!(message.subject, REJECTED_SUBJECT);
        assert!(message.body.contains("Data Scientist position"));
        assert!(message.body.contains("scored 40% in our assessment"));
    }

    #[test]
    fn log_mailer_accepts_everything() {
        let message = compose_result_email("Ada", "ada@x.com", "Backend Engineer", 88, true);
        let receipt = LogMailer.send(&message).expect("logged");
        assert_eq!(receipt.accepted_for, "ada@x.com");
    }
}
