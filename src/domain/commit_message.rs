//! Commit messages generated for record changes

use std::fmt;

/// The change a publish step records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMessage {
    Add { title: String },
    Edit { title: String },
    Remove { title: String },
    /// Republish without an operator message
    Publish,
    /// Free-form message supplied by the operator
    Custom(String),
}

impl CommitMessage {
    pub fn add(title: &str) -> Self {
        CommitMessage::Add {
            title: single_line(title),
        }
    }

    pub fn edit(title: &str) -> Self {
        CommitMessage::Edit {
            title: single_line(title),
        }
    }

    pub fn remove(title: &str) -> Self {
        CommitMessage::Remove {
            title: single_line(title),
        }
    }

    pub fn custom(message: &str) -> Self {
        CommitMessage::Custom(message.trim().to_string())
    }

    /// Message for a plain republish; a blank operator message falls back to [`CommitMessage::Publish`]
    pub fn publish(message: Option<&str>) -> Self {
        match message.map(str::trim) {
            Some(text) if !text.is_empty() => CommitMessage::custom(text),
            _ => CommitMessage::Publish,
        }
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitMessage::Add { title } => write!(f, "news: add \"{}\"", title),
            CommitMessage::Edit { title } => write!(f, "news: edit \"{}\"", title),
            CommitMessage::Remove { title } => write!(f, "news: remove \"{}\"", title),
            CommitMessage::Publish => f.write_str("news: publish"),
            CommitMessage::Custom(message) => f.write_str(message),
        }
    }
}

// Subject lines must not wrap; titles pasted from elsewhere sometimes carry newlines.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_message() {
        assert_eq!(
            CommitMessage::add("Festa junina").to_string(),
            "news: add \"Festa junina\""
        );
    }

    #[test]
    fn test_edit_and_remove_messages() {
        assert_eq!(CommitMessage::edit("A").to_string(), "news: edit \"A\"");
        assert_eq!(CommitMessage::remove("A").to_string(), "news: remove \"A\"");
    }

    #[test]
    fn test_title_collapsed_to_single_line() {
        let msg = CommitMessage::add("Missa\n  de   domingo\r\n");
        assert_eq!(msg.to_string(), "news: add \"Missa de domingo\"");
    }

    #[test]
    fn test_custom_message_trimmed() {
        assert_eq!(CommitMessage::custom("  republish \n").to_string(), "republish");
    }

    #[test]
    fn test_publish_message_falls_back_when_blank() {
        assert_eq!(CommitMessage::publish(None).to_string(), "news: publish");
        assert_eq!(CommitMessage::publish(Some("")).to_string(), "news: publish");
        assert_eq!(CommitMessage::publish(Some("  \n ")).to_string(), "news: publish");
        assert_eq!(
            CommitMessage::publish(Some(" fix typo ")).to_string(),
            "fix typo"
        );
    }
}
