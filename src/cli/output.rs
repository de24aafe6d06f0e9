//! Output formatting utilities

use crate::application::{PublishOutcome, SaveOutcome};
use crate::domain::{NewsDocument, NewsRecord};
use crate::infrastructure::CommitOutcome;

/// Shown for an absent secondary image
pub const NO_VALUE: &str = "(none)";

/// Format records for display, one per line, featured ones marked with `*`
pub fn format_record_list(records: &[&NewsRecord], document: &NewsDocument) -> String {
    if records.is_empty() {
        return "No news records found".to_string();
    }

    let mut output = String::new();
    for record in records {
        let marker = if document.is_featured(&record.id) {
            '*'
        } else {
            ' '
        };
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            marker, record.date, record.id, record.title
        ));
    }
    output
}

/// Format every field of one record
pub fn format_record_detail(record: &NewsRecord, featured: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("ID:              {}\n", record.id));
    output.push_str(&format!("Date:            {}\n", record.date));
    output.push_str(&format!("Title:           {}\n", record.title));
    output.push_str(&format!("Subtitle:        {}\n", record.subtitle));
    output.push_str(&format!("Image:           {}\n", or_none(&record.primary_image)));
    output.push_str(&format!(
        "Secondary image: {}\n",
        record.secondary_image.as_deref().unwrap_or(NO_VALUE)
    ));
    output.push_str(&format!(
        "Featured:        {}\n",
        if featured { "yes" } else { "no" }
    ));

    if !record.body.is_empty() {
        output.push_str(&format!("\n{}\n", record.body));
    }
    if !record.extra_content.is_empty() {
        output.push_str(&format!("\nExtra content:\n{}\n", record.extra_content));
    }
    output
}

/// One-line summary of a save, e.g. "Added noticia-1a2b3c4d (committed abc1234)"
pub fn format_save_outcome(verb: &str, outcome: &SaveOutcome) -> String {
    format!("{} {} ({})", verb, outcome.id, describe_publish(&outcome.publish))
}

pub fn describe_publish(outcome: &PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Skipped => "not published".to_string(),
        PublishOutcome::Published(CommitOutcome::Committed(id)) => {
            format!("committed {} and pushed", id)
        }
        PublishOutcome::Published(CommitOutcome::Unchanged) => {
            "no changes to commit, pushed".to_string()
        }
    }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        NO_VALUE
    } else {
        value
    }
}
