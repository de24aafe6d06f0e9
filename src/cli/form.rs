//! Turns command-line field values into record value objects

use crate::cli::RecordArgs;
use crate::domain::{NewsRecord, RecordFields};
use crate::error::Result;
use crate::infrastructure::AssetLibrary;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Builds record values from [`RecordArgs`]; images go through the asset library
pub struct RecordForm<'a> {
    assets: &'a AssetLibrary,
}

impl<'a> RecordForm<'a> {
    pub fn new(assets: &'a AssetLibrary) -> Self {
        RecordForm { assets }
    }

    /// Values for a new record; the date defaults to `today`
    pub fn new_record(&self, args: RecordArgs, today: NaiveDate) -> Result<RecordFields> {
        let mut fields = RecordFields {
            date: args
                .date
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            title: args.title.unwrap_or_default(),
            subtitle: args.subtitle.unwrap_or_default(),
            body: read_text(args.body, args.body_file.as_deref())?.unwrap_or_default(),
            extra_content: read_text(args.extra, args.extra_file.as_deref())?.unwrap_or_default(),
            ..Default::default()
        };

        // Nothing is copied for a form that will be rejected
        fields.validate()?;

        if let Some(image) = &args.image {
            fields.primary_image = self.assets.import(image)?;
        }
        if let Some(image) = &args.secondary_image {
            fields.secondary_image = Some(self.assets.import(image)?);
        }

        Ok(fields)
    }

    /// `current` with the given values applied; unset values are kept
    pub fn edited_record(
        &self,
        current: &NewsRecord,
        new_id: Option<String>,
        args: RecordArgs,
        clear_secondary_image: bool,
    ) -> Result<NewsRecord> {
        let mut record = current.clone();

        if let Some(id) = new_id {
            record.id = id.trim().to_string();
        }
        if let Some(title) = args.title {
            record.title = title;
        }
        if let Some(date) = args.date {
            record.date = date;
        }
        if let Some(subtitle) = args.subtitle {
            record.subtitle = subtitle;
        }
        if let Some(body) = read_text(args.body, args.body_file.as_deref())? {
            record.body = body;
        }
        if let Some(extra) = read_text(args.extra, args.extra_file.as_deref())? {
            record.extra_content = extra;
        }

        record.validate()?;

        if let Some(image) = &args.image {
            record.primary_image = self.assets.import(image)?;
        }
        if clear_secondary_image {
            record.secondary_image = None;
        } else if let Some(image) = &args.secondary_image {
            record.secondary_image = Some(self.assets.import(image)?);
        }

        Ok(record)
    }
}

fn read_text(inline: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => Ok(Some(fs::read_to_string(path)?)),
        (None, None) => Ok(None),
    }
}
