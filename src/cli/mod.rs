//! CLI layer - Command-line interface

pub mod commands;
pub mod form;
pub mod output;

pub use commands::{Cli, Commands, RecordArgs};
pub use form::RecordForm;
pub use output::{format_record_detail, format_record_list, format_save_outcome};
