//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "newsdesk")]
#[command(about = "Manage the news section of the website", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Record field values; unset fields keep their current value on edit
#[derive(Args, Debug, Default, Clone)]
pub struct RecordArgs {
    /// Article title (required)
    #[arg(long)]
    pub title: Option<String>,

    /// Publication date, YYYY-MM-DD (default on add: today)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    /// Main image; copied into the assets directory
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Optional second image; copied into the assets directory
    #[arg(long, value_name = "PATH")]
    pub secondary_image: Option<PathBuf>,

    /// Body text
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the body text from a file
    #[arg(long, value_name = "FILE")]
    pub body_file: Option<PathBuf>,

    /// Extra content (HTML tags allowed)
    #[arg(long, conflicts_with = "extra_file")]
    pub extra: Option<String>,

    /// Read the extra content from a file
    #[arg(long, value_name = "FILE")]
    pub extra_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a newsdesk workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// News data file, relative to the workspace
        #[arg(long)]
        data_file: Option<String>,

        /// Do not commit and push changes
        #[arg(long)]
        no_publish: bool,
    },

    /// Add a news article
    Add {
        #[command(flatten)]
        fields: RecordArgs,

        /// Mark the article as featured
        #[arg(long)]
        featured: bool,

        /// Save without committing and pushing
        #[arg(long)]
        no_publish: bool,
    },

    /// Edit a news article
    Edit {
        /// Id of the article to edit
        id: String,

        /// Give the article a new id
        #[arg(long = "id", value_name = "NEW_ID")]
        new_id: Option<String>,

        #[command(flatten)]
        fields: RecordArgs,

        /// Remove the secondary image
        #[arg(long, conflicts_with = "secondary_image")]
        clear_secondary_image: bool,

        /// Mark the article as featured
        #[arg(long, conflicts_with = "not_featured")]
        featured: bool,

        /// Remove the featured mark
        #[arg(long)]
        not_featured: bool,

        /// Save without committing and pushing
        #[arg(long)]
        no_publish: bool,
    },

    /// Remove a news article
    Remove {
        id: String,

        /// Save without committing and pushing
        #[arg(long)]
        no_publish: bool,
    },

    /// List news articles (featured ones marked with *)
    List {
        /// Only featured articles
        #[arg(long)]
        featured: bool,
    },

    /// Show one news article
    Show { id: String },

    /// Commit and push the data file as it is
    Publish {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
