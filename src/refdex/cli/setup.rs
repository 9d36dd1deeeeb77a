use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "refdex", bin_name = "refdex", version)]
#[command(
    about = "Build a printable reference index for study books",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Index to operate on (defaults to the last loaded one)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub index: Option<String>,

    /// Directory holding the indexes
    #[arg(long, global = true, env = "REFDEX_ROOT", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Pdf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List existing indexes
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Create a new index and load it
    #[command(display_order = 2)]
    Create {
        /// Index title (also its folder name)
        title: String,

        /// Number of books
        #[arg(short, long)]
        books: u32,

        /// Number of workbooks
        #[arg(short, long)]
        workbooks: u32,
    },

    /// Load an index, making it the active one
    #[command(display_order = 3)]
    Load { title: String },

    /// Add an entry to the active index
    #[command(alias = "a", display_order = 4)]
    Add {
        /// Term words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// Book number
        #[arg(short, long)]
        book: u32,

        /// Page within the book
        #[arg(short, long)]
        page: Option<String>,

        /// Category (see `refdex categories`)
        #[arg(short, long)]
        category: Option<String>,

        /// Description
        #[arg(short, long, default_value = "")]
        desc: String,
    },

    /// Preview the active index grouped by category
    #[command(alias = "v", display_order = 5)]
    Show,

    /// Export the active index
    #[command(display_order = 6)]
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available categories
    #[command(display_order = 7)]
    Categories,

    /// Get or set configuration
    #[command(display_order = 8)]
    Config {
        /// Configuration key (pdf-filename, enforce-book-range)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
