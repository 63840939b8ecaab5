use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rTutorlog
/// CLI application to track tutoring sessions and pay with SQLite
#[derive(Parser)]
#[command(
    name = "rtutorlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A tutoring log CLI: record sessions with students and classes, compute pay and monthly totals using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Mirror directory; enables sync for this run
    #[arg(global = true, long = "sync-dir", value_name = "DIR")]
    pub sync_dir: Option<String>,

    /// Shared sync code; enables sync for this run
    #[arg(global = true, long = "sync-code", value_name = "CODE")]
    pub sync_code: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", value_name = "OPERATION", help = "Only rows of this operation")]
        operation: Option<String>,
    },

    /// Record a teaching session
    Add {
        /// Date of the session (YYYY-MM-DD), today if omitted
        date: Option<String>,

        #[arg(
            long = "student",
            value_name = "ID",
            conflicts_with = "class",
            help = "Pre-fill from this student"
        )]
        student: Option<i64>,

        #[arg(long = "class", value_name = "ID", help = "Pre-fill from this class")]
        class: Option<i64>,

        #[arg(long = "name", help = "Student or class name")]
        name: Option<String>,

        #[arg(long = "grade")]
        grade: Option<String>,

        #[arg(long = "course", help = "Course taught")]
        course: Option<String>,

        #[arg(long = "in", value_name = "HH:MM", help = "Start time")]
        start: Option<String>,

        #[arg(long = "out", value_name = "HH:MM", help = "End time")]
        end: Option<String>,

        #[arg(
            long = "hours",
            conflicts_with = "end",
            help = "Session length in hours (derives --out from --in)"
        )]
        hours: Option<String>,

        #[arg(long = "rate", help = "Hourly rate")]
        rate: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Delete a session by ID
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List sessions, newest first
    List {
        #[arg(long, short, value_name = "YYYY-MM", help = "Only this month")]
        month: Option<String>,
    },

    /// Show one session in detail
    Show { id: i64 },

    /// Monthly totals (current month by default)
    Summary {
        #[arg(long, short, value_name = "YYYY-MM")]
        month: Option<String>,

        #[arg(long = "months", help = "List the months that have sessions")]
        months: bool,
    },

    /// Month sheet split into individual and class sessions
    Preview {
        #[arg(long, short, value_name = "YYYY-MM")]
        month: Option<String>,
    },

    /// Hours between two times, or end time after a number of hours
    Calc {
        #[arg(long = "in", value_name = "HH:MM")]
        start: String,

        #[arg(long = "out", value_name = "HH:MM", conflicts_with = "hours")]
        end: Option<String>,

        #[arg(long = "hours", required_unless_present = "end")]
        hours: Option<String>,
    },

    /// Manage students
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Manage classes
    Class {
        #[command(subcommand)]
        action: ClassAction,
    },

    /// Export one month of sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, value_name = "YYYY-MM")]
        month: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Mirror the data through a shared sync code
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'y', help = "Overwrite an existing file without asking")]
        yes: bool,
    },
}

/// Template fields shared by students and classes.
#[derive(Args, Clone, Debug)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub grade: Option<String>,

    #[arg(long)]
    pub course: String,

    #[arg(long = "in", value_name = "HH:MM")]
    pub start: String,

    #[arg(long = "out", value_name = "HH:MM")]
    pub end: String,

    #[arg(long)]
    pub rate: String,
}

#[derive(Args, Clone, Debug)]
pub struct ClassArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    #[arg(long, default_value_t = 1, help = "Number of students in the class")]
    pub size: u32,
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Add a student
    Add(ProfileArgs),

    /// Replace every field of a student
    Update {
        id: i64,

        #[command(flatten)]
        fields: ProfileArgs,
    },

    /// Delete a student (sessions already logged are kept)
    Del {
        id: i64,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List students
    List,
}

#[derive(Subcommand)]
pub enum ClassAction {
    /// Add a class
    Add(ClassArgs),

    /// Replace every field of a class
    Update {
        id: i64,

        #[command(flatten)]
        fields: ClassArgs,
    },

    /// Delete a class (sessions already logged are kept)
    Del {
        id: i64,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List classes
    List,
}

#[derive(Subcommand)]
pub enum SyncAction {
    /// Upload local data now
    Push,

    /// Download the shared document and replace local data if newer
    Pull {
        #[arg(long, help = "Apply the remote document even if it is not newer")]
        force: bool,
    },

    /// Show sync configuration and last sync time
    Status,

    /// Poll the shared document and apply remote changes
    Watch {
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        #[arg(long, help = "Check once and exit")]
        once: bool,
    },
}
