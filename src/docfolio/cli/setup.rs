use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "docfolio",
    bin_name = "docfolio",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Local document organizer for PDFs and images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Session,
    Document,
    Category,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Session => "Session:",
            CommandGroup::Document => "Documents:",
            CommandGroup::Category => "Categories:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    /// Returns the group for a given command name
    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "login" | "logout" | "whoami" => Some(CommandGroup::Session),
            "add" | "list" | "view" | "edit" | "delete" => Some(CommandGroup::Document),
            "categories" => Some(CommandGroup::Category),
            "doctor" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Session,
            CommandGroup::Document,
            CommandGroup::Category,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("docfolio {version}\n"));
    output.push_str("Local document organizer for PDFs and images\n");
    output.push('\n');
    output.push_str("Usage: docfolio [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

/// Prints help for a command by name, or the grouped help if it is unknown
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print!("{}", get_grouped_help());
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Session(SessionCommands),

    #[command(flatten)]
    Document(DocumentCommands),

    /// Manage categories (defaults to listing them)
    #[command(alias = "cat", display_order = 20)]
    Categories {
        #[command(subcommand)]
        action: Option<CategoryCommands>,
    },

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Log in with the configured credentials
    #[command(display_order = 1)]
    Login {
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out
    #[command(display_order = 2)]
    Logout,

    /// Show who is logged in
    #[command(display_order = 3)]
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// Import a PDF or image
    #[command(alias = "a", display_order = 10)]
    Add {
        /// File path, file:// URI or content:// handle
        path: String,

        /// Document name (defaults to the file name without extension)
        #[arg(short, long)]
        name: Option<String>,

        /// Category to file it under
        #[arg(short, long, default_value = "Personal")]
        category: String,

        /// Media type, overriding the guess from the extension
        #[arg(long)]
        mime: Option<String>,
    },

    /// List documents
    #[command(alias = "ls", display_order = 11)]
    List {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// View one or more documents
    #[command(alias = "v", display_order = 12)]
    View {
        /// Indexes or ids of the documents (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Write the stored bytes of a single document to this path
        #[arg(long, value_name = "PATH")]
        export: Option<std::path::PathBuf>,
    },

    /// Rename or recategorize a document
    #[command(alias = "e", display_order = 13)]
    Edit {
        /// Index or id of the document
        index: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete one or more documents
    #[command(alias = "rm", display_order = 14)]
    Delete {
        /// Indexes or ids of the documents (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with usage counts
    List,

    /// Add a category
    Add { name: String },

    /// Remove a category
    #[command(alias = "rm")]
    Remove {
        name: String,

        /// Remove even if documents still use it
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Check storage health
    #[command(display_order = 30)]
    Doctor,

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (copy-timeout, username, password)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for docfolio or a subcommand
    #[command(display_order = 32)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
