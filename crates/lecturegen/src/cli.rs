use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lecturegen")]
#[command(author, version, about)]
#[command(long_about = "Turn a course syllabus into a lecture slide deck.\n\n\
    The syllabus is analyzed, clarifying questions are asked when details are\n\
    missing, and a markdown deck with speaker notes is generated. Slides can be\n\
    refined one at a time, saved to a local library and presented.\n\n\
    Examples:\n  \
    lecturegen                         Start the wizard\n  \
    lecturegen new --file syllabus.pdf Generate from a file\n  \
    lecturegen library list            Show saved lectures\n  \
    lecturegen present deck.md         Present a markdown deck")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new lecture from a syllabus
    New {
        /// Syllabus files (.txt, .md, .pdf, .png, .jpg, .webp), joined in order
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Also ask for company, class name, audience, keywords and hours
        #[arg(long)]
        info: bool,
    },

    /// Present a markdown deck
    Present {
        /// Markdown file to present
        file: PathBuf,

        /// Launch in a window instead of fullscreen
        #[arg(long)]
        windowed: bool,

        /// Start on a specific slide (1-indexed)
        #[arg(long)]
        slide: Option<usize>,
    },

    /// Print a markdown deck slide by slide
    Preview {
        /// Markdown file to preview
        file: PathBuf,

        /// Include speaker notes
        #[arg(long)]
        notes: bool,
    },

    /// Manage saved lectures
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },

    /// Show the AI service configuration
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// List saved lectures, newest first
    List,

    /// Review a saved lecture
    Show {
        /// Lecture id or a unique prefix of it
        id: String,
    },

    /// Present a saved lecture
    Present {
        /// Lecture id or a unique prefix of it
        id: String,

        /// Launch in a window instead of fullscreen
        #[arg(long)]
        windowed: bool,
    },

    /// Write a saved lecture to a markdown file
    Export {
        /// Lecture id or a unique prefix of it
        id: String,

        /// Output path (defaults to the lecture title)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save a markdown deck from disk into the library
    Import {
        /// Markdown file to import
        file: PathBuf,
    },

    /// Delete a saved lecture
    Delete {
        /// Lecture id or a unique prefix of it
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AiCommands {
    /// Show the model, endpoint and whether an API key is available
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.language, ai.model)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let quiet = self.quiet;
        match self.command {
            None => crate::commands::wizard::run(Vec::new(), false, quiet),
            Some(Commands::New { files, info }) => crate::commands::wizard::run(files, info, quiet),
            Some(Commands::Present {
                file,
                windowed,
                slide,
            }) => crate::commands::present::run(&file, windowed, slide),
            Some(Commands::Preview { file, notes }) => crate::commands::preview::run(&file, notes),
            Some(Commands::Library { command }) => crate::commands::library::run(command, quiet),
            Some(Commands::Ai { command }) => crate::commands::ai::run(command),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
        }
    }
}
