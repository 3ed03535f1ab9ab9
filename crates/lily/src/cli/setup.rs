use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use lilyapp::model::{Category, Rating};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
        }
    }
}

/// How results are written to stdout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled terminal output
    #[default]
    Term,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "lily",
    bin_name = "lily",
    version,
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(lily completions bash)\"  # add to ~/.bashrc\n  eval \"$(lily completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "A personal catalog for books, manga and films", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Term, help_heading = "Options")]
    pub output: OutputMode,
}

pub fn build_command() -> clap::Command {
    Cli::command()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// List the collection, optionally filtered
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only this category (manga, novel, movie, animation, other)
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Only this rating (bible, top-tier, strict, ordinary, mysterious, destiny)
        #[arg(short, long, value_parser = parse_rating)]
        rating: Option<Rating>,

        /// Text to look for in title, author, note and tags
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search title, author, note and tags
    #[command(display_order = 2)]
    Search {
        /// Search words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Add an entry to the collection
    #[command(aliases = ["new", "create"], display_order = 3)]
    Add {
        /// Title of the work
        #[arg(short, long)]
        title: String,

        /// Author, studio or director
        #[arg(short, long)]
        author: String,

        /// Category
        #[arg(short, long, value_parser = parse_category, default_value = "manga")]
        category: Category,

        /// Rating
        #[arg(short, long, value_parser = parse_rating, default_value = "ordinary")]
        rating: Rating,

        /// A few words about it
        #[arg(short, long)]
        note: Option<String>,

        /// Tags separated by commas or spaces
        #[arg(long)]
        tags: Option<String>,

        /// Cover image file to upload
        #[arg(long, value_name = "FILE", conflicts_with = "cover_url")]
        cover: Option<PathBuf>,

        /// Cover image URL
        #[arg(long, value_name = "URL")]
        cover_url: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show collection counts
    #[command(display_order = 10)]
    Stats,

    /// Export the whole collection to lily_collection.json
    #[command(display_order = 11)]
    Export {
        /// Directory to write into (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Show configuration
    #[command(display_order = 20)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Show or change the color theme
    #[command(display_order = 21)]
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommands>,
    },

    /// Print a shell completion script
    #[command(display_order = 22)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Print a commented lily.toml with every setting
    Template,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommands {
    /// Show the theme in effect
    Show,
    /// Use the light palette
    Light,
    /// Use the dark palette
    Dark,
    /// Switch between light and dark
    Toggle,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

fn parse_rating(s: &str) -> Result<Rating, String> {
    s.parse::<Rating>().map_err(|e| e.to_string())
}
