use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapdeck")]
#[command(author, version, about)]
#[command(long_about = "A scroll-snapped slide deck presenter with speaker notes.\n\n\
    Slides stack vertically and snap into place; annotated points open a\n\
    speaker note when clicked.\n\n\
    Examples:\n  \
    snapdeck                       Present the built-in deck (fullscreen)\n  \
    snapdeck talk.md --windowed    Present a deck file in a window\n  \
    snapdeck outline --notes       Print the built-in deck with its notes")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present (defaults to the built-in deck)
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Logo image shown in the top-left corner
    #[arg(long, global = false)]
    pub logo: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
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
    /// Print the slides of a deck
    Outline {
        /// Deck file (defaults to the built-in deck)
        file: Option<PathBuf>,

        /// Include speaker notes
        #[arg(long)]
        notes: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
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

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.windowed, defaults.start_slide, defaults.logo)
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the configuration file location
    Path,
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
        match self.command {
            Some(Commands::Outline { file, notes, json }) => {
                if let Some(file) = &file {
                    ensure_exists(file)?;
                }
                crate::commands::outline::run(file.as_deref(), notes, json)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                if let Some(file) = &self.file {
                    ensure_exists(file)?;
                }
                crate::app::run(crate::app::LaunchOptions {
                    file: self.file,
                    windowed: self.windowed,
                    start_slide: self.slide,
                    logo: self.logo,
                })
            }
        }
    }
}

fn ensure_exists(file: &std::path::Path) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn presentation_flags() {
        let cli = Cli::try_parse_from(["snapdeck", "talk.md", "--windowed", "--slide", "5", "-vv"])
            .expect("parses");
        assert_eq!(cli.file, Some(PathBuf::from("talk.md")));
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(5));
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn no_arguments_presents_builtin() {
        let cli = Cli::try_parse_from(["snapdeck"]).expect("parses");
        assert!(cli.file.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn outline_subcommand() {
        let cli = Cli::try_parse_from(["snapdeck", "outline", "--notes", "--json"]).expect("parses");
        match cli.command {
            Some(Commands::Outline { file, notes, json }) => {
                assert!(file.is_none());
                assert!(notes && json);
            }
            _ => panic!("expected outline"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let cli = Cli::try_parse_from(["snapdeck", "outline", "/nonexistent/deck.md"]).expect("parses");
        let err = cli.run().unwrap_err();
        assert_eq!(err.to_string(), "File not found: /nonexistent/deck.md");
    }
}
