//! CLI command definitions

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

pub mod csf;
pub mod describe;
pub mod includes;
pub mod labels;
pub mod tokens;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the syntax tokens of a dialect file
    Tokens {
        /// INI file
        file: PathBuf,

        /// First line to tokenize (zero-based)
        #[arg(long)]
        start: Option<usize>,

        /// Last line to tokenize (zero-based, inclusive)
        #[arg(long)]
        end: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Binary string table operations
    Csf {
        #[command(subcommand)]
        command: CsfCommands,
    },

    /// Index label files and look labels up
    Labels {
        /// Directory to scan
        dir: PathBuf,

        /// Labels to look up (case-insensitive); prints index statistics when empty
        #[arg(short, long)]
        lookup: Vec<String>,

        /// Extensions to index, overriding the config file
        #[arg(short, long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the documentation of a key
    Describe {
        /// Section the key appears in
        section: String,

        /// Key name
        key: String,

        /// Dictionary root file, overriding the config file
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// Language tag, overriding the config file
        #[arg(short = 'L', long)]
        language: Option<String>,
    },

    /// List the files reachable through [#include] sections
    Includes {
        /// Root INI file
        root: PathBuf,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum CsfCommands {
    /// Print the labels of a string table (binary or text)
    Dump {
        /// Source file (.csf, or any text table)
        source: PathBuf,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a binary string table from a text table
    Build {
        /// Source text table
        #[arg(short, long)]
        source: PathBuf,

        /// Output .csf file
        #[arg(short, long)]
        destination: PathBuf,

        /// Header language (e.g. en-US, de-DE)
        #[arg(short = 'L', long, default_value = "en-US")]
        language: String,
    },
}

impl Commands {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        match self {
            Commands::Tokens {
                file,
                start,
                end,
                json,
            } => tokens::execute(file, *start, *end, *json),
            Commands::Csf { command } => match command {
                CsfCommands::Dump { source, json } => csf::dump(source, *json),
                CsfCommands::Build {
                    source,
                    destination,
                    language,
                } => csf::build(source, destination, language),
            },
            Commands::Labels {
                dir,
                lookup,
                extensions,
                json,
            } => {
                let extensions = extensions.as_ref().unwrap_or(&config.label_extensions);
                labels::execute(dir, extensions, lookup, *json)
            }
            Commands::Describe {
                section,
                key,
                dictionary,
                language,
            } => {
                let Some(dictionary) = dictionary.as_ref().or(config.dictionary.as_ref()) else {
                    anyhow::bail!(
                        "No dictionary given; pass --dictionary or set `dictionary` in the config file"
                    );
                };
                let language = language.as_deref().unwrap_or(&config.language);
                describe::execute(dictionary, language, section, key)
            }
            Commands::Includes { root, json } => includes::execute(root, *json),
        }
    }
}
