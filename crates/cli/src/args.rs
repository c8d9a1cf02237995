use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use models::vaccination::VaccinationSort;
use models::{AnimalType, Breed, Vaccination};

/// Pet tracker client.
#[derive(Parser, Debug)]
#[command(name = "petrack", version, about = "Track pets, their photos and vaccinations")]
pub struct Cli {
    /// Path to the config file (default: $CONFIG_PATH or ~/.petrack/config.toml).
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a page by path, e.g. `/dogs` or `/animal/<id>`.
    Open { path: String },

    /// List animals of a type (cats, chickens, dogs).
    List { kind: AnimalType },

    /// Show an animal's profile and vaccinations.
    Show {
        id: String,
        #[command(flatten)]
        sort: SortArgs,
    },

    /// Add an animal of the given type.
    Add {
        kind: AnimalType,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Breed name or number.
        #[arg(long)]
        breed: Breed,
    },

    /// Edit an animal's profile.
    Edit {
        id: String,
        #[command(flatten)]
        profile: ProfileArgs,
        /// Breed name or number.
        #[arg(long)]
        breed: Option<Breed>,
    },

    /// Delete an animal.
    Delete {
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Upload a photo for an animal.
    Upload { id: String, file: PathBuf },

    /// Record vaccinations.
    Vaccinate {
        id: String,
        #[command(flatten)]
        drafts: DraftArgs,
    },

    /// Delete a vaccination record.
    Unvaccinate {
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Log in to the API.
    Login {
        #[arg(long)]
        user: Option<String>,
        /// Password (prefer the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out.
    Logout,

    /// Show login state and API location.
    Status,

    /// Legacy chicken records.
    Chicken {
        #[command(subcommand)]
        action: ChickenCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChickenCommand {
    List,
    Show {
        id: String,
        #[command(flatten)]
        sort: SortArgs,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Breed number on the legacy surface (1 Brahma, 2 Buff Orpington).
        #[arg(long = "type")]
        kind: u32,
    },
    Edit {
        id: String,
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long = "type")]
        kind: Option<u32>,
    },
    Delete {
        id: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    Upload { id: String, file: PathBuf },
    Vaccinate {
        id: String,
        #[command(flatten)]
        drafts: DraftArgs,
    },
    Unvaccinate {
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Vaccination column to sort by: name, date-given, date-needed.
    #[arg(long, default_value = "name")]
    pub sort: VaccinationSort,
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// `name,given,needed`; dates as YYYY-MM-DD or RFC 3339. Repeatable.
    #[arg(long = "vaccination", required = true)]
    pub vaccinations: Vec<Vaccination>,
}

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub given: Option<String>,
    #[arg(long)]
    pub needed: Option<String>,
}

impl RecordArgs {
    /// The record to match; every field must equal the stored one.
    pub fn to_vaccination(&self) -> Result<Vaccination, models::errors::ModelError> {
        let date = |s: &Option<String>| s.as_deref().map(models::vaccination::parse_date).transpose();
        Ok(Vaccination::new(self.name.clone(), date(&self.given)?, date(&self.needed)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_typed_arguments() {
        let cli = Cli::try_parse_from([
            "petrack", "-o", "json", "add", "dogs", "--name", "Rex", "--breed", "fox-hound",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Add { kind, name, breed, description } => {
                assert_eq!(kind, AnimalType::Dog);
                assert_eq!(name, "Rex");
                assert_eq!(breed, Breed::FOX_HOUND);
                assert!(description.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn vaccinate_collects_every_draft() {
        let cli = Cli::try_parse_from([
            "petrack",
            "vaccinate",
            "7",
            "--vaccination",
            "Rabies,2023-01-01,2024-01-01",
            "--vaccination",
            "FVRCP",
        ])
        .unwrap();
        let Commands::Vaccinate { drafts, .. } = cli.command else { panic!("not vaccinate") };
        assert_eq!(drafts.vaccinations.len(), 2);
        assert_eq!(drafts.vaccinations[1].name, "FVRCP");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["petrack", "list", "hamsters"]).is_err());
        assert!(Cli::try_parse_from(["petrack", "show", "1", "--sort", "weight"]).is_err());
        assert!(Cli::try_parse_from(["petrack", "vaccinate", "1"]).is_err());
    }

    #[test]
    fn record_args_parse_dates() {
        let record = RecordArgs { name: "Rabies".into(), given: Some("2023-01-01".into()), needed: None };
        let v = record.to_vaccination().unwrap();
        assert!(v.date_given.is_some());
        assert!(v.date_needed.is_none());
        let bad = RecordArgs { name: "Rabies".into(), given: Some("soon".into()), needed: None };
        assert!(bad.to_vaccination().is_err());
    }
}
