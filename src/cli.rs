use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    catalog::Catalog,
    core::{cascade::Patch, profile::Profile},
    narrative::{Language, gemini},
    prelude::*,
    reference::Reference,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the savings of replacing the heating system with a heat pump.
    #[clap(name = "calculate")]
    Calculate(Box<CalculateArgs>),

    /// List the heat pumps on offer.
    #[clap(name = "products")]
    Products(CatalogArgs),

    /// Print the built-in reference table as TOML, to start a custom one from.
    #[clap(name = "reference")]
    Reference,
}

#[derive(Parser)]
pub struct CalculateArgs {
    /// Starting profile: TOML with the same fields as the command-line edits.
    #[clap(long = "profile", env = "PROFILE_PATH")]
    pub profile: Option<PathBuf>,

    #[clap(flatten)]
    pub reference: ReferenceArgs,

    #[clap(flatten)]
    pub catalog: CatalogArgs,

    #[clap(flatten)]
    pub patch: Patch,

    #[clap(long = "format", value_enum, default_value = "table", env = "REPORT_FORMAT")]
    pub format: Format,

    #[clap(flatten)]
    pub narrative: NarrativeArgs,
}

impl CalculateArgs {
    pub fn profile(&self, reference: &Reference) -> Result<Profile> {
        let profile = match &self.profile {
            Some(path) => Profile::read_from(path, reference)?,
            None => Profile::default(),
        };
        Ok(profile.apply(&self.patch, reference))
    }
}

#[derive(Parser)]
pub struct ReferenceArgs {
    /// Custom reference table in TOML, the built-in one otherwise.
    #[clap(long = "reference", env = "REFERENCE_PATH")]
    pub reference: Option<PathBuf>,
}

impl ReferenceArgs {
    pub fn load(&self) -> Result<Reference> {
        self.reference.as_ref().map_or_else(|| Ok(Reference::default()), Reference::read_from)
    }
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Custom product catalog in TOML, the built-in one otherwise.
    #[clap(long = "catalog", env = "CATALOG_PATH")]
    pub catalog: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self) -> Result<Catalog> {
        self.catalog.as_ref().map_or_else(|| Ok(Catalog::default()), Catalog::read_from)
    }
}

#[derive(Parser)]
pub struct NarrativeArgs {
    /// Ask the language model to interpret the results.
    #[clap(long = "narrate", env = "NARRATE")]
    pub is_enabled: bool,

    #[clap(long = "language", value_enum, default_value = "de", env = "NARRATIVE_LANGUAGE")]
    pub language: Language,

    #[clap(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[clap(long = "gemini-model", default_value = gemini::Api::DEFAULT_MODEL, env = "GEMINI_MODEL")]
    pub model: String,
}

impl NarrativeArgs {
    /// Build the client, if the narrative is requested.
    pub fn api(&self) -> Result<Option<gemini::Api>> {
        if !self.is_enabled {
            return Ok(None);
        }
        let api_key = self.api_key.clone().context("the narrative requires a Gemini API key")?;
        Ok(Some(gemini::Api::new(api_key, self.model.clone())))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    /// Human-readable tables.
    Table,

    /// Machine-readable report on stdout.
    Json,
}
