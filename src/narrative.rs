//! Prose interpretation of the results, written by an external language model.
//!
//! The numbers never depend on it: the narrator receives a [`Snapshot`] computed once,
//! and its failure only degrades the report.

pub mod gemini;
pub mod render;
mod snapshot;

use std::fmt::{Display, Formatter, Write};

use bon::Builder;
use serde::{Deserialize, Serialize};

pub use self::snapshot::Snapshot;
use crate::{
    catalog::{Catalog, Product},
    prelude::*,
};

/// Language of the narrative.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    De,
    En,
    Ro,
}

impl Language {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::De => "German",
            Self::En => "English",
            Self::Ro => "Romanian",
        }
    }
}

#[derive(Builder)]
pub struct NarrativeRequest<'a> {
    pub snapshot: &'a Snapshot,
    pub catalog: &'a Catalog,
    pub recommendation: Option<&'a Product>,

    #[builder(default)]
    pub language: Language,
}

impl NarrativeRequest<'_> {
    /// Instructions for the language model.
    pub fn prompt(&self) -> Result<String> {
        let mut prompt = String::new();
        writeln!(
            prompt,
            "You are a heating renovation and energy consultant for an online heat pump shop. \
             Interpret the results of a heating cost calculator briefly and recommend a matching \
             heat pump from the catalog below.",
        )?;
        writeln!(prompt, "Answer in {}.", self.language.name())?;
        writeln!(
            prompt,
            "Keep the tone encouraging, professional and easy to follow. \
             Write 3 to 4 short paragraphs, at most 180 words, using Markdown \
             (**bold** for key terms, [text](url) for links).",
        )?;
        writeln!(prompt)?;
        writeln!(prompt, "Input summary:\n{}", serde_json::to_string_pretty(&self.snapshot.input)?)?;
        writeln!(prompt)?;
        writeln!(prompt, "Results:\n{}", serde_json::to_string_pretty(&self.snapshot.results)?)?;
        writeln!(prompt)?;
        writeln!(prompt, "Available heat pumps:")?;
        for product in &self.catalog.products {
            write!(prompt, "- **{:.0} kW ({}):** {}", product.power.0, product.refrigerant, product.name)?;
            if let Some(url) = &product.product_url {
                write!(prompt, " ({url})")?;
            }
            writeln!(prompt)?;
        }
        if let Some(product) = self.recommendation {
            writeln!(prompt, "\nThe calculator's own pick is `{}`.", product.id)?;
        }
        writeln!(prompt)?;
        writeln!(
            prompt,
            "Cover these points:\n\
             1. Start with the product recommendation for the sized power, prefer R290 models \
                where they fit, explain briefly why, and link the product.\n\
             2. Comment on the annual savings and the payback period.\n\
             3. Mention why correct sizing matters (short cycling, efficiency).\n\
             4. Highlight the CO₂ savings.\n\
             5. Close with an overall recommendation.\n\
             If the savings are negative, stay positive and point at other benefits such as \
             property value and independence. If there was no old system, treat the results as a \
             forecast for a new build. Start directly with the interpretation, without a preamble.",
        )?;
        Ok(prompt)
    }
}

/// Source of the narrative.
pub trait Narrator {
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Result<String>;
}

/// Outcome of the narrative request, reported next to the numbers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "kebab-case")]
pub enum Narrative {
    /// Not requested.
    Disabled,

    Ready(String),

    /// The request failed, the text is the error.
    Failed(String),
}

impl Narrative {
    /// Ask the narrator, turning its failure into a status.
    pub fn request(narrator: &impl Narrator, request: &NarrativeRequest<'_>) -> Self {
        match narrator.narrate(request) {
            Ok(text) => Self::Ready(text),
            Err(error) => {
                error!("failed to generate the narrative: {error:#}");
                Self::Failed(format!("{error:#}"))
            }
        }
    }
}

impl Display for Narrative {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => Ok(()),
            Self::Ready(text) => write!(f, "{}", render::to_terminal(text)),
            Self::Failed(error) => write!(f, "The interpretation is unavailable: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{calculator::Calculator, profile::Profile},
        quantity::power::Kilowatts,
        reference::Reference,
    };

    struct Failing;

    impl Narrator for Failing {
        fn narrate(&self, _request: &NarrativeRequest<'_>) -> Result<String> {
            bail!("service unavailable")
        }
    }

    struct Echo;

    impl Narrator for Echo {
        fn narrate(&self, request: &NarrativeRequest<'_>) -> Result<String> {
            Ok(request.language.name().to_owned())
        }
    }

    fn snapshot() -> Result<Snapshot> {
        let profile = Profile::default();
        let results = Calculator::try_new(&Reference::default())?.calculate(&profile)?;
        Ok(Snapshot::new(&profile, &results))
    }

    #[test]
    fn test_failure_becomes_status() -> Result {
        let snapshot = snapshot()?;
        let catalog = Catalog::default();
        let request = NarrativeRequest::builder().snapshot(&snapshot).catalog(&catalog).build();
        assert_eq!(
            Narrative::request(&Failing, &request),
            Narrative::Failed("service unavailable".to_owned()),
        );
        Ok(())
    }

    #[test]
    fn test_language_reaches_narrator() -> Result {
        let snapshot = snapshot()?;
        let catalog = Catalog::default();
        let request = NarrativeRequest::builder()
            .snapshot(&snapshot)
            .catalog(&catalog)
            .language(Language::Ro)
            .build();
        assert_eq!(Narrative::request(&Echo, &request), Narrative::Ready("Romanian".to_owned()));
        Ok(())
    }

    #[test]
    fn test_prompt() -> Result {
        let snapshot = snapshot()?;
        let catalog = Catalog::default();
        let recommendation = catalog.select(Kilowatts(16.5));
        let prompt = NarrativeRequest::builder()
            .snapshot(&snapshot)
            .catalog(&catalog)
            .maybe_recommendation(recommendation)
            .language(Language::En)
            .build()
            .prompt()?;
        assert!(prompt.contains("Answer in English."));
        assert!(prompt.contains("\"heat-pump-power\": 16.5"));
        assert!(prompt.contains("- **16 kW (R32):** CHOFU 16kW Inverter Wärmepumpe R32 380V"));
        assert!(prompt.contains("`chofu-16kw-r32`"));
        Ok(())
    }

    #[test]
    fn test_serialize_status() -> Result {
        assert_eq!(serde_json::to_string(&Narrative::Disabled)?, r#"{"status":"disabled"}"#);
        assert_eq!(
            serde_json::to_string(&Narrative::Failed("timeout".to_owned()))?,
            r#"{"status":"failed","text":"timeout"}"#,
        );
        Ok(())
    }
}
