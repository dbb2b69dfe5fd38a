use serde::Serialize;

use crate::{
    catalog::{Catalog, Product},
    core::{profile::Profile, results::Results},
    narrative::Narrative,
    reference::Reference,
    tables::{
        build_products_table,
        build_recommendation_table,
        build_results_table,
        build_summary_table,
    },
};

/// Everything a calculation produces, ready to print.
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Report<'a> {
    pub profile: &'a Profile,
    pub results: &'a Results,
    pub recommendation: Option<&'a Product>,
    pub narrative: Narrative,
}

impl Report<'_> {
    #[must_use]
    pub fn to_terminal(&self, reference: &Reference, catalog: &Catalog) -> String {
        let mut sections = vec![
            build_results_table(self.profile, self.results).to_string(),
            build_summary_table(self.profile, self.results, reference).to_string(),
        ];
        match self.recommendation {
            Some(product) => {
                sections.push(
                    build_recommendation_table(self.results.heat_pump_power, product).to_string(),
                );
            }
            None => sections.push("The catalog is empty, nothing to recommend.".to_owned()),
        }
        if self.recommendation.is_some() && catalog.products.len() > 1 {
            sections.push(build_products_table(catalog, self.recommendation).to_string());
        }
        if self.narrative != Narrative::Disabled {
            sections.push(self.narrative.to_string());
        }
        sections.join("\n\n")
    }
}
