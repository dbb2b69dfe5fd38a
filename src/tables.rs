use std::fmt::Display;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    catalog::{Catalog, Product, Refrigerant},
    core::{
        profile::Profile,
        results::{Amortization, Results},
    },
    quantity::{power::Kilowatts, temperature::Celsius},
    reference::Reference,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn value(value: impl Display) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn signed_color<T: PartialOrd + Default>(value: T) -> Color {
    if value > T::default() { Color::Green } else { Color::Red }
}

#[must_use]
pub fn build_results_table(profile: &Profile, results: &Results) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Current system", "Heat pump"]);
    table.add_row(vec![
        Cell::new("System").add_attribute(Attribute::Bold),
        Cell::new(profile.heating_system),
        Cell::new(format!("{} at {}", results.heat_pump_power, profile.flow_temperature)),
    ]);
    table.add_row(vec![
        Cell::new("Energy").add_attribute(Attribute::Bold),
        value(results.input_energy),
        value(results.heat_pump_electricity),
    ]);
    table.add_row(vec![
        Cell::new("Annual cost").add_attribute(Attribute::Bold),
        value(results.old_system_cost),
        value(results.new_system_cost),
    ]);
    table.add_row(vec![
        Cell::new("Annual CO₂").add_attribute(Attribute::Bold),
        value(results.old_system_co2),
        value(results.new_system_co2),
    ]);
    table
}

#[must_use]
pub fn build_summary_table(profile: &Profile, results: &Results, reference: &Reference) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Key figure", "Value"]);
    table.add_row(vec![Cell::new("Useful heat demand"), value(results.useful_heat_demand)]);
    table.add_row(vec![
        Cell::new("Effective flow temperature"),
        value(profile.flow_temperature - results.fan_effect.unwrap_or(Celsius::ZERO)),
    ]);
    table.add_row(vec![Cell::new("Floor heating share"), value(profile.floor_heating_share)]);
    table.add_row(vec![Cell::new("SCOP"), value(results.effective_efficiency)]);
    if let Some(solar_yield) = results.solar_thermal_yield {
        table.add_row(vec![Cell::new("Solar thermal yield"), value(solar_yield)]);
        table.add_row(vec![Cell::new("Heat pump heat demand"), value(results.heat_pump_heat_demand)]);
    }
    if let Some(photovoltaics) = results.photovoltaics {
        table.add_row(vec![Cell::new("PV yield"), value(photovoltaics.annual_yield)]);
        table.add_row(vec![Cell::new("PV-supplied electricity"), value(photovoltaics.self_supplied)]);
        table.add_row(vec![Cell::new("Grid-supplied electricity"), value(photovoltaics.grid_supplied)]);
    }
    table.add_row(vec![
        Cell::new("Annual savings").add_attribute(Attribute::Bold),
        value(results.annual_savings)
            .fg(signed_color(results.annual_savings))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Annual CO₂ savings"),
        value(results.annual_co2_savings).fg(signed_color(results.annual_co2_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Forest equivalent"),
        value(format!("{:.2} football fields", results.forest_equivalent)),
    ]);
    table.add_row(vec![Cell::new("Effective investment"), value(results.effective_investment)]);
    table.add_row(vec![
        Cell::new("Amortization").add_attribute(Attribute::Bold),
        value(results.amortization).fg(match results.amortization {
            Amortization::Years(_) | Amortization::Immediate => Color::Green,
            Amortization::Never => Color::Red,
            Amortization::NotApplicable => Color::Reset,
        }),
    ]);
    if !profile.optimizations.is_empty() {
        table.add_row(vec![
            Cell::new("Optimizations"),
            value(profile.optimizations.iter().map(|optimization| optimization.to_string()).join(", ")),
        ]);
    }
    table.add_row(vec![
        Cell::new("Prices as of").add_attribute(Attribute::Dim),
        value(reference.prices_as_of).add_attribute(Attribute::Dim),
    ]);
    table
}

#[must_use]
pub fn build_products_table(catalog: &Catalog, selected: Option<&Product>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Product", "Power", "Refrigerant", "Selling points"]);
    for product in &catalog.products {
        let is_selected = selected.is_some_and(|selected| selected.id == product.id);
        let mut name = Cell::new(&product.name);
        if is_selected {
            name = name.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(if is_selected { "➜" } else { "" }).fg(Color::Green),
            name,
            value(product.power),
            Cell::new(product.refrigerant).fg(match product.refrigerant {
                Refrigerant::R290 => Color::Green,
                Refrigerant::R32 => Color::Reset,
            }),
            Cell::new(product.selling_points.iter().join(", ")).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[must_use]
pub fn build_recommendation_table(required: Kilowatts, product: &Product) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Required power", "Recommendation", "Rated power", "Link"]);
    table.add_row(vec![
        value(required),
        Cell::new(&product.name).add_attribute(Attribute::Bold).fg(Color::Green),
        value(product.power).fg(if product.power >= required { Color::Green } else { Color::Red }),
        Cell::new(product.product_url.as_deref().unwrap_or_default()).add_attribute(Attribute::Dim),
    ]);
    table
}
