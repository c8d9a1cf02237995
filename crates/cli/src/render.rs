//! Text rendering for pages: cards for lists, a profile block and the vaccination table.

use chrono::{DateTime, Utc};
use models::vaccination::{sort_vaccinations, VaccinationSort};
use models::{PetRecord, Vaccination};
use serde::Serialize;

const NO_DATE: &str = "-";

/// One card on a list page.
pub fn card<P: PetRecord>(pet: &P, image_base: &str) -> String {
    let mut out = format!("{}  [{}]\n  id: {}\n", display_name(pet), pet.kind_label(), pet.id());
    if !pet.description().is_empty() {
        out.push_str(&format!("  {}\n", pet.description()));
    }
    if !pet.image_url().is_empty() {
        out.push_str(&format!("  image: {}\n", image_link(image_base, pet.image_url())));
    }
    out
}

pub fn cards<P: PetRecord>(pets: &[P], image_base: &str) -> String {
    if pets.is_empty() {
        return "No animals yet.\n".to_string();
    }
    pets.iter().map(|p| card(p, image_base)).collect::<Vec<_>>().join("\n")
}

/// Animal page: the card plus its vaccination table.
pub fn profile<P: PetRecord>(pet: &P, image_base: &str, sort: VaccinationSort, descending: bool) -> String {
    let mut out = card(pet, image_base);
    out.push_str("\nVaccinations\n");
    out.push_str(&vaccination_table(pet.vaccinations(), sort, descending, Utc::now()));
    out
}

/// Table of vaccination records sorted by a column. Past due dates are flagged.
pub fn vaccination_table(
    records: &[Vaccination],
    sort: VaccinationSort,
    descending: bool,
    now: DateTime<Utc>,
) -> String {
    if records.is_empty() {
        return "  (none)\n".to_string();
    }
    let mut rows = records.to_vec();
    sort_vaccinations(&mut rows, sort, descending);

    let width = rows.iter().map(|v| v.name.chars().count()).max().unwrap_or(0).max("NAME".len());
    let mut out = format!("  {:<width$}  {:<10}  {:<10}\n", "NAME", "GIVEN", "NEEDED");
    for v in &rows {
        let mut line = format!("  {:<width$}  {:<10}  {:<10}", v.name, date(v.date_given), date(v.date_needed));
        if v.is_overdue(now) {
            line.push_str("  overdue");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Absolute URL for an image path returned by the server.
pub fn image_link(image_base: &str, image_url: &str) -> String {
    common::utils::url::join(image_base, image_url)
}

pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete {name}?")
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn display_name<P: PetRecord>(pet: &P) -> &str {
    if pet.name().is_empty() { "(unnamed)" } else { pet.name() }
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| NO_DATE.to_string())
}
