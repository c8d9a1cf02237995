use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;

/// A vaccination record: what was given, when, and when the next dose is due.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "zero_as_none", skip_serializing_if = "Option::is_none")]
    pub date_given: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "zero_as_none", skip_serializing_if = "Option::is_none")]
    pub date_needed: Option<DateTime<Utc>>,
}

impl Vaccination {
    pub fn new(
        name: impl Into<String>,
        date_given: Option<DateTime<Utc>>,
        date_needed: Option<DateTime<Utc>>,
    ) -> Self {
        Self { name: name.into(), date_given, date_needed }
    }

    /// Due date lies in the past.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.date_needed.is_some_and(|due| due < now)
    }
}

impl FromStr for Vaccination {
    type Err = ModelError;

    /// Parses `name,given,needed`; either date may be left empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(ModelError::Validation(format!("vaccination needs a name: {s:?}")));
        }
        let given = parts.next().filter(|p| !p.is_empty()).map(parse_date).transpose()?;
        let needed = parts.next().filter(|p| !p.is_empty()).map(parse_date).transpose()?;
        Ok(Vaccination::new(name, given, needed))
    }
}

/// The server sends unset dates as a zero timestamp (Unix epoch or year 1)
/// instead of leaving them out.
fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|dt| dt.timestamp() != 0 && dt.year() > 1))
}

/// Parse a date given as `YYYY-MM-DD` (midnight UTC) or as RFC 3339.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, ModelError> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ModelError::InvalidDate(format!("{s}: {e}")))
}

/// Column a vaccination table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VaccinationSort {
    #[default]
    Name,
    DateGiven,
    DateNeeded,
}

impl FromStr for VaccinationSort {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "name" => Ok(VaccinationSort::Name),
            "date-given" | "given" => Ok(VaccinationSort::DateGiven),
            "date-needed" | "needed" | "due" => Ok(VaccinationSort::DateNeeded),
            other => Err(ModelError::Validation(format!("unknown sort column: {other}"))),
        }
    }
}

/// Sort in place by a column; records without a date sort first.
pub fn sort_vaccinations(records: &mut [Vaccination], by: VaccinationSort, descending: bool) {
    records.sort_by(|a, b| {
        let ord = match by {
            VaccinationSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            VaccinationSort::DateGiven => a.date_given.cmp(&b.date_given),
            VaccinationSort::DateNeeded => a.date_needed.cmp(&b.date_needed),
        };
        if descending { ord.reverse() } else { ord }
    });
}
