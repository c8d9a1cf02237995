use serde::{Deserialize, Serialize};

use crate::animal::null_as_empty;
use crate::vaccination::Vaccination;
use crate::PetRecord;

/// Chicken as served by the legacy `/chicken/{id}` surface.
///
/// `kind` is the breed discriminator on this surface (1 = Brahma, 2 = Buff Orpington).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chicken {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(rename = "type", default, skip_serializing_if = "is_zero")]
    pub kind: u32,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub vaccinations: Vec<Vaccination>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Chicken {
    pub fn breed_name(&self) -> Option<&'static str> {
        match self.kind {
            1 => Some("Brahma"),
            2 => Some("Buff Orpington"),
            _ => None,
        }
    }
}

impl PetRecord for Chicken {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn image_url(&self) -> &str {
        &self.image_url
    }

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    fn kind_label(&self) -> String {
        match self.breed_name() {
            Some(breed) => format!("Chicken · {breed}"),
            None if self.kind > 0 => format!("Chicken · #{}", self.kind),
            None => "Chicken".to_string(),
        }
    }

    fn vaccinations(&self) -> &[Vaccination] {
        &self.vaccinations
    }

    fn vaccinations_mut(&mut self) -> &mut Vec<Vaccination> {
        &mut self.vaccinations
    }
}
