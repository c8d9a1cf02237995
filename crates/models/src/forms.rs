//! Form payloads and their validators.
//!
//! Validation stays at the level the dialogs enforced: names are required and
//! breed/type discriminators must be positive. Everything else is up to the server.

use crate::animal::{Animal, AnimalType, Breed};
use crate::chicken::Chicken;
use crate::errors::ModelError;
use crate::vaccination::Vaccination;

/// Payload of the "add animal" dialog. The type is fixed by the page it was opened from.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnimal {
    pub name: String,
    pub description: Option<String>,
    pub kind: AnimalType,
    pub breed: Breed,
}

impl NewAnimal {
    /// Empty form for the given type; breed starts unselected.
    pub fn new(kind: AnimalType) -> Self {
        Self { name: String::new(), description: None, kind, breed: Breed::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if !self.breed.is_valid() {
            return Err(ModelError::Validation("breed must be a positive integer".into()));
        }
        Ok(())
    }

    /// Validate and convert into the partial animal sent to `POST /animal`.
    pub fn into_animal(self) -> Result<Animal, ModelError> {
        self.validate()?;
        if let Some(expected) = self.breed.animal_type().filter(|k| *k != self.kind) {
            tracing::warn!(breed = %self.breed, %expected, kind = %self.kind, "breed belongs to another animal type");
        }
        Ok(Animal {
            name: self.name.trim().to_string(),
            description: self.description.unwrap_or_default(),
            kind: Some(self.kind),
            breed: Some(self.breed),
            ..Default::default()
        })
    }
}

/// Payload of the legacy "add chicken" dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewChicken {
    pub name: String,
    pub description: Option<String>,
    pub kind: u32,
}

impl NewChicken {
    pub fn into_chicken(self) -> Result<Chicken, ModelError> {
        validate_name(&self.name)?;
        if self.kind < 1 {
            return Err(ModelError::Validation("type must be a positive integer".into()));
        }
        Ok(Chicken {
            name: self.name.trim().to_string(),
            description: self.description.unwrap_or_default(),
            kind: self.kind,
            ..Default::default()
        })
    }
}

/// Profile edits; `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub breed: Option<u32>,
}

impl ProfileEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.breed.is_none()
    }

    fn check(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if self.breed == Some(0) {
            return Err(ModelError::Validation("breed must be a positive integer".into()));
        }
        Ok(())
    }

    pub fn apply_to_animal(&self, animal: &mut Animal) -> Result<(), ModelError> {
        self.check()?;
        if let Some(name) = &self.name {
            animal.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            animal.description = description.clone();
        }
        if let Some(breed) = self.breed {
            animal.breed = Some(Breed(breed));
        }
        Ok(())
    }

    pub fn apply_to_chicken(&self, chicken: &mut Chicken) -> Result<(), ModelError> {
        self.check()?;
        if let Some(name) = &self.name {
            chicken.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            chicken.description = description.clone();
        }
        if let Some(kind) = self.breed {
            chicken.kind = kind;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Pending vaccination rows, submitted together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaccinationDrafts {
    rows: Vec<Vaccination>,
}

impl VaccinationDrafts {
    pub fn push(&mut self, row: Vaccination) {
        self.rows.push(row);
    }

    /// Remove the row at `index`; out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Vaccination> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn rows(&self) -> &[Vaccination] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hand the rows over for submission, leaving the drafts empty.
    pub fn take(&mut self) -> Vec<Vaccination> {
        std::mem::take(&mut self.rows)
    }
}

impl FromIterator<Vaccination> for VaccinationDrafts {
    fn from_iter<I: IntoIterator<Item = Vaccination>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}
