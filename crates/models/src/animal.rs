use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;
use crate::vaccination::Vaccination;
use crate::PetRecord;

/// Kind of animal, serialized as its numeric discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AnimalType {
    Cat = 1,
    Chicken = 2,
    Dog = 3,
}

impl AnimalType {
    pub const ALL: [AnimalType; 3] = [AnimalType::Cat, AnimalType::Chicken, AnimalType::Dog];

    /// Singular display name, e.g. `Cat`.
    pub fn name(self) -> &'static str {
        match self {
            AnimalType::Cat => "Cat",
            AnimalType::Chicken => "Chicken",
            AnimalType::Dog => "Dog",
        }
    }

    /// Collection path segment, e.g. `cats`.
    pub fn collection(self) -> &'static str {
        match self {
            AnimalType::Cat => "cats",
            AnimalType::Chicken => "chickens",
            AnimalType::Dog => "dogs",
        }
    }

    /// Known breeds for this type.
    pub fn breeds(self) -> impl Iterator<Item = Breed> {
        BREEDS
            .iter()
            .filter(move |(_, _, kind)| *kind == self)
            .map(|(breed, _, _)| *breed)
    }
}

impl TryFrom<u8> for AnimalType {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AnimalType::Cat),
            2 => Ok(AnimalType::Chicken),
            3 => Ok(AnimalType::Dog),
            other => Err(ModelError::UnknownAnimalType(other.to_string())),
        }
    }
}

impl From<AnimalType> for u8 {
    fn from(kind: AnimalType) -> u8 {
        kind as u8
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimalType {
    type Err = ModelError;

    /// Accepts `cat`, `cats`, `Cat` or the numeric discriminator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Ok(n) = lower.parse::<u8>() {
            return AnimalType::try_from(n);
        }
        AnimalType::ALL
            .into_iter()
            .find(|kind| lower == kind.name().to_ascii_lowercase() || lower == kind.collection())
            .ok_or_else(|| ModelError::UnknownAnimalType(s.to_string()))
    }
}

/// Numeric breed discriminator. Values the client does not know are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breed(pub u32);

impl Breed {
    pub const RUSSIAN_BLUE: Breed = Breed(1);
    pub const BRAHMA: Breed = Breed(10);
    pub const BUFF_ORPINGTON: Breed = Breed(11);
    pub const MIX: Breed = Breed(20);
    pub const FOX_HOUND: Breed = Breed(21);

    pub fn name(self) -> Option<&'static str> {
        BREEDS.iter().find(|(b, _, _)| *b == self).map(|(_, name, _)| *name)
    }

    /// The animal type a known breed belongs to.
    pub fn animal_type(self) -> Option<AnimalType> {
        BREEDS.iter().find(|(b, _, _)| *b == self).map(|(_, _, kind)| *kind)
    }

    /// Breeds are positive integers; zero is the "nothing selected" value.
    pub fn is_valid(self) -> bool {
        self.0 >= 1
    }
}

static BREEDS: [(Breed, &str, AnimalType); 5] = [
    (Breed::RUSSIAN_BLUE, "Russian Blue", AnimalType::Cat),
    (Breed::BRAHMA, "Brahma", AnimalType::Chicken),
    (Breed::BUFF_ORPINGTON, "Buff Orpington", AnimalType::Chicken),
    (Breed::MIX, "Mix", AnimalType::Dog),
    (Breed::FOX_HOUND, "Fox Hound", AnimalType::Dog),
];

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{}", self.0),
        }
    }
}

impl FromStr for Breed {
    type Err = ModelError;

    /// Accepts a number or a breed name ignoring case, spaces, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.trim().parse::<u32>() {
            return Ok(Breed(n));
        }
        let wanted = squash(s);
        BREEDS
            .iter()
            .find(|(_, name, _)| squash(name) == wanted)
            .map(|(breed, _, _)| *breed)
            .ok_or_else(|| ModelError::Validation(format!("unknown breed: {s}")))
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A tracked pet as served by `/animal/{id}` and the collection endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<Breed>,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub vaccinations: Vec<Vaccination>,
}

impl PetRecord for Animal {
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
        let kind = self.kind.map(AnimalType::name).unwrap_or("Animal");
        match self.breed {
            Some(breed) => format!("{kind} · {breed}"),
            None => kind.to_string(),
        }
    }

    fn vaccinations(&self) -> &[Vaccination] {
        &self.vaccinations
    }

    fn vaccinations_mut(&mut self) -> &mut Vec<Vaccination> {
        &mut self.vaccinations
    }
}

/// Go-style servers encode an empty slice as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
