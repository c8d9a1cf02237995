//! Client-side data model for the pet tracker API.
//! - Wire types mirror the server's JSON (camelCase keys, numeric discriminators).
//! - Form payloads carry the same minimal validation the dialogs enforced.

pub mod animal;
pub mod chicken;
pub mod errors;
pub mod forms;
pub mod vaccination;

pub use animal::{Animal, AnimalType, Breed};
pub use chicken::Chicken;
pub use vaccination::Vaccination;

/// Behaviour shared by the two pet representations (`Animal` and the legacy `Chicken`).
pub trait PetRecord {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn image_url(&self) -> &str;
    fn set_image_url(&mut self, url: String);
    /// Short type/breed label for cards, e.g. `Cat · Russian Blue`.
    fn kind_label(&self) -> String;
    fn vaccinations(&self) -> &[Vaccination];
    fn vaccinations_mut(&mut self) -> &mut Vec<Vaccination>;

    /// Drop every record equal to `target` (same name and dates). Returns how many were removed.
    fn remove_vaccination(&mut self, target: &Vaccination) -> usize {
        let list = self.vaccinations_mut();
        let before = list.len();
        list.retain(|v| v != target);
        before - list.len()
    }

    /// Append submitted records in order.
    fn append_vaccinations(&mut self, added: Vec<Vaccination>) {
        self.vaccinations_mut().extend(added);
    }
}

/// Remove a record from a list page by id. Returns whether it was present.
pub fn remove_by_id<T: PetRecord>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() < before
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn remove_vaccination_matches_all_fields() {
        let given = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let rabies = Vaccination::new("Rabies", Some(given), None);
        let mut animal = Animal {
            vaccinations: vec![
                rabies.clone(),
                Vaccination::new("Rabies", None, None),
                rabies.clone(),
            ],
            ..Default::default()
        };
        assert_eq!(animal.remove_vaccination(&rabies), 2);
        assert_eq!(animal.vaccinations, vec![Vaccination::new("Rabies", None, None)]);
    }

    #[test]
    fn append_keeps_order() {
        let mut chicken = Chicken::default();
        chicken.append_vaccinations(vec![Vaccination::new("a", None, None)]);
        chicken.append_vaccinations(vec![
            Vaccination::new("b", None, None),
            Vaccination::new("c", None, None),
        ]);
        let names: Vec<_> = chicken.vaccinations.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn remove_by_id_filters_list() {
        let mut animals = vec![
            Animal { id: "1".into(), ..Default::default() },
            Animal { id: "2".into(), ..Default::default() },
        ];
        assert!(remove_by_id(&mut animals, "1"));
        assert!(!remove_by_id(&mut animals, "1"));
        assert_eq!(animals.len(), 1);
    }
}
