use std::path::Path;

use models::{Animal, AnimalType, Vaccination};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::upload::{self, ProgressFn};

/// CRUD wrapper over the `/animal` surface.
#[derive(Clone)]
pub struct AnimalService {
    client: ApiClient,
}

impl AnimalService {
    pub fn new(client: ApiClient) -> Self { Self { client } }

    pub async fn get_cats(&self) -> Result<Vec<Animal>, ClientError> { self.client.get_json("/cats").await }

    pub async fn get_chickens(&self) -> Result<Vec<Animal>, ClientError> { self.client.get_json("/chickens").await }

    pub async fn get_dogs(&self) -> Result<Vec<Animal>, ClientError> { self.client.get_json("/dogs").await }

    /// List page loader: picks the collection for the type.
    pub async fn list(&self, kind: AnimalType) -> Result<Vec<Animal>, ClientError> {
        match kind {
            AnimalType::Cat => self.get_cats().await,
            AnimalType::Chicken => self.get_chickens().await,
            AnimalType::Dog => self.get_dogs().await,
        }
    }

    pub async fn get_animal(&self, id: &str) -> Result<Animal, ClientError> {
        self.client.get_json(&format!("/animal/{id}")).await
    }

    /// Create an animal from a partial record; returns the stored one with its id.
    #[instrument(skip(self, animal), fields(name = %animal.name))]
    pub async fn add_animal(&self, animal: &Animal) -> Result<Animal, ClientError> {
        let created: Animal = self.client.post_json("/animal", animal).await?;
        info!(id = %created.id, "animal_created");
        Ok(created)
    }

    /// Replace the stored animal with `animal` (whole-body PUT).
    pub async fn update_animal(&self, animal: &Animal) -> Result<(), ClientError> {
        self.client.put_unit(&format!("/animal/{}", animal.id), animal).await
    }

    #[instrument(skip(self))]
    pub async fn delete_animal(&self, id: &str) -> Result<(), ClientError> {
        self.client.delete(&format!("/animal/{id}")).await?;
        info!(%id, "animal_deleted");
        Ok(())
    }

    /// Upload a photo; returns the new `imageUrl` reported by the server.
    #[instrument(skip(self, progress))]
    pub async fn add_image(&self, id: &str, file: &Path, progress: Option<ProgressFn>) -> Result<String, ClientError> {
        let form = upload::image_form(file, progress).await?;
        let partial: Animal = self.client.post_multipart(&format!("/image/{id}"), form).await?;
        Ok(partial.image_url)
    }

    pub async fn add_vaccinations(&self, id: &str, vaccinations: &[Vaccination]) -> Result<(), ClientError> {
        self.client.post_unit(&format!("/animal/{id}/vaccinations/add"), vaccinations).await
    }

    pub async fn delete_vaccination(&self, id: &str, vaccination: &Vaccination) -> Result<(), ClientError> {
        self.client.post_unit(&format!("/animal/{id}/vaccinations/delete"), vaccination).await
    }
}
