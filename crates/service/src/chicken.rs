use std::path::Path;

use models::{Chicken, Vaccination};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::upload::{self, ProgressFn};

/// CRUD wrapper over the legacy `/chickens` + `/chicken/{id}` surface.
#[derive(Clone)]
pub struct ChickenService {
    client: ApiClient,
}

impl ChickenService {
    pub fn new(client: ApiClient) -> Self { Self { client } }

    pub async fn get_chickens(&self) -> Result<Vec<Chicken>, ClientError> { self.client.get_json("/chickens").await }

    pub async fn get_chicken(&self, id: &str) -> Result<Chicken, ClientError> {
        self.client.get_json(&format!("/chicken/{id}")).await
    }

    #[instrument(skip(self, chicken), fields(name = %chicken.name))]
    pub async fn add_chicken(&self, chicken: &Chicken) -> Result<Chicken, ClientError> {
        let created: Chicken = self.client.post_json("/chickens", chicken).await?;
        info!(id = %created.id, "chicken_created");
        Ok(created)
    }

    #[instrument(skip(self, progress))]
    pub async fn add_image(&self, id: &str, file: &Path, progress: Option<ProgressFn>) -> Result<String, ClientError> {
        let form = upload::image_form(file, progress).await?;
        let partial: Chicken = self.client.post_multipart(&format!("/image/{id}"), form).await?;
        Ok(partial.image_url)
    }

    pub async fn update_chicken(&self, chicken: &Chicken) -> Result<(), ClientError> {
        self.client.put_unit(&format!("/chicken/{}", chicken.id), chicken).await
    }

    pub async fn add_vaccinations(&self, id: &str, vaccinations: &[Vaccination]) -> Result<(), ClientError> {
        self.client.post_unit(&format!("/chicken/{id}/vaccinations/add"), vaccinations).await
    }

    pub async fn delete_vaccination(&self, id: &str, vaccination: &Vaccination) -> Result<(), ClientError> {
        self.client.post_unit(&format!("/chicken/{id}/vaccinations/delete"), vaccination).await
    }

    #[instrument(skip(self))]
    pub async fn delete_chicken(&self, id: &str) -> Result<(), ClientError> {
        self.client.delete(&format!("/chicken/{id}")).await?;
        info!(%id, "chicken_deleted");
        Ok(())
    }
}
