//! Animal page: profile, photo upload and vaccination dialogs.

use std::path::Path;

use anyhow::{bail, Result};
use models::forms::{ProfileEdit, VaccinationDrafts};
use models::{Breed, PetRecord};
use tracing::{info, warn};

use super::{progress_reporter, Context};
use crate::args::{DraftArgs, ProfileArgs, RecordArgs, SortArgs};
use crate::render;
use crate::routes::Route;

pub async fn show(ctx: &Context, id: &str, sort: &SortArgs) -> Result<()> {
    let animal = ctx.animals.get_animal(id).await?;
    ctx.emit(&animal, || {
        let mut out = render::profile(&animal, ctx.image_base(), sort.sort, sort.desc);
        out.push_str(&format!("\nBack: {}\n", Route::list_for(animal.kind).path()));
        out
    })
}

pub async fn edit(ctx: &Context, id: &str, profile: &ProfileArgs, breed: Option<Breed>) -> Result<()> {
    ctx.require_login().await?;
    let edit = ProfileEdit {
        name: profile.name.clone(),
        description: profile.description.clone(),
        breed: breed.map(|b| b.0),
    };
    if edit.is_empty() {
        bail!("nothing to change: pass --name, --description or --breed");
    }
    let mut animal = ctx.animals.get_animal(id).await?;
    edit.apply_to_animal(&mut animal)?;
    ctx.animals.update_animal(&animal).await?;
    info!(id, "profile updated");
    ctx.emit(&animal, || render::profile(&animal, ctx.image_base(), Default::default(), false))
}

pub async fn upload(ctx: &Context, id: &str, file: &Path) -> Result<()> {
    ctx.require_login().await?;
    let mut animal = ctx.animals.get_animal(id).await?;
    let url = ctx.animals.add_image(id, file, Some(progress_reporter())).await?;
    animal.set_image_url(url);
    let link = render::image_link(ctx.image_base(), animal.image_url());
    ctx.emit(&animal, || format!("New image: {link}\n\n{}", render::card(&animal, ctx.image_base())))
}

/// Submit every drafted row, then show the updated table.
pub async fn vaccinate(ctx: &Context, id: &str, drafts: DraftArgs) -> Result<()> {
    ctx.require_login().await?;
    let mut drafts: VaccinationDrafts = drafts.vaccinations.into_iter().collect();
    let mut animal = ctx.animals.get_animal(id).await?;
    let rows = drafts.take();
    ctx.animals.add_vaccinations(id, &rows).await?;
    animal.append_vaccinations(rows);
    ctx.emit(&animal, || render::profile(&animal, ctx.image_base(), Default::default(), false))
}

pub async fn unvaccinate(ctx: &Context, id: &str, record: &RecordArgs) -> Result<()> {
    ctx.require_login().await?;
    let target = record.to_vaccination()?;
    let mut animal = ctx.animals.get_animal(id).await?;
    ctx.animals.delete_vaccination(id, &target).await?;
    if animal.remove_vaccination(&target) == 0 {
        warn!(id, name = %target.name, "no matching vaccination record in the loaded profile");
    }
    ctx.emit(&animal, || render::profile(&animal, ctx.image_base(), Default::default(), false))
}
