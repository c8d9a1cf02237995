//! Pages over the legacy chicken surface.

use std::path::Path;

use anyhow::{bail, Result};
use models::forms::{NewChicken, ProfileEdit, VaccinationDrafts};
use models::{remove_by_id, PetRecord};
use tracing::{info, warn};

use super::{confirm, progress_reporter, Context};
use crate::args::{DraftArgs, ProfileArgs, RecordArgs, SortArgs};
use crate::render;

pub async fn list(ctx: &Context) -> Result<()> {
    let chickens = ctx.chickens.get_chickens().await?;
    ctx.emit(&chickens, || render::cards(&chickens, ctx.image_base()))
}

pub async fn show(ctx: &Context, id: &str, sort: &SortArgs) -> Result<()> {
    let chicken = ctx.chickens.get_chicken(id).await?;
    ctx.emit(&chicken, || render::profile(&chicken, ctx.image_base(), sort.sort, sort.desc))
}

pub async fn add(ctx: &Context, name: String, description: Option<String>, kind: u32) -> Result<()> {
    ctx.require_login().await?;
    let form = NewChicken { name, description, kind };
    let created = ctx.chickens.add_chicken(&form.into_chicken()?).await?;
    info!(id = %created.id, "chicken created");
    show(ctx, &created.id, &SortArgs::default()).await
}

pub async fn edit(ctx: &Context, id: &str, profile: &ProfileArgs, kind: Option<u32>) -> Result<()> {
    ctx.require_login().await?;
    let edit = ProfileEdit { name: profile.name.clone(), description: profile.description.clone(), breed: kind };
    if edit.is_empty() {
        bail!("nothing to change: pass --name, --description or --type");
    }
    let mut chicken = ctx.chickens.get_chicken(id).await?;
    edit.apply_to_chicken(&mut chicken)?;
    ctx.chickens.update_chicken(&chicken).await?;
    ctx.emit(&chicken, || render::card(&chicken, ctx.image_base()))
}

pub async fn delete(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    ctx.require_login().await?;
    let mut page = ctx.chickens.get_chickens().await?;
    let target = ctx.chickens.get_chicken(id).await?;
    if !yes && !confirm(&render::delete_prompt(&target.name))? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.chickens.delete_chicken(id).await?;
    remove_by_id(&mut page, id);
    eprintln!("Deleted {}.", target.name);
    ctx.emit(&page, || render::cards(&page, ctx.image_base()))
}

pub async fn upload(ctx: &Context, id: &str, file: &Path) -> Result<()> {
    ctx.require_login().await?;
    let mut chicken = ctx.chickens.get_chicken(id).await?;
    let url = ctx.chickens.add_image(id, file, Some(progress_reporter())).await?;
    chicken.set_image_url(url);
    ctx.emit(&chicken, || render::card(&chicken, ctx.image_base()))
}

pub async fn vaccinate(ctx: &Context, id: &str, drafts: DraftArgs) -> Result<()> {
    ctx.require_login().await?;
    let mut drafts: VaccinationDrafts = drafts.vaccinations.into_iter().collect();
    let mut chicken = ctx.chickens.get_chicken(id).await?;
    let rows = drafts.take();
    ctx.chickens.add_vaccinations(id, &rows).await?;
    chicken.append_vaccinations(rows);
    ctx.emit(&chicken, || render::profile(&chicken, ctx.image_base(), Default::default(), false))
}

pub async fn unvaccinate(ctx: &Context, id: &str, record: &RecordArgs) -> Result<()> {
    ctx.require_login().await?;
    let target = record.to_vaccination()?;
    let mut chicken = ctx.chickens.get_chicken(id).await?;
    ctx.chickens.delete_vaccination(id, &target).await?;
    if chicken.remove_vaccination(&target) == 0 {
        warn!(id, name = %target.name, "no matching vaccination record in the loaded profile");
    }
    ctx.emit(&chicken, || render::profile(&chicken, ctx.image_base(), Default::default(), false))
}
