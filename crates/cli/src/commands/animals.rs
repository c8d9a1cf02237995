//! Animals list page and the dialogs opened from it.

use anyhow::Result;
use models::forms::NewAnimal;
use models::{remove_by_id, AnimalType, Breed};
use tracing::info;

use super::{animal, confirm, Context};
use crate::args::SortArgs;
use crate::render;
use crate::routes::Route;

pub async fn list(ctx: &Context, kind: AnimalType) -> Result<()> {
    let animals = ctx.animals.list(kind).await?;
    let logged_in = ctx.auth.is_logged_in().await;
    ctx.emit(&animals, || {
        let mut out = format!("{}s ({})\n\n", kind.name(), Route::Animals(kind).path());
        out.push_str(&render::cards(&animals, ctx.image_base()));
        out.push_str(&footer(kind, logged_in));
        out
    })
}

fn footer(kind: AnimalType, logged_in: bool) -> String {
    if logged_in {
        format!("\nAdd one with `petrack add {} --name <name> --breed <breed>`\n", kind.collection())
    } else {
        format!("\nLog in ({}) to add or edit animals.\n", Route::Login.path())
    }
}

/// Add-animal dialog: the type comes from the page, then the new animal's page is shown.
pub async fn add(
    ctx: &Context,
    kind: AnimalType,
    name: String,
    description: Option<String>,
    breed: Breed,
) -> Result<()> {
    ctx.require_login().await?;
    let form = NewAnimal { name, description, kind, breed };
    let created = ctx.animals.add_animal(&form.into_animal()?).await?;
    info!(id = %created.id, route = %Route::Animal(created.id.clone()).path(), "animal created");
    animal::show(ctx, &created.id, &SortArgs::default()).await
}

/// Delete from the list page; the remaining list is shown afterwards.
pub async fn delete(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    ctx.require_login().await?;
    let target = ctx.animals.get_animal(id).await?;
    let back = Route::list_for(target.kind);
    let mut page = match target.kind {
        Some(kind) => ctx.animals.list(kind).await?,
        None => Vec::new(),
    };

    if !yes && !confirm(&render::delete_prompt(&target.name))? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.animals.delete_animal(id).await?;
    remove_by_id(&mut page, id);
    eprintln!("Deleted {}.", target.name);

    ctx.emit(&page, || format!("{}\n\n{}", back.path(), render::cards(&page, ctx.image_base())))
}
