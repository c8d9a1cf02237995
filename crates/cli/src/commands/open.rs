use anyhow::Result;
use tracing::debug;

use super::{animal, animals, auth, Context};
use crate::args::SortArgs;
use crate::routes::Route;

/// Navigate to a path and render the page it resolves to.
pub async fn open(ctx: &Context, path: &str) -> Result<()> {
    let route = match Route::parse(path) {
        Some(route) => route,
        None => {
            let target = Route::default();
            debug!(from = path, to = %target.path(), "redirect");
            target
        }
    };
    match route {
        Route::Login if ctx.auth.is_logged_in().await => {
            println!("Already logged in. Use `petrack logout` to end the session.");
            Ok(())
        }
        Route::Login => auth::login(ctx, None, None).await,
        Route::Animals(kind) => animals::list(ctx, kind).await,
        Route::Animal(id) => animal::show(ctx, &id, &SortArgs::default()).await,
    }
}
