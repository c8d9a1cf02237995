//! Pages and dialogs, one module each.

pub mod animal;
pub mod animals;
pub mod auth;
pub mod chicken;
pub mod open;

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::Serialize;
use service::client::LOGIN_ROUTE;
use service::upload::{percent, ProgressFn};
use service::{AnimalService, ApiClient, AuthService, ChickenService};

use crate::args::{ChickenCommand, Commands, OutputFormat};
use crate::render;

/// Everything a command needs: the services and how to print.
#[derive(Clone)]
pub struct Context {
    pub client: ApiClient,
    pub animals: AnimalService,
    pub chickens: ChickenService,
    pub auth: AuthService,
    pub output: OutputFormat,
}

impl Context {
    pub fn new(client: ApiClient, output: OutputFormat) -> Self {
        Self {
            animals: AnimalService::new(client.clone()),
            chickens: ChickenService::new(client.clone()),
            auth: AuthService::new(client.clone()),
            client,
            output,
        }
    }

    /// Mutating pages are only offered with the session flag set.
    pub async fn require_login(&self) -> Result<()> {
        if !self.auth.is_logged_in().await {
            bail!("login required: run `petrack login` (page {LOGIN_ROUTE})");
        }
        Ok(())
    }

    /// Print `value` as JSON, or the table text otherwise.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, table: impl FnOnce() -> String) -> Result<()> {
        match self.output {
            OutputFormat::Json => println!("{}", render::json(value)?),
            OutputFormat::Table => print!("{}", table()),
        }
        Ok(())
    }

    pub fn image_base(&self) -> &str {
        &self.client.config().image_base_url
    }
}

pub async fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Open { path } => open::open(ctx, &path).await,
        Commands::List { kind } => animals::list(ctx, kind).await,
        Commands::Show { id, sort } => animal::show(ctx, &id, &sort).await,
        Commands::Add { kind, name, description, breed } => {
            animals::add(ctx, kind, name, description, breed).await
        }
        Commands::Edit { id, profile, breed } => animal::edit(ctx, &id, &profile, breed).await,
        Commands::Delete { id, yes } => animals::delete(ctx, &id, yes).await,
        Commands::Upload { id, file } => animal::upload(ctx, &id, &file).await,
        Commands::Vaccinate { id, drafts } => animal::vaccinate(ctx, &id, drafts).await,
        Commands::Unvaccinate { id, record } => animal::unvaccinate(ctx, &id, &record).await,
        Commands::Login { user, password } => auth::login(ctx, user, password).await,
        Commands::Logout => auth::logout(ctx).await,
        Commands::Status => auth::status(ctx).await,
        Commands::Chicken { action } => match action {
            ChickenCommand::List => chicken::list(ctx).await,
            ChickenCommand::Show { id, sort } => chicken::show(ctx, &id, &sort).await,
            ChickenCommand::Add { name, description, kind } => chicken::add(ctx, name, description, kind).await,
            ChickenCommand::Edit { id, profile, kind } => chicken::edit(ctx, &id, &profile, kind).await,
            ChickenCommand::Delete { id, yes } => chicken::delete(ctx, &id, yes).await,
            ChickenCommand::Upload { id, file } => chicken::upload(ctx, &id, &file).await,
            ChickenCommand::Vaccinate { id, drafts } => chicken::vaccinate(ctx, &id, drafts).await,
            ChickenCommand::Unvaccinate { id, record } => chicken::unvaccinate(ctx, &id, &record).await,
        },
    }
}

/// Ask a yes/no question on stderr; anything but `y` declines.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N]: ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Progress line on stderr, redrawn in place.
pub(crate) fn progress_reporter() -> ProgressFn {
    Arc::new(|sent: u64, total: u64| {
        eprint!("\rUploading... {:>3}%", percent(sent, total));
        if sent >= total {
            eprintln!();
        }
    })
}
