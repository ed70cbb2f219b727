pub mod auth;
pub mod categories;
pub mod prune;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use bcscal_core::{CalendarService, Catalog, DryRunCalendar};
use chrono_tz::Tz;

use crate::google::{self, GoogleCalendar};
use crate::settings::Settings;

/// Everything a command needs from disk, loaded once.
pub struct Workspace {
    pub catalog: Catalog,
    pub timezone: Tz,
}

impl Workspace {
    /// Load and validate the catalog named by `settings`.
    ///
    /// Validation covers every category, not only the ones a command will
    /// touch, so a bad catalog never gets half-published.
    pub fn load(settings: &Settings) -> Result<Self> {
        let timezone = settings.tz()?;
        let path = settings.catalog_path();

        let catalog = Catalog::load(&path)
            .with_context(|| format!("Invalid catalog {}", path.display()))?;
        catalog
            .validate(timezone)
            .with_context(|| format!("Invalid catalog {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            categories = catalog.categories().len(),
            timezone = %timezone,
            "catalog loaded"
        );
        Ok(Workspace { catalog, timezone })
    }
}

/// Connect to Google, wrapped so writes are only logged when `dry_run`.
pub async fn connect(base_dir: &Path, dry_run: bool) -> Result<Box<dyn CalendarService>> {
    let calendar = GoogleCalendar::connect(base_dir).await?;
    if dry_run {
        tracing::info!("dry run: no event will be inserted or deleted");
        Ok(Box::new(DryRunCalendar::new(calendar)))
    } else {
        Ok(Box::new(calendar))
    }
}

pub async fn connect_default(dry_run: bool) -> Result<Box<dyn CalendarService>> {
    connect(&google::base_dir()?, dry_run).await
}
