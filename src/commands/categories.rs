use anyhow::Result;
use bcscal_core::{CalendarService, Catalog};

/// List catalog categories with the calendar each one publishes to.
pub async fn run(calendar: &dyn CalendarService, catalog: &Catalog) -> Result<()> {
    for category in catalog.categories() {
        let target = match calendar.calendar_metadata(&category.calendar_id).await {
            Ok(meta) => meta.display_name,
            Err(e) => {
                tracing::warn!(category = %category.name, "{e}");
                "(unreachable)".to_string()
            }
        };

        println!(
            "{:<20} {:>3} items  -> {} ({})",
            category.name,
            category.items.len(),
            target,
            category.calendar_id
        );
    }

    Ok(())
}
