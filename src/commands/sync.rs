use anyhow::{Context, Result};
use bcscal_core::{CalendarService, Category, ReconcileOptions, ReconcileReport, Reconciler};

/// Reconcile `categories` one after the other. The first failure stops the
/// run; categories already processed stay as they are.
pub async fn run(
    calendar: &dyn CalendarService,
    categories: &[&Category],
    options: ReconcileOptions,
) -> Result<ReconcileReport> {
    let reconciler = Reconciler::new(calendar, options);
    let mut total = ReconcileReport::default();

    for category in categories {
        tracing::info!(category = %category.name, items = category.items.len(), "working on category");

        let report = reconciler.reconcile(category).await.with_context(|| {
            format!(
                "Failed to sync category '{}' (calendar {})",
                category.name, category.calendar_id
            )
        })?;

        println!(
            "{}: {} inserted, {} deleted, {} foreign events left alone",
            category.name, report.inserted, report.deleted, report.skipped_foreign
        );
        total += report;
    }

    if categories.len() > 1 {
        println!(
            "\nTotal: {} inserted, {} deleted",
            total.inserted, total.deleted
        );
    }

    Ok(total)
}
