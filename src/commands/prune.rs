use anyhow::{Context, Result};
use bcscal_core::{CalendarService, Category, ReconcileOptions, ReconcileReport, Reconciler};

/// Remove every upcoming event bcscal created for `category`.
pub async fn run(
    calendar: &dyn CalendarService,
    category: &Category,
    options: ReconcileOptions,
) -> Result<ReconcileReport> {
    let report = Reconciler::new(calendar, options)
        .prune(category)
        .await
        .with_context(|| {
            format!(
                "Failed to prune category '{}' (calendar {})",
                category.name, category.calendar_id
            )
        })?;

    println!(
        "{}: {} deleted, {} foreign events left alone",
        category.name, report.deleted, report.skipped_foreign
    );

    Ok(report)
}
