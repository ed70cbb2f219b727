use anyhow::Result;

use crate::google;

pub async fn run() -> Result<()> {
    let base_dir = google::base_dir()?;

    println!("Authenticating with Google Calendar...");

    let account = google::auth::authenticate(&base_dir).await?;

    println!("\nAuthenticated as: {}", account);
    println!("Session stored in {}", base_dir.display());
    println!("\nRun `bcscal categories` to check that every catalog calendar is reachable.");

    Ok(())
}
