//! Installed-app OAuth flow: open the consent page, catch the redirect on a
//! local port, trade the code for tokens.

use anyhow::{Context, Result};
use google_calendar::Client;
use google_calendar::types::MinAccessRole;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use super::session::{Session, SessionData};
use super::{SCOPES, app_config, redirect_address, redirect_uri};

/// Run the flow and store the session under `base_dir`. Returns the id of
/// the account's primary calendar (its email address).
pub async fn authenticate(base_dir: &Path) -> Result<String> {
    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

    let creds = app_config::load(base_dir)?;

    let mut client = Client::new(
        creds.client_id.clone(),
        creds.client_secret.clone(),
        redirect_uri(),
        String::new(),
        String::new(),
    );

    let auth_url = client.user_consent_url(&scopes);

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    // Try to open the browser automatically
    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, state) = wait_for_callback().await?;

    tracing::info!("received authorization code, exchanging for tokens");

    let access_token = client
        .get_access_token(&code, &state)
        .await
        .context("Failed to exchange code for tokens")?;

    let session = Session::new(base_dir, creds, SessionData::from_tokens(&access_token, None));
    session.save()?;

    let calendars = session
        .client()
        .calendar_list()
        .list_all(MinAccessRole::default(), false, false)
        .await
        .context("Failed to list calendars of the new session")?
        .body;

    let account = calendars
        .into_iter()
        .find(|cal| cal.primary)
        .map(|cal| cal.id)
        .unwrap_or_else(|| "(unknown)".to_string());

    Ok(account)
}

async fn wait_for_callback() -> Result<(String, String)> {
    let listener = TcpListener::bind(redirect_address())
        .await
        .context("Failed to bind OAuth callback listener")?;

    tracing::info!(address = %redirect_address(), "waiting for OAuth callback");

    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let (code, state) = parse_callback(&request_line)?;

    // Send a response to the browser
    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>Authentication successful!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    Ok((code, state))
}

/// Extract `code` and `state` from the request line of the redirect.
fn parse_callback(request_line: &str) -> Result<(String, String)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request"))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
            .ok_or_else(|| anyhow::anyhow!("No {} in callback", name))
    };

    Ok((param("code")?, param("state")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_yields_code_and_state() {
        let (code, state) =
            parse_callback("GET /callback?state=xyz&code=4%2F0Abc HTTP/1.1\r\n").unwrap();
        assert_eq!(code, "4/0Abc");
        assert_eq!(state, "xyz");
    }

    #[test]
    fn callback_without_code_is_rejected() {
        let err = parse_callback("GET /callback?error=access_denied HTTP/1.1").unwrap_err();
        assert!(err.to_string().contains("code"));
        assert!(parse_callback("").is_err());
    }
}
