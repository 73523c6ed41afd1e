use std::time::Duration;

use crate::{config::Config, error, server, warning};

/// Runs the backend until it is stopped.
///
/// With `open` set, the login page of the freshly started server is opened in
/// the default browser, which walks the user through the Spotify consent
/// screen and back to `/callback`.
pub async fn serve(open: bool) {
    let config = Config::from_env();

    if config.client_id.is_empty() || config.client_secret.is_empty() {
        warning!("SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not set; token requests will fail");
    }

    if open {
        let login_url = format!("http://{}/login", config.server_addr);
        tokio::spawn(async move {
            // give the listener a moment to bind
            tokio::time::sleep(Duration::from_millis(500)).await;
            if webbrowser::open(&login_url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    login_url
                )
            }
        });
    }

    if let Err(e) = server::start_api_server(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
