use std::sync::Arc;

use campus_assist::channels::{webhook_routes, MessengerChannel, WebhookState};
use campus_assist::config::BotConfig;
use campus_assist::dialog::DialogEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  Required: MESSENGER_APP_SECRET, MESSENGER_VALIDATION_TOKEN, MESSENGER_PAGE_ACCESS_TOKEN");
        std::process::exit(1);
    });

    eprintln!("🦉 Campus Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/webhook", config.port);
    eprintln!("   Server URL: {}\n", config.server_url);

    let engine = Arc::new(DialogEngine::with_defaults());
    let channel = Arc::new(MessengerChannel::new(config.page_access_token.clone()));

    let app = webhook_routes(WebhookState {
        engine,
        channel,
        app_secret: config.app_secret.clone(),
        verify_token: config.verify_token.clone(),
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
