use techconferences::config::env_loader::load_config;
use techconferences::confs_tech::ConfsTechAPI;
use techconferences::tracing::setup_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let loki = setup_tracing().await;
    let config = load_config();

    info!("Loaded {:?}", config);

    let mut api = match &config.base_url {
        Some(base_url) => ConfsTechAPI::with_base_url(base_url),
        None => ConfsTechAPI::default(),
    };

    if let Some(timeout) = config.timeout {
        api = api.with_timeout(timeout).unwrap_or_else(|e| {
            panic!("Could not build HTTP client with timeout {:?}: {}", timeout, e)
        });
    }

    let results = api
        .get_conferences_by_category(&config.categories, config.year)
        .await;

    for (category, result) in results {
        match result {
            Ok(conferences) => conferences.iter().for_each(|conference| {
                info!(
                    "[{}] {} ({}, {}) {}: {}",
                    category,
                    conference.name,
                    conference.city,
                    conference.country,
                    conference.display_dates(),
                    conference.url
                )
            }),
            Err(e) if e.status_code() == Some(404) => {
                info!("No {} conferences listed for {}", category, config.year)
            }
            Err(e) => error!("Failed to get {} conferences: {}", category, e),
        }
    }

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        if let Err(e) = handle.await {
            error!("Loki background task failed: {}", e);
        }
    }
}
