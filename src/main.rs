use actix_web::middleware::{Compress, Condition, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi; // bring trait into scope for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use cardlist::error::mask_internal_errors;
use cardlist::openapi::ApiDoc;
use cardlist::repo::{inmem::InMemRepo, Repo};
use cardlist::security::{cors, SecurityHeaders};
use cardlist::{config, AppState, Settings};

// One line per request, roughly morgan's "tiny".
const TERSE_ACCESS_LOG: &str = "%r %s %b - %D ms";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env automatically only in debug builds; deployments set the environment themselves.
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    let settings = Settings::from_env().context("invalid configuration")?;
    let production = settings.is_production();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_ansi(!production)
        .init();

    info!(environment = ?settings.environment, "Bootstrapping card/list API");
    info!("Public URL: {}", settings.public_url);

    let repo: Arc<dyn Repo> = if settings.seed_sample_data {
        info!("Using in-memory store seeded with sample cards and lists");
        Arc::new(InMemRepo::seeded())
    } else {
        info!("Using empty in-memory store");
        Arc::new(InMemRepo::new())
    };

    let settings = Arc::new(settings);
    let state = web::Data::new(AppState { repo, settings: settings.clone() });
    let openapi = ApiDoc::openapi();

    let server_settings = settings.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(mask_internal_errors(production))
            .wrap(SecurityHeaders::from_settings(&server_settings))
            .wrap(cors(&server_settings))
            .wrap(Compress::default())
            .wrap(Condition::new(production, Logger::new(TERSE_ACCESS_LOG)))
            .wrap(Condition::new(!production, TracingLogger::default()))
            .app_data(state.clone())
            .service(SwaggerUi::new("/docs/{_:.*}").url("/docs/openapi.json", openapi.clone()))
            .configure(config)
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| format!("failed to bind {}:{}", settings.host, settings.port))?;

    info!("Listening on http://{}:{}", settings.host, settings.port);

    server.run().await?;
    Ok(())
}
