use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use foodie_finds::config::Settings;
use tracing_subscriber::EnvFilter;

mod api;

fn cors(origin: Option<&str>) -> Cors {
    let cors = Cors::default().allowed_methods(vec!["GET"]).allow_any_header();
    match origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(true)
        .with_file(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    let settings = Settings::from_env()?;

    // the pool must exist before the listener accepts any request
    let state = web::Data::new(
        api::ApiState::new(&settings.database_url, settings.max_connections).await?,
    );
    tracing::info!("database {} opened read-only", settings.database_url);

    let cors_origin = settings.cors_origin.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(cors_origin.as_deref()))
            .app_data(state.clone())
            .configure(api::routes)
    })
    .bind((settings.host, settings.port))
    .with_context(|| format!("fail to bind {}:{}", settings.host, settings.port))?;

    tracing::info!("listening on http://{}:{}", settings.host, settings.port);
    server.run().await?;
    Ok(())
}
