//! Single binary web server: REST API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), RNG_SEED (e.g. 42).

use actix_web::{web::Data, App, HttpResponse, HttpServer};
use startup_rush::{api, AppConfig, Engine, EngineRandom, InMemoryStore};

/// Avoid 404 in browser tab: favicon not required for app logic.
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    if let Some(seed) = config.rng_seed {
        log::info!("Using seeded randomness (seed {})", seed);
    }
    let engine = Engine::new(InMemoryStore::new(), EngineRandom::from_seed(config.rng_seed));
    let state = Data::new(engine);

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
            .route("/favicon.ico", actix_web::web::get().to(favicon))
    })
    .bind(bind)?
    .run()
    .await
}
