// src/main.rs

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use academe_connect_server::app_state::AppState;
use academe_connect_server::config::Config;
use academe_connect_server::routes;
use academe_connect_server::store::{DocumentStore, MongoStore};

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;

    let mongo = MongoStore::init(&config.mongo_uri, &config.database_name)
        .await
        .map_err(|e| {
            error!("Could not initialise MongoDB client: {}", e);
            io::Error::other(e)
        })?;
    match mongo.ping().await {
        Ok(()) => info!("Pinged your deployment. You successfully connected to MongoDB!"),
        Err(e) => warn!("MongoDB ping failed, continuing: {}", e),
    }
    let store: Arc<dyn DocumentStore> = Arc::new(mongo);

    let state = web::Data::new(AppState::new(store.clone(), &config));
    let origins = config.allowed_origins.clone();

    info!("Server running at http://0.0.0.0:{}", config.port);
    info!("Allowed CORS origins: {:?}", origins);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&origins))
            .app_data(state.clone())
            .configure(routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await?;

    store.shutdown().await;
    info!("Server stopped");
    Ok(())
}
