use std::net::SocketAddr;

use axum::{
    routing::{get, put},
    Router,
};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod middlewares;
pub mod models;
pub mod validation;

pub async fn axum() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let config = config::Config::from_env().unwrap();

    let pool = PgPoolOptions::new()
        .min_connections(config.pg.as_ref().unwrap().poolminsize)
        .max_connections(config.pg.as_ref().unwrap().poolmaxsize)
        .connect(config.database_url().as_ref())
        .await
        .expect("Failed to create pool database connection");

    let uploads_dir = config
        .uploads_dir
        .clone()
        .unwrap_or_else(|| "public/uploads".to_string());
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .expect("Failed to create uploads directory");

    let auth_middleware = axum::middleware::from_fn_with_state(
        pool.clone(),
        middlewares::authentication::check_authentication,
    );

    let app = Router::new()
        .route(
            "/restaurants",
            get(handlers::restaurant::get_by_authenticated_user).post(handlers::restaurant::create),
        )
        .route(
            "/restaurants/:id",
            put(handlers::restaurant::update).delete(handlers::restaurant::delete),
        )
        .route(
            "/restaurant-categories",
            get(handlers::restaurant_category::get_all),
        )
        .route_layer(auth_middleware)
        .layer(CorsLayer::permissive())
        .layer(axum::Extension(config::UploadsDir(uploads_dir)))
        .with_state(pool.clone());

    let host = &config.server.as_ref().unwrap().host;
    let port = &config.server.as_ref().unwrap().port;
    let addr = format!("{}:{}", host, port).parse::<SocketAddr>().unwrap();

    tracing::debug!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
