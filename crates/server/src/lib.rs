#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod api;
pub mod api_doc;
pub mod app;
pub mod data;
pub mod pages;
pub mod utils;

use std::sync::Arc;

use app::{AppState, GetConfig};
use axum::{
    Router,
    routing::{get, post},
};
use config::Config;
use database::DatabaseHandleCreator;
use tokio::signal::{
    self,
    unix::SignalKind,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;

pub const DATABASE_NAME: &str = "setlinks";

pub struct SetlinkServer {
    config: Arc<Config>,
}

impl SetlinkServer {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub async fn run(self) {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
            .init();

        info!("Backend version: {}", self.config.backend_semver_version());

        if self.config.debug_mode() {
            warn!("Debug mode is enabled");
        }

        let (write_handle, write_close_handle) =
            DatabaseHandleCreator::create_write_handle_from_config(&self.config, DATABASE_NAME)
                .await
                .expect("Database init failed");
        let (read_handle, read_close_handle) =
            DatabaseHandleCreator::create_read_handle_from_config(&self.config, DATABASE_NAME)
                .await
                .expect("Database init failed");

        let state = AppState::new(self.config.clone(), read_handle, write_handle);
        let router = create_router(state);

        let addr = self.config.socket().public_api;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Address not available");
        info!("Public API is available on {}", addr);

        let server =
            axum::serve(listener, router).with_graceful_shutdown(wait_quit_signal());
        match server.await {
            Ok(()) => (),
            Err(e) => error!("Server error: {}", e),
        }

        info!("Server quit started");

        read_close_handle.close().await;
        write_close_handle.close().await;

        info!("Server quit done");
    }
}

async fn wait_quit_signal() {
    let mut terminate_signal = signal::unix::signal(SignalKind::terminate()).unwrap();
    tokio::select! {
        _ = terminate_signal.recv() => {}
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => (),
                Err(e) => error!("Failed to listen CTRL+C. Error: {}", e),
            }
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let debug_mode = state.config().debug_mode();

    let router = Router::new()
        .route(
            api::profile::PATH_CREATE_PROFILE,
            post(api::profile::post_create_profile::<AppState>),
        )
        .route(
            pages::PATH_CREATE_PROFILE_PAGE,
            get(pages::get_create_profile_page::<AppState>),
        )
        .route(
            pages::PATH_PROFILE_PAGE,
            get(pages::get_profile_page::<AppState>),
        )
        .with_state(state);

    if debug_mode {
        router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
            .route_layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
