use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anthropic_client::{ClientState, CompletionClient};
use log::{info, warn};

use crate::error::AppError;
use crate::handlers;
use crate::middleware::TracingMiddleware;
use crate::prompt::PUTTER_EXPERT_PROMPT;

/// Read-only after start-up; shared by every worker.
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub system_prompt: &'static str,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            system_prompt: PUTTER_EXPERT_PROMPT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` keeps actix-web's default (one per physical core).
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            workers: None,
        }
    }
}

/// Malformed bodies get the same `{ "error": ... }` shape as validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(handlers::health::handler))
        .service(
            web::scope("/api").route(
                "/putter-info",
                web::post().to(handlers::putter_info::handler),
            ),
        );
}

pub async fn run(server_config: ServerConfig, client: Arc<dyn CompletionClient>) -> io::Result<()> {
    if client.state() == ClientState::Unusable {
        warn!("Starting without a usable Anthropic client; report requests will fail");
    }

    let state = web::Data::new(AppState::new(client));

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingMiddleware)
            .configure(app_config)
    });
    if let Some(workers) = server_config.workers {
        server = server.workers(workers);
    }

    info!(
        "Starting putter service on http://{}:{}",
        server_config.host, server_config.port
    );

    server
        .bind((server_config.host.as_str(), server_config.port))?
        .run()
        .await
}
