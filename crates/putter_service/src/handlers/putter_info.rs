use actix_web::{web, HttpResponse};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::server::AppState;

pub const MISSING_PUTTER_NAME: &str = "Please provide a putter name";

#[derive(Debug, Deserialize)]
pub struct PutterInfoRequest {
    #[serde(default)]
    pub putter_name: Option<String>,
}

impl PutterInfoRequest {
    /// The name exactly as submitted, provided it is non-empty.
    pub fn into_putter_name(self) -> Option<String> {
        self.putter_name.filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PutterInfoResponse {
    pub response: String,
}

pub async fn handler(
    state: web::Data<AppState>,
    req: web::Json<PutterInfoRequest>,
) -> Result<HttpResponse> {
    let Some(putter_name) = req.into_inner().into_putter_name() else {
        warn!("Rejected putter report request: putter_name missing or empty");
        return Err(AppError::Validation(MISSING_PUTTER_NAME.to_string()));
    };

    let input_chars = putter_name.chars().count();
    info!("Putter report requested (input_chars={})", input_chars);

    let report = state
        .client
        .complete(state.system_prompt, &putter_name)
        .await
        .map_err(|e| {
            error!(
                "Putter report failed (input_chars={}, upstream_status={:?}): {}",
                input_chars,
                e.status(),
                e
            );
            AppError::from(e)
        })?;

    info!(
        "Putter report generated (input_chars={}, output_chars={})",
        input_chars,
        report.chars().count()
    );
    Ok(HttpResponse::Ok().json(PutterInfoResponse { response: report }))
}
