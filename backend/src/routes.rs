use crate::error::ApiError;
use crate::pipeline::{self, Origin};
use crate::probe;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::info;
use shared::{API_VERSION, MatchesResponse, StatusBody, StatusEnvelope};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/status").route(web::get().to(status)))
        .service(
            web::resource("/upload_image")
                .route(web::post().to(upload_image))
                .default_service(web::route().to(method_not_allowed)),
        );
}

/// GET /status: uptime, counter snapshot, and a freshly computed health
/// verdict from the in-process probe.
async fn status(state: web::Data<AppState>) -> HttpResponse {
    let health = probe::check(&state);

    HttpResponse::Ok().json(StatusEnvelope {
        status: StatusBody {
            uptime: state.uptime(),
            processed: state.counters.snapshot(),
            health,
            api_version: API_VERSION,
        },
    })
}

/// POST /upload_image: multipart upload with a required `image` field,
/// answered with the classifier's match list.
async fn upload_image(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let is_image_field = field.name() == Some("image");
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk.map_err(|e| {
                info!("Multipart read failed: {e}");
                ApiError::MissingField
            })?;
            data.extend_from_slice(&bytes);
        }
        if is_image_field {
            image_data = Some(data);
        }
    }

    let bytes = match image_data {
        Some(data) if !data.is_empty() => data,
        _ => return Err(ApiError::MissingField),
    };

    let matches = pipeline::process_image(&state, &bytes, Origin::Client)?;
    Ok(HttpResponse::Ok().json(MatchesResponse { matches }))
}

async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::UnsupportedMethod)
}
