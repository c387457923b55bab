//! HTTP Server for the RASAR API.
//!
//! # API Endpoints
//!
//! | Method | Path               | Description                              |
//! |--------|--------------------|------------------------------------------|
//! | GET    | `/`, `/health`     | Health check                             |
//! | POST   | `/calculate_rasar` | Train + test workbooks in, result out    |

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::str::FromStr;
use tower_http::cors::{Any, CorsLayer};

use super::types::{attachment_disposition, fields, ErrorBody, HealthResponse, XLSX_MIME};
use crate::config::ServerConfig;
use crate::error::{PipelineError, RasarError, ServerError, ServerResult};
use crate::models::{DescriptorType, Method as KernelMethod};
use crate::pipeline::calculate_workbooks;

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    // CORS permissif, le frontend est servi depuis une autre origine
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/calculate_rasar", post(calculate_rasar))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(&config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("RASAR server running on http://localhost:{}", config.port);
    log::info!("   POST /calculate_rasar - train_file + test_file -> result workbook");
    log::info!("   GET  /health          - Health check");
    log::info!("   Upload limit: {} bytes", config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            log::warn!("Rejected request: {}", self);
            StatusCode::BAD_REQUEST
        } else {
            log::error!("Calculation failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Multipart fields of one calculation request.
#[derive(Debug, Default)]
struct CalculationUpload {
    train_file: Option<Vec<u8>>,
    test_file: Option<Vec<u8>>,
    method: Option<String>,
    descriptor_type: Option<String>,
}

impl CalculationUpload {
    async fn read(mut multipart: Multipart) -> ServerResult<Self> {
        let mut upload = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                fields::TRAIN_FILE | fields::TEST_FILE => {
                    let file_name = field.file_name().unwrap_or("unknown").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
                    log::info!("Received {} '{}' ({} bytes)", name, file_name, bytes.len());
                    let slot = if name == fields::TRAIN_FILE {
                        &mut upload.train_file
                    } else {
                        &mut upload.test_file
                    };
                    *slot = Some(bytes.to_vec()).filter(|b| !b.is_empty());
                }
                fields::METHOD | fields::DESCRIPTOR_TYPE => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
                    let value = Some(text).filter(|t| !t.trim().is_empty());
                    if name == fields::METHOD {
                        upload.method = value;
                    } else {
                        upload.descriptor_type = value;
                    }
                }
                other => log::debug!("Ignoring multipart field '{}'", other),
            }
        }

        Ok(upload)
    }
}

/// Parse an optional text field, falling back to the default when absent.
fn parse_or_default<T>(raw: Option<String>) -> ServerResult<T>
where
    T: FromStr<Err = RasarError> + Default,
{
    match raw {
        Some(raw) => Ok(raw.parse().map_err(PipelineError::from)?),
        None => Ok(T::default()),
    }
}

/// Calculation endpoint
async fn calculate_rasar(multipart: Multipart) -> ServerResult<Response> {
    let CalculationUpload {
        train_file,
        test_file,
        method,
        descriptor_type,
    } = CalculationUpload::read(multipart).await?;

    let (Some(train), Some(test)) = (train_file, test_file) else {
        return Err(ServerError::BadRequest(
            "Both training and test files are required".into(),
        ));
    };
    let method: KernelMethod = parse_or_default(method)?;
    let descriptor_type: DescriptorType = parse_or_default(descriptor_type)?;

    let bytes = tokio::task::spawn_blocking(move || {
        calculate_workbooks(&train, &test, method, descriptor_type)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("calculation task failed: {}", e)))??;

    log::info!("Result workbook ready ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition()),
        ],
        bytes,
    )
        .into_response())
}
