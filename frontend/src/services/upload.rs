//! HTTP and file I/O against the browser.
//!
//! - [`read_file_bytes`] loads a selected file for preview decoding
//! - [`HttpTransport`] posts the two workbooks to the calculation endpoint

use gloo_net::http::Request;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData};

use crate::services::submission::CalculationTransport;
use crate::{AppError, AppResult, RemoteResponse, SubmissionRequest};

/// Read the whole content of a browser file.
pub async fn read_file_bytes(file: &File) -> AppResult<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::Browser(format!("Failed to read '{}': {:?}", file.name(), e)))?;

    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Multipart POST transport built on `gloo-net`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Build the multipart payload: `train_file`, `test_file`, `method`, `descriptor_type`.
fn form_data(request: &SubmissionRequest<File>) -> AppResult<FormData> {
    let form = FormData::new()
        .map_err(|e| AppError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    for (field, file) in [("train_file", &request.train_file), ("test_file", &request.test_file)] {
        form.append_with_blob_and_filename(field, file, &file.name())
            .map_err(|e| AppError::Transport(format!("Failed to append {}: {:?}", field, e)))?;
    }
    for (field, value) in [("method", &request.method), ("descriptor_type", &request.descriptor_type)] {
        form.append_with_str(field, value)
            .map_err(|e| AppError::Transport(format!("Failed to append {}: {:?}", field, e)))?;
    }

    Ok(form)
}

impl CalculationTransport for HttpTransport {
    type File = File;

    async fn send(&self, request: SubmissionRequest<File>) -> AppResult<RemoteResponse> {
        let form = form_data(&request)?;

        let response = Request::post(&self.url)
            .body(form)
            .map_err(|e| AppError::Transport(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response: {}", e)))?;

        log::debug!("POST {} -> {} ({} bytes)", self.url, status, body.len());
        Ok(RemoteResponse { status, body })
    }
}
