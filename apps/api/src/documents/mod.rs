// Document intake: PDF parsing plus the multipart plumbing shared by upload endpoints.

pub mod handlers;
pub mod pdf;

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;

use crate::documents::pdf::{extract_pdf, PdfDocument};
use crate::errors::AppError;

/// All parts of a multipart body, keyed by field name. Later duplicates win.
pub struct MultipartFields(HashMap<String, Bytes>);

impl MultipartFields {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Invalid multipart body", e))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(&format!("Could not read field '{name}'"), e))?;
            fields.insert(name, data);
        }
        Ok(Self(fields))
    }

    /// Raw bytes of a non-empty field.
    pub fn bytes(&self, name: &str) -> Option<Bytes> {
        self.0.get(name).filter(|b| !b.is_empty()).cloned()
    }

    /// A text field as sent; blank counts as absent.
    pub fn text(&self, name: &str) -> Result<Option<String>, AppError> {
        let Some(raw) = self.0.get(name) else {
            return Ok(None);
        };
        let text = std::str::from_utf8(raw)
            .map_err(|_| AppError::Validation(format!("Field '{name}' must be UTF-8 text")))?;
        Ok((!text.trim().is_empty()).then(|| text.to_string()))
    }
}

fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!("{context}: {}", e.body_text()));
    }
    AppError::Validation(format!("{context}: {e}"))
}

/// Runs PDF extraction off the async runtime.
pub async fn extract_pdf_blocking(bytes: Bytes) -> Result<PdfDocument, AppError> {
    let document = tokio::task::spawn_blocking(move || extract_pdf(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;
    Ok(document)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{body::Body, http::Request};

    /// Encodes `parts` as a multipart/form-data POST to `uri`.
    pub fn multipart_request(uri: &str, parts: &[(&str, &[u8])]) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let mut body = Vec::new();
        for (name, data) in parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }
}
