use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::document::extract::UploadedDocument;
use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const ACTION_FIELD: &str = "action";

/// Fields collected from a multipart upload. Every field is optional here;
/// presence is enforced by the caller so a missing resume surfaces as
/// `MissingInput` rather than a malformed request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<UploadedDocument>,
    pub job_description: Option<String>,
    pub action: Option<String>,
}

/// Reads the known fields from a multipart body. Unknown fields are skipped.
/// An empty file part with no file name (an untouched file input) counts as no upload.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed multipart body"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "Invalid resume upload"))?;
                if !data.is_empty() || !file_name.is_empty() {
                    form.resume = Some(UploadedDocument::new(file_name, data));
                }
            }
            JOB_DESCRIPTION_FIELD => {
                form.job_description = Some(read_text_field(field, &name).await?);
            }
            ACTION_FIELD => {
                form.action = Some(read_text_field(field, &name).await?);
            }
            _ => {
                tracing::debug!("Ignoring unknown multipart field '{name}'");
            }
        }
    }

    Ok(form)
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, &format!("Invalid '{name}' field")))
}

/// Oversized bodies (past `DefaultBodyLimit`) stay distinct from malformed ones.
fn multipart_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}
