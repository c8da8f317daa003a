use std::collections::HashMap;

use axum::extract::{multipart::MultipartRejection, Multipart};

use crate::api::errors::ApiError;
use crate::application::dto::FileUpload;

/// A buffered multipart form: the `file` part plus any text fields
#[derive(Default)]
pub struct MultipartForm {
    pub file: Option<FileUpload>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
        let mut multipart = multipart
            .map_err(|e| ApiError::bad_request(format!("Expected a multipart form: {}", e.body_text())))?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "file" {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let content_type = field.content_type().map(str::to_string);
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;

                form.file = Some(FileUpload {
                    file_name,
                    content_type,
                    content,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}
