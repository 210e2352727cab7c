use crate::{
    Error, Result,
    imaging::UploadedImage,
    pipeline::{AnalyzeForm, FormSource},
};
use async_trait::async_trait;
use axum::extract::Multipart;
use tracing::debug;

const IMAGE_FIELD: &str = "image";

#[async_trait]
impl FormSource for Multipart {
    async fn read_form(&mut self) -> Result<AnalyzeForm> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = self
            .next_field()
            .await
            .map_err(|e| Error::form_parse(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            // A part only counts as the upload when it carries a file name.
            if name == IMAGE_FIELD && field.file_name().is_some() {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::form_parse(e.body_text()))?;
                debug!(
                    "Read image field: {} bytes, file name {:?}",
                    bytes.len(),
                    file_name
                );
                form.set_image(UploadedImage {
                    bytes: bytes.to_vec(),
                    content_type,
                    file_name,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::form_parse(e.body_text()))?;
                if !form.set_text(&name, value) {
                    debug!("Ignoring unknown form field '{}'", name);
                }
            }
        }

        Ok(form)
    }
}
