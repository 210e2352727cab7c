use crate::{
    Error, Result,
    error::MISSING_FIELDS,
    imaging::UploadedImage,
    prompt::{Theme, ThemeOptions},
};
use async_trait::async_trait;

/// Field values of one analyze submission. Only the first value of a repeated field is kept.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeForm {
    pub image: Option<UploadedImage>,
    pub theme: Option<String>,
    pub sub_theme: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub language: Option<String>,
}

impl AnalyzeForm {
    /// Stores a text field by its wire name. Returns false for unknown names.
    pub fn set_text(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "theme" => &mut self.theme,
            "subTheme" => &mut self.sub_theme,
            "birthYear" => &mut self.birth_year,
            "gender" => &mut self.gender,
            "language" => &mut self.language,
            _ => return false,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
        true
    }

    pub fn set_image(&mut self, image: UploadedImage) {
        if self.image.is_none() && !image.bytes.is_empty() {
            self.image = Some(image);
        }
    }

    /// Checks the required fields and resolves the theme key.
    pub fn into_parts(self) -> Result<(UploadedImage, Theme, ThemeOptions)> {
        let theme = self.theme.filter(|t| !t.trim().is_empty());
        let (Some(image), Some(theme)) = (self.image, theme) else {
            return Err(Error::validation(MISSING_FIELDS));
        };

        let theme: Theme = theme.trim().parse()?;
        let options = ThemeOptions {
            sub_theme: self.sub_theme,
            birth_year: self.birth_year,
            gender: self.gender,
            language: self.language,
        };

        Ok((image, theme, options))
    }
}

/// Anything that can produce an [`AnalyzeForm`], such as a multipart body.
#[async_trait]
pub trait FormSource: Send {
    async fn read_form(&mut self) -> Result<AnalyzeForm>;
}

#[async_trait]
impl FormSource for AnalyzeForm {
    async fn read_form(&mut self) -> Result<AnalyzeForm> {
        Ok(std::mem::take(self))
    }
}
