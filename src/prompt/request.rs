use super::theme::{CreativeForm, ReflectionTheme, Theme};
use crate::{Error, Result};
use tracing::debug;

/// Optional form values as submitted, before they are matched to a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOptions {
    pub sub_theme: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDetails {
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub language: Option<String>,
}

/// A validated generation request; each variant only carries the fields its themes use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Reflection(ReflectionTheme),
    Creative {
        form: CreativeForm,
        sub_theme: Option<String>,
    },
    Name(NameDetails),
}

impl GenerationRequest {
    /// Keeps the options that `theme` uses and drops the rest.
    ///
    /// Blank values count as absent. A birth year must be all ASCII digits.
    pub fn new(theme: Theme, options: ThemeOptions) -> Result<Self> {
        let ThemeOptions {
            sub_theme,
            birth_year,
            gender,
            language,
        } = options;
        let sub_theme = present(sub_theme);
        let birth_year = present(birth_year);
        let gender = present(gender);
        let language = present(language);

        if let Some(reflection) = ReflectionTheme::from_theme(theme) {
            ignore(theme, "subTheme", &sub_theme);
            ignore(theme, "birthYear", &birth_year);
            ignore(theme, "gender", &gender);
            ignore(theme, "language", &language);
            return Ok(GenerationRequest::Reflection(reflection));
        }

        if let Some(form) = CreativeForm::from_theme(theme) {
            ignore(theme, "birthYear", &birth_year);
            ignore(theme, "gender", &gender);
            ignore(theme, "language", &language);
            return Ok(GenerationRequest::Creative { form, sub_theme });
        }

        ignore(theme, "subTheme", &sub_theme);
        if let Some(year) = &birth_year {
            if !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::validation(format!("Invalid birth year: {}", year)));
            }
        }

        let request = GenerationRequest::Name(NameDetails {
            birth_year,
            gender,
            language,
        });

        Ok(request)
    }

    pub fn theme(&self) -> Theme {
        match self {
            GenerationRequest::Reflection(theme) => (*theme).into(),
            GenerationRequest::Creative { form, .. } => (*form).into(),
            GenerationRequest::Name(_) => Theme::Name,
        }
    }

    /// Labeled parameter lines in prompt order, only for values actually supplied.
    pub fn parameter_lines(&self) -> Vec<(&'static str, &str)> {
        let mut lines = Vec::new();
        match self {
            GenerationRequest::Reflection(_) => {}
            GenerationRequest::Creative { sub_theme, .. } => {
                if let Some(sub_theme) = sub_theme {
                    lines.push(("Sub-theme", sub_theme.as_str()));
                }
            }
            GenerationRequest::Name(details) => {
                if let Some(year) = &details.birth_year {
                    lines.push(("Birth Year", year.as_str()));
                }
                if let Some(gender) = &details.gender {
                    lines.push(("Gender", gender.as_str()));
                }
                if let Some(language) = &details.language {
                    lines.push(("Language", language.as_str()));
                }
            }
        }
        lines
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn ignore(theme: Theme, field: &str, value: &Option<String>) {
    if value.is_some() {
        debug!("Ignoring {} for theme '{}'", field, theme);
    }
}
