mod request;
mod theme;

pub use request::{GenerationRequest, NameDetails, ThemeOptions};
pub use theme::{CreativeForm, ReflectionTheme, Theme};

use std::fmt;

const PERSONA: &str = "You are an empathetic, wise, and creative AI assistant.";

const GUIDANCE: &str = "Please provide a thoughtful, personalized response based on the image and the given information. Be creative, supportive, and maintain a positive tone.";

const RESPONSE_FORMAT: &str = r#"### Response Format ###
Provide your response in JSON format:
{
  "response": "Your detailed, personalized message or creative content here."
}"#;

/// Final prompt text handed to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the prompt for `request`. Pure and deterministic.
pub fn compose(request: &GenerationRequest) -> ComposedPrompt {
    let theme = request.theme();
    let mut prompt = format!(
        "{} Your task is based on the theme: {}.\n\n### Instructions ###\n{}\n\n",
        PERSONA,
        theme,
        theme.instruction()
    );

    let lines = request.parameter_lines();
    if !lines.is_empty() {
        for (label, value) in lines {
            prompt.push_str(label);
            prompt.push_str(": ");
            prompt.push_str(value);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str(GUIDANCE);
    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_FORMAT);

    ComposedPrompt(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_reflection_layout() {
        let prompt = compose(&GenerationRequest::Reflection(ReflectionTheme::Mood));

        let expected = "You are an empathetic, wise, and creative AI assistant. Your task is based on the theme: mood.\n\
\n\
### Instructions ###\n\
Analyze the user's mood from the provided image and offer insights and encouragement.\n\
\n\
Please provide a thoughtful, personalized response based on the image and the given information. Be creative, supportive, and maintain a positive tone.\n\
\n\
### Response Format ###\n\
Provide your response in JSON format:\n\
{\n  \"response\": \"Your detailed, personalized message or creative content here.\"\n}";

        assert_eq!(prompt.as_str(), expected);
    }

    #[test]
    fn test_compose_places_parameters_between_instructions_and_guidance() {
        let prompt = compose(&GenerationRequest::Creative {
            form: CreativeForm::Poem,
            sub_theme: Some("Haiku".to_string()),
        });
        let text = prompt.as_str();

        let instruction = text.find(Theme::Poem.instruction()).unwrap();
        let sub_theme = text.find("\nSub-theme: Haiku\n").unwrap();
        let guidance = text.find(GUIDANCE).unwrap();
        assert!(instruction < sub_theme && sub_theme < guidance);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let request = GenerationRequest::Name(NameDetails {
            birth_year: Some("1990".to_string()),
            gender: None,
            language: Some("Korean".to_string()),
        });

        assert_eq!(compose(&request), compose(&request));
    }
}
