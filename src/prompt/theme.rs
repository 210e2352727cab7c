use crate::Error;
use std::{fmt, str::FromStr};

/// The closed set of content kinds a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Mood,
    Needs,
    Action,
    Comfort,
    Courage,
    Quote,
    Novel,
    Poem,
    Lyrics,
    Name,
}

impl Theme {
    pub const ALL: [Theme; 10] = [
        Theme::Mood,
        Theme::Needs,
        Theme::Action,
        Theme::Comfort,
        Theme::Courage,
        Theme::Quote,
        Theme::Novel,
        Theme::Poem,
        Theme::Lyrics,
        Theme::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Mood => "mood",
            Theme::Needs => "needs",
            Theme::Action => "action",
            Theme::Comfort => "comfort",
            Theme::Courage => "courage",
            Theme::Quote => "quote",
            Theme::Novel => "novel",
            Theme::Poem => "poem",
            Theme::Lyrics => "lyrics",
            Theme::Name => "name",
        }
    }

    /// Canned task description sent to the model for this theme.
    pub fn instruction(&self) -> &'static str {
        match self {
            Theme::Mood => {
                "Analyze the user's mood from the provided image and offer insights and encouragement."
            }
            Theme::Needs => {
                "Reflect on what the user might need based on the image and offer supportive suggestions."
            }
            Theme::Action => {
                "Provide motivational advice and suggest positive actions the user could take based on the image."
            }
            Theme::Comfort => {
                "Offer words of comfort, understanding, and emotional support based on the image."
            }
            Theme::Courage => {
                "Inspire the user with motivational words and encourage them to face their challenges, referencing the image."
            }
            Theme::Quote => {
                "Share an inspirational quote relevant to the user's situation (based on the image) and explain its significance."
            }
            Theme::Novel => {
                "Write a short, engaging story snippet (about 150 words) in the specified genre, incorporating elements from the user's image."
            }
            Theme::Poem => {
                "Compose a brief poem (4-8 lines) in the specified style, reflecting the mood or elements from the user's image."
            }
            Theme::Lyrics => {
                "Write a catchy chorus or verse (4-8 lines) in the specified music genre, inspired by the user's image."
            }
            Theme::Name => {
                "Suggest a name for the person in the image, considering their birth year, gender, and preferred language. Explain the meaning and significance of the name."
            }
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown theme: {}", s)))
    }
}

/// Themes that read the photo and answer with supportive prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionTheme {
    Mood,
    Needs,
    Action,
    Comfort,
    Courage,
    Quote,
}

/// Creative-writing themes; these accept a genre or style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreativeForm {
    Novel,
    Poem,
    Lyrics,
}

impl ReflectionTheme {
    pub fn from_theme(theme: Theme) -> Option<Self> {
        match theme {
            Theme::Mood => Some(Self::Mood),
            Theme::Needs => Some(Self::Needs),
            Theme::Action => Some(Self::Action),
            Theme::Comfort => Some(Self::Comfort),
            Theme::Courage => Some(Self::Courage),
            Theme::Quote => Some(Self::Quote),
            _ => None,
        }
    }
}

impl CreativeForm {
    pub fn from_theme(theme: Theme) -> Option<Self> {
        match theme {
            Theme::Novel => Some(Self::Novel),
            Theme::Poem => Some(Self::Poem),
            Theme::Lyrics => Some(Self::Lyrics),
            _ => None,
        }
    }
}

impl From<ReflectionTheme> for Theme {
    fn from(theme: ReflectionTheme) -> Self {
        match theme {
            ReflectionTheme::Mood => Theme::Mood,
            ReflectionTheme::Needs => Theme::Needs,
            ReflectionTheme::Action => Theme::Action,
            ReflectionTheme::Comfort => Theme::Comfort,
            ReflectionTheme::Courage => Theme::Courage,
            ReflectionTheme::Quote => Theme::Quote,
        }
    }
}

impl From<CreativeForm> for Theme {
    fn from(form: CreativeForm) -> Self {
        match form {
            CreativeForm::Novel => Theme::Novel,
            CreativeForm::Poem => Theme::Poem,
            CreativeForm::Lyrics => Theme::Lyrics,
        }
    }
}
