//! Profile update validation.

use serde::{Deserialize, Serialize};

use crate::error::{MaxFitError, Result};

/// Languages the assistant and the profile form support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Arabic,
    French,
    Spanish,
    Urdu,
}

impl Language {
    pub const SUPPORTED: [Language; 5] = [
        Language::English,
        Language::Arabic,
        Language::French,
        Language::Spanish,
        Language::Urdu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Arabic => "arabic",
            Language::French => "french",
            Language::Spanish => "spanish",
            Language::Urdu => "urdu",
        }
    }

    /// Exact (case-sensitive) lookup, as submitted by the profile form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|l| l.as_str() == s)
    }

    fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Raw request body. Every field is optional so that missing fields produce
/// the same validation message as empty ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Validated and trimmed update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: Language,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ProfileUpdateRequest {
    pub fn validate(&self) -> Result<ProfileUpdate> {
        let (Some(email), Some(first), Some(last), Some(_)) = (
            present(&self.email),
            present(&self.first_name),
            present(&self.last_name),
            present(&self.language),
        ) else {
            return Err(MaxFitError::BadRequest(
                "Email, first name, last name, and language are required".into(),
            ));
        };

        // Checked as sent: surrounding whitespace is not a supported language.
        let raw_language = self.language.as_deref().unwrap_or_default();
        let language = Language::parse(raw_language).ok_or_else(|| {
            MaxFitError::BadRequest(format!(
                "Invalid language. Supported languages: {}",
                Language::supported_list()
            ))
        })?;

        Ok(ProfileUpdate {
            email: email.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            language,
        })
    }
}
