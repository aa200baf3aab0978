//! Voice assistant call setup and transcript folding.
//!
//! The voice transport itself is an external SDK. What lives here is the
//! part the application decides: which workflow and voice a user gets, which
//! variables are handed to the assistant, and how SDK events fold into the
//! visible call state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MaxFitError, Result};

const FALLBACK_LANGUAGE: &str = "english";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoicePair {
    pub male: String,
    pub female: String,
}

impl Default for VoicePair {
    fn default() -> Self {
        Self {
            male: "Elliot".into(),
            female: "Paige".into(),
        }
    }
}

/// Workflow ids and voices per language.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceCatalog {
    #[serde(default)]
    pub default_workflow: Option<String>,
    #[serde(default)]
    pub workflows: HashMap<String, String>,
    #[serde(default)]
    pub voices: HashMap<String, VoicePair>,
    #[serde(default = "default_provider")]
    pub voice_provider: String,
}

fn default_provider() -> String {
    "vapi".into()
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self {
            default_workflow: None,
            workflows: HashMap::new(),
            voices: HashMap::new(),
            voice_provider: default_provider(),
        }
    }
}

/// Profile fields the assistant is personalised with.
#[derive(Debug, Clone, Default)]
pub struct CallProfile {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallVariables {
    pub name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub voice_id: String,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallConfig {
    pub workflow_id: String,
    pub language: String,
    pub voice: VoiceSelection,
    pub variable_values: CallVariables,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl VoiceCatalog {
    fn workflow_for(&self, language: &str) -> Option<&str> {
        self.workflows
            .get(language)
            .or_else(|| self.workflows.get(FALLBACK_LANGUAGE))
            .map(String::as_str)
            .or(self.default_workflow.as_deref())
            .filter(|s| !s.is_empty())
    }

    fn voices_for(&self, language: &str) -> VoicePair {
        self.voices
            .get(language)
            .or_else(|| self.voices.get(FALLBACK_LANGUAGE))
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve the call configuration for a user. Fails only when no workflow
    /// is configured for the language, english, or as the default.
    pub fn resolve(&self, profile: &CallProfile) -> Result<CallConfig> {
        let language = non_empty(&profile.language)
            .map(str::to_lowercase)
            .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());
        // Voice choice is case-insensitive; the variable keeps the stored spelling.
        let gender = profile
            .gender
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or("male")
            .to_string();

        let workflow_id = self.workflow_for(&language).ok_or_else(|| {
            MaxFitError::BadRequest(format!(
                "no assistant workflow configured for language: {language}"
            ))
        })?;

        let voices = self.voices_for(&language);
        let voice_id = if gender.to_lowercase() == "female" {
            voices.female
        } else {
            voices.male
        };

        let first = non_empty(&profile.first_name);
        let last = non_empty(&profile.last_name).unwrap_or_default();
        let name = match first {
            Some(f) => format!("{f} {last}").trim().to_string(),
            None => "Guest".to_string(),
        };

        Ok(CallConfig {
            workflow_id: workflow_id.to_string(),
            language: language.clone(),
            voice: VoiceSelection {
                voice_id,
                provider: self.voice_provider.clone(),
            },
            variable_values: CallVariables {
                name,
                email: non_empty(&profile.email).unwrap_or("anonymous").to_string(),
                first_name: first.unwrap_or("Guest").to_string(),
                last_name: last.to_string(),
                gender,
                language,
            },
        })
    }
}

/// Events surfaced by the voice SDK.
#[derive(Debug, Clone)]
pub enum AssistantEvent {
    CallStart,
    CallEnd,
    SpeechStart,
    SpeechEnd,
    /// Raw SDK message payload.
    Message(Value),
    Error(String),
    /// Local failure while starting the call.
    StartFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Visible state of one assistant call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallState {
    pub connecting: bool,
    pub active: bool,
    pub speaking: bool,
    pub ended: bool,
    pub messages: Vec<ChatMessage>,
}

fn role_of(msg: &Value) -> String {
    msg.get("role")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("assistant")
        .to_string()
}

fn text_field<'a>(msg: &'a Value, key: &str) -> Option<&'a str> {
    msg.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Turn an SDK message into a transcript line, if it carries one.
pub fn transcript_line(msg: &Value) -> Option<ChatMessage> {
    let kind = msg.get("type").and_then(Value::as_str);

    if kind == Some("transcript")
        && msg.get("transcriptType").and_then(Value::as_str) == Some("final")
    {
        if let Some(t) = text_field(msg, "transcript") {
            return Some(ChatMessage {
                role: role_of(msg),
                content: t.to_string(),
            });
        }
    }

    if kind == Some("function-call") && msg.get("functionCall").is_some_and(|v| !v.is_null()) {
        tracing::debug!("assistant function call");
        return None;
    }

    let content = text_field(msg, "message")
        .or_else(|| text_field(msg, "content"))
        .or_else(|| text_field(msg, "text"))?;
    Some(ChatMessage {
        role: role_of(msg),
        content: content.to_string(),
    })
}

impl CallState {
    /// User pressed "start": clear the previous transcript and connect.
    pub fn begin_connect(&mut self) {
        self.connecting = true;
        self.ended = false;
        self.messages.clear();
    }

    pub fn apply(&mut self, ev: AssistantEvent) {
        match ev {
            AssistantEvent::CallStart => {
                self.connecting = false;
                self.active = true;
                self.ended = false;
            }
            AssistantEvent::CallEnd => {
                self.active = false;
                self.connecting = false;
                self.speaking = false;
                self.ended = true;
            }
            AssistantEvent::SpeechStart => self.speaking = true,
            AssistantEvent::SpeechEnd => self.speaking = false,
            AssistantEvent::Message(v) => match transcript_line(&v) {
                Some(line) => self.messages.push(line),
                None => tracing::debug!(kind = ?v.get("type"), "unhandled assistant message"),
            },
            AssistantEvent::Error(e) => {
                tracing::warn!(error = %e, "assistant call error");
                self.connecting = false;
                self.active = false;
            }
            AssistantEvent::StartFailed(e) => {
                let detail = if e.is_empty() {
                    "Please check your connection and try again.".to_string()
                } else {
                    e
                };
                self.messages.push(ChatMessage {
                    role: "system".into(),
                    content: format!("Failed to start call: {detail}"),
                });
                self.connecting = false;
                self.active = false;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> VoiceCatalog {
        VoiceCatalog {
            default_workflow: Some("wf-default".into()),
            workflows: HashMap::from([
                ("english".to_string(), "wf-en".to_string()),
                ("urdu".to_string(), "wf-ur".to_string()),
            ]),
            voices: HashMap::from([(
                "urdu".to_string(),
                VoicePair {
                    male: "Asad".into(),
                    female: "Hina".into(),
                },
            )]),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_language_specific_workflow_and_voice() {
        let cfg = catalog()
            .resolve(&CallProfile {
                language: Some("Urdu".into()),
                gender: Some("Female".into()),
                first_name: Some("Hina".into()),
                email: Some("h@x.io".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(cfg.workflow_id, "wf-ur");
        assert_eq!(cfg.voice.voice_id, "Hina");
        assert_eq!(cfg.voice.provider, "vapi");
        assert_eq!(cfg.variable_values.name, "Hina");
        assert_eq!(cfg.variable_values.language, "urdu");
        assert_eq!(cfg.variable_values.gender, "Female");
    }

    #[test]
    fn falls_back_to_english_then_defaults() {
        let cfg = catalog()
            .resolve(&CallProfile {
                language: Some("french".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(cfg.workflow_id, "wf-en");
        assert_eq!(cfg.voice.voice_id, "Elliot");
        assert_eq!(cfg.variable_values.name, "Guest");
        assert_eq!(cfg.variable_values.email, "anonymous");
        assert_eq!(cfg.variable_values.gender, "male");
    }

    #[test]
    fn missing_workflow_is_an_error() {
        let err = VoiceCatalog::default().resolve(&CallProfile::default()).unwrap_err();
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    }

    #[test]
    fn call_lifecycle() {
        let mut s = CallState::default();
        s.begin_connect();
        assert!(s.connecting);
        s.apply(AssistantEvent::CallStart);
        assert!(s.active && !s.connecting);
        s.apply(AssistantEvent::SpeechStart);
        assert!(s.speaking);
        s.apply(AssistantEvent::CallEnd);
        assert!(s.ended && !s.active && !s.speaking);
    }

    #[test]
    fn only_final_transcripts_and_text_messages_are_kept() {
        let mut s = CallState::default();
        s.apply(AssistantEvent::Message(json!({
            "type": "transcript",
            "transcriptType": "partial",
            "transcript": "hel"
        })));
        s.apply(AssistantEvent::Message(json!({
            "type": "transcript",
            "transcriptType": "final",
            "transcript": "hello",
            "role": "user"
        })));
        s.apply(AssistantEvent::Message(json!({
            "type": "function-call",
            "functionCall": {"name": "save"}
        })));
        s.apply(AssistantEvent::Message(json!({"type": "status", "content": "Plan saved"})));
        s.apply(AssistantEvent::Message(json!({"type": "noise"})));
        assert_eq!(
            s.messages,
            vec![
                ChatMessage {
                    role: "user".into(),
                    content: "hello".into(),
                },
                ChatMessage {
                    role: "assistant".into(),
                    content: "Plan saved".into(),
                },
            ]
        );
    }

    #[test]
    fn start_failure_appends_system_line() {
        let mut s = CallState::default();
        s.begin_connect();
        s.apply(AssistantEvent::StartFailed(String::new()));
        assert!(!s.connecting);
        assert_eq!(s.messages[0].role, "system");
        assert_eq!(
            s.messages[0].content,
            "Failed to start call: Please check your connection and try again."
        );
    }
}
