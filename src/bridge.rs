//! Cross-context message bridge.
//!
//! Embeddings drive the game by posting JSON payloads. Every payload names
//! the `dimension-runner` target and an action; `game_event` envelopes wrap
//! the real action one level down. Messages from origins outside the
//! allow-list are dropped without response, as are unknown actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::EngineHost;
use crate::sim::engine::Engine;
use crate::sim::state::Theme;

const TARGET: &str = "dimension-runner";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub target: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Engine command decoded from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeCommand {
    Start,
    SetTheme(Theme),
    Pause,
    Resume,
}

impl BridgeCommand {
    pub fn apply<H: EngineHost>(self, engine: &mut Engine, host: &mut H) {
        match self {
            BridgeCommand::Start => engine.start(host),
            BridgeCommand::SetTheme(theme) => engine.set_theme(theme, host),
            BridgeCommand::Pause => engine.pause(host),
            BridgeCommand::Resume => engine.resume(host),
        }
    }
}

#[derive(Debug, Default)]
pub struct MessageBridge {
    allowed_origins: Vec<String>,
}

impl MessageBridge {
    /// An empty allow-list (or a `*` entry) admits every origin.
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    fn origin_allowed(&self, origin: &str) -> bool {
        if origin.is_empty() {
            return false;
        }
        if self.allowed_origins.is_empty() {
            return true;
        }
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }

    /// Decode one incoming message. Returns `None` for foreign targets,
    /// rejected origins, malformed payloads and unknown actions alike; the
    /// bridge never errors outward.
    pub fn decode(&self, origin: &str, raw: &str) -> Option<BridgeCommand> {
        if !self.origin_allowed(origin) {
            return None;
        }
        let payload: MessagePayload = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(err) => {
                log::debug!("dropping malformed bridge message: {err}");
                return None;
            }
        };
        if payload.target != TARGET {
            return None;
        }

        let action = normalize_action(&payload);
        match action {
            "start_game" => Some(BridgeCommand::Start),
            "set_theme" => {
                let theme = payload.data.as_ref()?.get("theme")?;
                serde_json::from_value::<Theme>(theme.clone())
                    .ok()
                    .map(BridgeCommand::SetTheme)
            }
            "pause_game" => Some(BridgeCommand::Pause),
            "resume_game" => Some(BridgeCommand::Resume),
            _ => None,
        }
    }
}

/// `game_event` envelopes carry the effective action under `data.action`
/// (or legacy `data.type`).
fn normalize_action(payload: &MessagePayload) -> &str {
    if payload.action == "game_event" {
        if let Some(data) = &payload.data {
            if let Some(inner) = data
                .get("action")
                .and_then(Value::as_str)
                .or_else(|| data.get("type").and_then(Value::as_str))
            {
                return inner;
            }
        }
    }
    &payload.action
}

/// Build an outbound event payload for the embedding page.
pub fn encode_event(action: &str, data: Option<Value>) -> Value {
    let payload = MessagePayload {
        target: TARGET.to_string(),
        action: action.to_string(),
        data,
    };
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_bridge() -> MessageBridge {
        MessageBridge::new(Vec::new())
    }

    #[test]
    fn test_decodes_plain_actions() {
        let bridge = open_bridge();
        let raw = r#"{"target":"dimension-runner","action":"start_game"}"#;
        assert_eq!(
            bridge.decode("https://example.com", raw),
            Some(BridgeCommand::Start)
        );
        let raw = r#"{"target":"dimension-runner","action":"pause_game"}"#;
        assert_eq!(
            bridge.decode("https://example.com", raw),
            Some(BridgeCommand::Pause)
        );
    }

    #[test]
    fn test_set_theme_requires_valid_theme() {
        let bridge = open_bridge();
        let raw = r#"{"target":"dimension-runner","action":"set_theme","data":{"theme":"minecraft"}}"#;
        assert_eq!(
            bridge.decode("https://example.com", raw),
            Some(BridgeCommand::SetTheme(Theme::Minecraft))
        );
        let raw = r#"{"target":"dimension-runner","action":"set_theme","data":{"theme":"space"}}"#;
        assert_eq!(bridge.decode("https://example.com", raw), None);
    }

    #[test]
    fn test_game_event_envelope_unwrapped() {
        let bridge = open_bridge();
        let raw = r#"{"target":"dimension-runner","action":"game_event","data":{"action":"resume_game"}}"#;
        assert_eq!(
            bridge.decode("https://example.com", raw),
            Some(BridgeCommand::Resume)
        );
        // Legacy envelopes use "type"
        let raw = r#"{"target":"dimension-runner","action":"game_event","data":{"type":"pause_game"}}"#;
        assert_eq!(
            bridge.decode("https://example.com", raw),
            Some(BridgeCommand::Pause)
        );
    }

    #[test]
    fn test_foreign_target_ignored() {
        let bridge = open_bridge();
        let raw = r#"{"target":"other-game","action":"start_game"}"#;
        assert_eq!(bridge.decode("https://example.com", raw), None);
    }

    #[test]
    fn test_origin_allow_list() {
        let bridge = MessageBridge::new(vec!["https://trusted.example".to_string()]);
        let raw = r#"{"target":"dimension-runner","action":"start_game"}"#;
        assert_eq!(
            bridge.decode("https://trusted.example", raw),
            Some(BridgeCommand::Start)
        );
        assert_eq!(bridge.decode("https://evil.example", raw), None);

        let wildcard = MessageBridge::new(vec!["*".to_string()]);
        assert_eq!(
            wildcard.decode("https://anywhere.example", raw),
            Some(BridgeCommand::Start)
        );
        // An empty origin is never trusted, even wide open
        assert_eq!(open_bridge().decode("", raw), None);
    }

    #[test]
    fn test_malformed_and_unknown_dropped() {
        let bridge = open_bridge();
        assert_eq!(bridge.decode("https://example.com", "not json"), None);
        let raw = r#"{"target":"dimension-runner","action":"self_destruct"}"#;
        assert_eq!(bridge.decode("https://example.com", raw), None);
    }

    #[test]
    fn test_commands_drive_engine() {
        use crate::host::NullHost;
        use crate::sim::state::GameStatus;

        let bridge = open_bridge();
        let mut engine = Engine::new(1);
        let mut host = NullHost;
        engine.set_assets_ready(true);

        let raw = r#"{"target":"dimension-runner","action":"start_game"}"#;
        let cmd = bridge.decode("https://example.com", raw).unwrap();
        cmd.apply(&mut engine, &mut host);
        assert_eq!(engine.status(), GameStatus::Running);

        let raw = r#"{"target":"dimension-runner","action":"set_theme","data":{"theme":"minecraft"}}"#;
        let cmd = bridge.decode("https://example.com", raw).unwrap();
        cmd.apply(&mut engine, &mut host);
        assert_eq!(engine.status(), GameStatus::Idle);
        assert_eq!(engine.theme(), Theme::Minecraft);
    }

    #[test]
    fn test_encode_event_roundtrip() {
        let value = encode_event("game_over", Some(serde_json::json!({"score": 1200})));
        assert_eq!(value["target"], TARGET);
        assert_eq!(value["action"], "game_over");
        assert_eq!(value["data"]["score"], 1200);
    }
}
