use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    packet::{PacketError, PacketResult},
    types::VarInt,
};

pub const CLIENTBOUND_RESPONSE_ID: i32 = 0x00;

/// Decoded body of the status response packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionInfo>,
    pub players: Players,
    #[serde(default)]
    pub description: TextComponent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(
        default,
        rename = "enforcesSecureChat",
        skip_serializing_if = "Option::is_none"
    )]
    pub enforces_secure_chat: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Players {
    pub max: i64,
    pub online: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Vec<PlayerSample>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSample {
    pub name: String,
    #[serde(default)]
    pub id: String,
}

/// Chat component as found in the `description` field.
///
/// Servers send either a bare string, an object with `text` and nested
/// `extra` children, or an array of components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextComponent {
    Plain(String),
    List(Vec<TextComponent>),
    Object(ComponentObject),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentObject {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

impl Default for TextComponent {
    fn default() -> Self {
        TextComponent::Plain(String::new())
    }
}

impl TextComponent {
    /// Concatenates every segment's text in document order, formatting codes
    /// left as they are.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            TextComponent::Plain(text) => out.push_str(text),
            TextComponent::List(parts) => parts.iter().for_each(|part| part.collect_text(out)),
            TextComponent::Object(object) => {
                out.push_str(&object.text);
                object.extra.iter().for_each(|part| part.collect_text(out));
            }
        }
    }
}

impl StatusResponse {
    /// Parses the JSON embedded in a status response payload.
    ///
    /// The JSON is located by scanning for the first `{` byte, so the payload
    /// may still carry the packet ID and string length in front of it.
    pub fn parse(payload: &[u8]) -> PacketResult<Self> {
        let start = payload
            .iter()
            .position(|&b| b == b'{')
            .ok_or(PacketError::NoJsonFound)?;

        Ok(serde_json::from_slice(&payload[start..])?)
    }

    /// Parses the body of a status response packet (after the packet ID).
    ///
    /// When the leading string length is well formed and followed by `{`, the
    /// JSON is taken from there; this avoids mistaking a length byte of
    /// `0x7B` for the opening brace. Otherwise falls back to [`parse`].
    ///
    /// [`parse`]: StatusResponse::parse
    pub fn from_body(data: &[u8]) -> PacketResult<Self> {
        if let Ok((VarInt(length), prefix_len)) = VarInt::decode(data) {
            let rest = &data[prefix_len..];
            if rest.first() == Some(&b'{') {
                if length as u32 as usize != rest.len() {
                    debug!(
                        declared = length,
                        actual = rest.len(),
                        "Status JSON length does not match its prefix"
                    );
                }
                return Self::parse(rest);
            }
        }

        Self::parse(data)
    }
}
