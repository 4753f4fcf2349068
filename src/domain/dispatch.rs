use serde::{Deserialize, Serialize};

use super::status_codes::is_known_code;

pub const CAT_IMAGE_URL: &str = "https://http.cat/";
pub const CAT_SOUND: &str = "にゃ〜ん";
pub const SYSTEM_ERROR_REPLY: &str = "meow(SYSTEM ERROR)";

const URL_VERIFICATION: &str = "url_verification";
const EVENT_CALLBACK: &str = "event_callback";
const TEXT_LEAF: &str = "text";

/// Body Slack posts to the events endpoint, as decoded off the wire.
#[derive(Debug, Default, Deserialize)]
pub struct SlackRequest {
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub event: Option<CallbackEvent>,
}

// Lists may arrive as `null`; absent and null both decode to `None`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackEvent {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub blocks: Option<Vec<Block>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub elements: Option<Vec<BlockElement>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlockElement {
    #[serde(default)]
    pub elements: Option<Vec<Leaf>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Leaf {
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl CallbackEvent {
    /// Leaves of the first rich-text section, or `None` when any level of
    /// `blocks[0].elements[0].elements` is missing, null, or empty.
    #[must_use]
    pub fn leaves(&self) -> Option<&[Leaf]> {
        let leaves = self
            .blocks
            .as_deref()?
            .first()?
            .elements
            .as_deref()?
            .first()?
            .elements
            .as_deref()?;
        (!leaves.is_empty()).then_some(leaves)
    }
}

/// Recognised shapes of an inbound request.
#[derive(Debug)]
pub enum InboundEvent<'a> {
    UrlVerification {
        challenge: &'a str,
    },
    Callback {
        channel: &'a str,
        leaves: Option<&'a [Leaf]>,
    },
    Unsupported {
        event_type: &'a str,
    },
}

impl SlackRequest {
    #[must_use]
    pub fn classify(&self) -> InboundEvent<'_> {
        match self.r#type.as_deref().unwrap_or_default() {
            URL_VERIFICATION => InboundEvent::UrlVerification {
                challenge: self.challenge.as_deref().unwrap_or_default(),
            },
            EVENT_CALLBACK => InboundEvent::Callback {
                channel: self
                    .event
                    .as_ref()
                    .and_then(|event| event.channel.as_deref())
                    .unwrap_or_default()
                    .trim(),
                leaves: self.event.as_ref().and_then(CallbackEvent::leaves),
            },
            other => InboundEvent::Unsupported { event_type: other },
        }
    }
}

/// Message sent back into the originating channel via `chat.postMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub channel: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingChannel,
    Unsupported,
}

impl SkipReason {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingChannel => "no-channel",
            Self::Unsupported => "unsupported-type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Challenge(String),
    Reply(OutboundMessage),
    Skip(SkipReason),
}

/// Text of the first `text` leaf in document order, trimmed.
#[must_use]
pub fn first_text_leaf(leaves: &[Leaf]) -> Option<&str> {
    leaves
        .iter()
        .find(|leaf| leaf.r#type.as_deref() == Some(TEXT_LEAF))
        .map(|leaf| leaf.text.as_deref().unwrap_or_default().trim())
}

/// Reply text for a message the user typed into the channel.
#[must_use]
pub fn reply_for(text: &str) -> String {
    if is_known_code(text) {
        format!("{CAT_IMAGE_URL}{text}")
    } else {
        CAT_SOUND.to_owned()
    }
}

#[must_use]
pub fn dispatch(request: &SlackRequest) -> Dispatch {
    match request.classify() {
        InboundEvent::UrlVerification { challenge } => Dispatch::Challenge(challenge.to_owned()),
        InboundEvent::Callback { channel, leaves } => dispatch_callback(channel, leaves),
        InboundEvent::Unsupported { .. } => Dispatch::Skip(SkipReason::Unsupported),
    }
}

fn dispatch_callback(channel: &str, leaves: Option<&[Leaf]>) -> Dispatch {
    if channel.is_empty() {
        return Dispatch::Skip(SkipReason::MissingChannel);
    }

    let text = match leaves {
        Some(leaves) => reply_for(first_text_leaf(leaves).unwrap_or_default()),
        None => SYSTEM_ERROR_REPLY.to_owned(),
    };

    Dispatch::Reply(OutboundMessage {
        channel: channel.to_owned(),
        text,
    })
}
