//! Messages exchanged with the background process and their JSON codec.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Profile;

/// Fields scraped from a rendered result by the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedFields {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub metadata: Option<String>,
}

/// Messages sent from a widget to the background process. Fire-and-forget;
/// responses are correlated only through the echoed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OutboundRequest {
    FetchProfile {
        identifier: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snippet: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<String>,
    },
    LinkToRecord {
        identifier: String,
        #[serde(rename = "candidatePoolId")]
        candidate_pool_id: String,
    },
}

impl OutboundRequest {
    pub fn fetch_profile(identifier: impl Into<String>, fields: ExtractedFields) -> Self {
        Self::FetchProfile {
            identifier: identifier.into(),
            title: fields.title,
            snippet: fields.snippet,
            metadata: fields.metadata,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::FetchProfile { identifier, .. } | Self::LinkToRecord { identifier, .. } => {
                identifier
            }
        }
    }
}

/// Messages pushed by the background process, each addressed to one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InboundEvent {
    /// Full replacement of the profile.
    SetProfile {
        identifier: String,
        #[serde(default)]
        profile: Profile,
    },
    /// Partial profile, merged field by field.
    UpdateProfile {
        identifier: String,
        #[serde(default)]
        profile: Profile,
    },
    /// The identifier was linked to an existing record.
    LocalMatchFound {
        identifier: String,
        #[serde(
            rename = "matchedRecordId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        matched_record_id: Option<String>,
    },
}

impl InboundEvent {
    pub fn identifier(&self) -> &str {
        match self {
            Self::SetProfile { identifier, .. }
            | Self::UpdateProfile { identifier, .. }
            | Self::LocalMatchFound { identifier, .. } => identifier,
        }
    }

    pub fn is_addressed_to(&self, identifier: &str) -> bool {
        self.identifier() == identifier
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame carries no identifier")]
    MissingIdentifier,
}

pub fn encode_request(request: &OutboundRequest) -> Result<String, serde_json::Error> {
    serde_json::to_string(request)
}

pub fn decode_request(frame: &str) -> Result<OutboundRequest, DecodeError> {
    let request: OutboundRequest = serde_json::from_str(frame)?;
    if request.identifier().trim().is_empty() {
        return Err(DecodeError::MissingIdentifier);
    }
    Ok(request)
}

pub fn encode_event(event: &InboundEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

/// Decodes one inbound frame. Unknown kinds, missing fields and blank
/// identifiers are all rejected.
pub fn decode_event(frame: &str) -> Result<InboundEvent, DecodeError> {
    let event: InboundEvent = serde_json::from_str(frame)?;
    if event.identifier().trim().is_empty() {
        return Err(DecodeError::MissingIdentifier);
    }
    Ok(event)
}
