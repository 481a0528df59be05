use crate::{ExtractedFields, OutboundRequest};

/// Login and enhancement state supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub is_logged_in: bool,
    pub is_enhancement_enabled: bool,
}

impl Eligibility {
    pub fn enabled() -> Self {
        Self {
            is_logged_in: true,
            is_enhancement_enabled: true,
        }
    }

    pub fn allows_enrichment(self) -> bool {
        self.is_logged_in && self.is_enhancement_enabled
    }
}

/// Extracted field whose absence degrades enrichment quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractedField {
    Title,
    Snippet,
}

impl ExtractedField {
    pub fn label(self) -> &'static str {
        match self {
            ExtractedField::Title => "title",
            ExtractedField::Snippet => "snippet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQualityIssue {
    pub identifier: String,
    pub missing: ExtractedField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub request: OutboundRequest,
    pub issues: Vec<DataQualityIssue>,
}

/// Send-once guard for the fetch-profile request of one widget instance.
///
/// A fresh gate is created per mount; the flag survives any number of
/// evaluations and is set before the request is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestGate {
    sent: bool,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_sent(&self) -> bool {
        self.sent
    }

    /// Produces the fetch-profile request the first time this is called while
    /// `eligible` holds. `extract` runs only when the request is produced.
    pub fn maybe_request_enrichment<F>(
        &mut self,
        identifier: &str,
        extract: F,
        eligible: bool,
    ) -> Option<GateOutcome>
    where
        F: FnOnce() -> ExtractedFields,
    {
        if !eligible || self.sent {
            return None;
        }
        self.sent = true;

        let fields = extract();
        let mut issues = Vec::new();
        for (field, value) in [
            (ExtractedField::Title, &fields.title),
            (ExtractedField::Snippet, &fields.snippet),
        ] {
            if value.as_deref().map_or(true, |text| text.trim().is_empty()) {
                issues.push(DataQualityIssue {
                    identifier: identifier.to_string(),
                    missing: field,
                });
            }
        }

        Some(GateOutcome {
            request: OutboundRequest::fetch_profile(identifier, fields),
            issues,
        })
    }
}
