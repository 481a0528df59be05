//! Interfaces to the host page. Implementations live outside this crate.
use enrich_core::{Eligibility, ExtractedFields};

/// Scrapes title, snippet and metadata from one rendered result.
pub trait Extractor {
    fn extract(&self) -> ExtractedFields;
}

/// Fixed fields, for results whose text is already known.
impl Extractor for ExtractedFields {
    fn extract(&self) -> ExtractedFields {
        self.clone()
    }
}

pub trait EligibilitySource {
    fn eligibility(&self) -> Eligibility;
}

impl EligibilitySource for Eligibility {
    fn eligibility(&self) -> Eligibility {
        *self
    }
}

/// Builds the full-record URL for a matched record.
pub trait RecordLinks: Send + Sync {
    fn full_record_link(&self, matched_record_id: &str) -> String;
}

/// Opens a URL outside the result listing.
pub trait Navigator: Send + Sync {
    fn open_in_new_tab(&self, url: &str);
}

/// `RecordLinks` backed by a URL template in which `{id}` is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecordLinks {
    template: String,
}

impl TemplateRecordLinks {
    pub const PLACEHOLDER: &'static str = "{id}";

    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl RecordLinks for TemplateRecordLinks {
    fn full_record_link(&self, matched_record_id: &str) -> String {
        if self.template.contains(Self::PLACEHOLDER) {
            self.template.replace(Self::PLACEHOLDER, matched_record_id)
        } else {
            format!("{}/{}", self.template.trim_end_matches('/'), matched_record_id)
        }
    }
}
