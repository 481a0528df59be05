use url::Url;

use crate::{Eligibility, Profile, RecentNote, Website};

pub const DEFAULT_ASSIGNMENT_STAGE: &str = "Identified";
pub const DEFAULT_ASSIGNMENT_STATUS: &str = "NoStatus";

const LINKED_IN_WEBSITE_TYPE: &str = "linkedIn";

/// What a renderer needs to draw one result card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultCardView {
    /// When false the raw result is shown untouched.
    pub enhanced: bool,
    pub connected: bool,
    pub can_link: bool,
    pub matched_record_id: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub current_role: Option<CurrentRoleView>,
    pub location: Option<String>,
    pub sectors: Vec<String>,
    pub assignment: Option<AssignmentView>,
    pub recent_note: Option<RecentNote>,
    pub websites: Vec<Website>,
    pub linked_in_url: Option<String>,
    pub show_details: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoleView {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentView {
    pub name: String,
    pub stage: String,
    pub status: String,
}

impl ResultCardView {
    pub fn build(identifier: &str, snapshot: Option<&Profile>, eligibility: Eligibility) -> Self {
        let Some(profile) = snapshot else {
            return Self::default();
        };
        if !eligibility.allows_enrichment() || !profile.has_record() {
            return Self::default();
        }

        let current_role = if profile.job_title.is_some() || profile.company_name.is_some() {
            Some(CurrentRoleView {
                job_title: profile.job_title.clone(),
                company_name: profile.company_name.clone(),
            })
        } else {
            None
        };
        let assignment = profile
            .recent_assignment
            .as_ref()
            .map(|assignment| AssignmentView {
                name: assignment.name.clone(),
                stage: assignment
                    .stage
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ASSIGNMENT_STAGE.to_string()),
                status: assignment
                    .status
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ASSIGNMENT_STATUS.to_string()),
            });
        let websites = profile.websites.clone().unwrap_or_default();
        let sectors = profile.current_sectors.clone().unwrap_or_default();
        let location = profile
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(ToOwned::to_owned);
        let linked_in_url = linked_in_url(identifier, profile, &websites);

        let show_details = current_role.is_some()
            || location.is_some()
            || !sectors.is_empty()
            || assignment.is_some()
            || profile.recent_note.is_some()
            || !websites.is_empty()
            || is_linked_in_url(identifier);

        Self {
            enhanced: true,
            connected: profile.is_matched(),
            can_link: !profile.is_matched() && profile.candidate_pool_id.is_some(),
            matched_record_id: profile.matched_record_id.clone(),
            name: profile.name.clone(),
            photo: profile.photo.clone(),
            current_role,
            location,
            sectors,
            assignment,
            recent_note: profile.recent_note.clone(),
            websites,
            linked_in_url,
            show_details,
        }
    }
}

/// True when `identifier` parses as an http(s) URL on a LinkedIn host.
pub fn is_linked_in_url(identifier: &str) -> bool {
    let Ok(url) = Url::parse(identifier.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    url.host_str().is_some_and(|host| {
        let host = host.to_ascii_lowercase();
        host == "linkedin.com" || host.ends_with(".linkedin.com")
    })
}

fn linked_in_url(identifier: &str, profile: &Profile, websites: &[Website]) -> Option<String> {
    if let Some(url) = &profile.linked_in_profile_url {
        return Some(url.clone());
    }
    let listed = websites.iter().any(|site| {
        site.website_type
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case(LINKED_IN_WEBSITE_TYPE))
    });
    if !listed && is_linked_in_url(identifier) {
        Some(identifier.trim().to_string())
    } else {
        None
    }
}
