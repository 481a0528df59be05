use serde::{Deserialize, Serialize};

/// Enrichment data for one search result.
///
/// The same shape carries full profiles, partial updates and the reconciled
/// snapshot. Every field is optional; `None` means "not present".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Existing record this result is confirmed linked to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_record_id: Option<String>,
    /// Probable but unconfirmed match, offered for linking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_sectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websites: Option<Vec<Website>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_assignment: Option<RecentAssignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_note: Option<RecentNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Website {
    pub url: String,
    /// Free-form type tag, e.g. `linkedIn`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentAssignment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentNote {
    pub note_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_last_name: Option<String>,
    /// Raw timestamp as sent by the background process; formatting is left to the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_or_updated: Option<String>,
}

impl Profile {
    pub fn is_matched(&self) -> bool {
        self.matched_record_id.is_some()
    }

    /// True when the result is known to the record system at all.
    pub fn has_record(&self) -> bool {
        self.matched_record_id.is_some() || self.candidate_pool_id.is_some()
    }

    /// Field-wise merge: every field present in `patch` overwrites the
    /// corresponding field here; absent fields are left untouched. Lists are
    /// replaced as a whole.
    pub fn merge(&mut self, patch: Profile) {
        let Profile {
            matched_record_id,
            candidate_pool_id,
            name,
            photo,
            job_title,
            company_name,
            location,
            current_sectors,
            websites,
            linked_in_profile_url,
            recent_assignment,
            recent_note,
        } = patch;

        overwrite(&mut self.matched_record_id, matched_record_id);
        overwrite(&mut self.candidate_pool_id, candidate_pool_id);
        overwrite(&mut self.name, name);
        overwrite(&mut self.photo, photo);
        overwrite(&mut self.job_title, job_title);
        overwrite(&mut self.company_name, company_name);
        overwrite(&mut self.location, location);
        overwrite(&mut self.current_sectors, current_sectors);
        overwrite(&mut self.websites, websites);
        overwrite(&mut self.linked_in_profile_url, linked_in_profile_url);
        overwrite(&mut self.recent_assignment, recent_assignment);
        overwrite(&mut self.recent_note, recent_note);
    }

    /// Trims text fields and drops blank values so that "present" always
    /// means "carries something to show".
    pub fn normalized(self) -> Self {
        Self {
            matched_record_id: non_blank(self.matched_record_id),
            candidate_pool_id: non_blank(self.candidate_pool_id),
            name: non_blank(self.name),
            photo: non_blank(self.photo),
            job_title: non_blank(self.job_title),
            company_name: non_blank(self.company_name),
            location: non_blank(self.location),
            current_sectors: self.current_sectors.map(|sectors| {
                sectors
                    .into_iter()
                    .filter_map(|sector| non_blank(Some(sector)))
                    .collect()
            }),
            websites: self.websites.map(|websites| {
                websites
                    .into_iter()
                    .filter_map(|site| {
                        non_blank(Some(site.url)).map(|url| Website {
                            url,
                            website_type: non_blank(site.website_type),
                        })
                    })
                    .collect()
            }),
            linked_in_profile_url: non_blank(self.linked_in_profile_url),
            recent_assignment: self.recent_assignment.map(|assignment| RecentAssignment {
                name: assignment.name.trim().to_string(),
                stage: non_blank(assignment.stage),
                status: non_blank(assignment.status),
            }),
            recent_note: self.recent_note.map(|note| RecentNote {
                note_title: note.note_title.trim().to_string(),
                by_first_name: non_blank(note.by_first_name),
                by_last_name: non_blank(note.by_last_name),
                created_or_updated: non_blank(note.created_or_updated),
            }),
        }
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == text.len() {
            Some(text)
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_fields_absent_from_patch() {
        let mut base = Profile {
            job_title: Some("Engineer".into()),
            current_sectors: Some(vec!["Energy".into()]),
            ..Profile::default()
        };
        base.merge(Profile {
            company_name: Some("Acme".into()),
            current_sectors: Some(vec!["Retail".into(), "Mining".into()]),
            ..Profile::default()
        });

        assert_eq!(base.job_title.as_deref(), Some("Engineer"));
        assert_eq!(base.company_name.as_deref(), Some("Acme"));
        assert_eq!(
            base.current_sectors,
            Some(vec!["Retail".to_string(), "Mining".to_string()])
        );
    }

    #[test]
    fn normalized_drops_blank_text_and_websites() {
        let profile = Profile {
            location: Some("   ".into()),
            name: Some("  Jane Doe ".into()),
            websites: Some(vec![
                Website {
                    url: " ".into(),
                    website_type: None,
                },
                Website {
                    url: "https://example.com".into(),
                    website_type: Some("".into()),
                },
            ]),
            ..Profile::default()
        }
        .normalized();

        assert_eq!(profile.location, None);
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            profile.websites,
            Some(vec![Website {
                url: "https://example.com".into(),
                website_type: None,
            }])
        );
    }
}
