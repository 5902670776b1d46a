//! Entity catalogs — ordered pattern tables for campus entities.
//!
//! Declaration order is a contract: entries are listed from least to most
//! specific, and the conflict marker for a group precedes the specific
//! entries that disambiguate it. The resolver keeps the *last* matching
//! entry, so a later, narrower pattern always beats an earlier, broader one.
//! `CatalogBuilder::build` enforces the ordering at compile time of the
//! catalog data.

pub mod businesses;
pub mod locations;

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::error::CatalogError;

/// What a response needs to know about a resolved entity.
#[derive(Debug, Clone, Default)]
pub struct EntryMetadata {
    /// Map link or address string rendered into the identification text.
    pub address: String,
    /// Opening hours, for businesses and serveries.
    pub hours: Option<String>,
    /// Detail map link for the staged follow-up message.
    pub map_url: Option<String>,
}

impl EntryMetadata {
    /// Metadata for a plain location: just a map link.
    pub fn at(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            hours: None,
            map_url: None,
        }
    }

    /// Metadata for a business: address plus staged hours and map link.
    pub fn business(
        address: impl Into<String>,
        hours: impl Into<String>,
        map_url: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            hours: Some(hours.into()),
            map_url: Some(map_url.into()),
        }
    }
}

/// Kind of a catalog entry.
#[derive(Debug, Clone)]
pub enum EntryKind {
    /// A real entity with metadata.
    Resolved(EntryMetadata),
    /// The alias is ambiguous among a named conflict group.
    ConflictMarker { group: String },
}

/// A single compiled catalog entry.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Display name. For a conflict marker this is the group name.
    pub canonical: String,
    /// Case-insensitive matching pattern.
    pub pattern: Regex,
    pub kind: EntryKind,
}

impl CatalogEntry {
    pub fn is_conflict_marker(&self) -> bool {
        matches!(self.kind, EntryKind::ConflictMarker { .. })
    }
}

/// An ordered, immutable entity catalog with named conflict groups.
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    entries: Vec<CatalogEntry>,
    groups: HashMap<String, Vec<String>>,
}

impl EntityCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Member canonical names of a conflict group, in declaration order.
    pub fn group_members(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Look up a resolved (non-marker) entry by canonical name.
    pub fn entry_by_name(&self, canonical: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.canonical == canonical && !e.is_conflict_marker())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for an [`EntityCatalog`]. Compilation is fallible: bad patterns
/// and malformed conflict groups are rejected with a [`CatalogError`].
#[derive(Default)]
pub struct CatalogBuilder {
    specs: Vec<(String, String, EntryKind)>,
    groups: Vec<(String, Vec<String>)>,
}

impl CatalogBuilder {
    /// Declare a resolved entry. Order matters: later entries win ties.
    pub fn entry(mut self, canonical: &str, pattern: &str, metadata: EntryMetadata) -> Self {
        self.specs.push((
            canonical.to_string(),
            pattern.to_string(),
            EntryKind::Resolved(metadata),
        ));
        self
    }

    /// Declare a conflict marker for `group`. The member entries must be
    /// declared after this call.
    pub fn conflict(mut self, group: &str, pattern: &str, members: &[&str]) -> Self {
        self.specs.push((
            group.to_string(),
            pattern.to_string(),
            EntryKind::ConflictMarker {
                group: group.to_string(),
            },
        ));
        self.groups.push((
            group.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        ));
        self
    }

    pub fn build(self) -> Result<EntityCatalog, CatalogError> {
        let mut entries = Vec::with_capacity(self.specs.len());
        for (canonical, pattern, kind) in self.specs {
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| CatalogError::InvalidPattern {
                    name: canonical.clone(),
                    source,
                })?;
            entries.push(CatalogEntry {
                canonical,
                pattern: regex,
                kind,
            });
        }

        let mut groups = HashMap::new();
        for (group, members) in self.groups {
            if members.len() < 2 {
                return Err(CatalogError::DegenerateGroup {
                    group,
                    count: members.len(),
                });
            }
            let marker_pos = entries
                .iter()
                .position(|e| matches!(&e.kind, EntryKind::ConflictMarker { group: g } if *g == group))
                .unwrap_or(usize::MAX);
            for member in &members {
                let member_pos = entries
                    .iter()
                    .position(|e| e.canonical == *member && !e.is_conflict_marker());
                match member_pos {
                    None => {
                        return Err(CatalogError::UnknownMember {
                            group,
                            member: member.clone(),
                        });
                    }
                    Some(pos) if pos < marker_pos => {
                        return Err(CatalogError::MemberBeforeMarker {
                            group,
                            member: member.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
            groups.insert(group, members);
        }

        Ok(EntityCatalog { entries, groups })
    }
}
