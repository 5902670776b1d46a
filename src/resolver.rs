//! Free-text entity resolution against an ordered catalog.

use tracing::debug;

use crate::catalog::{CatalogEntry, EntityCatalog, EntryKind};

/// A retained match whose canonical name is this short is treated as
/// degenerate and reported as not found.
const MIN_CANONICAL_LEN: usize = 3;

/// Outcome of resolving one piece of input text.
///
/// None of these are errors: not-found and ambiguous are normal, user-visible
/// outcomes of the dialogue.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// No catalog entry matched.
    NotFound,
    /// The last match was a conflict marker; the user must pick a member.
    Ambiguous {
        group: String,
        members: Vec<String>,
    },
    /// A specific entity matched.
    Resolved(CatalogEntry),
}

/// Matches free text against a catalog with a last-match-wins tie-break.
pub struct EntityResolver {
    catalog: EntityCatalog,
}

impl EntityResolver {
    pub fn new(catalog: EntityCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Resolve raw input text to a catalog outcome.
    ///
    /// Every entry is evaluated in declaration order and only the last match
    /// is retained. Catalogs declare broad aliases before their narrower
    /// disambiguating siblings, so the later, more specific entry wins
    /// whenever both match.
    pub fn resolve(&self, text: &str) -> Resolution {
        let normalized = text.trim();
        if normalized.is_empty() {
            return Resolution::NotFound;
        }

        let mut retained: Option<&CatalogEntry> = None;
        for entry in self.catalog.entries() {
            if entry.pattern.is_match(normalized) {
                retained = Some(entry);
            }
        }

        let Some(entry) = retained else {
            debug!(input = %normalized, "no catalog entry matched");
            return Resolution::NotFound;
        };

        if entry.canonical.chars().count() < MIN_CANONICAL_LEN {
            debug!(
                input = %normalized,
                canonical = %entry.canonical,
                "retained match is degenerate, treating as not found"
            );
            return Resolution::NotFound;
        }

        match &entry.kind {
            EntryKind::ConflictMarker { group } => {
                let members = self
                    .catalog
                    .group_members(group)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                debug!(input = %normalized, group = %group, "ambiguous alias");
                Resolution::Ambiguous {
                    group: group.clone(),
                    members,
                }
            }
            EntryKind::Resolved(_) => {
                debug!(input = %normalized, canonical = %entry.canonical, "resolved");
                Resolution::Resolved(entry.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{locations::campus_locations, EntityCatalog, EntryMetadata};

    fn location_resolver() -> EntityResolver {
        EntityResolver::new(campus_locations())
    }

    #[test]
    fn unmatched_text_is_not_found() {
        let resolver = location_resolver();
        assert!(matches!(
            resolver.resolve("the moon"),
            Resolution::NotFound
        ));
        assert!(matches!(resolver.resolve(""), Resolution::NotFound));
        assert!(matches!(resolver.resolve("   "), Resolution::NotFound));
    }

    #[test]
    fn bare_ambiguous_alias_yields_conflict_group() {
        let resolver = location_resolver();
        match resolver.resolve("anderson") {
            Resolution::Ambiguous { group, members } => {
                assert_eq!(group, "Anderson");
                assert_eq!(members.len(), 3);
            }
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn specific_entry_beats_earlier_marker() {
        // "anderson hall" matches both the Anderson marker and the
        // M.D. Anderson Hall entry; the entry is declared later and wins.
        let resolver = location_resolver();
        match resolver.resolve("anderson hall") {
            Resolution::Resolved(entry) => assert_eq!(entry.canonical, "M.D. Anderson Hall"),
            other => panic!("expected resolved, got {other:?}"),
        }
    }

    #[test]
    fn punctuation_and_case_tolerated() {
        let resolver = location_resolver();
        for input in ["M.D. Anderson Hall", "md anderson hall", "  M D ANDERSON HALL  "] {
            match resolver.resolve(input) {
                Resolution::Resolved(entry) => {
                    assert_eq!(entry.canonical, "M.D. Anderson Hall", "input: {input}");
                }
                other => panic!("expected resolved for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn brown_hall_is_ambiguous_but_herman_is_not() {
        let resolver = location_resolver();
        assert!(matches!(
            resolver.resolve("brown hall"),
            Resolution::Ambiguous { .. }
        ));
        match resolver.resolve("herman brown hall") {
            Resolution::Resolved(entry) => assert_eq!(entry.canonical, "Herman Brown Hall"),
            other => panic!("expected resolved, got {other:?}"),
        }
    }

    #[test]
    fn declaration_order_drives_outcome() {
        // Two entries whose patterns both match the same input: the later
        // declaration must win regardless of pattern breadth.
        let catalog = EntityCatalog::builder()
            .entry("First Hall", r"hall", EntryMetadata::at("a"))
            .entry("Second Hall", r"hall", EntryMetadata::at("b"))
            .build()
            .unwrap();
        match EntityResolver::new(catalog).resolve("some hall") {
            Resolution::Resolved(entry) => assert_eq!(entry.canonical, "Second Hall"),
            other => panic!("expected resolved, got {other:?}"),
        }
    }

    #[test]
    fn short_canonical_name_is_degenerate() {
        let catalog = EntityCatalog::builder()
            .entry("ab", r"ab", EntryMetadata::at("x"))
            .build()
            .unwrap();
        assert!(matches!(
            EntityResolver::new(catalog).resolve("ab"),
            Resolution::NotFound
        ));
    }
}
