//! Built-in business and servery catalog.
//!
//! Same ordering contract as the location catalog. Business entries carry
//! hours and a detail map link for the staged follow-up messages.

use super::{EntityCatalog, EntryMetadata};

/// The businesses/serveries catalog used by the Businesses flow.
pub fn campus_businesses() -> EntityCatalog {
    EntityCatalog::builder()
        .entry(
            "Rice Coffeehouse",
            r"(rice\s+)?coffee\s*house|chaus",
            EntryMetadata::business(
                "the Rice Memorial Center",
                "Open 7:00 AM – midnight on weekdays, 9:00 AM – midnight on weekends.",
                "https://goo.gl/maps/sGUbVcKtEpE2",
            ),
        )
        .entry(
            "Willy's Pub",
            r"willy'?s?\s+pub|the\s+pub",
            EntryMetadata::business(
                "the basement of the Rice Memorial Center",
                "Open 11:00 AM – 11:00 PM Monday through Friday.",
                "https://goo.gl/maps/sGUbVcKtEpE2",
            ),
        )
        .entry(
            "Rice Campus Store",
            r"campus\s+store|book\s*store",
            EntryMetadata::business(
                "the Rice Memorial Center, first floor",
                "Open 9:00 AM – 6:00 PM weekdays, 10:00 AM – 4:00 PM Saturday.",
                "https://goo.gl/maps/sGUbVcKtEpE2",
            ),
        )
        .conflict(
            "Servery",
            r"servery",
            &[
                "North Servery",
                "West Servery",
                "South Servery",
                "Seibel Servery",
            ],
        )
        .entry(
            "North Servery",
            r"north(\s+servery)?",
            EntryMetadata::business(
                "the commons between Martel and Jones colleges",
                "Serving 7:30 AM – 10:30 AM, 11:30 AM – 1:30 PM, and 5:30 PM – 7:30 PM.",
                "https://goo.gl/maps/ddxHcnhcqUm",
            ),
        )
        .entry(
            "West Servery",
            r"west(\s+servery)?",
            EntryMetadata::business(
                "the commons between Duncan and McMurtry colleges",
                "Serving 7:30 AM – 10:30 AM, 11:30 AM – 1:30 PM, and 5:30 PM – 7:30 PM.",
                "https://goo.gl/maps/tHtUBbcoBnE2",
            ),
        )
        .entry(
            "South Servery",
            r"south(\s+servery)?",
            EntryMetadata::business(
                "the commons between Hanszen and Wiess colleges",
                "Serving 7:30 AM – 10:30 AM, 11:30 AM – 1:30 PM, and 5:30 PM – 7:30 PM.",
                "https://goo.gl/maps/kzkwvKkyx9M2",
            ),
        )
        .entry(
            "Seibel Servery",
            r"seibel(\s+servery)?",
            EntryMetadata::business(
                "the commons next to Lovett and Will Rice colleges",
                "Serving 7:30 AM – 10:30 AM, 11:30 AM – 1:30 PM, and 5:30 PM – 7:30 PM.",
                "https://goo.gl/maps/yyF6PRbMe2D2",
            ),
        )
        .build()
        .expect("builtin business catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntryKind;

    #[test]
    fn business_entries_carry_hours_and_map() {
        let catalog = campus_businesses();
        for entry in catalog.entries() {
            if let EntryKind::Resolved(meta) = &entry.kind {
                assert!(meta.hours.is_some(), "{} has no hours", entry.canonical);
                assert!(meta.map_url.is_some(), "{} has no map link", entry.canonical);
            }
        }
    }

    #[test]
    fn servery_group_members_follow_marker() {
        let catalog = campus_businesses();
        let members = catalog.group_members("Servery").unwrap();
        assert_eq!(members.len(), 4);
        for member in members {
            assert!(catalog.entry_by_name(member).is_some());
        }
    }
}
