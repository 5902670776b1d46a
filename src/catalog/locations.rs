//! Built-in campus location catalog.
//!
//! Ordering rule: broader aliases first, narrower disambiguations after.
//! Both conflict markers ("Anderson", "Brown Hall") are declared before the
//! specific buildings that share the alias.

use super::{EntityCatalog, EntryMetadata};

/// The campus buildings catalog used by the Directions flow.
pub fn campus_locations() -> EntityCatalog {
    EntityCatalog::builder()
        .entry(
            "Abercrombie Engineering Laboratory",
            r"abercrombie(\s+engineering(\s+laborator(y|ies))?)?",
            EntryMetadata::at("https://goo.gl/maps/8PvXtZo4GJs"),
        )
        .entry(
            "Allen Business Center",
            r"allen(\s+business)?\s+center",
            EntryMetadata::at("https://goo.gl/maps/fJbVqNQhXw72"),
        )
        .conflict(
            "Anderson",
            r"anderson",
            &[
                "M.D. Anderson Biological Laboratories",
                "Anderson-Clarke Center",
                "M.D. Anderson Hall",
            ],
        )
        .entry(
            "M.D. Anderson Biological Laboratories",
            r"(m\.?\s*d\.?\s+)?anderson\s+(biological\s+)?lab(orator(y|ies))?",
            EntryMetadata::at("https://goo.gl/maps/hZpcgLoSsGG2"),
        )
        .entry(
            "Anderson-Clarke Center",
            r"anderson((-|\s)+clarke)?\s+center",
            EntryMetadata::at("https://goo.gl/maps/VZmyBdUUKaB2"),
        )
        .entry(
            "M.D. Anderson Hall",
            r"(m\.?\s*d\.?\s+)?anderson\s+hall",
            EntryMetadata::at("https://goo.gl/maps/KYpf6JNxeSr"),
        )
        .entry(
            "Baker College",
            r"baker(\s+college)?",
            EntryMetadata::at("https://goo.gl/maps/HbczXLTqgxJ2"),
        )
        .entry(
            "Baker College Masters House",
            r"baker(\s+college)?\s+master('?s)?(\s+house)?",
            EntryMetadata::at("https://goo.gl/maps/gXAsMndfo3C2"),
        )
        .entry(
            "James A. Baker Hall",
            r"(james\s+(a\.?\s+)?)?baker\s+hall",
            EntryMetadata::at("https://goo.gl/maps/HCkysXso4pM2"),
        )
        .entry(
            "Brown College",
            r"brown(\s+college)?",
            EntryMetadata::at("https://goo.gl/maps/cfqEVBVRZ8x"),
        )
        .entry(
            "Brown College Masters House",
            r"brown(\s+college)?\s+master('?s)?(\s+house)?",
            EntryMetadata::at("https://goo.gl/maps/hfmPGVcJEFS2"),
        )
        .conflict(
            "Brown Hall",
            r"brown\s+hall",
            &[
                "Alice Pratt Brown Hall",
                "George R. Brown Hall",
                "Herman Brown Hall",
            ],
        )
        .entry(
            "Alice Pratt Brown Hall",
            r"(alice\s+(pratt\s+)?|(alice\s+)?pratt\s+)brown\s+hall",
            EntryMetadata::at("https://goo.gl/maps/TCb2wyTRD2y"),
        )
        .entry(
            "George R. Brown Hall",
            r"(george\s+(r\.?\s+)?|(george\s+)?r\.?\s+)brown\s+hall",
            EntryMetadata::at("https://goo.gl/maps/xEzofxYVzxv"),
        )
        .entry(
            "Herman Brown Hall",
            r"herman\s+brown\s+hall",
            EntryMetadata::at("https://goo.gl/maps/WHdUdCbtvXH2"),
        )
        .entry(
            "Duncan Hall",
            r"duncan(\s+hall)?",
            EntryMetadata::at("https://goo.gl/maps/Ym9xAPsTHcE2"),
        )
        .entry(
            "Fondren Library",
            r"fondren(\s+library)?",
            EntryMetadata::at("https://goo.gl/maps/zMrtSHhnTS32"),
        )
        .entry(
            "Lovett Hall",
            r"lovett(\s+hall)?",
            EntryMetadata::at("https://goo.gl/maps/dT9HpLCbF1S2"),
        )
        .entry(
            "Rice Memorial Center",
            r"(rice\s+)?memorial\s+center|\brmc\b",
            EntryMetadata::at("https://goo.gl/maps/sGUbVcKtEpE2"),
        )
        .entry(
            "Sewall Hall",
            r"sewall(\s+hall)?",
            EntryMetadata::at("https://goo.gl/maps/cBfHQv1TYh62"),
        )
        .build()
        .expect("builtin campus location catalog is valid")
}
