//! Static promo content: scripts, avatar profiles, voices, backdrop colors.
//!
//! Everything here is compile-time data. The rotation module picks from
//! these tables by calendar day; the pipeline picks avatars and backdrops
//! at random per render so consecutive days never look identical.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Languages and voices
// ---------------------------------------------------------------------------

/// Script language. Determines which synthesis voice the renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

/// Presenter gender, used to match avatars to voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

const VOICE_EN_FEMALE: &str = "fb8c5c3f02854c57a4da182d4ed59467";
const VOICE_EN_MALE: &str = "1f6bcbd28bbc4b1f96d6a9124f3b52cd";
const VOICE_DE_FEMALE: &str = "82ab4bb3ffbd4b74a23d6af3a4b09e2e";
const VOICE_DE_MALE: &str = "c09e1db854ae4a2f8b5f0c34d21e77aa";

/// Resolve the synthesis voice id for a language/gender pair.
pub fn voice_for(language: Language, gender: Gender) -> &'static str {
    match (language, gender) {
        (Language::En, Gender::Female) => VOICE_EN_FEMALE,
        (Language::En, Gender::Male) => VOICE_EN_MALE,
        (Language::De, Gender::Female) => VOICE_DE_FEMALE,
        (Language::De, Gender::Male) => VOICE_DE_MALE,
    }
}

// ---------------------------------------------------------------------------
// Avatars
// ---------------------------------------------------------------------------

/// A presenter avatar available on the render vendor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AvatarProfile {
    /// Vendor avatar id, passed verbatim in render submissions.
    pub id: &'static str,
    /// Display name used in logs and API responses.
    pub name: &'static str,
    pub gender: Gender,
}

/// All avatars the pipeline may present with. Public vendor avatars only.
pub const AVATARS: &[AvatarProfile] = &[
    AvatarProfile {
        id: "Abigail_expressive_2024112501",
        name: "Abigail",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Aubrey_expressive_2024112701",
        name: "Aubrey",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Chloe_expressive_2024120201",
        name: "Chloe",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Georgia_expressive_2024112701",
        name: "Georgia",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Jin_expressive_2024112501",
        name: "Jin",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Annie_expressive_public",
        name: "Annie",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Caroline_expressive_public",
        name: "Caroline",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Amanda_in_Blue_Shirt_Front",
        name: "Amanda",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Diana_public_20240315",
        name: "Diana",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Lisa_public",
        name: "Lisa",
        gender: Gender::Female,
    },
    AvatarProfile {
        id: "Wayne_20240711",
        name: "Wayne",
        gender: Gender::Male,
    },
    AvatarProfile {
        id: "Tyler-incasualsuit-20220721",
        name: "Tyler",
        gender: Gender::Male,
    },
];

/// Pick a random avatar for a render.
///
/// Deliberately unseeded: the daily script rotation is deterministic, but
/// the presenter varies between renders of the same day.
pub fn random_avatar() -> &'static AvatarProfile {
    use rand::Rng;
    &AVATARS[rand::rng().random_range(0..AVATARS.len())]
}

// ---------------------------------------------------------------------------
// Backdrops
// ---------------------------------------------------------------------------

/// Key color for composite renders. The avatar is rendered on this
/// backdrop so the compositor can key it out over the screen recording.
pub const CHROMA_GREEN: &str = "#00FF00";

/// Studio backdrop palette for avatar-only renders.
pub const BACKDROP_COLORS: &[&str] = &["#16213E", "#0F3460", "#1A1A2E", "#2C2C54", "#1B262C"];

/// Pick a random studio backdrop for an avatar-only render.
pub fn random_backdrop() -> &'static str {
    use rand::Rng;
    BACKDROP_COLORS[rand::rng().random_range(0..BACKDROP_COLORS.len())]
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

/// A promo script in the rotation catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScriptEntry {
    /// Stable key, addressable via the `topic` request field.
    pub key: &'static str,
    pub language: Language,
    /// Short human label for API responses and video captions.
    pub title: &'static str,
    /// The spoken text, passed verbatim to the synthesis voice.
    #[serde(skip)]
    pub body: &'static str,
}

/// The daily rotation catalog. Order matters: day-of-year modulo length
/// indexes into this slice.
pub const SCRIPTS: &[ScriptEntry] = &[
    ScriptEntry {
        key: "founding",
        language: Language::En,
        title: "Founding member offer",
        body: "Hello! I'm excited to introduce you to Themora, the AI-powered \
               workspace for qualitative research.\n\n\
               Right now we're offering an exclusive sixty percent discount for \
               our founding members. That's a massive saving on professional-grade \
               research analysis.\n\n\
               Themora helps you analyze interviews, focus groups, and documents up \
               to ten times faster than traditional coding. The AI understands \
               context, surfaces themes, and drafts insight summaries automatically.\n\n\
               Don't miss the founding window. Visit themora.io today and lock in \
               your membership!",
    },
    ScriptEntry {
        key: "students",
        language: Language::En,
        title: "Student pitch",
        body: "Hey there, fellow researcher! Drowning in thesis interview \
               transcripts?\n\n\
               Themora is built for exactly this. Upload your interviews and the AI \
               identifies themes, codes your data, and even helps structure your \
               findings chapter.\n\n\
               Students get special pricing, and founding members currently save \
               sixty percent. Visit themora.io and get your evenings back!",
    },
    ScriptEntry {
        key: "academic",
        language: Language::En,
        title: "Academic rigor",
        body: "Qualitative analysis is time-consuming. We know, because we've been \
               there.\n\n\
               Themora applies AI to your interviews, focus groups, and documents \
               with academic rigor, supporting thematic analysis, grounded theory, \
               and content analysis workflows end to end.\n\n\
               Join the researchers who already trust Themora. Founding members \
               save sixty percent at themora.io.",
    },
    ScriptEntry {
        key: "gruender",
        language: Language::De,
        title: "Gruenderangebot",
        body: "Hallo! Darf ich vorstellen: Themora, der KI-Arbeitsplatz fuer \
               qualitative Forschung.\n\n\
               Gruendungsmitglieder erhalten aktuell sechzig Prozent Rabatt auf \
               die professionelle Analyseumgebung.\n\n\
               Themora analysiert Interviews, Fokusgruppen und Dokumente bis zu \
               zehnmal schneller als manuelles Kodieren. Die KI erkennt Themen, \
               kodiert Ihre Daten und entwirft Zusammenfassungen automatisch.\n\n\
               Besuchen Sie noch heute themora.io und sichern Sie sich Ihre \
               Mitgliedschaft!",
    },
    ScriptEntry {
        key: "studenten",
        language: Language::De,
        title: "Studierenden-Angebot",
        body: "Hey! Steckst du mitten in der Auswertung deiner \
               Abschlussarbeit?\n\n\
               Themora nimmt dir die Fleissarbeit ab: Interviews hochladen, und die \
               KI findet Themen, kodiert deine Daten und hilft beim Ergebniskapitel.\n\n\
               Studierende zahlen weniger, Gruendungsmitglieder sparen aktuell \
               sechzig Prozent. Schau auf themora.io vorbei!",
    },
    ScriptEntry {
        key: "forschung",
        language: Language::De,
        title: "Forschungsqualitaet",
        body: "Qualitative Auswertung kostet Zeit. Das wissen wir aus eigener \
               Erfahrung.\n\n\
               Themora analysiert Interviews, Fokusgruppen und Dokumente mit \
               wissenschaftlichem Anspruch und unterstuetzt thematische Analyse, \
               Grounded Theory und Inhaltsanalyse durchgaengig.\n\n\
               Forschende vertrauen bereits auf Themora. Gruendungsmitglieder \
               sparen sechzig Prozent auf themora.io.",
    },
];

/// Look up a script by its catalog key.
pub fn script_by_key(key: &str) -> Option<&'static ScriptEntry> {
    SCRIPTS.iter().find(|s| s.key == key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Scripts -----------------------------------------------------------

    #[test]
    fn script_keys_are_unique() {
        for (i, a) in SCRIPTS.iter().enumerate() {
            for b in &SCRIPTS[i + 1..] {
                assert_ne!(a.key, b.key, "Duplicate script key: {}", a.key);
            }
        }
    }

    #[test]
    fn script_bodies_are_nonempty() {
        for script in SCRIPTS {
            assert!(!script.body.trim().is_empty(), "Empty body: {}", script.key);
        }
    }

    #[test]
    fn script_by_key_finds_known_key() {
        let script = script_by_key("students").unwrap();
        assert_eq!(script.language, Language::En);
    }

    #[test]
    fn script_by_key_rejects_unknown_key() {
        assert!(script_by_key("blackfriday").is_none());
    }

    #[test]
    fn catalog_covers_both_languages() {
        assert!(SCRIPTS.iter().any(|s| s.language == Language::En));
        assert!(SCRIPTS.iter().any(|s| s.language == Language::De));
    }

    // -- Voices ------------------------------------------------------------

    #[test]
    fn voice_mapping_is_total() {
        for language in [Language::En, Language::De] {
            for gender in [Gender::Female, Gender::Male] {
                let voice = voice_for(language, gender);
                assert_eq!(voice.len(), 32, "Vendor voice ids are 32 hex chars");
                assert!(voice.chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn voices_are_distinct() {
        let voices = [
            voice_for(Language::En, Gender::Female),
            voice_for(Language::En, Gender::Male),
            voice_for(Language::De, Gender::Female),
            voice_for(Language::De, Gender::Male),
        ];
        for (i, a) in voices.iter().enumerate() {
            for b in &voices[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // -- Avatars -----------------------------------------------------------

    #[test]
    fn random_avatar_comes_from_catalog() {
        for _ in 0..20 {
            let picked = random_avatar();
            assert!(AVATARS.iter().any(|a| a.id == picked.id));
        }
    }

    #[test]
    fn avatar_ids_are_unique() {
        for (i, a) in AVATARS.iter().enumerate() {
            for b in &AVATARS[i + 1..] {
                assert_ne!(a.id, b.id, "Duplicate avatar id: {}", a.id);
            }
        }
    }

    #[test]
    fn catalog_has_both_genders() {
        assert!(AVATARS.iter().any(|a| a.gender == Gender::Female));
        assert!(AVATARS.iter().any(|a| a.gender == Gender::Male));
    }

    // -- Backdrops ---------------------------------------------------------

    #[test]
    fn random_backdrop_comes_from_palette() {
        for _ in 0..20 {
            assert!(BACKDROP_COLORS.contains(&random_backdrop()));
        }
    }

    #[test]
    fn chroma_green_is_not_a_studio_backdrop() {
        assert!(!BACKDROP_COLORS.contains(&CHROMA_GREEN));
    }
}
