//! Static talent-to-opportunity table.
//!
//! Lookup lowercases the talent and matches a key exactly; anything else
//! resolves to the single default entry.

/// Returned when no keyword matches.
pub const DEFAULT_SUGGESTION: &str = "Geen suggesties gevonden. Probeer iets anders.";

const ENTRIES: &[(&str, &[&str])] = &[
    (
        "planten",
        &[
            "Help op een plantage",
            "Verzorg kruidentuin",
            "Leer plantverzorging",
        ],
    ),
    (
        "koken",
        &[
            "Kook mee in buurtcentrum",
            "Start je eigen catering",
            "Vrijwillige kookhulp",
        ],
    ),
    (
        "helpen",
        &[
            "Help ouderen in de wijk",
            "Doe mee aan buurtproject",
            "Ondersteun op een zorgboerderij",
        ],
    ),
];

const DEFAULT_LIST: &[&str] = &[DEFAULT_SUGGESTION];

/// Fixed keyword table with a fallback list.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionTable {
    entries: &'static [(&'static str, &'static [&'static str])],
    fallback: &'static [&'static str],
}

impl SuggestionTable {
    pub const fn builtin() -> Self {
        Self {
            entries: ENTRIES,
            fallback: DEFAULT_LIST,
        }
    }

    /// Suggestions for `talent`; never empty.
    pub fn resolve(&self, talent: &str) -> &'static [&'static str] {
        let key = talent.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| *keyword == key)
            .map(|(_, suggestions)| *suggestions)
            .unwrap_or(self.fallback)
    }

    pub fn lookup(&self, talent: &str) -> Vec<String> {
        self.resolve(talent).iter().map(|s| s.to_string()).collect()
    }

    /// Known keywords in table order.
    pub fn keywords(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(keyword, _)| *keyword).collect()
    }

    #[cfg(test)]
    pub fn is_known(&self, talent: &str) -> bool {
        let key = talent.to_lowercase();
        self.entries.iter().any(|(keyword, _)| *keyword == key)
    }
}

impl Default for SuggestionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Shorthand for [`SuggestionTable::lookup`] on the built-in table.
pub fn lookup(talent: &str) -> Vec<String> {
    SuggestionTable::builtin().lookup(talent)
}
