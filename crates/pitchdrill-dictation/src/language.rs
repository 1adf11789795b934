//! Static mapping from human-readable language names to recognizer
//! locale codes.
//!
//! Pure lookup with no error path: unknown names fall back to
//! [`DEFAULT_LOCALE`] rather than failing.

/// Locale used when a language name is not in the table.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Language names offered for objection capture, in display order.
pub const SUPPORTED_LANGUAGES: [&str; 8] = [
    "English", "Hindi", "Hinglish", "Marathi", "Kannada", "Tamil", "Telugu", "Bangla",
];

/// Returns the recognizer locale code for a language name.
pub fn locale_for(name: &str) -> &'static str {
    match name {
        "English" => "en-US",
        "Hindi" => "hi-IN",
        "Hinglish" => "en-IN",
        "Marathi" => "mr-IN",
        "Kannada" => "kn-IN",
        "Tamil" => "ta-IN",
        "Telugu" => "te-IN",
        "Bangla" => "bn-IN",
        _ => DEFAULT_LOCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(locale_for("English"), "en-US");
        assert_eq!(locale_for("Hindi"), "hi-IN");
        assert_eq!(locale_for("Hinglish"), "en-IN");
        assert_eq!(locale_for("Marathi"), "mr-IN");
        assert_eq!(locale_for("Kannada"), "kn-IN");
        assert_eq!(locale_for("Tamil"), "ta-IN");
        assert_eq!(locale_for("Telugu"), "te-IN");
        assert_eq!(locale_for("Bangla"), "bn-IN");
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(locale_for("Klingon"), DEFAULT_LOCALE);
        assert_eq!(locale_for(""), DEFAULT_LOCALE);
        // Lookup is case-sensitive; a mismatched case is an unknown name.
        assert_eq!(locale_for("english"), DEFAULT_LOCALE);
    }

    #[test]
    fn test_every_supported_language_has_a_code() {
        for name in SUPPORTED_LANGUAGES {
            let code = locale_for(name);
            assert_ne!(code, "");
            // Every entry in the table resolves to something other than
            // the fallback, except English which IS the fallback locale.
            if name != "English" {
                assert_ne!(code, DEFAULT_LOCALE, "no table entry for {}", name);
            }
        }
    }
}
