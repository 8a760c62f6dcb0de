//! Static voice configuration table
//!
//! See https://cloud.google.com/text-to-speech/docs/voices to add more
//! voices/languages.

use super::error::SpeechError;

/// A concrete synthesized-voice identity: a BCP-47 language code plus the
/// voice name understood by the synthesis API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceConfig {
    pub language_code: &'static str,
    pub name: &'static str,
}

type PersonaTable = &'static [(&'static str, VoiceConfig)];

const VOICES: &[(&str, PersonaTable)] = &[
    (
        "English",
        &[
            (
                "Maria",
                VoiceConfig {
                    language_code: "en-US",
                    name: "en-US-Standard-C",
                },
            ),
            (
                "Juan",
                VoiceConfig {
                    language_code: "en-US",
                    name: "en-US-Standard-D",
                },
            ),
        ],
    ),
    (
        "Arabic",
        &[
            (
                "Maria",
                VoiceConfig {
                    language_code: "ar-XA",
                    name: "ar-XA-Standard-A",
                },
            ),
            (
                "Juan",
                VoiceConfig {
                    language_code: "ar-XA",
                    name: "ar-XA-Standard-B",
                },
            ),
        ],
    ),
    (
        "French",
        &[
            (
                "Maria",
                VoiceConfig {
                    language_code: "fr-FR",
                    name: "fr-FR-Standard-C",
                },
            ),
            (
                "Juan",
                VoiceConfig {
                    language_code: "fr-FR",
                    name: "fr-FR-Standard-B",
                },
            ),
        ],
    ),
    (
        "Spanish",
        &[
            (
                "Maria",
                VoiceConfig {
                    language_code: "es-ES",
                    name: "es-ES-Studio-C",
                },
            ),
            (
                "Juan",
                VoiceConfig {
                    language_code: "es-ES",
                    name: "es-ES-Studio-F",
                },
            ),
        ],
    ),
];

/// Resolve a (language, persona) pair. Unknown pairs are a typed error; there
/// is deliberately no fallback voice.
pub fn lookup(language: &str, persona: &str) -> Result<VoiceConfig, SpeechError> {
    VOICES
        .iter()
        .find(|(lang, _)| *lang == language)
        .and_then(|(_, personas)| {
            personas
                .iter()
                .find(|(name, _)| *name == persona)
                .map(|(_, voice)| *voice)
        })
        .ok_or_else(|| SpeechError::VoiceNotFound {
            language: language.to_string(),
            persona: persona.to_string(),
        })
}

/// All configured (language, persona, voice) triples.
pub fn supported() -> impl Iterator<Item = (&'static str, &'static str, VoiceConfig)> {
    VOICES.iter().flat_map(|(language, personas)| {
        personas
            .iter()
            .map(move |(persona, voice)| (*language, *persona, *voice))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_four_languages_and_two_personas() {
        let all: Vec<_> = supported().collect();
        assert_eq!(all.len(), 8);

        for language in ["English", "Arabic", "French", "Spanish"] {
            for persona in ["Maria", "Juan"] {
                assert!(lookup(language, persona).is_ok(), "{language}/{persona}");
            }
        }
    }

    #[test]
    fn lookup_returns_configured_identifiers() {
        let voice = lookup("English", "Maria").unwrap();
        assert_eq!(voice.language_code, "en-US");
        assert_eq!(voice.name, "en-US-Standard-C");

        let voice = lookup("Spanish", "Juan").unwrap();
        assert_eq!(voice.language_code, "es-ES");
        assert_eq!(voice.name, "es-ES-Studio-F");
    }

    #[test]
    fn unknown_pairs_are_typed_errors() {
        let err = lookup("German", "Maria").unwrap_err();
        assert!(matches!(
            err,
            SpeechError::VoiceNotFound { ref language, ref persona }
                if language == "German" && persona == "Maria"
        ));

        assert!(lookup("English", "Alice").is_err());
    }
}
