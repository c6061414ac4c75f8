//! Voice catalog entries and deterministic voice/engine resolution.
//!
//! Resolution is a pure function over the catalog and the caller's hints:
//! identical inputs always produce the identical voice/engine pair. When a
//! hint cannot be satisfied exactly the result is a typed error, never a
//! "close enough" substitute — a request for `pt-BR` must not come back
//! speaking `pt-PT`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A speech-synthesis quality tier offered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Standard,
    Neural,
    #[serde(rename = "long-form")]
    LongForm,
}

impl Engine {
    /// Auto-selection preference, strongest first. New tiers slot into this
    /// list; nothing else encodes the ranking.
    pub const PREFERENCE: [Engine; 3] = [Engine::Neural, Engine::LongForm, Engine::Standard];

    /// Wire name of the engine (`"standard"`, `"neural"`, `"long-form"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Standard => "standard",
            Engine::Neural => "neural",
            Engine::LongForm => "long-form",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voice gender as reported by the provider catalog.
///
/// Parsed case-insensitively; anything the catalog reports beyond
/// male/female maps to `Unknown` rather than failing the whole parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("male") {
            Gender::Male
        } else if s.eq_ignore_ascii_case("female") {
            Gender::Female
        } else {
            Gender::Unknown
        }
    }
}

/// One entry of the provider's voice catalog.
///
/// Deserializes directly from the provider's DescribeVoices response shape
/// (PascalCase keys); fields the core does not use are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voice {
    pub id: String,
    #[serde(default)]
    pub gender: Gender,
    pub language_code: String,
    /// Engines this voice can be synthesized with. Non-empty in any valid
    /// catalog; an empty set surfaces as [`ResolutionError::NoEngineAvailable`].
    pub supported_engines: Vec<Engine>,
}

/// Partial voice specification supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceHints {
    /// Explicit voice id; when set, all other hints only constrain the engine.
    pub voice_id: Option<String>,
    pub gender: Option<Gender>,
    /// Full language-region code (e.g. `"en-GB"`). Matched on the whole code;
    /// no cross-region fallback.
    pub language: Option<String>,
    pub engine: Option<Engine>,
}

/// Successful resolution: one catalog voice plus the engine to drive it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedVoice<'a> {
    pub voice: &'a Voice,
    pub engine: Engine,
}

/// Why no voice/engine pair could be selected. Always recoverable by the
/// caller retrying with different hints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error(
        "no catalog voice matches voice_id={voice_id:?} language={language:?} \
         gender={gender:?} engine={engine:?}"
    )]
    NoMatch {
        voice_id: Option<String>,
        language: Option<String>,
        gender: Option<Gender>,
        engine: Option<Engine>,
    },
    #[error("voice '{voice}' does not support the {engine} engine")]
    EngineUnsupported { voice: String, engine: Engine },
    #[error("voice '{voice}' lists no usable engine")]
    NoEngineAvailable { voice: String },
}

/// Pick exactly one voice/engine pair from `catalog`, or report why none fit.
///
/// With an explicit `voice_id` the lookup is an exact, case-insensitive id
/// match; an explicit engine hint must then be supported by that voice.
/// Without one, the catalog is filtered by the language and gender hints
/// (exact matches only) and the survivor with the strongest engine wins,
/// per [`Engine::PREFERENCE`], ties broken by catalog order.
pub fn resolve_voice<'a>(
    catalog: &'a [Voice],
    hints: &VoiceHints,
) -> Result<ResolvedVoice<'a>, ResolutionError> {
    if let Some(id) = &hints.voice_id {
        let voice = catalog
            .iter()
            .find(|v| v.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| no_match(hints))?;
        let engine = match hints.engine {
            Some(wanted) if voice.supported_engines.contains(&wanted) => wanted,
            Some(wanted) => {
                return Err(ResolutionError::EngineUnsupported {
                    voice: voice.id.clone(),
                    engine: wanted,
                })
            }
            None => best_engine(voice).ok_or_else(|| ResolutionError::NoEngineAvailable {
                voice: voice.id.clone(),
            })?,
        };
        return Ok(ResolvedVoice { voice, engine });
    }

    let survivors: Vec<&Voice> = catalog
        .iter()
        .filter(|v| {
            hints
                .language
                .as_deref()
                .map_or(true, |lang| v.language_code.eq_ignore_ascii_case(lang))
        })
        .filter(|v| hints.gender.map_or(true, |g| v.gender == g))
        .filter(|v| {
            hints
                .engine
                .map_or(true, |e| v.supported_engines.contains(&e))
        })
        .collect();

    if survivors.is_empty() {
        log::debug!(
            "voice resolution found no candidates for language={:?} gender={:?} engine={:?}",
            hints.language,
            hints.gender,
            hints.engine
        );
        return Err(no_match(hints));
    }

    if let Some(wanted) = hints.engine {
        return Ok(ResolvedVoice {
            voice: survivors[0],
            engine: wanted,
        });
    }

    for engine in Engine::PREFERENCE {
        if let Some(voice) = survivors
            .iter()
            .find(|v| v.supported_engines.contains(&engine))
        {
            return Ok(ResolvedVoice { voice, engine });
        }
    }

    // Every survivor lists an empty engine set.
    Err(ResolutionError::NoEngineAvailable {
        voice: survivors[0].id.clone(),
    })
}

/// Strongest engine the voice supports, per [`Engine::PREFERENCE`].
fn best_engine(voice: &Voice) -> Option<Engine> {
    Engine::PREFERENCE
        .into_iter()
        .find(|e| voice.supported_engines.contains(e))
}

fn no_match(hints: &VoiceHints) -> ResolutionError {
    ResolutionError::NoMatch {
        voice_id: hints.voice_id.clone(),
        language: hints.language.clone(),
        gender: hints.gender,
        engine: hints.engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, gender: Gender, lang: &str, engines: &[Engine]) -> Voice {
        Voice {
            id: id.to_string(),
            gender,
            language_code: lang.to_string(),
            supported_engines: engines.to_vec(),
        }
    }

    fn catalog() -> Vec<Voice> {
        vec![
            voice(
                "Joanna",
                Gender::Female,
                "en-US",
                &[Engine::Standard, Engine::Neural],
            ),
            voice("Matthew", Gender::Male, "en-US", &[Engine::Standard]),
            voice("Amy", Gender::Female, "en-GB", &[Engine::Neural]),
            voice("Ines", Gender::Female, "pt-PT", &[Engine::Standard]),
            voice(
                "Danielle",
                Gender::Female,
                "en-US",
                &[Engine::LongForm, Engine::Neural],
            ),
        ]
    }

    fn by_id(hints_id: &str) -> VoiceHints {
        VoiceHints {
            voice_id: Some(hints_id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_id_auto_selects_neural_over_standard() {
        let catalog = catalog();
        let resolved = resolve_voice(&catalog, &by_id("Joanna")).unwrap();
        assert_eq!(resolved.voice.id, "Joanna");
        assert_eq!(resolved.engine, Engine::Neural);
    }

    #[test]
    fn explicit_id_lookup_is_case_insensitive() {
        let catalog = catalog();
        let resolved = resolve_voice(&catalog, &by_id("joanna")).unwrap();
        assert_eq!(resolved.voice.id, "Joanna");
    }

    #[test]
    fn unknown_id_is_no_match() {
        let catalog = catalog();
        let err = resolve_voice(&catalog, &by_id("Zelda")).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::NoMatch { voice_id: Some(id), .. } if id == "Zelda"
        ));
    }

    #[test]
    fn explicit_engine_hint_must_be_supported() {
        let catalog = catalog();
        let hints = VoiceHints {
            voice_id: Some("Matthew".to_string()),
            engine: Some(Engine::Neural),
            ..Default::default()
        };
        assert_eq!(
            resolve_voice(&catalog, &hints).unwrap_err(),
            ResolutionError::EngineUnsupported {
                voice: "Matthew".to_string(),
                engine: Engine::Neural,
            }
        );
    }

    #[test]
    fn empty_engine_set_is_no_engine_available() {
        let catalog = vec![voice("Ghost", Gender::Unknown, "en-US", &[])];
        assert_eq!(
            resolve_voice(&catalog, &by_id("Ghost")).unwrap_err(),
            ResolutionError::NoEngineAvailable {
                voice: "Ghost".to_string(),
            }
        );
    }

    #[test]
    fn hints_pick_strongest_engine_across_survivors() {
        let catalog = catalog();
        let hints = VoiceHints {
            language: Some("en-US".to_string()),
            ..Default::default()
        };
        // Joanna (neural) precedes Danielle in catalog order and beats
        // Matthew (standard only).
        let resolved = resolve_voice(&catalog, &hints).unwrap();
        assert_eq!(resolved.voice.id, "Joanna");
        assert_eq!(resolved.engine, Engine::Neural);
    }

    #[test]
    fn long_form_outranks_standard_but_not_neural() {
        let catalog = vec![
            voice("A", Gender::Female, "en-US", &[Engine::Standard]),
            voice("B", Gender::Female, "en-US", &[Engine::LongForm]),
        ];
        let hints = VoiceHints {
            language: Some("en-US".to_string()),
            ..Default::default()
        };
        let resolved = resolve_voice(&catalog, &hints).unwrap();
        assert_eq!(resolved.voice.id, "B");
        assert_eq!(resolved.engine, Engine::LongForm);
    }

    #[test]
    fn catalog_order_breaks_engine_ties() {
        let catalog = vec![
            voice("First", Gender::Male, "en-US", &[Engine::Neural]),
            voice("Second", Gender::Male, "en-US", &[Engine::Neural]),
        ];
        let resolved = resolve_voice(&catalog, &VoiceHints::default()).unwrap();
        assert_eq!(resolved.voice.id, "First");
    }

    #[test]
    fn gender_hint_filters_candidates() {
        let catalog = catalog();
        let hints = VoiceHints {
            language: Some("en-US".to_string()),
            gender: Some(Gender::Male),
            ..Default::default()
        };
        let resolved = resolve_voice(&catalog, &hints).unwrap();
        assert_eq!(resolved.voice.id, "Matthew");
        assert_eq!(resolved.engine, Engine::Standard);
    }

    #[test]
    fn engine_hint_without_id_restricts_survivors() {
        let catalog = catalog();
        let hints = VoiceHints {
            language: Some("en-US".to_string()),
            engine: Some(Engine::LongForm),
            ..Default::default()
        };
        let resolved = resolve_voice(&catalog, &hints).unwrap();
        assert_eq!(resolved.voice.id, "Danielle");
        assert_eq!(resolved.engine, Engine::LongForm);
    }

    #[test]
    fn no_cross_region_substitution() {
        // The catalog has a pt-PT female voice but nothing for pt-BR.
        let catalog = catalog();
        let hints = VoiceHints {
            language: Some("pt-BR".to_string()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let err = resolve_voice(&catalog, &hints).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::NoMatch { language: Some(lang), .. } if lang == "pt-BR"
        ));
    }

    #[test]
    fn language_match_ignores_ascii_case() {
        let catalog = catalog();
        let hints = VoiceHints {
            language: Some("EN-gb".to_string()),
            ..Default::default()
        };
        let resolved = resolve_voice(&catalog, &hints).unwrap();
        assert_eq!(resolved.voice.id, "Amy");
    }

    #[test]
    fn resolution_is_deterministic() {
        let catalog = catalog();
        let hints = VoiceHints {
            language: Some("en-US".to_string()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let first = resolve_voice(&catalog, &hints).unwrap();
        let second = resolve_voice(&catalog, &hints).unwrap();
        assert_eq!(first, second);
    }
}
