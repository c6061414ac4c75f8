//! Voice catalog loading and process-wide caching.
//!
//! The catalog comes wholesale from the provider (a DescribeVoices-shaped
//! JSON document). [`VoiceCatalog::from_json`] parses one response body;
//! [`CachedCatalog`] keeps the result in memory across requests with an
//! explicit [`CachedCatalog::refresh`] trigger. The resolver itself only
//! ever sees a plain `&[Voice]` slice and stays pure.

use std::sync::{PoisonError, RwLock};

use serde::Deserialize;

use crate::provider::ProviderError;
use crate::voice::Voice;

/// A parsed provider voice catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceCatalog {
    pub voices: Vec<Voice>,
}

impl VoiceCatalog {
    /// Parse a provider list-voices response body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let catalog: VoiceCatalog = serde_json::from_str(body)?;
        log::info!("parsed catalog with {} voices", catalog.voices.len());
        Ok(catalog)
    }
}

/// Supplies the voice catalog, optionally pre-filtered by language code.
///
/// This is the `list_voices` half of the remote collaborator contract; the
/// synthesis half is [`crate::SpeechProvider`].
pub trait CatalogSource {
    fn list_voices(&self, language: Option<&str>) -> Result<Vec<Voice>, ProviderError>;
}

/// Process-wide catalog cache around a [`CatalogSource`].
///
/// The first [`voices`](CachedCatalog::voices) call fetches through the
/// source; later calls serve the cached copy until
/// [`refresh`](CachedCatalog::refresh) re-fetches.
pub struct CachedCatalog<S> {
    source: S,
    cache: RwLock<Option<Vec<Voice>>>,
}

impl<S: CatalogSource> CachedCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
        }
    }

    /// The cached catalog, fetching it on first use.
    pub fn voices(&self) -> Result<Vec<Voice>, ProviderError> {
        if let Some(voices) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(voices.clone());
        }
        self.refresh()
    }

    /// Drop the cached copy and fetch a fresh catalog from the source.
    pub fn refresh(&self) -> Result<Vec<Voice>, ProviderError> {
        let voices = self.source.list_voices(None)?;
        log::info!("loaded {} voices from provider catalog", voices.len());
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(voices.clone());
        Ok(voices)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::voice::{Engine, Gender};

    const CATALOG_JSON: &str = r#"{
        "Voices": [
            {
                "Id": "Joanna",
                "Name": "Joanna",
                "Gender": "Female",
                "LanguageCode": "en-US",
                "LanguageName": "US English",
                "SupportedEngines": ["standard", "neural"]
            },
            {
                "Id": "Gregory",
                "Gender": "Male",
                "LanguageCode": "en-US",
                "SupportedEngines": ["long-form"]
            }
        ]
    }"#;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl CatalogSource for CountingSource {
        fn list_voices(&self, _language: Option<&str>) -> Result<Vec<Voice>, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            Ok(VoiceCatalog::from_json(CATALOG_JSON).unwrap().voices)
        }
    }

    #[test]
    fn parses_provider_shaped_json() {
        let catalog = VoiceCatalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.voices.len(), 2);
        let joanna = &catalog.voices[0];
        assert_eq!(joanna.id, "Joanna");
        assert_eq!(joanna.gender, Gender::Female);
        assert_eq!(joanna.language_code, "en-US");
        assert_eq!(
            joanna.supported_engines,
            vec![Engine::Standard, Engine::Neural]
        );
        assert_eq!(catalog.voices[1].supported_engines, vec![Engine::LongForm]);
    }

    #[test]
    fn unknown_gender_string_maps_to_unknown() {
        let body = r#"{
            "Voices": [{
                "Id": "X",
                "Gender": "Nonbinary",
                "LanguageCode": "en-US",
                "SupportedEngines": ["standard"]
            }]
        }"#;
        let catalog = VoiceCatalog::from_json(body).unwrap();
        assert_eq!(catalog.voices[0].gender, Gender::Unknown);
    }

    #[test]
    fn cache_fetches_once_until_refreshed() {
        let cached = CachedCatalog::new(CountingSource {
            calls: Cell::new(0),
        });

        assert_eq!(cached.voices().unwrap().len(), 2);
        assert_eq!(cached.voices().unwrap().len(), 2);
        assert_eq!(cached.source.calls.get(), 1);

        cached.refresh().unwrap();
        assert_eq!(cached.source.calls.get(), 2);
        assert_eq!(cached.voices().unwrap().len(), 2);
        assert_eq!(cached.source.calls.get(), 2);
    }
}
