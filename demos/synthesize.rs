use std::path::PathBuf;
use std::time::Instant;

use tts_pipeline::{
    synthesize_to_file, Engine, Gender, OutputFormat, ProviderError, SpeechProvider,
    SynthesisRequest, Voice,
};

/// Offline stand-in for a real cloud provider: emits a short sine burst per
/// chunk so the pipeline can be exercised end to end without credentials.
struct ToneProvider;

impl SpeechProvider for ToneProvider {
    fn synthesize(
        &self,
        text: &str,
        _voice: &Voice,
        _engine: Engine,
        _format: OutputFormat,
        sample_rate: u32,
    ) -> Result<Vec<u8>, ProviderError> {
        // ~40ms of 440Hz per character, 16-bit mono PCM.
        let samples_per_char = sample_rate as usize / 25;
        let total = text.chars().count() * samples_per_char;
        let mut pcm = Vec::with_capacity(total * 2);
        for n in 0..total {
            let t = n as f32 / sample_rate as f32;
            let value = (t * 440.0 * 2.0 * std::f32::consts::PI).sin();
            pcm.extend_from_slice(&((value * 8000.0) as i16).to_le_bytes());
        }
        Ok(pcm)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let catalog = vec![
        Voice {
            id: "Joanna".to_string(),
            gender: Gender::Female,
            language_code: "en-US".to_string(),
            supported_engines: vec![Engine::Standard, Engine::Neural],
        },
        Voice {
            id: "Matthew".to_string(),
            gender: Gender::Male,
            language_code: "en-US".to_string(),
            supported_engines: vec![Engine::Standard],
        },
    ];

    let request = SynthesisRequest::builder()
        .text(
            "Hello! This request is split into provider-sized chunks, synthesized \
             chunk by chunk, and reassembled into a single WAV file.",
        )
        .language("en-US")
        .gender(Gender::Female)
        .format(OutputFormat::Wav)
        .build()?;

    let start = Instant::now();
    let output = PathBuf::from("output.wav");
    synthesize_to_file(&ToneProvider, &catalog, &request, &output)?;
    println!("Saved {} in {:.2?}", output.display(), start.elapsed());

    Ok(())
}
