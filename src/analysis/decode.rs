//! Audio decoding using symphonia
//!
//! Produces the read-only sample buffer the extractor consumes. Only the
//! first channel is kept; the extractor never looks at the others.

use crate::error::AnalysisError;
use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded mono samples ready for feature extraction
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: usize,
}

impl DecodedAudio {
    /// Wrap channel-0 samples; rejects a zero sample rate
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: usize) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            samples,
            sample_rate,
            channels: channels.max(1),
        })
    }

    /// Keep channel 0 of an interleaved buffer
    pub fn from_interleaved(
        interleaved: &[f32],
        channels: usize,
        sample_rate: u32,
    ) -> Result<Self, AnalysisError> {
        let channels = channels.max(1);
        let samples = interleaved.iter().step_by(channels).copied().collect();
        Self::new(samples, sample_rate, channels)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count of the source stream
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode an audio file
///
/// Any failure to open, probe or decode the container is reported as
/// [`AnalysisError::Decode`].
pub fn decode_file(path: &Path) -> Result<DecodedAudio, AnalysisError> {
    let (samples, sample_rate, channels) =
        decode_channel_zero(path).map_err(|e| AnalysisError::Decode {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        })?;

    let audio = DecodedAudio::new(samples, sample_rate, channels)?;
    log::debug!(
        "Decoded {} samples ({:.1}s) at {}Hz, {} channel(s): {:?}",
        audio.samples.len(),
        audio.duration(),
        audio.sample_rate,
        audio.channels,
        path
    );
    Ok(audio)
}

fn decode_channel_zero(path: &Path) -> Result<(Vec<f32>, u32, usize)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .with_context(|| format!("Failed to probe audio format: {:?}", path))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("No sample rate in audio track")?;
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count())
        .unwrap_or(1);

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .context("Failed to create audio decoder")?;

    let mut samples: Vec<f32> = Vec::new();
    let mut decoded_packets = 0usize;
    let mut failed_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("Error reading packet: {:?}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Error decoding packet: {:?}", e);
                failed_packets += 1;
                continue;
            }
        };
        decoded_packets += 1;

        let spec = *decoded.spec();
        let duration = decoded.capacity() as u64;

        let mut sample_buf = SampleBuffer::<f32>::new(duration, spec);
        sample_buf.copy_interleaved_ref(decoded);

        channels = spec.channels.count().max(1);
        samples.extend(sample_buf.samples().iter().step_by(channels).copied());
    }

    // A stream with no frames at all is valid and yields no samples
    if decoded_packets == 0 && failed_packets > 0 {
        anyhow::bail!("No decodable audio packets");
    }

    Ok((samples, sample_rate, channels))
}
