//! Audio decoding using symphonia
//!
//! Decodes uploaded bytes to mono f32 samples at the source sample
//! rate. The analyzer does not depend on the rate, so nothing is resampled.

use crate::error::{Result, TuneprobeError};
use crate::types::AudioBuffer;
use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, trace};

/// Decode an in-memory upload to a mono AudioBuffer
///
/// `source_name` is only used for logs and errors; `extension` (if any)
/// helps symphonia pick a demuxer.
pub fn decode_bytes(bytes: Vec<u8>, source_name: &str, extension: Option<&str>) -> Result<AudioBuffer> {
    decode_source(Box::new(Cursor::new(bytes)), source_name, extension)
}

fn decode_source(
    source: Box<dyn MediaSource>,
    source_name: &str,
    extension: Option<&str>,
) -> Result<AudioBuffer> {
    let mss = MediaSourceStream::new(source, Default::default());

    // Provide a hint based on file extension
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    // Probe the media source
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| TuneprobeError::decode_error(source_name, format!("Failed to probe format: {}", e)))?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| TuneprobeError::decode_error(source_name, "No audio tracks found"))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params.sample_rate.unwrap_or(44100);
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(2);

    debug!(
        "Decoding: {} @ {}Hz, {} channels",
        source_name, sample_rate, channels
    );

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| TuneprobeError::decode_error(source_name, format!("Failed to create decoder: {}", e)))?;

    let mut all_samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // End of stream
            }
            Err(e) => {
                return Err(TuneprobeError::decode_error(
                    source_name,
                    format!("Failed to read packet: {}", e),
                ));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                trace!("Skipping corrupted frame: {}", e);
                continue;
            }
            Err(e) => {
                return Err(TuneprobeError::decode_error(
                    source_name,
                    format!("Decode error: {}", e),
                ));
            }
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        // Frames may carry more channels than the codec params advertised
        let frame_channels = spec.channels.count().max(1);

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        all_samples.extend(to_mono(sample_buf.samples(), frame_channels));
    }

    let buffer = AudioBuffer::new(all_samples, sample_rate);
    debug!(
        "Decoded {} samples ({:.2}s) from {}",
        buffer.len(),
        buffer.duration,
        source_name
    );

    Ok(buffer)
}

/// Convert interleaved multi-channel audio to mono
fn to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
