//! MP3 decoding via symphonia

use std::io::Cursor;

use anyhow::{Context, Result};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::PcmAudio;

/// Decode MP3 bytes to interleaved f32 PCM.
pub fn decode_mp3(bytes: &[u8]) -> Result<PcmAudio> {
    let stream = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unrecognized audio data")?;
    let mut format = probed.format;

    let track = format.default_track().context("No audio track found")?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Unsupported audio codec")?;

    let mut samples = Vec::new();
    let mut spec: Option<(u32, u16)> = None;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(anyhow::anyhow!("Failed to read audio packet: {e}")),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // A corrupt frame is skippable
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(anyhow::anyhow!("Failed to decode audio: {e}")),
        };

        if sample_buf.is_none() {
            let signal_spec = *decoded.spec();
            spec = Some((signal_spec.rate, signal_spec.channels.count() as u16));
            sample_buf = Some(SampleBuffer::<f32>::new(
                decoded.capacity() as u64,
                signal_spec,
            ));
        }

        if let Some(buf) = &mut sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let (sample_rate, channels) = spec.context("Audio stream contained no decodable frames")?;

    Ok(PcmAudio {
        samples,
        sample_rate,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(decode_mp3(b"definitely not an mp3 stream").is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(decode_mp3(&[]).is_err());
    }
}
