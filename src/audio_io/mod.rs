pub mod writer;

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, MetadataRevision};
use symphonia::core::probe::Hint;

use crate::error::DiffError;
use crate::types::{ChannelLayout, DecodedAudio, Sample};

/// Decode a whole file into interleaved 16-bit samples.
///
/// Only mono and stereo sources are accepted.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, DiffError> {
    let path = path.as_ref();
    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();
    let decoder_opts = DecoderOptions::default();

    let mut probed =
        symphonia::default::get_probe().format(&hint, mss, &format_opts, &metadata_opts)?;

    let mut tags = Vec::new();
    if let Some(rev) = probed.metadata.get().as_ref().and_then(|m| m.current()) {
        collect_tags(rev, &mut tags);
    }

    let mut format = probed.format;
    let track = format.default_track().ok_or(DiffError::NoTrack)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    if let Some(n) = channels {
        ChannelLayout::from_channels(n)?;
    }
    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &decoder_opts)?;

    let mut samples: Vec<Sample> = Vec::new();
    let mut buf: Option<SampleBuffer<Sample>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(_)) => break,
            Err(Error::ResetRequired) => continue,
            Err(err) => return Err(err.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                ChannelLayout::from_channels(spec.channels.count())?;
                sample_rate = Some(spec.rate);
                channels = Some(spec.channels.count());

                // SampleBuffer capacity counts samples, decoded capacity counts frames
                let duration = decoded.capacity();
                let needed = duration * spec.channels.count();
                if buf.as_ref().is_none_or(|b| b.capacity() < needed) {
                    buf = Some(SampleBuffer::<Sample>::new(duration as u64, spec));
                }
                if let Some(buf) = buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            Err(Error::IoError(_)) => break,
            Err(Error::DecodeError(e)) => {
                log::warn!("skipping undecodable packet in {}: {e}", path.display());
                continue;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(rev) = format.metadata().current() {
        collect_tags(rev, &mut tags);
    }

    let layout = ChannelLayout::from_channels(channels.ok_or(DiffError::NoTrack)?)?;
    Ok(DecodedAudio {
        samples,
        layout,
        sample_rate: sample_rate.ok_or(DiffError::NoTrack)?,
        tags,
    })
}

fn collect_tags(rev: &MetadataRevision, tags: &mut Vec<(String, String)>) {
    for tag in rev.tags() {
        tags.push((tag.key.clone(), tag.value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::noise;

    #[test]
    fn wav_round_trip_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let audio = DecodedAudio {
            samples: noise(70, 4410 * 2),
            layout: ChannelLayout::Stereo,
            sample_rate: 44_100,
            tags: Vec::new(),
        };
        writer::write_wav(&path, &audio.samples, audio.layout, audio.sample_rate).unwrap();

        let decoded = decode_file(&path).unwrap();
        assert_eq!(decoded.layout, ChannelLayout::Stereo);
        assert_eq!(decoded.sample_rate, 44_100);
        assert_eq!(decoded.samples, audio.samples);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = decode_file(dir.path().join("nope.mp3"));
        assert!(matches!(res, Err(DiffError::Io(_))));
    }
}
