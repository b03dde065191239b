use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::WavSpec;

use crate::error::DiffError;
use crate::types::{ChannelLayout, Sample};

/// Samples written between flushes.
const FLUSH_EVERY: usize = 1 << 16;

/// Writes interleaved samples as 16-bit PCM WAV.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    samples: &[Sample],
    layout: ChannelLayout,
    sample_rate: u32,
) -> Result<(), DiffError> {
    let spec = WavSpec {
        channels: layout.channels() as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let file = File::create(path.as_ref())?;
    let bufw = BufWriter::new(file);
    let mut writer = hound::WavWriter::new(bufw, spec)?;
    for chunk in samples.chunks(FLUSH_EVERY) {
        for &s in chunk {
            writer.write_sample(s)?;
        }
        writer.flush()?;
    }
    writer.finalize()?;
    log::info!("Saved recut audio to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_reflects_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_wav(&path, &[1, -2, 3], ChannelLayout::Mono, 22_050).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22_050);
        let read: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, vec![1, -2, 3]);
    }
}
