use crate::types::{ChannelLayout, Position};

/// Seconds into the recording at sample index `pos`.
pub fn seconds_at_sample(pos: Position, sample_rate: u32, layout: ChannelLayout) -> f64 {
    pos as f64 / (layout.channels() as f64 * sample_rate as f64)
}

/// `[H:]MM:SS`, with `.cc` hundredths when `show_millis` is set.
pub fn format_timestamp(seconds: f64, show_millis: bool) -> String {
    let whole = seconds.max(0.0);
    let total = whole.trunc() as u64;
    let hours = total / 3600;
    let minutes = (total / 60) % 60;
    let secs = total % 60;
    let hundredths = ((whole - whole.trunc()) * 100.0) as u64;

    let mut res = format!("{minutes:02}:{secs:02}");
    if hours > 0 {
        res = format!("{hours}:{res}");
    }
    if show_millis {
        res.push_str(&format!(".{hundredths:02}"));
    }
    res
}

pub fn sample_timestamp(
    pos: Option<Position>,
    sample_rate: u32,
    layout: ChannelLayout,
    show_millis: bool,
) -> String {
    match pos {
        Some(pos) => format_timestamp(seconds_at_sample(pos, sample_rate, layout), show_millis),
        None => "--:--".to_string(),
    }
}
