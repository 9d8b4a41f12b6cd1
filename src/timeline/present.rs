//! Values derived purely for display. Nothing here depends on anything but its arguments, so the
//! same activity looks the same in every run and every renderer.

use chrono::{Duration, TimeZone};
use sha1::{Digest, Sha1};

use super::event::Event;

const SECONDS_PER_DAY: f64 = 86400.;
const SATURATION_PERCENT: u32 = 90;
const LIGHTNESS_PERCENT: u32 = 45;
const NEUTRAL_COLOR: &str = "white";

/// Hue of an activity. Only the first byte of the SHA-1 digest is used, which keeps colors
/// identical to every other tool reading the same log.
pub fn hue_of(name: &str) -> u32 {
    let digest = Sha1::digest(name.as_bytes());
    360 * u32::from(digest[0]) / 256
}

/// CSS color of an activity. Nameless events are always white.
pub fn color_of(name: &str) -> String {
    if name.is_empty() {
        return NEUTRAL_COLOR.to_string();
    }
    format!(
        "hsl({},{SATURATION_PERCENT}%,{LIGHTNESS_PERCENT}%)",
        hue_of(name)
    )
}

/// The same color as [color_of] for terminals that only understand RGB.
pub fn rgb_of(name: &str) -> (u8, u8, u8) {
    if name.is_empty() {
        return (255, 255, 255);
    }
    hsl_to_rgb(
        f64::from(hue_of(name)),
        f64::from(SATURATION_PERCENT) / 100.,
        f64::from(LIGHTNESS_PERCENT) / 100.,
    )
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1. - (2. * lightness - 1.).abs()) * saturation;
    let sector = hue / 60.;
    let x = chroma * (1. - (sector % 2. - 1.).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.),
        1 => (x, chroma, 0.),
        2 => (0., chroma, x),
        3 => (0., x, chroma),
        4 => (x, 0., chroma),
        _ => (chroma, 0., x),
    };
    let m = lightness - chroma / 2.;
    let channel = |v: f64| ((v + m) * 255.).round() as u8;
    (channel(r), channel(g), channel(b))
}

/// Humanizes a duration, picking the largest unit that fits.
pub fn describe_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds() as f64;
    if duration >= Duration::days(1) {
        format!("{:.1} days", seconds / SECONDS_PER_DAY)
    } else if duration >= Duration::hours(1) {
        format!("{:.1} hours", seconds / 3600.)
    } else if duration >= Duration::minutes(1) {
        format!("{:.1} min", seconds / 60.)
    } else {
        format!("{:.0} sec", seconds)
    }
}

/// Share of a day `duration` takes, in percent.
pub fn height(duration: Duration) -> f64 {
    100. * duration.num_seconds() as f64 / SECONDS_PER_DAY
}

impl<Tz: TimeZone> Event<Tz> {
    pub fn color(&self) -> String {
        color_of(&self.name)
    }

    /// Describes the whole log entry. When the activity also happened elsewhere in the log the
    /// total is appended, as in "30.0 min of 2.5 hours".
    pub fn duration_description(&self) -> String {
        if self.original_duration == self.total_duration {
            describe_duration(self.original_duration)
        } else {
            format!(
                "{} of {}",
                describe_duration(self.original_duration),
                describe_duration(self.total_duration)
            )
        }
    }

    pub fn height(&self) -> f64 {
        height(self.duration)
    }
}
