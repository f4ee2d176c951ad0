use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

/// Integer step in the raw time domain.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Tick(pub u64);

/// Zero-based position of a frame in the output sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open tick range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TickRange {
    /// Inclusive range start.
    pub start: Tick,
    /// Exclusive range end.
    pub end: Tick,
}

impl TickRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: Tick, end: Tick) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("TickRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Iterate `(index, tick)` pairs in ascending order.
    pub fn frames(self) -> impl Iterator<Item = (FrameIndex, Tick)> {
        (self.start.0..self.end.0).map(move |t| (FrameIndex(t - self.start.0), Tick(t)))
    }
}

/// Ticks per simulated second, as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Framerate {
    /// Ticks.
    pub num: u32,
    /// Seconds, must be non-zero.
    pub den: u32,
}

impl Framerate {
    /// Create a validated framerate.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        let (num, den) = validate_ratio("Framerate", num, den)?;
        Ok(Self { num, den })
    }

    /// Whole ticks per second.
    pub fn per_sec(num: u32) -> ReelResult<Self> {
        Self::new(num, 1)
    }

    /// Simulated timestamp of `tick` in seconds.
    ///
    /// Computed from the tick alone, so consecutive frames never accumulate rounding error.
    pub fn secs_at(self, tick: Tick) -> f64 {
        let scaled = u128::from(tick.0) * u128::from(self.den);
        scaled as f64 / f64::from(self.num)
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ratio(f, self.num, self.den)
    }
}

impl FromStr for Framerate {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = parse_ratio(s)?;
        Self::new(num, den)
    }
}

/// Playback frames-per-second of the encoded video, as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        let (num, den) = validate_ratio("Fps", num, den)?;
        Ok(Self { num, den })
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ratio(f, self.num, self.den)
    }
}

impl FromStr for Fps {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = parse_ratio(s)?;
        Self::new(num, den)
    }
}

/// Output image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("resolution width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Format seconds the way the renderer expects them on its command line (`3620.0`, `0.5`).
pub fn format_secs(secs: f64) -> String {
    format!("{secs:?}")
}

fn validate_ratio(what: &str, num: u32, den: u32) -> ReelResult<(u32, u32)> {
    if den == 0 {
        return Err(ReelError::validation(format!("{what} den must be > 0")));
    }
    if num == 0 {
        return Err(ReelError::validation(format!("{what} num must be > 0")));
    }
    Ok((num, den))
}

fn parse_ratio(s: &str) -> ReelResult<(u32, u32)> {
    let s = s.trim();
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim(), d.trim()),
        None => (s, "1"),
    };
    let num = num
        .parse::<u32>()
        .map_err(|e| ReelError::validation(format!("invalid rate '{s}': {e}")))?;
    let den = den
        .parse::<u32>()
        .map_err(|e| ReelError::validation(format!("invalid rate '{s}': {e}")))?;
    Ok((num, den))
}

fn write_ratio(f: &mut fmt::Formatter<'_>, num: u32, den: u32) -> fmt::Result {
    if den == 1 {
        write!(f, "{num}")
    } else {
        write!(f, "{num}/{den}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
