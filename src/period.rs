//! Upscale granularities and their fixed second durations.

/// Target granularities accepted by the upscale operations.
///
/// Durations use fixed 30-day month and 360-day year conventions; nothing
/// here is calendar-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpscalePeriod {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl UpscalePeriod {
    /// Parses the exact lowercase name of a period.
    ///
    /// Matching is case-sensitive; unknown or empty text yields `None`.
    pub fn parse(text: &str) -> Option<UpscalePeriod> {
        match text {
            "minute" => Some(UpscalePeriod::Minute),
            "hour" => Some(UpscalePeriod::Hour),
            "day" => Some(UpscalePeriod::Day),
            "month" => Some(UpscalePeriod::Month),
            "year" => Some(UpscalePeriod::Year),
            _ => None,
        }
    }

    /// Returns the name accepted by [`UpscalePeriod::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            UpscalePeriod::Minute => "minute",
            UpscalePeriod::Hour => "hour",
            UpscalePeriod::Day => "day",
            UpscalePeriod::Month => "month",
            UpscalePeriod::Year => "year",
        }
    }

    /// Fixed duration of this period in seconds.
    pub fn seconds(&self) -> u32 {
        match self {
            UpscalePeriod::Minute => 60,
            UpscalePeriod::Hour => 3_600,
            UpscalePeriod::Day => 86_400,
            UpscalePeriod::Month => 2_592_000,
            UpscalePeriod::Year => 31_104_000,
        }
    }
}
