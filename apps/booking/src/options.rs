use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ── Reference content ──

/// Default timezone label shown when the time view opens.
pub const DEFAULT_TIMEZONE: &str = "Africa/Cairo";

/// Timezone labels offered on the contact page.
pub const DEFAULT_TIMEZONES: [&str; 7] = [
    "Africa/Cairo",
    "Europe/London",
    "America/New_York",
    "UTC-05:00",
    "UTC+00:00",
    "UTC+02:00",
    "UTC+08:00",
];

/// First offered slot (12:00).
pub const DEFAULT_SLOT_START: TimeSlot = TimeSlot(12 * 60);
/// Last offered slot, inclusive (15:00).
pub const DEFAULT_SLOT_END: TimeSlot = TimeSlot(15 * 60);
/// Minutes between two consecutive slots.
pub const DEFAULT_SLOT_STEP_MIN: u32 = 30;
/// Advertised meeting length in minutes.
pub const DEFAULT_MEETING_DURATION_MIN: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

// ── Time slot ──

/// A bookable start time, stored as minutes after midnight and rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time slot {0:?}, expected HH:MM")]
pub struct ParseSlotError(String);

impl TimeSlot {
    /// Returns `None` for times outside a single day.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts single-digit hours; slots are always zero-padded
        if s.len() != 5 {
            return Err(ParseSlotError(s.to_string()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .ok()
            .and_then(|time| Self::new(time.hour(), time.minute()))
            .ok_or_else(|| ParseSlotError(s.to_string()))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ParseSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

// ── Options ──

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("no time slots configured")]
    NoTimeSlots,
    #[error("no timezones configured")]
    NoTimezones,
    #[error("default timezone {0:?} is not one of the offered timezones")]
    UnknownDefaultTimezone(String),
    #[error("slot range ends at {end} before it starts at {start}")]
    ReversedRange { start: TimeSlot, end: TimeSlot },
    #[error("slot step must be a positive number of minutes")]
    ZeroStep,
    #[error("meeting duration must be a positive number of minutes")]
    ZeroDuration,
}

/// Enumerated choices offered by the booking widget.
///
/// The widget never accepts a time or timezone outside these sets, so
/// hosts can swap them per deployment without touching the flow itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingOptions {
    time_slots: Vec<TimeSlot>,
    timezones: Vec<String>,
    default_timezone: String,
    meeting_duration_min: u32,
}

impl BookingOptions {
    /// Validate and normalize an option set.
    ///
    /// Slots are sorted and de-duplicated; timezones keep their given order
    /// with repeats dropped.
    pub fn new(
        mut time_slots: Vec<TimeSlot>,
        timezones: Vec<String>,
        default_timezone: impl Into<String>,
        meeting_duration_min: u32,
    ) -> Result<Self, OptionsError> {
        let default_timezone = default_timezone.into();

        time_slots.sort_unstable();
        time_slots.dedup();
        if time_slots.is_empty() {
            return Err(OptionsError::NoTimeSlots);
        }

        let mut unique: Vec<String> = Vec::with_capacity(timezones.len());
        for tz in timezones {
            let tz = tz.trim().to_string();
            if !tz.is_empty() && !unique.contains(&tz) {
                unique.push(tz);
            }
        }
        if unique.is_empty() {
            return Err(OptionsError::NoTimezones);
        }
        if !unique.contains(&default_timezone) {
            return Err(OptionsError::UnknownDefaultTimezone(default_timezone));
        }
        if meeting_duration_min == 0 {
            return Err(OptionsError::ZeroDuration);
        }

        Ok(Self {
            time_slots,
            timezones: unique,
            default_timezone,
            meeting_duration_min,
        })
    }

    /// Every `step_min` minutes from `start` through `end`, both inclusive.
    pub fn slot_range(
        start: TimeSlot,
        end: TimeSlot,
        step_min: u32,
    ) -> Result<Vec<TimeSlot>, OptionsError> {
        if step_min == 0 {
            return Err(OptionsError::ZeroStep);
        }
        if end < start {
            return Err(OptionsError::ReversedRange { start, end });
        }
        Ok(stepped_slots(start, end, step_min))
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn timezones(&self) -> &[String] {
        &self.timezones
    }

    pub fn default_timezone(&self) -> &str {
        &self.default_timezone
    }

    pub fn meeting_duration_min(&self) -> u32 {
        self.meeting_duration_min
    }

    pub fn offers_slot(&self, slot: TimeSlot) -> bool {
        self.time_slots.binary_search(&slot).is_ok()
    }

    pub fn offers_timezone(&self, tz: &str) -> bool {
        self.timezones.iter().any(|t| t == tz)
    }
}

impl Default for BookingOptions {
    /// The contact page's set: 12:00–15:00 every 30 minutes, seven timezone labels.
    fn default() -> Self {
        Self {
            time_slots: stepped_slots(DEFAULT_SLOT_START, DEFAULT_SLOT_END, DEFAULT_SLOT_STEP_MIN),
            timezones: DEFAULT_TIMEZONES.iter().map(|tz| tz.to_string()).collect(),
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            meeting_duration_min: DEFAULT_MEETING_DURATION_MIN,
        }
    }
}

fn stepped_slots(start: TimeSlot, end: TimeSlot, step_min: u32) -> Vec<TimeSlot> {
    (start.0..=end.0.min(MINUTES_PER_DAY - 1))
        .step_by(step_min as usize)
        .map(TimeSlot)
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> TimeSlot {
        s.parse().unwrap()
    }

    fn zones(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // ── TimeSlot ──

    #[test]
    fn test_slot_parse_and_display() {
        let s = slot("13:30");
        assert_eq!(s.hour(), 13);
        assert_eq!(s.minute(), 30);
        assert_eq!(s.to_string(), "13:30");
    }

    #[test]
    fn test_slot_parse_rejects_unpadded() {
        assert!("9:00".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_slot_parse_rejects_garbage() {
        assert!("ab:cd".parse::<TimeSlot>().is_err());
        assert!("24:00".parse::<TimeSlot>().is_err());
        assert!("".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_slot_new_bounds() {
        assert_eq!(TimeSlot::new(23, 59).map(|s| s.to_string()), Some("23:59".into()));
        assert!(TimeSlot::new(24, 0).is_none());
        assert!(TimeSlot::new(12, 60).is_none());
    }

    #[test]
    fn test_slot_serde_as_string() {
        let json = serde_json::to_string(&slot("12:00")).unwrap();
        assert_eq!(json, "\"12:00\"");
        let back: TimeSlot = serde_json::from_str("\"14:30\"").unwrap();
        assert_eq!(back, slot("14:30"));
        assert!(serde_json::from_str::<TimeSlot>("\"2pm\"").is_err());
    }

    // ── slot_range ──

    #[test]
    fn test_reference_slot_set() {
        let options = BookingOptions::default();
        let labels: Vec<String> = options.time_slots().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            labels,
            ["12:00", "12:30", "13:00", "13:30", "14:00", "14:30", "15:00"]
        );
    }

    #[test]
    fn test_slot_range_inclusive_end() {
        let slots = BookingOptions::slot_range(slot("09:00"), slot("10:00"), 20).unwrap();
        assert_eq!(slots, vec![slot("09:00"), slot("09:20"), slot("09:40"), slot("10:00")]);
    }

    #[test]
    fn test_slot_range_end_off_step() {
        let slots = BookingOptions::slot_range(slot("09:00"), slot("09:50"), 30).unwrap();
        assert_eq!(slots, vec![slot("09:00"), slot("09:30")]);
    }

    #[test]
    fn test_slot_range_single() {
        let slots = BookingOptions::slot_range(slot("12:00"), slot("12:00"), 30).unwrap();
        assert_eq!(slots, vec![slot("12:00")]);
    }

    #[test]
    fn test_slot_range_zero_step() {
        assert_eq!(
            BookingOptions::slot_range(slot("12:00"), slot("13:00"), 0),
            Err(OptionsError::ZeroStep)
        );
    }

    #[test]
    fn test_slot_range_reversed() {
        assert!(matches!(
            BookingOptions::slot_range(slot("15:00"), slot("12:00"), 30),
            Err(OptionsError::ReversedRange { .. })
        ));
    }

    // ── BookingOptions::new ──

    #[test]
    fn test_new_sorts_and_dedups_slots() {
        let options = BookingOptions::new(
            vec![slot("13:00"), slot("12:00"), slot("13:00")],
            zones(&["UTC+00:00"]),
            "UTC+00:00",
            30,
        )
        .unwrap();
        assert_eq!(options.time_slots(), &[slot("12:00"), slot("13:00")]);
    }

    #[test]
    fn test_new_dedups_timezones_in_order() {
        let options = BookingOptions::new(
            vec![slot("12:00")],
            zones(&["Europe/London", " Africa/Cairo ", "Europe/London", ""]),
            "Africa/Cairo",
            30,
        )
        .unwrap();
        assert_eq!(options.timezones(), &["Europe/London", "Africa/Cairo"]);
    }

    #[test]
    fn test_new_rejects_empty_slots() {
        let err = BookingOptions::new(vec![], zones(&["UTC+00:00"]), "UTC+00:00", 30);
        assert_eq!(err, Err(OptionsError::NoTimeSlots));
    }

    #[test]
    fn test_new_rejects_empty_timezones() {
        let err = BookingOptions::new(vec![slot("12:00")], vec![], "UTC+00:00", 30);
        assert_eq!(err, Err(OptionsError::NoTimezones));
    }

    #[test]
    fn test_new_rejects_unknown_default() {
        let err = BookingOptions::new(
            vec![slot("12:00")],
            zones(&["Europe/London"]),
            "Africa/Cairo",
            30,
        );
        assert_eq!(
            err,
            Err(OptionsError::UnknownDefaultTimezone("Africa/Cairo".into()))
        );
    }

    #[test]
    fn test_new_rejects_zero_duration() {
        let err = BookingOptions::new(vec![slot("12:00")], zones(&["UTC"]), "UTC", 0);
        assert_eq!(err, Err(OptionsError::ZeroDuration));
    }

    #[test]
    fn test_offers_membership() {
        let options = BookingOptions::default();
        assert!(options.offers_slot(slot("13:00")));
        assert!(!options.offers_slot(slot("13:15")));
        assert!(options.offers_timezone("America/New_York"));
        assert!(!options.offers_timezone("Asia/Tokyo"));
        assert_eq!(options.default_timezone(), "Africa/Cairo");
        assert_eq!(options.meeting_duration_min(), 30);
    }
}
