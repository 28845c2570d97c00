use anyhow::{anyhow, Context};
use chrono::{FixedOffset, NaiveDate, Utc};
use connector_booking::options::{
    DEFAULT_MEETING_DURATION_MIN, DEFAULT_SLOT_END, DEFAULT_SLOT_START, DEFAULT_SLOT_STEP_MIN,
    DEFAULT_TIMEZONE, DEFAULT_TIMEZONES,
};
use connector_booking::BookingOptions;
use std::str::FromStr;
use std::time::Duration;

/// Idle sessions older than this are evicted (seconds).
const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

// ── Clock ──

/// Source of "today" for calendar classification.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// The server's local date.
    Local,
    /// The date at a fixed UTC offset.
    Offset(FixedOffset),
    #[cfg(test)]
    Frozen(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Local => chrono::Local::now().date_naive(),
            Clock::Offset(offset) => Utc::now().with_timezone(offset).date_naive(),
            #[cfg(test)]
            Clock::Frozen(date) => *date,
        }
    }
}

// ── Config ──

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Front-end origin allowed by CORS; any origin when unset.
    pub webapp_url: Option<String>,
    pub options: BookingOptions,
    pub clock: Clock,
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Empty values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", get("PORT"), 3000u16)?;
        let webapp_url = get("WEBAPP_URL");

        let start = parse_or("BOOKING_SLOT_START", get("BOOKING_SLOT_START"), DEFAULT_SLOT_START)?;
        let end = parse_or("BOOKING_SLOT_END", get("BOOKING_SLOT_END"), DEFAULT_SLOT_END)?;
        let step = parse_or(
            "BOOKING_SLOT_STEP_MIN",
            get("BOOKING_SLOT_STEP_MIN"),
            DEFAULT_SLOT_STEP_MIN,
        )?;
        let duration = parse_or(
            "BOOKING_DURATION_MIN",
            get("BOOKING_DURATION_MIN"),
            DEFAULT_MEETING_DURATION_MIN,
        )?;
        let timezones: Vec<String> = match get("BOOKING_TIMEZONES") {
            Some(list) => list.split(',').map(|tz| tz.trim().to_string()).collect(),
            None => DEFAULT_TIMEZONES.iter().map(|tz| tz.to_string()).collect(),
        };
        let default_timezone =
            get("BOOKING_DEFAULT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.into());

        let slots = BookingOptions::slot_range(start, end, step)
            .context("invalid BOOKING_SLOT_* range")?;
        let options = BookingOptions::new(slots, timezones, default_timezone, duration)
            .context("invalid booking options")?;

        let clock = match get("CALENDAR_UTC_OFFSET_MIN") {
            Some(raw) => {
                let minutes: i32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("CALENDAR_UTC_OFFSET_MIN is not a number: {raw}"))?;
                let offset = FixedOffset::east_opt(minutes * 60)
                    .ok_or_else(|| anyhow!("CALENDAR_UTC_OFFSET_MIN out of range: {minutes}"))?;
                Clock::Offset(offset)
            }
            None => Clock::Local,
        };

        let ttl_secs = parse_or("SESSION_TTL_SECS", get("SESSION_TTL_SECS"), DEFAULT_SESSION_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(anyhow!("SESSION_TTL_SECS must be positive"));
        }

        Ok(Self {
            host,
            port,
            webapp_url,
            options,
            clock,
            session_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
