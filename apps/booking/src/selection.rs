use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::calendar::CalendarDay;
use crate::options::{BookingOptions, TimeSlot};

/// Where the visitor is in the date → time flow.
///
/// A time only exists alongside the date it was picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    PickingDate,
    PickingTime {
        date: NaiveDate,
        time: Option<TimeSlot>,
    },
}

/// Two-phase selection controller.
///
/// Every transition is total: inputs that do not apply in the current phase,
/// past days, and values outside the configured option sets leave the state
/// untouched. Each method returns whether it changed anything.
#[derive(Debug, Clone)]
pub struct SelectionFlow {
    options: Arc<BookingOptions>,
    timezone: String,
    phase: Phase,
}

impl SelectionFlow {
    pub fn new(options: Arc<BookingOptions>) -> Self {
        let timezone = options.default_timezone().to_string();
        Self {
            options,
            timezone,
            phase: Phase::PickingDate,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> &BookingOptions {
        &self.options
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self.phase {
            Phase::PickingDate => None,
            Phase::PickingTime { date, .. } => Some(date),
        }
    }

    pub fn selected_time(&self) -> Option<TimeSlot> {
        match self.phase {
            Phase::PickingDate => None,
            Phase::PickingTime { time, .. } => time,
        }
    }

    /// Pick a day from the calendar and move on to the time view.
    pub fn choose_date(&mut self, day: &CalendarDay) -> bool {
        if !day.is_selectable() {
            tracing::debug!(date = %day.date(), "ignoring past day");
            return false;
        }
        match self.phase {
            Phase::PickingDate => {
                self.phase = Phase::PickingTime {
                    date: day.date(),
                    time: None,
                };
                true
            }
            Phase::PickingTime { .. } => {
                tracing::debug!(date = %day.date(), "ignoring date while picking a time");
                false
            }
        }
    }

    /// Return to the calendar. The chosen timezone survives.
    pub fn go_back(&mut self) -> bool {
        match self.phase {
            Phase::PickingTime { .. } => {
                self.phase = Phase::PickingDate;
                true
            }
            Phase::PickingDate => {
                tracing::debug!("ignoring back while picking a date");
                false
            }
        }
    }

    pub fn choose_time(&mut self, slot: TimeSlot) -> bool {
        if !self.options.offers_slot(slot) {
            tracing::debug!(%slot, "ignoring unknown time slot");
            return false;
        }
        match &mut self.phase {
            Phase::PickingTime { time, .. } => {
                *time = Some(slot);
                true
            }
            Phase::PickingDate => {
                tracing::debug!(%slot, "ignoring time while picking a date");
                false
            }
        }
    }

    pub fn set_timezone(&mut self, tz: &str) -> bool {
        if !self.options.offers_timezone(tz) {
            tracing::debug!(timezone = tz, "ignoring unknown timezone");
            return false;
        }
        match self.phase {
            Phase::PickingTime { .. } => {
                self.timezone = tz.to_string();
                true
            }
            Phase::PickingDate => {
                tracing::debug!(timezone = tz, "ignoring timezone while picking a date");
                false
            }
        }
    }
}

// ── Tests ──
