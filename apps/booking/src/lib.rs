//! Date and time selection engine behind the "Book Meeting" widget.
//!
//! [`calendar`] lays out a month and classifies its days, [`selection`] runs
//! the date → time flow, and [`widget`] ties both to a set of
//! [`BookingOptions`] and renders bilingual snapshots through [`locale`].
//! Nothing here reads the clock: callers pass "today" in.

pub mod calendar;
pub mod locale;
pub mod options;
pub mod selection;
pub mod widget;

pub use calendar::{compute_grid, days_in_month, CalendarCell, CalendarDay, YearMonth};
pub use locale::{Direction, Lang, ParseLangError};
pub use options::{BookingOptions, OptionsError, TimeSlot};
pub use selection::{Phase, SelectionFlow};
pub use widget::{BookingWidget, WidgetView};
