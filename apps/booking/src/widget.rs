use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::calendar::{compute_grid, CalendarCell, CalendarDay, YearMonth};
use crate::locale::{timezone_display, Captions, Direction, Lang};
use crate::options::{BookingOptions, TimeSlot};
use crate::selection::{Phase, SelectionFlow};

/// One pass through the "Book Meeting" flow: the displayed month plus the selection.
///
/// Month navigation and selection are independent; going back to the
/// calendar keeps whatever month the visitor was looking at.
#[derive(Debug, Clone)]
pub struct BookingWidget {
    view: YearMonth,
    selection: SelectionFlow,
}

impl BookingWidget {
    /// Enter the flow fresh, showing the month that contains `today`.
    pub fn enter(options: Arc<BookingOptions>, today: NaiveDate) -> Self {
        Self {
            view: YearMonth::of(today),
            selection: SelectionFlow::new(options),
        }
    }

    pub fn view(&self) -> YearMonth {
        self.view
    }

    pub fn selection(&self) -> &SelectionFlow {
        &self.selection
    }

    pub fn grid(&self, today: NaiveDate) -> Vec<CalendarCell> {
        compute_grid(self.view, self.selection.selected_date(), today)
    }

    pub fn navigate_prev_month(&mut self) {
        self.view = self.view.prev_month();
    }

    pub fn navigate_next_month(&mut self) {
        self.view = self.view.next_month();
    }

    /// Click on a day cell. Only days of the displayed month are clickable.
    pub fn choose_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if !self.view.contains(date) {
            tracing::debug!(%date, "ignoring date outside the displayed month");
            return false;
        }
        let day = CalendarDay::classify(date, today, self.selection.selected_date());
        self.selection.choose_date(&day)
    }

    pub fn go_back(&mut self) -> bool {
        self.selection.go_back()
    }

    pub fn choose_time(&mut self, slot: TimeSlot) -> bool {
        self.selection.choose_time(slot)
    }

    pub fn set_timezone(&mut self, tz: &str) -> bool {
        self.selection.set_timezone(tz)
    }

    /// Everything a host needs to draw the widget in `lang`.
    pub fn snapshot(&self, lang: Lang, today: NaiveDate) -> WidgetView {
        let options = self.selection.options();
        WidgetView {
            lang,
            direction: lang.direction(),
            selection: self.selection.phase(),
            year: self.view.year(),
            month: self.view.month(),
            month_caption: lang.month_caption(self.view.year(), self.view.month()),
            weekdays: lang.weekday_headers(),
            grid: self.grid(today),
            selected_date_label: self.selection.selected_date().map(|d| lang.long_date(d)),
            timezone: self.selection.timezone().to_string(),
            timezones: options
                .timezones()
                .iter()
                .map(|tz| TimezoneOption {
                    value: tz.clone(),
                    label: timezone_display(tz),
                })
                .collect(),
            time_slots: options.time_slots().to_vec(),
            captions: lang.captions(options.meeting_duration_min()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimezoneOption {
    pub value: String,
    pub label: String,
}

/// Render output of [`BookingWidget::snapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub lang: Lang,
    pub direction: Direction,
    pub selection: Phase,
    pub year: i32,
    pub month: u32,
    pub month_caption: String,
    pub weekdays: Vec<String>,
    pub grid: Vec<CalendarCell>,
    pub selected_date_label: Option<String>,
    pub timezone: String,
    pub timezones: Vec<TimezoneOption>,
    pub time_slots: Vec<TimeSlot>,
    pub captions: Captions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn widget() -> BookingWidget {
        BookingWidget::enter(Arc::new(BookingOptions::default()), today())
    }

    #[test]
    fn test_enter_shows_current_month() {
        let w = widget();
        assert_eq!((w.view().year(), w.view().month()), (2024, 6));
        assert_eq!(w.selection().phase(), Phase::PickingDate);
    }

    #[test]
    fn test_navigation_wraps_years() {
        let mut w = BookingWidget::enter(Arc::new(BookingOptions::default()), date(2024, 12, 3));
        w.navigate_next_month();
        assert_eq!((w.view().year(), w.view().month()), (2025, 1));
        w.navigate_prev_month();
        w.navigate_prev_month();
        assert_eq!((w.view().year(), w.view().month()), (2024, 11));
    }

    #[test]
    fn test_choose_date_in_later_month() {
        let mut w = widget();
        w.navigate_next_month();
        assert!(w.choose_date(date(2024, 7, 2), today()));
        assert_eq!(w.selection().selected_date(), Some(date(2024, 7, 2)));
    }

    #[test]
    fn test_choose_date_outside_displayed_month_is_noop() {
        let mut w = widget();
        assert!(!w.choose_date(date(2024, 7, 2), today()));
        assert_eq!(w.selection().phase(), Phase::PickingDate);
    }

    #[test]
    fn test_choose_past_date_is_noop() {
        let mut w = widget();
        assert!(!w.choose_date(date(2024, 6, 14), today()));
        assert_eq!(w.selection().selected_date(), None);
    }

    #[test]
    fn test_go_back_keeps_displayed_month() {
        let mut w = widget();
        w.navigate_next_month();
        w.choose_date(date(2024, 7, 2), today());
        w.go_back();
        assert_eq!((w.view().year(), w.view().month()), (2024, 7));
    }

    #[test]
    fn test_grid_marks_selection() {
        let mut w = widget();
        w.choose_date(date(2024, 6, 20), today());
        let selected: Vec<NaiveDate> = w
            .grid(today())
            .iter()
            .filter_map(CalendarCell::as_day)
            .filter(|d| d.is_selected())
            .map(|d| d.date())
            .collect();
        assert_eq!(selected, vec![date(2024, 6, 20)]);
    }

    #[test]
    fn test_snapshot_picking_date_english() {
        let view = widget().snapshot(Lang::En, today());
        assert_eq!(view.month_caption, "June 2024");
        assert_eq!(view.direction, Direction::Ltr);
        assert_eq!(view.weekdays[0], "Sun");
        assert_eq!(view.grid.len(), 36);
        assert_eq!(view.selected_date_label, None);
        assert_eq!(view.timezone, "Africa/Cairo");
        assert_eq!(view.time_slots.len(), 7);
        assert_eq!(view.captions.select_day, "Select a Day");
    }

    #[test]
    fn test_snapshot_picking_time_arabic() {
        let mut w = widget();
        w.choose_date(date(2024, 6, 15), today());
        w.set_timezone("America/New_York");
        w.choose_time("13:00".parse().unwrap());

        let view = w.snapshot(Lang::Ar, today());
        assert_eq!(view.direction, Direction::Rtl);
        assert_eq!(view.selected_date_label.as_deref(), Some("السبت، ١٥ يونيو ٢٠٢٤"));
        assert_eq!(view.timezone, "America/New_York");
        assert!(view
            .timezones
            .iter()
            .any(|tz| tz.value == "America/New_York" && tz.label == "America/New York"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["lang"], "ar");
        assert_eq!(json["direction"], "rtl");
        assert_eq!(json["selection"]["phase"], "picking_time");
        assert_eq!(json["selection"]["time"], "13:00");
    }
}
