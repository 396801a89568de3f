//! Weekly work-hour report generator.
//!
//! # Responsibility
//! - Compute, per note, the hours its event interval overlaps a daily work
//!   window across the current Monday-through-Sunday week.
//! - Render the report lines in their fixed textual shape.
//!
//! # Invariants
//! - Overlap is clamped per calendar day; notes starting before or ending
//!   after the window contribute only the clamped portion.
//! - Hours round up to the nearest half hour.
//! - An empty result is a placeholder report, never an error.

use crate::model::note::Note;
use crate::timeutil::{self, MINUTE_MS};
use chrono::TimeZone;

/// Rendered when no note yields a positive overlap this week.
pub const NO_EVENTS_PLACEHOLDER: &str = "No events this week.";

/// Daily work window as minutes of the local day, e.g. 09:00-21:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    start_min: u32,
    end_min: u32,
}

impl WorkWindow {
    /// Builds a window from minute-of-day bounds, clamped to one day.
    ///
    /// An inverted window is representable and simply yields zero overlap
    /// everywhere.
    pub fn new(start_min: u32, end_min: u32) -> Self {
        Self {
            start_min: start_min.min(24 * 60),
            end_min: end_min.min(24 * 60),
        }
    }

    /// Convenience constructor for whole-hour windows.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> Self {
        Self::new(start_hour * 60, end_hour * 60)
    }

    pub fn start_min(&self) -> u32 {
        self.start_min
    }

    pub fn end_min(&self) -> u32 {
        self.end_min
    }
}

/// One report entry: a note with a positive worked-hour total.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub content: String,
    pub date_range: String,
    pub hours: f64,
}

impl ReportLine {
    pub fn render(&self) -> String {
        format!(
            "{}；{}， {}h",
            self.content,
            self.date_range,
            format_hours(self.hours)
        )
    }
}

/// Weekly work-hour report for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkHourReport {
    pub lines: Vec<ReportLine>,
}

impl WorkHourReport {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the report body, or the placeholder when nothing qualified.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return NO_EVENTS_PLACEHOLDER.to_string();
        }
        self.lines
            .iter()
            .map(ReportLine::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Generates the work-hour report for the week containing `now_ms`.
///
/// `notes` is the target group's collection; notes without a `start_time`
/// or without any intersection with the week window are skipped.
pub fn weekly_report<Tz: TimeZone>(
    tz: &Tz,
    now_ms: i64,
    notes: &[Note],
    window: WorkWindow,
) -> WorkHourReport {
    let Some(week) = timeutil::week_bounds(tz, now_ms) else {
        return WorkHourReport::default();
    };

    let mut lines = Vec::new();
    for note in notes {
        let Some(start) = note.start_time else {
            continue;
        };
        let end = note.effective_end().unwrap_or(start);
        if !week.overlaps(start, end) {
            continue;
        }

        let Some(minutes) = window_overlap_minutes(tz, start, end, window) else {
            continue;
        };
        let hours = round_up_to_half_hours(minutes);
        if hours <= 0.0 {
            continue;
        }

        lines.push(ReportLine {
            content: note.content.clone(),
            date_range: format_date_range(tz, start, end),
            hours,
        });
    }

    WorkHourReport { lines }
}

/// Total minutes of `[start_ms, end_ms]` falling inside the work window,
/// summed over each local calendar day the interval touches.
fn window_overlap_minutes<Tz: TimeZone>(
    tz: &Tz,
    start_ms: i64,
    end_ms: i64,
    window: WorkWindow,
) -> Option<i64> {
    let first_day = timeutil::local_datetime(tz, start_ms)?.date_naive();
    let last_day = timeutil::local_datetime(tz, end_ms)?.date_naive();

    let mut total_ms: i64 = 0;
    let mut day = first_day;
    while day <= last_day {
        let work_start = timeutil::at_minute_of_day(tz, day, window.start_min())?;
        let work_end = timeutil::at_minute_of_day(tz, day, window.end_min())?;
        total_ms += (end_ms.min(work_end) - start_ms.max(work_start)).max(0);
        day = day.succ_opt()?;
    }

    Some(total_ms / MINUTE_MS)
}

fn round_up_to_half_hours(minutes: i64) -> f64 {
    (minutes as f64 / 30.0).ceil() * 0.5
}

fn format_date_range<Tz: TimeZone>(tz: &Tz, start_ms: i64, end_ms: i64) -> String {
    let start_date = timeutil::local_datetime(tz, start_ms).map(|dt| dt.date_naive());
    let end_date = timeutil::local_datetime(tz, end_ms).map(|dt| dt.date_naive());
    match (start_date, end_date) {
        (Some(first), Some(last)) if first == last => first.format("%m/%d").to_string(),
        (Some(first), Some(last)) => {
            format!("{}-{}", first.format("%m/%d"), last.format("%m/%d"))
        }
        _ => String::new(),
    }
}

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_hours, round_up_to_half_hours, WorkWindow};

    #[test]
    fn rounding_goes_up_to_the_next_half_hour() {
        assert_eq!(round_up_to_half_hours(0), 0.0);
        assert_eq!(round_up_to_half_hours(1), 0.5);
        assert_eq!(round_up_to_half_hours(30), 0.5);
        assert_eq!(round_up_to_half_hours(31), 1.0);
        assert_eq!(round_up_to_half_hours(120), 2.0);
    }

    #[test]
    fn whole_hours_render_without_a_decimal() {
        assert_eq!(format_hours(2.0), "2");
        assert_eq!(format_hours(2.5), "2.5");
        assert_eq!(format_hours(0.5), "0.5");
    }

    #[test]
    fn work_window_clamps_to_one_day() {
        let window = WorkWindow::new(9 * 60, 30 * 60);
        assert_eq!(window.end_min(), 24 * 60);
    }
}
