use crate::calendar;
use crate::milestone::Milestone;
use crate::schedule::Schedule;
use crate::task::Task;
use crate::task_validation::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Minimum rendered bar width in pixels; zero-duration tasks still get
/// a visible bar.
pub const MIN_BAR_WIDTH: f64 = 20.0;

/// Window and scale for one layout computation. `today` is an input; the
/// engine never reads the clock.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    pub timeline_start: NaiveDate,
    pub timeline_end: NaiveDate,
    /// Pixels per day.
    pub day_width: f64,
    pub today: Option<NaiveDate>,
}

/// Horizontal pixel span for one task bar. `row` is the task's index in
/// the supplied order, stable under window changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBar {
    pub task_id: String,
    pub row: usize,
    pub x: f64,
    pub width: f64,
    /// Filled portion of the bar, `width * progress / 100`.
    pub progress_width: f64,
    pub is_critical: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneMarker {
    pub milestone_id: String,
    pub x: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub date: NaiveDate,
    pub x: f64,
}

/// A labeled month or ISO-week span clipped to the timeline window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarBand {
    pub label: String,
    pub start_x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub bars: Vec<TaskBar>,
    pub milestones: Vec<MilestoneMarker>,
    pub grid_lines: Vec<GridLine>,
    pub month_bands: Vec<CalendarBand>,
    pub week_bands: Vec<CalendarBand>,
    /// Present only when `today` falls inside the window.
    pub today_x: Option<f64>,
    pub total_width: f64,
}

/// Maps a schedule onto plain pixel geometry. Bars are positioned from
/// the scheduler's pushed `early_start`, never the authored start. A task
/// entirely outside the window is omitted from the visible set but keeps
/// its row index; partially visible bars keep a negative `x` and are
/// clipped by the renderer.
pub fn layout(
    schedule: &Schedule,
    tasks: &[Task],
    milestones: &[Milestone],
    config: &LayoutConfig,
) -> Result<TimelineLayout, ValidationError> {
    if config.timeline_end < config.timeline_start {
        return Err(ValidationError::InvalidWindow {
            start: config.timeline_start,
            end: config.timeline_end,
        });
    }

    let to_x =
        |date: NaiveDate| calendar::days_between(config.timeline_start, date) as f64 * config.day_width;

    let mut bars = Vec::with_capacity(tasks.len());
    for (row, task) in tasks.iter().enumerate() {
        let Some(entry) = schedule.get(&task.id) else {
            continue;
        };
        if entry.early_end < config.timeline_start || entry.early_start > config.timeline_end {
            continue;
        }
        let duration = calendar::days_between(entry.early_start, entry.early_end);
        let width = (duration as f64 * config.day_width).max(MIN_BAR_WIDTH);
        bars.push(TaskBar {
            task_id: task.id.clone(),
            row,
            x: to_x(entry.early_start),
            width,
            progress_width: width * f64::from(task.progress) / 100.0,
            is_critical: entry.is_critical,
            color: task.color.clone(),
        });
    }

    let markers = milestones
        .iter()
        .filter(|m| calendar::is_within(m.date, config.timeline_start, config.timeline_end))
        .map(|m| MilestoneMarker {
            milestone_id: m.id.clone(),
            x: to_x(m.date),
            completed: m.completed,
        })
        .collect();

    let total_days = calendar::days_between(config.timeline_start, config.timeline_end);
    let mut grid_lines = Vec::with_capacity(total_days as usize + 1);
    for offset in 0..=total_days {
        let date = calendar::add_days(config.timeline_start, offset);
        grid_lines.push(GridLine {
            date,
            x: offset as f64 * config.day_width,
        });
    }

    let today_x = config
        .today
        .filter(|&today| calendar::is_within(today, config.timeline_start, config.timeline_end))
        .map(to_x);

    Ok(TimelineLayout {
        bars,
        milestones: markers,
        grid_lines,
        month_bands: month_bands(config, to_x),
        week_bands: week_bands(config, to_x),
        today_x,
        total_width: total_days as f64 * config.day_width,
    })
}

/// Calendar-month splits clipped to the window. A band covering days
/// `a..=b` spans from the left edge of `a` to the right edge of `b`.
fn month_bands(config: &LayoutConfig, to_x: impl Fn(NaiveDate) -> f64) -> Vec<CalendarBand> {
    let mut bands = Vec::new();
    let mut first = first_of_month(config.timeline_start);
    while first <= config.timeline_end {
        let last = last_of_month(first);
        let clipped_start = first.max(config.timeline_start);
        let clipped_end = last.min(config.timeline_end);
        let days = calendar::days_between(clipped_start, clipped_end) + 1;
        bands.push(CalendarBand {
            label: first.format("%b %Y").to_string(),
            start_x: to_x(clipped_start),
            width: days as f64 * config.day_width,
        });
        first = calendar::add_days(last, 1);
    }
    bands
}

/// ISO-week splits (Monday-based) clipped to the window.
fn week_bands(config: &LayoutConfig, to_x: impl Fn(NaiveDate) -> f64) -> Vec<CalendarBand> {
    let mut bands = Vec::new();
    let back = i64::from(config.timeline_start.weekday().num_days_from_monday());
    let mut monday = calendar::add_days(config.timeline_start, -back);
    while monday <= config.timeline_end {
        let sunday = calendar::add_days(monday, 6);
        let clipped_start = monday.max(config.timeline_start);
        let clipped_end = sunday.min(config.timeline_end);
        let days = calendar::days_between(clipped_start, clipped_end) + 1;
        bands.push(CalendarBand {
            label: format!("W{:02}", monday.iso_week().week()),
            start_x: to_x(clipped_start),
            width: days as f64 * config.day_width,
        });
        monday = calendar::add_days(monday, 7);
    }
    bands
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is always valid")
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let next_first = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    calendar::add_days(next_first.expect("first of month is always valid"), -1)
}
