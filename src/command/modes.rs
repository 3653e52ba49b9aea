//! Clock, time and rhythm commands.

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::params::{check_range, flag};
use crate::error::{PixelError, Result};
use crate::protocol::SendPlan;

const CLOCK_MODE: [u8; 4] = [0x0B, 0x00, 0x06, 0x01];
const RHYTHM_MODE: [u8; 4] = [0x10, 0x00, 0x01, 0x02];
const RHYTHM_MODE_2: [u8; 4] = [0x06, 0x00, 0x00, 0x02];
const SET_TIME: [u8; 4] = [0x08, 0x00, 0x01, 0x80];

/// Number of level bars in rhythm mode.
pub const RHYTHM_LEVELS: usize = 11;

/// Clock face configuration.
///
/// `year` is two digits (0-99, meaning 2000-2099). Date fields left out are
/// taken from today's local date, and the day of the week always follows
/// from the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// Default: 1
    pub style: u8,
    /// Default: true
    pub format_24: bool,
    /// Default: true
    pub show_date: bool,
    pub year: Option<u8>,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            style: 1,
            format_24: true,
            show_date: true,
            year: None,
            month: None,
            day: None,
        }
    }
}

/// Show the clock face, filling missing date fields from the local clock.
/// The device does not acknowledge this command.
pub fn set_clock_mode(clock: &ClockSettings) -> Result<SendPlan> {
    set_clock_mode_on(clock, Local::now().date_naive())
}

/// [`set_clock_mode`] with `today` standing in for the local date.
pub fn set_clock_mode_on(clock: &ClockSettings, today: NaiveDate) -> Result<SendPlan> {
    let style = check_range("clock style", clock.style, 0..=8)?;
    let year = clock.year.unwrap_or(today.year().rem_euclid(100) as u8);
    let month = clock.month.unwrap_or(today.month() as u8);
    let day = clock.day.unwrap_or(today.day() as u8);
    let year = check_range("year", year, 0..=99)?;
    let month = check_range("month", month, 1..=12)?;
    let day = check_range("day", day, 1..=31)?;

    let date = NaiveDate::from_ymd_opt(2000 + i32::from(year), u32::from(month), u32::from(day))
        .ok_or_else(|| {
            PixelError::invalid("date", format!("{year:02}-{month:02}-{day:02}"), "a calendar date")
        })?;
    let day_of_week = date.weekday().number_from_monday() as u8;

    let mut data = CLOCK_MODE.to_vec();
    data.extend_from_slice(&[
        style,
        flag(clock.format_24),
        flag(clock.show_date),
        year,
        month,
        day,
        day_of_week,
    ]);
    Ok(SendPlan::single_window("set_clock_mode", data, false))
}

/// Show the music visualiser with fixed bar levels.
pub fn set_rhythm_mode(style: u8, levels: &[u8; RHYTHM_LEVELS]) -> Result<SendPlan> {
    let style = check_range("rhythm style", style, 0..=4)?;
    for &level in levels {
        check_range("rhythm level", level, 0..=15)?;
    }

    let mut data = RHYTHM_MODE.to_vec();
    data.push(style);
    data.extend_from_slice(levels);
    Ok(SendPlan::single_window("set_rhythm_mode", data, true))
}

/// Show the animated visualiser; `t` selects the animation frame time.
pub fn set_rhythm_mode_2(style: u8, t: u8) -> Result<SendPlan> {
    let style = check_range("rhythm style", style, 0..=1)?;
    let t = check_range("rhythm time", t, 0..=7)?;

    let mut data = RHYTHM_MODE_2.to_vec();
    data.extend_from_slice(&[t, style]);
    Ok(SendPlan::single_window("set_rhythm_mode_2", data, true))
}

/// Time of day for [`set_time`]; fields left out come from the local clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
}

impl TimeSettings {
    /// An explicit time of day.
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
        }
    }
}

/// Set the device clock, filling missing fields from the local clock.
pub fn set_time(time: &TimeSettings) -> Result<SendPlan> {
    set_time_at(time, Local::now().time())
}

/// [`set_time`] with `now` standing in for the local time of day.
pub fn set_time_at(time: &TimeSettings, now: NaiveTime) -> Result<SendPlan> {
    let hour = time.hour.unwrap_or(now.hour() as u8);
    let minute = time.minute.unwrap_or(now.minute() as u8);
    let second = time.second.unwrap_or(now.second() as u8);
    let hour = check_range("hour", hour, 0..=23)?;
    let minute = check_range("minute", minute, 0..=59)?;
    let second = check_range("second", second, 0..=59)?;

    let mut data = SET_TIME.to_vec();
    data.extend_from_slice(&[hour, minute, second, 0x00]);
    Ok(SendPlan::single_window("set_time", data, true))
}
