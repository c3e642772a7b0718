//! The admission window: the weekdays and hour during which the open-session
//! listing is available.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Weekday/hour gate, checked at hour granularity in the caller's local time.
///
/// The default admits Thursdays and Fridays from 10:00 to 10:59.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionWindow {
  #[serde(default = "default_weekdays")]
  pub weekdays: Vec<Weekday>,
  #[serde(default = "default_hour")]
  pub hour:     u32,
}

fn default_weekdays() -> Vec<Weekday> { vec![Weekday::Thu, Weekday::Fri] }

fn default_hour() -> u32 { 10 }

impl Default for AdmissionWindow {
  fn default() -> Self {
    Self { weekdays: default_weekdays(), hour: default_hour() }
  }
}

impl AdmissionWindow {
  pub fn new(weekdays: Vec<Weekday>, hour: u32) -> Result<Self> {
    let window = Self { weekdays, hour };
    window.validate()?;
    Ok(window)
  }

  /// Reject windows that could never admit anything.
  pub fn validate(&self) -> Result<()> {
    if self.weekdays.is_empty() {
      return Err(Error::InvalidAdmissionWindow("no weekdays configured".into()));
    }
    if self.hour > 23 {
      return Err(Error::InvalidAdmissionWindow(format!(
        "hour {} is out of range 0-23",
        self.hour
      )));
    }
    Ok(())
  }

  /// Whether `at`, read in its own offset, falls inside the window.
  pub fn admits<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
    self.weekdays.contains(&at.weekday()) && at.hour() == self.hour
  }
}

/// Renders e.g. `Thursdays and Fridays at 10 AM`.
impl fmt::Display for AdmissionWindow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let days: Vec<&str> = self.weekdays.iter().map(|d| plural_name(*d)).collect();
    match days.as_slice() {
      [] => f.write_str("no days")?,
      [only] => f.write_str(only)?,
      [init @ .., last] => write!(f, "{} and {last}", init.join(", "))?,
    }
    let (hour, meridiem) = match self.hour {
      0 => (12, "AM"),
      h @ 1..=11 => (h, "AM"),
      12 => (12, "PM"),
      h => (h - 12, "PM"),
    };
    write!(f, " at {hour} {meridiem}")
  }
}

fn plural_name(day: Weekday) -> &'static str {
  match day {
    Weekday::Mon => "Mondays",
    Weekday::Tue => "Tuesdays",
    Weekday::Wed => "Wednesdays",
    Weekday::Thu => "Thursdays",
    Weekday::Fri => "Fridays",
    Weekday::Sat => "Saturdays",
    Weekday::Sun => "Sundays",
  }
}

#[cfg(test)]
mod tests {
  use chrono::FixedOffset;

  use super::*;

  // 2026-10-19 is a Monday.
  fn at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
      .unwrap()
      .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
      .unwrap()
  }

  #[test]
  fn admits_thursday_and_friday_at_ten() {
    let window = AdmissionWindow::default();
    assert!(window.admits(&at(22, 10, 0)));
    assert!(window.admits(&at(22, 10, 30)));
    assert!(window.admits(&at(23, 10, 59)));
  }

  #[test]
  fn rejects_other_hours_and_days() {
    let window = AdmissionWindow::default();
    assert!(!window.admits(&at(19, 9, 0)));
    assert!(!window.admits(&at(19, 10, 30)));
    assert!(!window.admits(&at(22, 9, 59)));
    assert!(!window.admits(&at(22, 11, 0)));
    assert!(!window.admits(&at(24, 10, 15)));
  }

  #[test]
  fn uses_the_offset_of_the_timestamp() {
    let window = AdmissionWindow::default();
    // 08:30 UTC on a Thursday is 10:30 at UTC+2.
    let local = FixedOffset::east_opt(2 * 3600)
      .unwrap()
      .with_ymd_and_hms(2026, 10, 22, 10, 30, 0)
      .unwrap();
    assert!(window.admits(&local));
    assert!(!window.admits(&local.with_timezone(&chrono::Utc)));
  }

  #[test]
  fn display_matches_wire_message() {
    assert_eq!(
      AdmissionWindow::default().to_string(),
      "Thursdays and Fridays at 10 AM"
    );
    let window = AdmissionWindow::new(
      vec![Weekday::Mon, Weekday::Wed, Weekday::Sat],
      15,
    )
    .unwrap();
    assert_eq!(window.to_string(), "Mondays, Wednesdays and Saturdays at 3 PM");
  }

  #[test]
  fn validate_rejects_empty_and_out_of_range() {
    assert!(matches!(
      AdmissionWindow::new(vec![], 10),
      Err(Error::InvalidAdmissionWindow(_))
    ));
    assert!(matches!(
      AdmissionWindow::new(vec![Weekday::Thu], 24),
      Err(Error::InvalidAdmissionWindow(_))
    ));
  }

  #[test]
  fn deserialises_short_weekday_names() {
    let window: AdmissionWindow =
      serde_json::from_str(r#"{"weekdays":["Tue","fri"],"hour":9}"#).unwrap();
    assert_eq!(window.weekdays, vec![Weekday::Tue, Weekday::Fri]);
    assert_eq!(window.hour, 9);
  }
}
