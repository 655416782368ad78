use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt::Write as _;

const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

/// An event that can be exported to a donor's calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl CalendarEvent {
    /// The event promoted on the home page.
    pub fn featured() -> Option<Self> {
        Some(Self {
            title: "Youth STEM Workshop - EvoAFuture Foundation".to_string(),
            description: "Interactive workshop introducing young minds to robotics, coding, and scientific discovery. Perfect for ages 8-16.".to_string(),
            location: "Campbell Community Center, 1 W. Campbell Ave, #C-31 Campbell, CA 95008"
                .to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 15)?,
            start: NaiveTime::from_hms_opt(14, 0, 0)?,
            end: NaiveTime::from_hms_opt(17, 0, 0)?,
        })
    }

    fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    pub fn google_calendar_url(&self) -> String {
        format!(
            "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
            encode_component(&self.title),
            self.starts_at().format(LOCAL_FORMAT),
            self.ends_at().format(LOCAL_FORMAT),
            encode_component(&self.description),
            encode_component(&self.location),
        )
    }

    /// Renders an iCalendar document. `uid_seed` makes the UID unique per
    /// download.
    pub fn to_ics(&self, uid_seed: i64, stamp: DateTime<Utc>) -> String {
        [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//EvoAFuture Foundation//Event//EN".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{uid_seed}@evoafuture.org"),
            format!("DTSTAMP:{}Z", stamp.format(LOCAL_FORMAT)),
            format!("DTSTART:{}", self.starts_at().format(LOCAL_FORMAT)),
            format!("DTEND:{}", self.ends_at().format(LOCAL_FORMAT)),
            format!("SUMMARY:{}", self.title),
            format!("DESCRIPTION:{}", self.description),
            format!("LOCATION:{}", self.location),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ]
        .join("\r\n")
    }

    pub fn ics_file_name(&self) -> &'static str {
        "youth-stem-workshop.ics"
    }
}

/// Percent-encodes everything except the characters `encodeURIComponent`
/// leaves alone.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("#C-31, CA"), "%23C-31%2C%20CA");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_google_url_dates() {
        let event = CalendarEvent::featured().unwrap();
        let url = event.google_calendar_url();
        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(url.contains("&dates=20251115T140000/20251115T170000&"));
        assert!(url.contains("text=Youth%20STEM%20Workshop%20-%20EvoAFuture%20Foundation"));
    }

    #[test]
    fn test_ics_document() {
        let event = CalendarEvent::featured().unwrap();
        let stamp = Utc.with_ymd_and_hms(2025, 10, 1, 8, 30, 0).unwrap();
        let ics = event.to_ics(1700000000000, stamp);
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(lines.contains(&"UID:1700000000000@evoafuture.org"));
        assert!(lines.contains(&"DTSTAMP:20251001T083000Z"));
        assert!(lines.contains(&"DTSTART:20251115T140000"));
        assert!(lines.contains(&"DTEND:20251115T170000"));
        assert!(!ics.ends_with("\r\n"));
    }
}
