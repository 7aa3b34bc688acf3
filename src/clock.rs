//! Clock source and time/date formatting

use core::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Length of a formatted time, `HH:MM`
pub const TIME_LEN: usize = 5;
/// Length of a formatted date, `WWW DD MMM`
pub const DATE_LEN: usize = 10;

/// Wall clock and the user's clock style preference, both read on demand.
pub trait ClockSource {
    /// Current local time
    fn now(&self) -> NaiveDateTime;

    /// Whether the 24 hour clock style is selected
    fn is_24h_style(&self) -> bool;
}

/// Write `HH:MM` into `buf`.
///
/// In 12 hour style the hour runs 01 to 12 and no AM/PM indicator is added.
pub fn format_time<'b>(
    time: &NaiveDateTime,
    clock_24h: bool,
    buf: &'b mut [u8],
) -> Result<&'b str, fmt::Error> {
    let hour = if clock_24h {
        time.hour()
    } else {
        time.hour12().1
    };

    format_no_std::show(buf, format_args!("{:02}:{:02}", hour, time.minute()))
}

/// Write `WWW DD MMM` into `buf`, all letters uppercase.
pub fn format_date<'b>(time: &NaiveDateTime, buf: &'b mut [u8]) -> Result<&'b str, fmt::Error> {
    let len = format_no_std::show(
        buf,
        format_args!(
            "{} {:02} {}",
            weekday_abbrev(time.weekday()),
            time.day(),
            month_abbrev(time.month0()),
        ),
    )?
    .len();

    let text = &mut buf[..len];
    text.iter_mut().for_each(|c| *c = lower_to_upper(*c));

    core::str::from_utf8(text).map_err(|_| fmt::Error)
}

/// Map an ASCII lowercase letter to uppercase, leave everything else alone.
pub const fn lower_to_upper(c: u8) -> u8 {
    if c.is_ascii_lowercase() {
        c & 0xdf
    } else {
        c
    }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn month_abbrev(month0: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    // chrono guarantees 0..12
    MONTHS[month0 as usize % 12]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn time_str(time: NaiveDateTime, clock_24h: bool) -> String {
        let mut buf = [0u8; TIME_LEN];
        format_time(&time, clock_24h, &mut buf).unwrap().to_string()
    }

    fn date_str(time: NaiveDateTime) -> String {
        let mut buf = [0u8; DATE_LEN];
        format_date(&time, &mut buf).unwrap().to_string()
    }

    #[test]
    fn morning_in_both_styles() {
        let time = at(2024, 3, 5, 7, 9);
        assert_eq!(time_str(time, true), "07:09");
        assert_eq!(time_str(time, false), "07:09");
    }

    #[test]
    fn every_minute_of_the_day_24h() {
        for h in 0..24 {
            for m in 0..60 {
                let s = time_str(at(2024, 1, 1, h, m), true);
                assert_eq!(s.len(), TIME_LEN);
                assert_eq!(s, format!("{:02}:{:02}", h, m));
            }
        }
    }

    #[test]
    fn twelve_hour_style_has_no_period() {
        assert_eq!(time_str(at(2024, 1, 1, 0, 5), false), "12:05");
        assert_eq!(time_str(at(2024, 1, 1, 12, 0), false), "12:00");
        assert_eq!(time_str(at(2024, 1, 1, 13, 30), false), "01:30");
        assert_eq!(time_str(at(2024, 1, 1, 23, 59), false), "11:59");

        // Morning and evening look the same
        assert_eq!(
            time_str(at(2024, 1, 1, 7, 9), false),
            time_str(at(2024, 1, 1, 19, 9), false)
        );
    }

    #[test]
    fn date_is_uppercase() {
        assert_eq!(date_str(at(2024, 3, 5, 7, 9)), "TUE 05 MAR");
        assert_eq!(date_str(at(2023, 12, 31, 23, 59)), "SUN 31 DEC");
    }

    #[test]
    fn date_shape_holds_all_year() {
        let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while day.year() == 2024 {
            let s = date_str(day.and_hms_opt(12, 0, 0).unwrap());
            let bytes = s.as_bytes();

            assert_eq!(s.len(), DATE_LEN);
            assert_eq!(bytes[3], b' ');
            assert_eq!(bytes[6], b' ');
            assert!(bytes[4].is_ascii_digit() && bytes[5].is_ascii_digit());
            assert!(!s.chars().any(|c| c.is_ascii_lowercase()));

            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn uppercase_is_idempotent() {
        for c in 0..=u8::MAX {
            assert_eq!(lower_to_upper(lower_to_upper(c)), lower_to_upper(c));
        }
        assert_eq!(lower_to_upper(b'a'), b'A');
        assert_eq!(lower_to_upper(b'Z'), b'Z');
        assert_eq!(lower_to_upper(b'7'), b'7');
        assert_eq!(lower_to_upper(b' '), b' ');
    }

    #[test]
    fn short_buffer_fails() {
        let mut buf = [0u8; 4];
        assert!(format_time(&at(2024, 3, 5, 7, 9), true, &mut buf).is_err());

        let mut buf = [0u8; DATE_LEN - 1];
        assert!(format_date(&at(2024, 3, 5, 7, 9), &mut buf).is_err());
    }
}
