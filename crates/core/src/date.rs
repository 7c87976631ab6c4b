use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Calendar date written to the `Month_`, `Date_` and `Year_` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl PhotoDate {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
            year: date.year(),
        }
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y"];

/// Camera-style timestamp tried after the general formats.
pub const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// General-purpose date parsing: RFC 3339, RFC 2822 and common
/// date/datetime layouts.
fn parse_general(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// Parse a photo date string: general formats first, then [`EXIF_FORMAT`].
pub fn parse_photo_date(s: &str) -> Option<PhotoDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_general(s)
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, EXIF_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
        .map(PhotoDate::from_date)
}

/// Date for a photo row. Falls back to the first day of the album's month
/// when the string is empty or unparseable; the flag reports the fallback.
pub fn resolve_photo_date(s: &str, album_month: i32, album_year: i32) -> (PhotoDate, bool) {
    match parse_photo_date(s) {
        Some(date) => (date, false),
        None => (
            PhotoDate {
                month: album_month.max(0) as u32,
                day: 1,
                year: album_year,
            },
            true,
        ),
    }
}
