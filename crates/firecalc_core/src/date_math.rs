//! Calendar arithmetic on `jiff::civil::Date` without going through `Span`.
//!
//! The projection indexes every day of a multi-decade window and only needs
//! whole-day steps, so the helpers here work on Rata Die day numbers.

use jiff::civil::Date;

/// Days since 0001-01-01 in the proleptic Gregorian calendar.
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // March = month 1 so the leap day falls at the end of the shifted year
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

#[inline]
fn rd_to_date(rd: i32) -> Date {
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h / 3_652_425;
    let b = a - a / 4;
    let y = (100 * b + h) / 36_525;
    let c = b + z - 365 * y - y / 4;
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    jiff::civil::date(year as i16, month as i8, day as i8)
}

/// Whole days from `d1` to `d2`, negative when `d2` is earlier.
#[inline]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// `d` moved by `n` days. The result must stay inside jiff's date range,
/// which holds for day indexes of an `AnalysisWindow`.
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    rd_to_date(rata_die(d) + n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_days_between_same_date() {
        let d = date(2025, 6, 15);
        assert_eq!(days_between(d, d), 0);
    }

    #[test]
    fn test_days_between_across_year() {
        assert_eq!(days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
        assert_eq!(days_between(date(2025, 1, 1), date(2026, 1, 1)), 365);
        assert_eq!(days_between(date(2025, 1, 2), date(2025, 1, 1)), -1);
    }

    #[test]
    fn test_days_between_matches_jiff() {
        let pairs = [
            (date(2018, 11, 18), date(2100, 11, 18)),
            (date(2024, 2, 29), date(2025, 2, 28)),
            (date(2000, 3, 1), date(2100, 3, 1)),
        ];
        for (d1, d2) in pairs {
            let jiff_days = (d2 - d1).get_days();
            assert_eq!(
                days_between(d1, d2),
                jiff_days,
                "mismatch for {d1} → {d2}"
            );
        }
    }

    #[test]
    fn test_add_days_round_trips_through_leap_day() {
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2024, 2, 29), 1), date(2024, 3, 1));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
        let start = date(2018, 11, 18);
        assert_eq!(add_days(start, days_between(start, date(2100, 11, 18))), date(2100, 11, 18));
    }
}
