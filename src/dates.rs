// SPDX-License-Identifier: MIT

// Rewrites FASTA headers of the form >date_virus... into the decimal-date form used by BEAST
// (>2011.318_virus...). The date is the first underscore-delimited field, written as y, y/m,
// y/m/d or the dashed equivalents; missing parts default to mid-month / mid-year.

use std::io::{BufRead, Write};

use itertools::Itertools;
use regex::Regex;

use crate::errors::SeqPrepError;

const DAYS_COMMON: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_LEAP: [u32; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Copy `input` to `out`, rewriting every header line's leading date field to a decimal date.
/// Non-header lines pass through unchanged.
pub fn rewrite_decimal_dates<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
) -> Result<(), SeqPrepError> {
    let separators = Regex::new(r"[/-]").expect("date separator pattern");
    for line in input.lines() {
        let line = line?;
        match line.strip_prefix('>') {
            Some(header) => writeln!(out, ">{}", decimal_date_header(header, &separators)?)?,
            None => writeln!(out, "{}", line)?,
        }
    }
    Ok(())
}

fn decimal_date_header(header: &str, separators: &Regex) -> Result<String, SeqPrepError> {
    let fields: Vec<&str> = header.split('_').collect();
    // A trailing '|' on the date field is tolerated (and dropped, since the whole field is
    // rewritten).
    let date_field = fields[0].trim_end_matches('|');

    let parts: Vec<u32> = separators
        .split(date_field)
        .map(|p| p.parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| {
            SeqPrepError::Format(format!("cannot parse date from header field {:?}", date_field))
        })?;
    let (yy, mm, dd) = match parts.as_slice() {
        [y, m, d] => (*y, *m, *d),
        [y, m] => (*y, *m, 15),
        [y] => (*y, 6, 15),
        _ => {
            return Err(SeqPrepError::Format(format!(
                "expected 1 to 3 date parts in {:?}",
                date_field
            )))
        }
    };
    if !(1..=12).contains(&mm) || !(1..=31).contains(&dd) {
        return Err(SeqPrepError::Format(format!(
            "month/day out of range in {:?}",
            date_field
        )));
    }

    let fraction = format!("{:.3}", day_of_year_fraction(yy, mm, dd));
    let rewritten = format!("{}{}", yy, fraction.trim_start_matches('0'));

    Ok(std::iter::once(rewritten.as_str())
        .chain(fields[1..].iter().copied())
        .join("_"))
}

// Same arithmetic as the PHP/Python decimalDate tools this replaces: a year is a leap year IFF
// divisible by 4, and Dec 31 is clamped to .999 so it never rounds up to the next year.
fn day_of_year_fraction(yy: u32, mm: u32, dd: u32) -> f64 {
    if mm == 12 && dd == 31 {
        return 0.999;
    }
    let leap = yy % 4 == 0;
    let table = if leap { &DAYS_LEAP } else { &DAYS_COMMON };
    let mut day_of_year = dd;
    for m in 1..mm {
        day_of_year += table[m as usize];
    }
    let year_len = if leap { 366.0 } else { 365.0 };
    f64::from(day_of_year) / year_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rewrite(input: &str) -> String {
        let mut out = Vec::new();
        rewrite_decimal_dates(input.as_bytes(), &mut out).expect("rewrite failed");
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_day_of_year_fraction() {
        // 2011-04-26 is day 116 of a common year.
        assert_relative_eq!(
            day_of_year_fraction(2011, 4, 26),
            116.0 / 365.0,
            epsilon = 1e-9
        );
        // Leap-year February uses the 29-day table.
        assert_relative_eq!(
            day_of_year_fraction(2000, 3, 1),
            61.0 / 366.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_full_date_header() {
        assert_eq!(rewrite(">2011/4/26_flu|A\n"), ">2011.318_flu|A\n");
    }

    #[test]
    fn test_dashed_date() {
        assert_eq!(rewrite(">2011-4-26_flu\n"), ">2011.318_flu\n");
    }

    #[test]
    fn test_year_month_defaults_to_mid_month() {
        // 2000-02-15 -> day 46 of 366 -> .126
        assert_eq!(rewrite(">2000-2_x\n"), ">2000.126_x\n");
    }

    #[test]
    fn test_year_only_defaults_to_mid_year() {
        // 1999-06-15 -> day 166 of 365 -> .455
        assert_eq!(rewrite(">1999_x\n"), ">1999.455_x\n");
    }

    #[test]
    fn test_dec_31_clamped() {
        assert_eq!(rewrite(">1999/12/31_x\n"), ">1999.999_x\n");
    }

    #[test]
    fn test_trailing_pipe_stripped_from_date_field() {
        assert_eq!(rewrite(">2011/4/26|_flu\n"), ">2011.318_flu\n");
    }

    #[test]
    fn test_sequence_lines_untouched() {
        assert_eq!(
            rewrite(">2011/4/26_flu\nACGTACGT\nACGT\n"),
            ">2011.318_flu\nACGTACGT\nACGT\n"
        );
    }

    #[test]
    fn test_unparseable_date_is_format_error() {
        let mut out = Vec::new();
        let res = rewrite_decimal_dates(">April2011_flu\n".as_bytes(), &mut out);
        assert!(matches!(res, Err(SeqPrepError::Format(_))));
    }
}
