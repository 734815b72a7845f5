// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Percentage labels.
//!
//! Allocation keeps full precision; this is the one place shares get rounded. The display policy
//! is one decimal place, with a trailing `.0` dropped (`57.1%`, `100%`).

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Formats a share for display, rounded to one decimal place.
pub fn format_percent(percent: f64) -> String {
    let mut out = format!("{percent:.1}");
    if out.ends_with(".0") {
        out.truncate(out.len() - 2);
    }
    if out == "-0" {
        out = String::from("0");
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn one_decimal_place() {
        assert_eq!(format_percent(400.0 / 7.0), "57.1%");
        assert_eq!(format_percent(200.0 / 7.0), "28.6%");
        assert_eq!(format_percent(100.0 / 7.0), "14.3%");
    }

    #[test]
    fn whole_numbers_drop_the_decimal() {
        assert_eq!(format_percent(100.0), "100%");
        assert_eq!(format_percent(50.0), "50%");
        assert_eq!(format_percent(0.04), "0%");
    }
}
