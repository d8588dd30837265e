// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row and column headings.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A row or column heading: a display name plus an optional count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisHeading {
    /// Display name.
    pub name: String,
    /// Optional count shown next to the name (e.g. how many items the row aggregates).
    pub count: Option<u64>,
}

impl AxisHeading {
    /// A heading without a count.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: None,
        }
    }

    /// A heading with a count.
    pub fn with_count(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count: Some(count),
        }
    }
}

impl From<&str> for AxisHeading {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AxisHeading {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Turns a heading into its label text.
///
/// Any `Fn(&str, Option<u64>) -> String` closure is a formatter.
pub trait HeadingFormat {
    /// Formats `name` and `count` for display.
    fn format(&self, name: &str, count: Option<u64>) -> String;
}

impl<F> HeadingFormat for F
where
    F: Fn(&str, Option<u64>) -> String,
{
    fn format(&self, name: &str, count: Option<u64>) -> String {
        self(name, count)
    }
}

/// `"{name} ({count})"` whenever a count is present (zero included), else `"{name}"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHeadingFormat;

impl HeadingFormat for DefaultHeadingFormat {
    fn format(&self, name: &str, count: Option<u64>) -> String {
        match count {
            Some(count) => format!("{name} ({count})"),
            None => String::from(name),
        }
    }
}

/// Formats every heading in order.
pub fn format_all(format: &dyn HeadingFormat, headings: &[AxisHeading]) -> Vec<String> {
    headings
        .iter()
        .map(|h| format.format(&h.name, h.count))
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn count_suffix_is_shown_whenever_present() {
        let f = DefaultHeadingFormat;
        assert_eq!(f.format("Row 1", None), "Row 1");
        assert_eq!(f.format("Row 2", Some(2)), "Row 2 (2)");
        assert_eq!(f.format("Row 3", Some(0)), "Row 3 (0)");
    }

    #[test]
    fn closures_are_formatters() {
        let upper = |name: &str, _count: Option<u64>| name.to_uppercase();
        let labels = format_all(&upper, &[AxisHeading::new("a"), AxisHeading::with_count("b", 1)]);
        assert_eq!(labels, ["A", "B"]);
    }
}
