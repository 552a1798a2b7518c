//! Suffix stripping for county, sub-county and ward names.

pub(crate) const COUNTY_SUFFIX: &str = " County";
pub(crate) const SUB_COUNTY_SUFFIX: &str = " Sub County";
pub(crate) const WARD_SUFFIX: &str = " Ward";

pub fn normalize_county(value: &str) -> String {
    strip_suffix_and_trim(value, COUNTY_SUFFIX)
}

pub fn normalize_sub_county(value: &str) -> String {
    strip_suffix_and_trim(value, SUB_COUNTY_SUFFIX)
}

pub fn normalize_ward(value: &str) -> String {
    strip_suffix_and_trim(value, WARD_SUFFIX)
}

/// Removes one trailing occurrence of `suffix`, then trims whitespace.
///
/// Only an exact trailing match is removed. A suffix followed by trailing
/// whitespace is left in place, and a mid-string occurrence is never touched.
pub fn strip_suffix_and_trim(value: &str, suffix: &str) -> String {
    value.strip_suffix(suffix).unwrap_or(value).trim().to_string()
}
