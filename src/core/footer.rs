//! Footer helpers.

/// Text for the `#year` element.
pub fn year_stamp(year: i32) -> String {
    year.to_string()
}
