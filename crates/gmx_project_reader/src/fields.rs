//! Decoding of the scalar encodings found in GMX documents.

use std::{fmt::Display, str::FromStr};

use miette::{miette, Result};

use crate::names::GmxName;

pub(crate) fn parse_number<T>(text: &str, field: GmxName) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|err| miette!("<{field}> holds {trimmed:?} which is not a number: {err}"))
}

/// Editor flags are integers, any negative value means set.
pub(crate) fn parse_flag(text: &str, field: GmxName) -> Result<bool> {
    parse_number::<i64>(text, field).map(|value| value < 0)
}

/// Settings like fields are written either as words or as integer flags depending on the exporter.
pub(crate) fn parse_bool(text: &str, field: GmxName) -> Result<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        parse_flag(trimmed, field)
    }
}

/// Maps an integer through one of the fixed tables of the format, values outside of the table are rejected.
pub(crate) fn parse_table<T>(
    text: &str,
    field: GmxName,
    lookup: impl FnOnce(i32) -> Option<T>,
) -> Result<T> {
    let index: i32 = parse_number(text, field)?;
    lookup(index).ok_or_else(|| miette!("<{field}> value {index} is outside of its table"))
}
