use chrono::{DateTime, Local};

/// Archive folders encode their acquisition date in the first 8 characters
/// of the name (`20240115_trip`). Shorter names carry no key and can never
/// match a candidate.
#[must_use]
pub fn name_key(name: &str) -> Option<String> {
    name.get(..8).map(str::to_string)
}

#[must_use]
pub fn timestamp_key(created: &DateTime<Local>) -> String {
    created.format("%Y%m%d").to_string()
}

/// Key for a card-side folder. The embedded name prefix wins when the name
/// is long enough to hold one; otherwise the birth time stands in, in the
/// same 8-character form so both sides compare like for like.
#[must_use]
pub fn card_key(name: &str, created: &DateTime<Local>) -> String {
    name_key(name).unwrap_or_else(|| timestamp_key(created))
}
