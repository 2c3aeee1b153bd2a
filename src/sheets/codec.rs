//! Row codec
//!
//! Converts between typed domain records and raw spreadsheet rows. Decoding
//! never fails: short rows are padded with empty strings and it is the
//! caller's responsibility to validate required fields.
//!
//! The enabled flag carries a legacy dual encoding: older rows spell it in
//! Arabic (`مفعل`/`معطل`) while newer ones use `true`/`false`. Both spellings
//! are accepted on read; only the canonical English spelling is written.

use crate::models::{Company, Registration};

/// Column layout of the reserved company registry sheet
pub const COMPANY_HEADERS: [&str; 6] = ["ID", "Name", "Username", "Password", "Image", "Enabled"];

/// Column layout written for every event table
pub const EVENT_HEADERS: [&str; 10] = [
    "Name",
    "Phone",
    "Email",
    "Gender",
    "College",
    "Status",
    "National ID",
    "Registration Date",
    "Image",
    "Enabled",
];

/// Header spellings recognized for the image column
pub const IMAGE_LABELS: [&str; 3] = ["Image", "image", "الصورة"];

/// Header spellings recognized for the enabled column
pub const ENABLED_LABELS: [&str; 3] = ["الحالة", "Enabled", "enabled"];

const ENABLED_TRUE: &str = "true";
const ENABLED_FALSE: &str = "false";
const ENABLED_TRUE_LEGACY: &str = "مفعل";
const ENABLED_FALSE_LEGACY: &str = "معطل";

/// Read a cell, treating missing trailing cells as empty
pub fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Parse an enabled cell, accepting both legacy spellings
pub fn parse_enabled(value: &str, default: bool) -> bool {
    match value {
        ENABLED_TRUE | ENABLED_TRUE_LEGACY => true,
        ENABLED_FALSE | ENABLED_FALSE_LEGACY => false,
        _ => default,
    }
}

/// Canonical spelling written for an enabled flag
pub fn encode_enabled(enabled: bool) -> &'static str {
    if enabled {
        ENABLED_TRUE
    } else {
        ENABLED_FALSE
    }
}

/// Locate a column by any of its recognized header spellings
pub fn find_column(header: &[String], labels: &[&str]) -> Option<usize> {
    header.iter().position(|cell| labels.contains(&cell.as_str()))
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Encode a company into a registry sheet row
pub fn encode_company(company: &Company) -> Vec<String> {
    vec![
        company.id.clone(),
        company.name.clone(),
        company.username.clone(),
        company.password_hash.clone(),
        company.image.clone().unwrap_or_default(),
        encode_enabled(company.enabled).to_string(),
    ]
}

/// Decode a registry sheet row into a company
///
/// Rows predating the enabled column decode as enabled.
pub fn decode_company(row: &[String]) -> Company {
    Company {
        id: cell(row, 0).to_string(),
        name: cell(row, 1).to_string(),
        username: cell(row, 2).to_string(),
        password_hash: cell(row, 3).to_string(),
        image: optional(cell(row, 4)),
        enabled: parse_enabled(cell(row, 5), true),
    }
}

/// Encode a registration into a table row of the given width
///
/// Trailing columns (image, enabled) stay empty: they belong to the table's
/// metadata row, not to registrations.
pub fn encode_registration(registration: &Registration, width: usize) -> Vec<String> {
    let mut row = vec![String::new(); width.max(8)];
    row[0] = registration.name.clone();
    row[1] = registration.phone.clone();
    row[2] = registration.email.clone();
    row[3] = registration.gender.clone();
    row[4] = registration.college.clone();
    row[5] = registration.status.clone();
    row[6] = registration.national_id.clone();
    row[7] = registration.registered_at.clone();
    row
}

/// Decode a table row into a registration, using the header to locate
/// columns and falling back to the canonical positions for headerless rows
pub fn decode_registration(row: &[String], header: &[String]) -> Registration {
    let col = |label: &str, fallback: usize| find_column(header, &[label]).unwrap_or(fallback);

    Registration {
        id: None,
        name: cell(row, col("Name", 0)).to_string(),
        phone: cell(row, col("Phone", 1)).to_string(),
        email: cell(row, col("Email", 2)).to_string(),
        gender: cell(row, col("Gender", 3)).to_string(),
        college: cell(row, col("College", 4)).to_string(),
        status: cell(row, col("Status", 5)).to_string(),
        national_id: cell(row, col("National ID", 6)).to_string(),
        registered_at: cell(row, col("Registration Date", 7)).to_string(),
    }
}

/// Read an event's image URL and enabled flag out of its header and
/// synthetic metadata row
///
/// A missing header or metadata row yields defaults (no image, enabled)
/// rather than an error.
pub fn table_metadata(
    header: Option<&[String]>,
    metadata: Option<&[String]>,
) -> (Option<String>, bool) {
    let (header, metadata) = match (header, metadata) {
        (Some(header), Some(metadata)) => (header, metadata),
        _ => return (None, true),
    };

    let image = find_column(header, &IMAGE_LABELS).and_then(|index| optional(cell(metadata, index)));
    let enabled = find_column(header, &ENABLED_LABELS)
        .map(|index| parse_enabled(cell(metadata, index), true))
        .unwrap_or(true);

    (image, enabled)
}

/// Build the synthetic metadata row that carries an event's image URL and
/// enabled flag inside its table
pub fn metadata_row(header: &[String], image: Option<&str>, enabled: bool) -> Vec<String> {
    let mut row = vec![String::new(); header.len()];
    if let Some(index) = find_column(header, &IMAGE_LABELS) {
        row[index] = image.unwrap_or_default().to_string();
    }
    if let Some(index) = find_column(header, &ENABLED_LABELS) {
        row[index] = encode_enabled(enabled).to_string();
    }
    row
}
