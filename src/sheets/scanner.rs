//! Table scanner
//!
//! A company's sheet multiplexes many small event tables inside one flat row
//! set. Each table is a name row (only the first cell filled), a header row,
//! and data rows running until the next name row or the end of the sheet.
//! Regions are derived, never cached; every read rescans.

/// Rows carrying this prefix in their first cell belong to an older schema
/// variant and never open a table.
pub const RESERVED_ROW_PREFIX: &str = "Registration";

/// One logical table recovered from a sheet
///
/// `data_start` points at the synthetic metadata row when present;
/// registration rows follow it. `data_end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegion {
    pub name: String,
    pub name_row: usize,
    pub header_row: Option<usize>,
    pub data_start: usize,
    pub data_end: usize,
}

impl TableRegion {
    /// Number of registrations in this table
    ///
    /// The metadata row is not a registration; a table with no data rows at
    /// all still counts zero, never negative.
    pub fn registration_count(&self) -> usize {
        (self.data_end - self.data_start).saturating_sub(1)
    }

    /// Exclusive end of the whole region, name row included
    pub fn end_row(&self) -> usize {
        self.data_end.max(self.name_row + 1)
    }
}

fn has_content(row: &[String]) -> bool {
    row.iter().any(|cell| !cell.is_empty())
}

/// A row opens a table when its first cell is the only non-empty one and it
/// does not carry the reserved prefix. Header, metadata and registration rows
/// all fill more than one cell, so they can never open a table.
fn is_table_start(row: &[String]) -> bool {
    let first = match row.first() {
        Some(cell) => cell.as_str(),
        None => return false,
    };

    !first.is_empty()
        && !first.starts_with(RESERVED_ROW_PREFIX)
        && row.iter().skip(1).all(|cell| cell.is_empty())
}

/// Walk a sheet's rows in order and recover its table regions
pub fn scan_tables(rows: &[Vec<String>]) -> Vec<TableRegion> {
    let starts: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| is_table_start(row))
        .map(|(index, _)| index)
        .collect();

    let mut tables = Vec::with_capacity(starts.len());

    for (position, &start) in starts.iter().enumerate() {
        let bound = starts.get(position + 1).copied().unwrap_or(rows.len());

        // The region ends at the last row with any content before the next
        // name row; trailing blank rows are not part of the table.
        let mut end = start + 1;
        for index in start + 1..bound {
            if has_content(&rows[index]) {
                end = index + 1;
            }
        }

        let header_row = if start + 1 < end { Some(start + 1) } else { None };
        let data_start = (start + 2).min(end);

        tables.push(TableRegion {
            name: rows[start][0].clone(),
            name_row: start,
            header_row,
            data_start,
            data_end: end,
        });
    }

    tables
}

/// Locate a table by name within a scanned sheet
pub fn find_table<'a>(tables: &'a [TableRegion], name: &str) -> Option<&'a TableRegion> {
    tables.iter().find(|table| table.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sheet_with_two_events() -> Vec<Vec<String>> {
        vec![
            row(&["Hackathon"]),
            row(&["Name", "Phone", "Email", "Gender", "College", "Status", "National ID", "Registration Date", "Image", "Enabled"]),
            row(&["", "", "", "", "", "", "", "", "https://img/h.jpg", "true"]),
            row(&["Sara", "01012345678", "sara@example.com", "female", "Cairo", "student", "29001010100015", "2024-03-01T10:00:00Z"]),
            row(&["Omar", "01112345678", "omar@example.com", "male", "Ain Shams", "graduate", "29505050500012", "2024-03-01T11:00:00Z"]),
            row(&["Job Fair"]),
            row(&["Name", "Phone", "Email", "Gender", "College", "Status", "National ID", "Registration Date", "Image", "Enabled"]),
            row(&["", "", "", "", "", "", "", "", "", "false"]),
        ]
    }

    #[test]
    fn test_recovers_one_region_per_name_row() {
        let sheet = sheet_with_two_events();
        let tables = scan_tables(&sheet);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "Hackathon");
        assert_eq!(tables[1].name, "Job Fair");
    }

    #[test]
    fn test_region_boundaries() {
        let sheet = sheet_with_two_events();
        let tables = scan_tables(&sheet);

        assert_eq!(tables[0].name_row, 0);
        assert_eq!(tables[0].header_row, Some(1));
        assert_eq!(tables[0].data_start, 2);
        assert_eq!(tables[0].data_end, 5);
        assert_eq!(tables[0].registration_count(), 2);

        // Last table runs to the end of the sheet
        assert_eq!(tables[1].name_row, 5);
        assert_eq!(tables[1].header_row, Some(6));
        assert_eq!(tables[1].data_start, 7);
        assert_eq!(tables[1].data_end, 8);
        assert_eq!(tables[1].registration_count(), 0);
    }

    #[test]
    fn test_fresh_event_counts_zero_registrations() {
        let sheet = vec![
            row(&["Meetup"]),
            row(&["Name", "Phone", "Email", "Gender", "College", "Status", "National ID", "Registration Date", "Image", "Enabled"]),
            row(&["", "", "", "", "", "", "", "", "", "true"]),
        ];

        let tables = scan_tables(&sheet);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].registration_count(), 0);
    }

    #[test]
    fn test_name_row_at_end_of_sheet_has_no_header() {
        let sheet = vec![row(&["Orphan Event"])];

        let tables = scan_tables(&sheet);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].header_row, None);
        assert_eq!(tables[0].data_start, tables[0].data_end);
        assert_eq!(tables[0].registration_count(), 0);
        assert_eq!(tables[0].end_row(), 1);
    }

    #[test]
    fn test_trailing_blank_rows_excluded() {
        let mut sheet = sheet_with_two_events();
        sheet.truncate(5);
        sheet.push(row(&["", "", ""]));
        sheet.push(row(&[""]));

        let tables = scan_tables(&sheet);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].data_end, 5);
    }

    #[test]
    fn test_reserved_prefix_does_not_open_a_table() {
        let sheet = vec![
            row(&["Hackathon"]),
            row(&["Registration_Hackathon"]),
            row(&["Name", "Phone"]),
        ];

        let tables = scan_tables(&sheet);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "Hackathon");
        assert_eq!(tables[0].data_end, 3);
    }

    #[test]
    fn test_registration_rows_never_open_tables() {
        // A registration row has its first cell filled but other cells too
        let sheet = sheet_with_two_events();
        let tables = scan_tables(&sheet);

        assert!(tables.iter().all(|t| t.name != "Sara"));
        assert!(tables.iter().all(|t| t.name != "Omar"));
    }

    #[test]
    fn test_find_table() {
        let sheet = sheet_with_two_events();
        let tables = scan_tables(&sheet);

        assert!(find_table(&tables, "Job Fair").is_some());
        assert!(find_table(&tables, "Missing").is_none());
    }

    #[test]
    fn test_empty_sheet_yields_no_tables() {
        assert!(scan_tables(&[]).is_empty());
    }
}
