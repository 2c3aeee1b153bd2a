//! In-memory sheet store
//!
//! A process-local implementation of the store boundary, used by the test
//! suite and for local development without spreadsheet credentials. Table
//! scoped operations resolve regions with the same scanner the services use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::sheets::scanner::{find_table, scan_tables, TableRegion};
use crate::sheets::store::SheetStore;
use crate::utils::errors::{StoreError, StoreResult};

/// Sheet store keeping all rows in process memory
#[derive(Debug, Clone, Default)]
pub struct MemorySheetStore {
    sheets: Arc<RwLock<HashMap<String, Vec<Vec<String>>>>>,
}

impl MemorySheetStore {
    /// Create a new, empty MemorySheetStore instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a sheet's rows wholesale, creating the sheet if needed
    pub fn seed(&self, sheet: &str, rows: Vec<Vec<String>>) {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        sheets.insert(sheet.to_string(), rows);
    }

    /// Copy of a sheet's current rows, if the sheet exists
    pub fn snapshot(&self, sheet: &str) -> Option<Vec<Vec<String>>> {
        let sheets = self.sheets.read().unwrap_or_else(|e| e.into_inner());
        sheets.get(sheet).cloned()
    }

    fn locate(rows: &[Vec<String>], sheet: &str, table: &str) -> StoreResult<TableRegion> {
        let tables = scan_tables(rows);
        find_table(&tables, table)
            .cloned()
            .ok_or_else(|| StoreError::SheetMissing(format!("{}/{}", sheet, table)))
    }

    fn set_row(rows: &mut Vec<Vec<String>>, index: usize, new_row: Vec<String>) {
        // Writing past the current end extends the sheet, the way a cell
        // range write does on the real provider
        while rows.len() <= index {
            rows.push(Vec::new());
        }
        rows[index] = new_row;
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn get_rows(&self, sheet: &str, table: Option<&str>) -> StoreResult<Vec<Vec<String>>> {
        let sheets = self.sheets.read().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get(sheet)
            .ok_or_else(|| StoreError::SheetMissing(sheet.to_string()))?;

        match table {
            None => Ok(rows.clone()),
            Some(table) => {
                let region = Self::locate(rows, sheet, table)?;
                Ok(rows[region.name_row..region.end_row()].to_vec())
            }
        }
    }

    async fn append_rows(
        &self,
        sheet: &str,
        table: Option<&str>,
        new_rows: Vec<Vec<String>>,
    ) -> StoreResult<()> {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetMissing(sheet.to_string()))?;

        match table {
            None => rows.extend(new_rows),
            Some(table) => {
                let region = Self::locate(rows, sheet, table)?;
                let mut insert_at = region.end_row();
                for row in new_rows {
                    rows.insert(insert_at, row);
                    insert_at += 1;
                }
            }
        }

        Ok(())
    }

    async fn update_row(
        &self,
        sheet: &str,
        table: Option<&str>,
        row_index: usize,
        new_row: Vec<String>,
    ) -> StoreResult<()> {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetMissing(sheet.to_string()))?;

        let absolute = match table {
            None => row_index,
            Some(table) => Self::locate(rows, sheet, table)?.name_row + row_index,
        };

        Self::set_row(rows, absolute, new_row);
        Ok(())
    }

    async fn delete_row(&self, sheet: &str, row_index: usize) -> StoreResult<()> {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetMissing(sheet.to_string()))?;

        if row_index >= rows.len() {
            return Err(StoreError::RequestFailed(format!(
                "row {} out of range for sheet {}",
                row_index, sheet
            )));
        }

        rows.remove(row_index);
        Ok(())
    }

    async fn create_sheet(&self, sheet: &str) -> StoreResult<()> {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        sheets.entry(sheet.to_string()).or_default();
        Ok(())
    }

    async fn create_table(&self, sheet: &str, table: &str, headers: &[String]) -> StoreResult<()> {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetMissing(sheet.to_string()))?;

        rows.push(vec![table.to_string()]);
        rows.push(headers.to_vec());
        Ok(())
    }

    async fn delete_table(&self, sheet: &str, table: &str) -> StoreResult<()> {
        let mut sheets = self.sheets.write().unwrap_or_else(|e| e.into_inner());
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetMissing(sheet.to_string()))?;

        let region = Self::locate(rows, sheet, table)?;
        rows.drain(region.name_row..region.end_row());
        Ok(())
    }
}
