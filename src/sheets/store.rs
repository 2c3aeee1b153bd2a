//! Sheet store adapter boundary
//!
//! The external spreadsheet service is treated as an opaque row store. None
//! of these operations are transactional; every invariant (uniqueness,
//! table-range consistency) is enforced by callers via read-then-write
//! sequences that are not safe under concurrent access.

use async_trait::async_trait;

use crate::utils::errors::StoreResult;

/// Row-level operations against a named sheet, optionally scoped to one of
/// the logical tables multiplexed inside it.
///
/// `row_index` is absolute within the sheet when `table` is `None`, and
/// relative to the table's name row otherwise.
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn get_rows(&self, sheet: &str, table: Option<&str>) -> StoreResult<Vec<Vec<String>>>;

    async fn append_rows(
        &self,
        sheet: &str,
        table: Option<&str>,
        rows: Vec<Vec<String>>,
    ) -> StoreResult<()>;

    async fn update_row(
        &self,
        sheet: &str,
        table: Option<&str>,
        row_index: usize,
        new_row: Vec<String>,
    ) -> StoreResult<()>;

    async fn delete_row(&self, sheet: &str, row_index: usize) -> StoreResult<()>;

    async fn create_sheet(&self, sheet: &str) -> StoreResult<()>;

    async fn create_table(&self, sheet: &str, table: &str, headers: &[String]) -> StoreResult<()>;

    async fn delete_table(&self, sheet: &str, table: &str) -> StoreResult<()>;
}
