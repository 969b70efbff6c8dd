mod sheet;
mod writer;

pub use sheet::{build_sheet, Cell, RowKind, Sheet, SheetRow, COLUMNS};
pub use writer::write_workbook;
