mod sheet_names;
mod xlsx_workbook_writer;

pub use sheet_names::sheet_names;
pub use xlsx_workbook_writer::XlsxWorkbookWriter;
