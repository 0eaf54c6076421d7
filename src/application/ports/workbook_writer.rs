use crate::domain::ModuleQuestions;
pub trait WorkbookWriter: Send + Sync {
    fn write(&self, modules: &[ModuleQuestions]) -> Result<Vec<u8>, WorkbookWriterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WorkbookWriterError {
    #[error("no modules to write")]
    Empty,
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
    #[error("workbook task failed: {0}")]
    Task(String),
}
