use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::application::ports::{WorkbookWriter, WorkbookWriterError};
use crate::domain::{ModuleQuestions, QuestionKind};

use super::sheet_names;

const HEADERS: [&str; 4] = ["Type", "Question", "Options", "Answer"];
const COLUMN_WIDTHS: [f64; 4] = [14.0, 70.0, 45.0, 30.0];
#[derive(Default)]
pub struct XlsxWorkbookWriter;

impl XlsxWorkbookWriter {
    pub fn new() -> Self {
        Self
    }

    fn build(modules: &[ModuleQuestions]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let header = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0xD9E1F2))
            .set_border(FormatBorder::Thin);
        let cell = Format::new().set_text_wrap().set_align(FormatAlign::Top);

        for (set, name) in modules.iter().zip(sheet_names(modules)) {
            let sheet = workbook.add_worksheet();
            sheet.set_name(&name)?;

            for (col, (title, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
                sheet.write_string_with_format(0, col as u16, *title, &header)?;
                sheet.set_column_width(col as u16, width)?;
            }
            sheet.set_freeze_panes(1, 0)?;

            let mut row: u32 = 1;
            for kind in QuestionKind::ALL {
                for question in set.of_kind(kind) {
                    sheet.write_string_with_format(row, 0, kind.label(), &cell)?;
                    sheet.write_string_with_format(row, 1, &question.text, &cell)?;
                    sheet.write_string_with_format(row, 2, question.options.join("\n"), &cell)?;
                    sheet.write_string_with_format(
                        row,
                        3,
                        question.answer.as_deref().unwrap_or_default(),
                        &cell,
                    )?;
                    row += 1;
                }
            }
        }

        workbook.save_to_buffer()
    }
}

impl WorkbookWriter for XlsxWorkbookWriter {
    fn write(&self, modules: &[ModuleQuestions]) -> Result<Vec<u8>, WorkbookWriterError> {
        if modules.is_empty() {
            return Err(WorkbookWriterError::Empty);
        }

        let bytes =
            Self::build(modules).map_err(|e| WorkbookWriterError::Spreadsheet(e.to_string()))?;
        tracing::debug!(sheets = modules.len(), bytes = bytes.len(), "Workbook written");
        Ok(bytes)
    }
}
