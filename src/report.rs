//! Spreadsheet export of the ledger.
//!
//! A [`ReportSnapshot`] is read from the store in one transaction, then rendered by
//! [`render_workbook`] into an xlsx document with three sheets: `Resumen`, `Gastos`
//! and `Ingresos`.

use chrono::{Datelike, NaiveDate};
use compute::{aggregate, balance, ComputeError, ExpenseSummary, Totals, UNCATEGORIZED_NAME};
use model::entities::{expense::ExpenseWithCategory, income};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use sea_orm::{DbErr, TransactionTrait};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::ledger::{expenses::list_expenses, income::list_income, LedgerError};

pub const SUMMARY_SHEET: &str = "Resumen";
pub const EXPENSES_SHEET: &str = "Gastos";
pub const INCOME_SHEET: &str = "Ingresos";

/// Download name announced in `Content-Disposition`.
pub const REPORT_FILE_NAME: &str = "gastos.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MONEY_FORMAT: &str = "#,##0.00";
const DATE_FORMAT: &str = "dd/mm/yyyy";

const SUMMARY_HEADERS: [(&str, f64); 2] = [("Concepto", 30.0), ("Monto", 20.0)];
const EXPENSE_HEADERS: [(&str, f64); 6] = [
    ("ID", 8.0),
    ("Fecha", 15.0),
    ("Descripción", 40.0),
    ("Categoría", 25.0),
    ("Monto", 15.0),
    ("Notas", 50.0),
];
const INCOME_HEADERS: [(&str, f64); 5] = [
    ("ID", 8.0),
    ("Fecha", 15.0),
    ("Descripción", 40.0),
    ("Monto", 15.0),
    ("Notas", 50.0),
];

/// Errors raised while building the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Compute error: {0}")]
    Compute(#[from] ComputeError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Workbook error: {0}")]
    Workbook(#[from] XlsxError),

    /// An amount has no `f64` representation
    #[error("Amount {0} cannot be converted to a number")]
    Amount(Decimal),
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// Everything the report shows, read at one point in time.
#[derive(Clone, Debug)]
pub struct ReportSnapshot {
    pub expenses: Vec<ExpenseWithCategory>,
    pub summary: ExpenseSummary,
    pub income: Vec<income::Model>,
    pub totals: Totals,
}

/// One `Concepto | Monto` line of the summary sheet. Section titles and spacer rows
/// have no amount.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub concept: String,
    pub amount: Option<Decimal>,
}

impl SummaryRow {
    fn title(concept: &str) -> Self {
        Self {
            concept: concept.to_string(),
            amount: None,
        }
    }

    fn blank() -> Self {
        Self::title("")
    }

    fn amount(concept: impl Into<String>, amount: Decimal) -> Self {
        Self {
            concept: concept.into(),
            amount: Some(amount),
        }
    }
}

impl ReportSnapshot {
    /// Reads expenses, income and totals inside a single transaction.
    #[instrument(skip(db))]
    pub async fn capture<C: TransactionTrait>(db: &C) -> Result<Self> {
        let txn = db.begin().await?;
        let expenses = list_expenses(&txn).await?;
        let income = list_income(&txn).await?;
        let totals = balance::totals(&txn).await?;
        txn.commit().await?;

        let summary = aggregate(&expenses);
        debug!(
            "Captured report snapshot: {} expenses, {} income entries",
            expenses.len(),
            income.len()
        );
        Ok(Self {
            expenses,
            summary,
            income,
            totals,
        })
    }

    /// Rows of the summary sheet, below the header.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let mut rows = vec![
            SummaryRow::title("INGRESOS"),
            SummaryRow::amount("Total Ingresos", self.totals.total_income),
            SummaryRow::blank(),
            SummaryRow::title("GASTOS"),
        ];
        rows.extend(
            self.summary
                .categories
                .iter()
                .map(|bucket| SummaryRow::amount(format!("- {}", bucket.name), bucket.total)),
        );
        rows.push(SummaryRow::amount("Total Gastos", self.totals.total_expenses));
        rows.push(SummaryRow::blank());
        rows.push(SummaryRow::amount("BALANCE FINAL", self.totals.balance()));
        rows
    }
}

/// Renders the snapshot as an xlsx document.
#[instrument(skip(snapshot))]
pub fn render_workbook(snapshot: &ReportSnapshot) -> Result<Vec<u8>> {
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format(MONEY_FORMAT);
    let date = Format::new().set_num_format(DATE_FORMAT);

    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name(SUMMARY_SHEET)?;
    write_headers(sheet, &SUMMARY_HEADERS, &header)?;
    for (row, line) in (1..).zip(snapshot.summary_rows()) {
        sheet.write_string(row, 0, &line.concept)?;
        if let Some(amount) = line.amount {
            sheet.write_number_with_format(row, 1, to_f64(amount)?, &money)?;
        }
    }

    let sheet = workbook.add_worksheet().set_name(EXPENSES_SHEET)?;
    write_headers(sheet, &EXPENSE_HEADERS, &header)?;
    for (row, expense) in (1..).zip(&snapshot.expenses) {
        sheet.write_number(row, 0, expense.id)?;
        write_date(sheet, row, 1, &expense.date, &date)?;
        sheet.write_string(row, 2, &expense.description)?;
        sheet.write_string(
            row,
            3,
            expense.category_name.as_deref().unwrap_or(UNCATEGORIZED_NAME),
        )?;
        sheet.write_number_with_format(row, 4, to_f64(expense.amount)?, &money)?;
    }

    let sheet = workbook.add_worksheet().set_name(INCOME_SHEET)?;
    write_headers(sheet, &INCOME_HEADERS, &header)?;
    for (row, entry) in (1..).zip(&snapshot.income) {
        sheet.write_number(row, 0, entry.id)?;
        write_date(sheet, row, 1, &entry.date, &date)?;
        sheet.write_string(row, 2, &entry.description)?;
        sheet.write_number_with_format(row, 3, to_f64(entry.amount)?, &money)?;
    }

    let buffer = workbook.save_to_buffer()?;
    info!("Rendered workbook of {} bytes", buffer.len());
    Ok(buffer)
}

fn write_headers(
    sheet: &mut Worksheet,
    headers: &[(&str, f64)],
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, (title, width)) in (0..).zip(headers) {
        sheet.write_string_with_format(0, col, *title, format)?;
        sheet.set_column_width(col, *width)?;
    }
    Ok(())
}

/// Writes `YYYY-MM-DD` values as real dates, anything else as plain text.
fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    match excel_date(value) {
        Some(date) => sheet.write_datetime_with_format(row, col, &date, format)?,
        None => sheet.write_string(row, col, value)?,
    };
    Ok(())
}

fn excel_date(value: &str) -> Option<ExcelDateTime> {
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let year = u16::try_from(parsed.year()).ok()?;
    ExcelDateTime::from_ymd(year, parsed.month() as u8, parsed.day() as u8).ok()
}

fn to_f64(amount: Decimal) -> Result<f64> {
    amount.to_f64().ok_or_else(|| {
        warn!("Amount {} cannot be written as a number", amount);
        ReportError::Amount(amount)
    })
}
