//! Printable report documents
//!
//! Reports are assembled here as plain data (letterhead, table, totals,
//! signature) and handed to the presentation layer, which owns the actual
//! PDF rendering. Building fails fast when nothing is selected or the
//! company profile is missing, so those cases never reach the renderer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Company;
use crate::types::format_date_br;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no rows selected for the report")]
    EmptySelection,
    #[error("company profile is not configured")]
    MissingCompany,
}

impl ReportError {
    /// Message shown to the user, as the screens word it
    pub fn message_pt(&self) -> &'static str {
        match self {
            ReportError::EmptySelection => "Selecione pelo menos um item para gerar o PDF",
            ReportError::MissingCompany => {
                "Dados da empresa não encontrados. Cadastre os dados da empresa primeiro."
            }
        }
    }
}

/// Page orientation; the sales report prints landscape, the rest portrait
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Width hint for the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    #[default]
    Auto,
    /// Take the remaining space
    Fill,
    Fixed(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    pub width: ColumnWidth,
    pub align: ColumnAlign,
}

impl ColumnSpec {
    pub fn new(header: &str, width: ColumnWidth, align: ColumnAlign) -> Self {
        Self {
            header: header.to_string(),
            width,
            align,
        }
    }
}

/// Company block printed at the top of every document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letterhead {
    pub company_name: String,
    pub cnpj: String,
    pub address_line: String,
    pub city_line: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub responsavel: Option<String>,
}

impl Letterhead {
    pub fn from_company(company: &Company) -> Self {
        Self {
            company_name: company.display_name().to_string(),
            cnpj: company.cnpj.clone(),
            address_line: company.address_line(),
            city_line: company.city_line(),
            phone: company.phone.clone(),
            email: company.email.clone(),
            responsavel: company.responsavel.clone(),
        }
    }
}

/// Optional recipient block printed under the letterhead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientBlock {
    pub name: String,
    pub document: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// One line of the totals table under the main table. Renderers print
/// lines whose label contains "Total" in bold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalLine {
    pub label: String,
    pub value: String,
}

/// Signature area at the foot of the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub company_name: String,
    pub contact: Option<String>,
}

/// A complete document ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub letterhead: Letterhead,
    pub client: Option<ClientBlock>,
    /// Uppercased by convention; shown with the optional number
    pub title: String,
    pub document_number: Option<String>,
    pub report_date: NaiveDate,
    pub orientation: Orientation,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
    pub totals: Vec<TotalLine>,
    pub observations: Option<String>,
    pub signature: SignatureBlock,
}

/// Everything a document needs besides the company profile
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub title: String,
    pub document_number: Option<String>,
    pub report_date: NaiveDate,
    pub orientation: Orientation,
    pub columns: Vec<ColumnSpec>,
    /// Only the rows the user selected
    pub rows: Vec<Vec<String>>,
    pub totals: Vec<TotalLine>,
    pub observations: Option<String>,
    pub client: Option<ClientBlock>,
}

/// Assemble a document, failing fast on the two user-facing
/// preconditions: an empty selection and a missing company profile.
pub fn build_document(
    company: Option<&Company>,
    request: ReportRequest,
) -> Result<ReportDocument, ReportError> {
    if request.rows.is_empty() {
        return Err(ReportError::EmptySelection);
    }
    let company = company.ok_or(ReportError::MissingCompany)?;

    Ok(ReportDocument {
        letterhead: Letterhead::from_company(company),
        client: request.client,
        title: request.title.to_uppercase(),
        document_number: request.document_number,
        report_date: request.report_date,
        orientation: request.orientation,
        columns: request.columns,
        rows: request.rows,
        totals: request.totals,
        observations: request.observations,
        signature: SignatureBlock {
            company_name: company.display_name().to_string(),
            contact: company.responsavel.clone(),
        },
    })
}

/// Suggested download name: spaces in the title become underscores and
/// the dd/mm/yyyy date keeps its digits with dashes.
pub fn download_filename(title: &str, report_date: NaiveDate) -> String {
    let name = title.split_whitespace().collect::<Vec<_>>().join("_");
    let date = format_date_br(report_date).replace('/', "-");
    format!("{}_{}.pdf", name, date)
}

/// Brazilian currency notation: R$ 1.234,56
pub fn format_currency_brl(value: Decimal) -> String {
    let negative = value.is_sign_negative();
    let rounded = value.abs().round_dp(2);
    let text = format!("{:.2}", rounded);
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }

    if negative {
        format!("-R$ {},{}", grouped, cents)
    } else {
        format!("R$ {},{}", grouped, cents)
    }
}
