//! Company profile model
//!
//! The backend keeps a single active company record; its fields feed the
//! report letterhead and signature blocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub razao_social: String,
    pub nome_fantasia: Option<String>,
    pub cnpj: String,
    pub inscricao_estadual: Option<String>,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Contact person printed on documents
    pub responsavel: Option<String>,
    pub logo_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Trade name when present, legal name otherwise
    pub fn display_name(&self) -> &str {
        match &self.nome_fantasia {
            Some(name) if !name.is_empty() => name,
            _ => &self.razao_social,
        }
    }

    /// "street, number, neighborhood" with empty parts skipped
    pub fn address_line(&self) -> String {
        [&self.street, &self.number, &self.neighborhood]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// "city/UF" with empty parts skipped
    pub fn city_line(&self) -> String {
        [&self.city, &self.state]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Input for creating or updating the company profile. The logo itself
/// travels as a multipart upload, not as part of this payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInput {
    pub razao_social: String,
    pub nome_fantasia: Option<String>,
    pub cnpj: String,
    pub inscricao_estadual: Option<String>,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub responsavel: Option<String>,
    pub active: bool,
}
