//! Error handling for the Candango ERP client
//!
//! Provides consistent error details in Portuguese and English, and a
//! typed decoding of backend error payloads so no caller ever has to
//! poke at raw JSON.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use shared::{Language, RefinementError, ReportError};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_pt: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Conflict: {message}")]
    Conflict {
        resource: String,
        message: String,
        message_pt: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Refinement {code} is already locked by sale {sale_number}")]
    RefinementLocked { code: String, sale_number: String },

    #[error(transparent)]
    Refinement(#[from] RefinementError),

    #[error(transparent)]
    Report(#[from] ReportError),

    // Transport errors
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: ApiErrorBody },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

/// User-facing error detail
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_pt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Shorthand used by the services when a single field fails
    pub fn validation(field: &str, message: &str, message_pt: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_pt: message_pt.to_string(),
        }
    }

    /// Detail the presentation layer can show as-is
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_pt,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_pt: message_pt.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: msg.clone(),
                message_pt: format!("Dados inválidos: {}", msg),
                field: None,
            },
            AppError::DuplicateEntry(field) => ErrorDetail {
                code: "DUPLICATE_ENTRY".to_string(),
                message_en: format!("A record with this {} already exists", field),
                message_pt: format!("Já existe um registro com este {}", field),
                field: Some(field.clone()),
            },
            AppError::Conflict {
                resource,
                message,
                message_pt,
            } => ErrorDetail {
                code: "CONFLICT".to_string(),
                message_en: message.clone(),
                message_pt: message_pt.clone(),
                field: Some(resource.clone()),
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message_en: format!("{} not found", resource),
                message_pt: format!("{} não encontrado", resource),
                field: None,
            },
            AppError::RefinementLocked { code, sale_number } => ErrorDetail {
                code: "REFINEMENT_LOCKED".to_string(),
                message_en: format!(
                    "Refinement {} is already locked by sale {}",
                    code, sale_number
                ),
                message_pt: format!(
                    "O refinamento {} já está vinculado à venda {}",
                    code, sale_number
                ),
                field: Some("cost_refinement_code".to_string()),
            },
            AppError::Refinement(err) => match err {
                RefinementError::DuplicateCostType { code, cost_type } => ErrorDetail {
                    code: "DUPLICATE_COST_TYPE".to_string(),
                    message_en: format!(
                        "Refinement {} already has a cost of type {}",
                        code, cost_type
                    ),
                    message_pt: "Já existe um custo deste tipo neste refinamento".to_string(),
                    field: Some("cost_type".to_string()),
                },
            },
            AppError::Report(err) => {
                let code = match err {
                    ReportError::EmptySelection => "EMPTY_SELECTION",
                    ReportError::MissingCompany => "COMPANY_NOT_FOUND",
                };
                ErrorDetail {
                    code: code.to_string(),
                    message_en: err.to_string(),
                    message_pt: err.message_pt().to_string(),
                    field: None,
                }
            }
            AppError::Api { status, body } => ErrorDetail {
                code: format!("API_ERROR_{}", status),
                message_en: body.primary_message(),
                // The backend already answers in Portuguese
                message_pt: body.primary_message(),
                field: body.field().map(|field| field.to_string()),
            },
            AppError::Request(_) => ErrorDetail {
                code: "REQUEST_FAILED".to_string(),
                message_en: "Could not reach the backend service".to_string(),
                message_pt: "Não foi possível conectar ao servidor".to_string(),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", msg),
                message_pt: format!("Erro de configuração: {}", msg),
                field: None,
            },
            AppError::Internal(msg) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: msg.clone(),
                message_pt: "Erro interno do aplicativo".to_string(),
                field: None,
            },
            AppError::InternalError(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: "An internal error occurred".to_string(),
                message_pt: "Erro interno do aplicativo".to_string(),
                field: None,
            },
        }
    }

    /// Message in the configured language
    pub fn localized(&self, language: &Language) -> String {
        let detail = self.detail();
        match language {
            Language::Portuguese => detail.message_pt,
            Language::English => detail.message_en,
        }
    }
}

/// Decoded backend error payload.
///
/// The backend answers with a field map (`{"value": ["Informe um número
/// válido."]}`), a plain `{"detail": "..."}`, or occasionally something
/// else entirely. Decoding happens once, at the transport boundary;
/// callers switch on these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorBody {
    /// Per-field messages, first failing field wins
    Field { field: String, messages: Vec<String> },
    /// A free-form message (detail or a bare string)
    Message(String),
    /// Anything that did not match the known shapes, kept verbatim
    Unknown(String),
}

/// Fields the screens name explicitly, probed before the rest
const PROBED_FIELDS: &[&str] = &["product", "description"];

impl ApiErrorBody {
    pub fn parse(body: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => return ApiErrorBody::Unknown(body.trim().to_string()),
        };

        match value {
            serde_json::Value::String(text) => ApiErrorBody::Message(text),
            serde_json::Value::Array(items) => match items.first().and_then(|v| v.as_str()) {
                Some(first) => ApiErrorBody::Message(first.to_string()),
                None => ApiErrorBody::Unknown(body.trim().to_string()),
            },
            serde_json::Value::Object(map) => {
                if let Some(detail) = map.get("detail").and_then(|v| v.as_str()) {
                    return ApiErrorBody::Message(detail.to_string());
                }
                for field in PROBED_FIELDS {
                    if let Some(messages) = map.get(*field).and_then(string_list) {
                        return ApiErrorBody::Field {
                            field: field.to_string(),
                            messages,
                        };
                    }
                }
                for (field, entry) in &map {
                    if let Some(messages) = string_list(entry) {
                        return ApiErrorBody::Field {
                            field: field.clone(),
                            messages,
                        };
                    }
                }
                ApiErrorBody::Unknown(body.trim().to_string())
            }
            _ => ApiErrorBody::Unknown(body.trim().to_string()),
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ApiErrorBody::Field { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn primary_message(&self) -> String {
        match self {
            ApiErrorBody::Field { field, messages } => match messages.first() {
                Some(message) => format!("{}: {}", field, message),
                None => field.clone(),
            },
            ApiErrorBody::Message(text) => text.clone(),
            ApiErrorBody::Unknown(raw) => raw.clone(),
        }
    }
}

fn string_list(value: &serde_json::Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let messages: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str().map(|s| s.to_string()))
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages)
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary_message())
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
