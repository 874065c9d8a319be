//! Validation utilities for the Candango ERP system
//!
//! Includes Brazil-specific validations (CNPJ/CPF check digits, CEP, UF)
//! used by registration forms and report preconditions.

use rust_decimal::Decimal;

// ============================================================================
// Production Cost / Refinement Validations
// ============================================================================

/// Cost lines need a human-readable description
pub fn validate_cost_description(description: &str) -> Result<(), &'static str> {
    if description.trim().is_empty() {
        return Err("Description is required");
    }
    Ok(())
}

/// Cost values must be strictly positive
pub fn validate_cost_value(value: Decimal) -> Result<(), &'static str> {
    if value <= Decimal::ZERO {
        return Err("Cost value must be greater than zero");
    }
    Ok(())
}

pub fn validate_refinement_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Refinement name is required");
    }
    Ok(())
}

/// First cost type that appears more than once, if any
pub fn first_duplicate_cost_type<'a>(cost_types: &'a [&'a str]) -> Option<&'a str> {
    for (i, cost_type) in cost_types.iter().enumerate() {
        if cost_types[..i].contains(cost_type) {
            return Some(cost_type);
        }
    }
    None
}

/// A refinement carries at most one cost of each type
pub fn validate_cost_types_unique(cost_types: &[&str]) -> Result<(), &'static str> {
    if first_duplicate_cost_type(cost_types).is_some() {
        return Err("Refinement already has a cost of this type");
    }
    Ok(())
}

/// Refinement codes are `REF-{product code}-{6 digits}`; the suffix is
/// taken from the creation timestamp in milliseconds.
pub fn generate_refinement_code(product_code: &str, timestamp_millis: i64) -> String {
    let suffix = timestamp_millis.rem_euclid(1_000_000);
    format!("REF-{}-{:06}", product_code, suffix)
}

// ============================================================================
// Sale Validations
// ============================================================================

pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

pub fn validate_unit_price(unit_price: Decimal) -> Result<(), &'static str> {
    if unit_price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

pub fn validate_non_negative(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Tax percentage is a rate between 0 and 100
pub fn validate_percentage(percentage: Decimal) -> Result<(), &'static str> {
    if percentage < Decimal::ZERO || percentage > Decimal::from(100) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

pub fn validate_sale_number(sale_number: &str) -> Result<(), &'static str> {
    if sale_number.trim().is_empty() {
        return Err("Sale number is required");
    }
    Ok(())
}

/// Next sequential sale number: last numeric number + 1, zero-padded to
/// five digits; anything non-numeric restarts the sequence at 1. This
/// mirrors the backend rule for offline display; the creation flow asks
/// the backend for the authoritative value.
pub fn next_sale_number(last: Option<&str>) -> String {
    let next = last
        .filter(|number| !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()))
        .and_then(|number| number.parse::<u64>().ok())
        .map(|number| number + 1)
        .unwrap_or(1);
    format!("{:05}", next)
}

// ============================================================================
// Expense Validations
// ============================================================================

pub fn validate_expense_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Expense name is required");
    }
    Ok(())
}

pub fn validate_expense_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Expense amount must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

// ============================================================================
// Brazil-Specific Validations
// ============================================================================

fn only_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn all_same_digit(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => true,
    }
}

/// Validate CNPJ (Cadastro Nacional da Pessoa Jurídica)
/// 14-digit number with two check digits, punctuation ignored
pub fn validate_cnpj(cnpj: &str) -> Result<(), &'static str> {
    let digits = only_digits(cnpj);
    if digits.len() != 14 {
        return Err("CNPJ must be 14 digits");
    }
    if all_same_digit(&digits) {
        return Err("Invalid CNPJ");
    }
    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    let check = |weights: &[u32], upto: usize| -> u32 {
        let sum: u32 = values[..upto]
            .iter()
            .zip(weights)
            .map(|(digit, weight)| digit * weight)
            .sum();
        let rest = sum % 11;
        if rest < 2 {
            0
        } else {
            11 - rest
        }
    };

    let first = check(&[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2], 12);
    if first != values[12] {
        return Err("Invalid CNPJ check digit");
    }
    let second = check(&[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2], 13);
    if second != values[13] {
        return Err("Invalid CNPJ check digit");
    }
    Ok(())
}

/// Validate CPF (Cadastro de Pessoas Físicas)
/// 11-digit number with two check digits, punctuation ignored
pub fn validate_cpf(cpf: &str) -> Result<(), &'static str> {
    let digits = only_digits(cpf);
    if digits.len() != 11 {
        return Err("CPF must be 11 digits");
    }
    if all_same_digit(&digits) {
        return Err("Invalid CPF");
    }
    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    let check = |upto: usize| -> u32 {
        let sum: u32 = values[..upto]
            .iter()
            .enumerate()
            .map(|(i, digit)| digit * (upto as u32 + 1 - i as u32))
            .sum();
        let rest = (sum * 10) % 11;
        if rest == 10 {
            0
        } else {
            rest
        }
    };

    if check(9) != values[9] {
        return Err("Invalid CPF check digit");
    }
    if check(10) != values[10] {
        return Err("Invalid CPF check digit");
    }
    Ok(())
}

/// Accept either document type by length: 11 digits CPF, 14 digits CNPJ
pub fn validate_document(document: &str) -> Result<(), &'static str> {
    match only_digits(document).len() {
        11 => validate_cpf(document),
        14 => validate_cnpj(document),
        _ => Err("Document must be a CPF (11 digits) or CNPJ (14 digits)"),
    }
}

/// Validate CEP format: 12345-678 or 12345678
pub fn validate_cep(cep: &str) -> Result<(), &'static str> {
    let digits = only_digits(cep);
    if digits.len() != 8 {
        return Err("CEP must be 8 digits");
    }
    // Only digits and a single optional dash at position 5
    let stripped = cep.replace('-', "");
    if stripped.len() != 8 || (cep.contains('-') && cep.find('-') != Some(5)) {
        return Err("CEP must be in the form 12345-678");
    }
    Ok(())
}

/// Brazilian state codes (UF)
pub const UF_CODES: &[&str] = &[
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub fn validate_uf(uf: &str) -> Result<(), &'static str> {
    if UF_CODES.contains(&uf.to_uppercase().as_str()) {
        Ok(())
    } else {
        Err("Unknown UF code")
    }
}
