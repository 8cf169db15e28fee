//! Brazilian taxpayer documents.
//!
//! CPF (individuals) and CNPJ (companies) carry two trailing check digits
//! computed with mod-11 weighted sums over the preceding digits.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static CPF_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("cpf pattern is valid")
});

static CNPJ_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}$").expect("cnpj pattern is valid")
});

const CNPJ_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Why a document number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("value does not match the {0} format")]
    Format(&'static str),
    #[error("{0} with all digits equal is not valid")]
    RepeatedDigits(&'static str),
    #[error("{0} check digits do not match")]
    CheckDigits(&'static str),
}

/// Validates a CPF formatted as `000.000.000-00`.
pub fn check_cpf(value: &str) -> Result<(), DocumentError> {
    if !CPF_FORMAT.is_match(value) {
        return Err(DocumentError::Format("CPF"));
    }
    let digits = digits_of(value);
    if digits.len() != 11 {
        return Err(DocumentError::Format("CPF"));
    }
    if all_equal(&digits) {
        return Err(DocumentError::RepeatedDigits("CPF"));
    }

    let first = cpf_digit(&digits[..9]);
    let second = cpf_digit(&digits[..10]);
    if digits[9] != first || digits[10] != second {
        return Err(DocumentError::CheckDigits("CPF"));
    }
    Ok(())
}

/// Validates a CNPJ formatted as `00.000.000/0000-00`.
pub fn check_cnpj(value: &str) -> Result<(), DocumentError> {
    if !CNPJ_FORMAT.is_match(value) {
        return Err(DocumentError::Format("CNPJ"));
    }
    let digits = digits_of(value);
    if digits.len() != 14 {
        return Err(DocumentError::Format("CNPJ"));
    }
    if all_equal(&digits) {
        return Err(DocumentError::RepeatedDigits("CNPJ"));
    }

    let first = cnpj_digit(&digits[..12], &CNPJ_WEIGHTS[1..]);
    let second = cnpj_digit(&digits[..13], &CNPJ_WEIGHTS);
    if digits[12] != first || digits[13] != second {
        return Err(DocumentError::CheckDigits("CNPJ"));
    }
    Ok(())
}

fn digits_of(value: &str) -> Vec<u32> {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .filter_map(|c| c.to_digit(10))
        .collect()
}

fn all_equal(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// Weights run from `len + 1` down to 2.
fn cpf_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    (sum * 10) % 11 % 10
}

fn cnpj_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}
