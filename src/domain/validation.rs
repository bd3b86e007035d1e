//! Field-level input rules shared by every form.
//!
//! Validators take the raw text typed by the user and return either the typed value or
//! the message shown next to the field.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

pub const CAMPO_OBRIGATORIO: &str = "Campo obrigatório";
pub const DEVE_SER_NUMERO: &str = "Deve ser um número";
pub const DEVE_SER_INTEIRO: &str = "Deve ser um número inteiro";
pub const NAO_NEGATIVO: &str = "Não pode ser negativo";
pub const VALOR_MUITO_GRANDE: &str = "Valor muito grande";
pub const DATA_OBRIGATORIA: &str = "Data é obrigatória";
pub const DATA_INVALIDA: &str = "Data inválida";
pub const HORARIO_INVALIDO: &str = "Horário inválido";

/// Outcome of validating one field.
pub type FieldResult<T> = Result<T, &'static str>;

/// Trims the input and rejects it when nothing is left.
///
/// # Errors
///
/// Returns `message` for blank input.
pub fn required_text(value: &str, message: &'static str) -> FieldResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(message)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trims the input; blank is allowed.
#[must_use]
pub fn optional_text(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a non-negative integer quantity, such as an attendance count.
///
/// # Errors
///
/// Returns the message for empty, non-numeric, fractional, negative or oversized input.
pub fn count(value: &str) -> FieldResult<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CAMPO_OBRIGATORIO);
    }

    if let Ok(whole) = trimmed.parse::<i64>() {
        if whole < 0 {
            return Err(NAO_NEGATIVO);
        }
        return u32::try_from(whole).map_err(|_| VALOR_MUITO_GRANDE);
    }

    match parse_decimal(trimmed) {
        Some(number) if number.is_sign_negative() => Err(NAO_NEGATIVO),
        Some(_) => Err(DEVE_SER_INTEIRO),
        None => Err(DEVE_SER_NUMERO),
    }
}

/// Parses a non-negative monetary value. Accepts `.` or `,` as the decimal separator.
///
/// # Errors
///
/// Returns the message for empty, non-numeric or negative input.
pub fn amount(value: &str) -> FieldResult<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CAMPO_OBRIGATORIO);
    }

    let number = parse_decimal(trimmed).ok_or(DEVE_SER_NUMERO)?;
    if number.is_sign_negative() && !number.is_zero() {
        return Err(NAO_NEGATIVO);
    }
    Ok(number)
}

/// Parses a calendar date written as `dd/mm/aaaa` or `aaaa-mm-dd`.
///
/// # Errors
///
/// Returns the message for empty or unparseable input.
pub fn date(value: &str) -> FieldResult<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DATA_OBRIGATORIA);
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| DATA_INVALIDA)
}

/// Parses a wall-clock time written as `HH:MM`.
///
/// # Errors
///
/// Returns `required` for empty input and [`HORARIO_INVALIDO`] for anything else
/// that is not a valid 24-hour time.
pub fn time_of_day(value: &str, required: &'static str) -> FieldResult<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(required);
    }

    let (hours, minutes) = trimmed.split_once(':').ok_or(HORARIO_INVALIDO)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(HORARIO_INVALIDO);
    }
    let hours: u32 = hours.parse().map_err(|_| HORARIO_INVALIDO)?;
    let minutes: u32 = minutes.parse().map_err(|_| HORARIO_INVALIDO)?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or(HORARIO_INVALIDO)
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(&value.replace(',', ".")).ok()
}

/// Validation messages keyed by field name, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, &'static str)>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            entry.1 = message;
        } else {
            self.entries.push((field, message));
        }
    }

    /// Unwraps a field result, recording the error under `field` on failure.
    pub fn check<T>(&mut self, field: &'static str, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.insert(field, message);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// First field with an error, used to move the cursor there.
    #[must_use]
    pub fn first_field(&self) -> Option<&'static str> {
        self.entries.first().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", Err(CAMPO_OBRIGATORIO) ; "empty")]
    #[test_case("  ", Err(CAMPO_OBRIGATORIO) ; "blank")]
    #[test_case("12", Ok(12) ; "integer")]
    #[test_case(" 0 ", Ok(0) ; "zero_with_spaces")]
    #[test_case("-1", Err(NAO_NEGATIVO) ; "negative")]
    #[test_case("2.5", Err(DEVE_SER_INTEIRO) ; "fractional_dot")]
    #[test_case("2,5", Err(DEVE_SER_INTEIRO) ; "fractional_comma")]
    #[test_case("-2.5", Err(NAO_NEGATIVO) ; "negative_fractional")]
    #[test_case("doze", Err(DEVE_SER_NUMERO) ; "text")]
    #[test_case("99999999999", Err(VALOR_MUITO_GRANDE) ; "overflow")]
    fn test_count(input: &str, expected: FieldResult<u32>) {
        assert_eq!(count(input), expected);
    }

    #[test_case("150.75", Ok(Decimal::new(15075, 2)) ; "dot_separator")]
    #[test_case("150,75", Ok(Decimal::new(15075, 2)) ; "comma_separator")]
    #[test_case("0", Ok(Decimal::ZERO) ; "zero")]
    #[test_case("-0.01", Err(NAO_NEGATIVO) ; "negative")]
    #[test_case("", Err(CAMPO_OBRIGATORIO) ; "empty")]
    #[test_case("dez reais", Err(DEVE_SER_NUMERO) ; "text")]
    fn test_amount(input: &str, expected: FieldResult<Decimal>) {
        assert_eq!(amount(input), expected);
    }

    #[test_case("09/03/2024", NaiveDate::from_ymd_opt(2024, 3, 9) ; "brazilian_format")]
    #[test_case("2024-03-09", NaiveDate::from_ymd_opt(2024, 3, 9) ; "iso_format")]
    fn test_date_accepts(input: &str, expected: Option<NaiveDate>) {
        assert_eq!(date(input).ok(), expected);
    }

    #[test]
    fn test_date_rejects() {
        assert_eq!(date(""), Err(DATA_OBRIGATORIA));
        assert_eq!(date("31/02/2024"), Err(DATA_INVALIDA));
        assert_eq!(date("ontem"), Err(DATA_INVALIDA));
    }

    #[test_case("19:30", true ; "evening")]
    #[test_case("00:00", true ; "midnight")]
    #[test_case("24:00", false ; "hour_out_of_range")]
    #[test_case("7:30", false ; "single_digit_hour")]
    #[test_case("19h30", false ; "no_colon")]
    fn test_time_of_day(input: &str, valid: bool) {
        let result = time_of_day(input, "Horário é obrigatório");
        assert_eq!(result.is_ok(), valid);
        if !valid {
            assert_eq!(result, Err(HORARIO_INVALIDO));
        }
    }

    #[test]
    fn test_time_of_day_uses_required_message_when_empty() {
        assert_eq!(
            time_of_day(" ", "Horário é obrigatório"),
            Err("Horário é obrigatório")
        );
    }

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("  Hope 3 ", "Nome é obrigatório"), Ok("Hope 3".to_string()));
        assert_eq!(required_text("   ", "Nome é obrigatório"), Err("Nome é obrigatório"));
    }

    #[test]
    fn test_field_errors_keep_order_and_replace() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.check("nome", required_text("", "Nome é obrigatório")), None);
        assert_eq!(errors.check("qtd_membros", count("x")), None);
        assert_eq!(errors.check("local", required_text("Sala 2", "Local é obrigatório")), Some("Sala 2".to_string()));
        errors.insert("nome", "outro");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first_field(), Some("nome"));
        assert_eq!(errors.get("nome"), Some("outro"));
        assert_eq!(errors.get("local"), None);
    }
}
