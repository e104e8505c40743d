//! Helpers shared by the command handlers.

use std::str::FromStr;

use chrono::NaiveDate;
use mortar_core::models::OrderLine;
use serde::Serialize;

use crate::error::CliError;

/// Parse an entity id argument, mapping failures to a CLI error
pub fn parse_id<T>(raw: &str) -> Result<T, CliError>
where
    T: FromStr,
{
    raw.trim()
        .parse()
        .map_err(|_| CliError::InvalidId(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(raw.to_string()))
}

/// Parse a supplier quote line in `NAME:QTY:UNIT_PRICE` form.
///
/// The name may itself contain colons; quantity and price are taken from
/// the last two segments.
pub fn parse_quote_line(raw: &str) -> Result<OrderLine, CliError> {
    let invalid = || CliError::InvalidQuoteLine(raw.to_string());

    let (rest, price) = raw.rsplit_once(':').ok_or_else(invalid)?;
    let (name, quantity) = rest.rsplit_once(':').ok_or_else(invalid)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(OrderLine {
        name: name.to_string(),
        quantity: quantity.trim().parse().map_err(|_| invalid())?,
        unit_price: price.trim().parse().map_err(|_| invalid())?,
    })
}

/// Render records as pretty JSON on stdout
pub fn print_json<T: Serialize>(records: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

/// Format a minor-unit amount as a decimal string
pub fn format_amount(minor: i64) -> String {
    format!("{}.{:02}", minor / 100, (minor % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_quote_line_accepts_plain_lines() {
        let line = parse_quote_line("Paracetamol 500mg:10:1200").unwrap();
        assert_eq!(line.name, "Paracetamol 500mg");
        assert_eq!(line.quantity, 10);
        assert_eq!(line.unit_price, 1200);
    }

    #[test]
    fn parse_quote_line_keeps_colons_in_names() {
        let line = parse_quote_line("Vitamin D3 1000IU (caps: 60):2:4500").unwrap();
        assert_eq!(line.name, "Vitamin D3 1000IU (caps: 60)");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn parse_quote_line_rejects_malformed_input() {
        assert!(parse_quote_line("no separators").is_err());
        assert!(parse_quote_line("name:only-one").is_err());
        assert!(parse_quote_line(":1:100").is_err());
        assert!(parse_quote_line("name:x:100").is_err());
    }

    #[test]
    fn parse_date_validates_format() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn format_amount_renders_minor_units() {
        assert_eq!(format_amount(123_456), "1234.56");
        assert_eq!(format_amount(5), "0.05");
    }
}
