//! Product CSV schema
//!
//! ```text
//! name,category,price,quantityInStock
//! Widget,Tools,12.50,4
//! "Cable, USB-C",Electronics,3,120
//! ```
//!
//! Header names match case-insensitively; fields are trimmed; blank lines
//! are skipped. Ids are assigned by the server on import and never appear.

use rust_decimal::Decimal;
use stockdesk_shared::ProductDraft;

use crate::error::{ClientError, ClientResult, ValidationError};

pub const HEADER: [&str; 4] = ["name", "category", "price", "quantityInStock"];
pub const EXPORT_FILE_NAME: &str = "products.csv";

pub fn encode_products(products: &[ProductDraft]) -> ClientResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).map_err(write_error)?;

    for p in products {
        let price = p.price.to_string();
        let quantity = p.quantity_in_stock.to_string();
        writer
            .write_record([
                p.name.as_str(),
                p.category.as_str(),
                price.as_str(),
                quantity.as_str(),
            ])
            .map_err(write_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| ClientError::serialization(e.to_string()))
}

fn write_error(e: csv::Error) -> ClientError {
    ClientError::serialization(e.to_string())
}

/// Parses and validates a product file, stopping at the first bad line.
pub fn decode_products(bytes: &[u8]) -> Result<Vec<ProductDraft>, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut header_seen = false;
    let mut drafts = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(1);
            invalid(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(1);

        if record.iter().all(str::is_empty) {
            continue;
        }

        if !header_seen {
            check_header(&record, line)?;
            header_seen = true;
            continue;
        }

        drafts.push(parse_row(&record, line)?);
    }

    if !header_seen {
        return Err(invalid(1, "file is empty"));
    }
    Ok(drafts)
}

fn invalid(line: u64, reason: impl Into<String>) -> ValidationError {
    ValidationError::Csv {
        line,
        reason: reason.into(),
    }
}

fn check_header(record: &csv::StringRecord, line: u64) -> Result<(), ValidationError> {
    let matches = record.len() == HEADER.len()
        && record
            .iter()
            .zip(HEADER)
            .all(|(got, want)| got.eq_ignore_ascii_case(want));

    if matches {
        Ok(())
    } else {
        Err(invalid(
            line,
            format!("expected header \"{}\"", HEADER.join(",")),
        ))
    }
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<ProductDraft, ValidationError> {
    if record.len() != HEADER.len() {
        return Err(invalid(
            line,
            format!("expected {} fields, found {}", HEADER.len(), record.len()),
        ));
    }

    let field = |i: usize| record.get(i).unwrap_or_default();
    let required = |i: usize| {
        let value = field(i);
        if value.is_empty() {
            Err(invalid(line, format!("{} is required", HEADER[i])))
        } else {
            Ok(value.to_string())
        }
    };

    let name = required(0)?;
    let category = required(1)?;

    let price = field(2)
        .parse::<Decimal>()
        .ok()
        .filter(|p| !p.is_sign_negative())
        .ok_or_else(|| invalid(line, "price must be a non-negative number"))?;

    let quantity_in_stock = field(3)
        .parse::<u32>()
        .map_err(|_| invalid(line, "quantityInStock must be a non-negative integer"))?;

    Ok(ProductDraft {
        name,
        category,
        price,
        quantity_in_stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, category: &str, price: &str, qty: u32) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: category.to_string(),
            price: price.parse().unwrap(),
            quantity_in_stock: qty,
        }
    }

    fn line_of(err: ValidationError) -> u64 {
        match err {
            ValidationError::Csv { line, .. } => line,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_encode_quotes_and_decodes_back() {
        let products = vec![
            draft("Widget", "Tools", "12.50", 4),
            draft("Cable, USB-C", "Electronics", "3", 120),
        ];

        let bytes = encode_products(&products).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("name,category,price,quantityInStock\n"));
        assert!(text.contains("\"Cable, USB-C\""));

        assert_eq!(decode_products(&bytes).unwrap(), products);
    }

    #[test]
    fn test_decode_tolerates_case_whitespace_and_blank_lines() {
        let input = b" Name , CATEGORY,Price,quantityinstock\r\n\r\nWidget , Tools, 1.5 ,2\r\n\r\n";
        let drafts = decode_products(input).unwrap();
        assert_eq!(drafts, vec![draft("Widget", "Tools", "1.5", 2)]);
    }

    #[test]
    fn test_header_only_is_empty_list() {
        assert!(decode_products(b"name,category,price,quantityInStock\n").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_wrong_header() {
        let err = decode_products(b"name,price,category,quantityInStock\nA,1,B,2\n").unwrap_err();
        assert_eq!(line_of(err), 1);
    }

    #[test]
    fn test_rejects_empty_file() {
        assert_eq!(line_of(decode_products(b"").unwrap_err()), 1);
    }

    #[test]
    fn test_reports_line_of_bad_row() {
        let input = b"name,category,price,quantityInStock\nWidget,Tools,1,2\nGadget,Tools,3\n";
        let err = decode_products(input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Csv {
                line: 3,
                reason: "expected 4 fields, found 3".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let header = "name,category,price,quantityInStock\n";

        let negative = format!("{}Widget,Tools,-1,2\n", header);
        assert_eq!(line_of(decode_products(negative.as_bytes()).unwrap_err()), 2);

        let text_price = format!("{}Widget,Tools,cheap,2\n", header);
        assert!(decode_products(text_price.as_bytes()).is_err());

        let fractional_qty = format!("{}Widget,Tools,1,2.5\n", header);
        assert!(decode_products(fractional_qty.as_bytes()).is_err());

        let negative_qty = format!("{}Widget,Tools,1,-2\n", header);
        assert!(decode_products(negative_qty.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_missing_name() {
        let err = decode_products(b"name,category,price,quantityInStock\n,Tools,1,2\n").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Csv {
                line: 2,
                reason: "name is required".to_string()
            }
        );
    }
}
