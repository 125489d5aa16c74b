use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One row of the warehouse and retail sales data set.
///
/// Records are created once when the data is loaded and are read-only afterwards. Numeric columns
/// that are missing or cannot be parsed are coerced to `0` rather than rejecting the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SalesRecord {
    pub(crate) year: i32,
    pub(crate) month: i32,
    pub(crate) supplier: String,
    pub(crate) item_code: String,
    pub(crate) item_description: String,
    pub(crate) item_type: String,
    pub(crate) retail_sales: f64,
    pub(crate) retail_transfers: f64,
    pub(crate) warehouse_sales: f64,
}

impl SalesRecord {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn item_code(&self) -> &str {
        &self.item_code
    }

    pub fn item_description(&self) -> &str {
        &self.item_description
    }

    /// The item type doubles as the category key.
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn retail_sales(&self) -> f64 {
        self.retail_sales
    }

    pub fn retail_transfers(&self) -> f64 {
        self.retail_transfers
    }

    pub fn warehouse_sales(&self) -> f64 {
        self.warehouse_sales
    }

    /// Retail plus warehouse sales.
    pub fn total_sales(&self) -> f64 {
        self.retail_sales + self.warehouse_sales
    }
}

impl From<CsvRow> for SalesRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            year: coerce_int(row.year.as_deref()),
            month: coerce_int(row.month.as_deref()),
            supplier: row.supplier.unwrap_or_default(),
            item_code: row.item_code.unwrap_or_default(),
            item_description: row.item_description.unwrap_or_default(),
            item_type: row.item_type.unwrap_or_default(),
            retail_sales: coerce_number(row.retail_sales.as_deref()),
            retail_transfers: coerce_number(row.retail_transfers.as_deref()),
            warehouse_sales: coerce_number(row.warehouse_sales.as_deref()),
        }
    }
}

// YEAR,MONTH,SUPPLIER,ITEM CODE,ITEM DESCRIPTION,ITEM TYPE,RETAIL SALES,RETAIL TRANSFERS,WAREHOUSE SALES
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "YEAR")]
    year: Option<String>,
    #[serde(rename = "MONTH")]
    month: Option<String>,
    #[serde(rename = "SUPPLIER")]
    supplier: Option<String>,
    #[serde(rename = "ITEM CODE")]
    item_code: Option<String>,
    #[serde(rename = "ITEM DESCRIPTION")]
    item_description: Option<String>,
    #[serde(rename = "ITEM TYPE")]
    item_type: Option<String>,
    #[serde(rename = "RETAIL SALES")]
    retail_sales: Option<String>,
    #[serde(rename = "RETAIL TRANSFERS")]
    retail_transfers: Option<String>,
    #[serde(rename = "WAREHOUSE SALES")]
    warehouse_sales: Option<String>,
}

/// Parses comma-separated text with a header row into sales records.
///
/// Headers are not validated: a missing column reads as empty text or `0`. Rows shorter or longer
/// than the header row are accepted.
///
/// # Errors
/// - Returns an error if the text is not structurally valid CSV.
pub fn parse_records(text: &str) -> Result<Vec<SalesRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = Vec::new();
    for (ix, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // Row numbers are 1-based and the header is row 1.
        let row = result.with_context(|| format!("Malformed CSV at row {}", ix + 2))?;
        records.push(SalesRecord::from(row));
    }
    Ok(records)
}

/// Missing, empty, unparseable or non-finite values become `0`.
pub(crate) fn coerce_number(value: Option<&str>) -> f64 {
    let trimmed = match value {
        Some(s) => s.trim(),
        None => return 0.0,
    };
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

pub(crate) fn coerce_int(value: Option<&str>) -> i32 {
    coerce_number(value).trunc() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "YEAR,MONTH,SUPPLIER,ITEM CODE,ITEM DESCRIPTION,ITEM TYPE,RETAIL SALES,\
                          RETAIL TRANSFERS,WAREHOUSE SALES";

    #[test]
    fn test_parse_records() {
        let text = format!(
            "{HEADER}\n\
             2020,1,REPUBLIC NATIONAL DISTRIBUTING CO,100009,BOOTLEG RED - 750ML,WINE,0,0,2\n\
             2020,1,\"PWSWN INC, LLC\",100024,MOMENT DE PLAISIR - 750ML,WINE,0.82,0.22,4\n"
        );
        let records = parse_records(&text).unwrap();
        assert_eq!(2, records.len());
        let second = &records[1];
        assert_eq!(2020, second.year());
        assert_eq!(1, second.month());
        assert_eq!("PWSWN INC, LLC", second.supplier());
        assert_eq!("100024", second.item_code());
        assert_eq!("MOMENT DE PLAISIR - 750ML", second.item_description());
        assert_eq!("WINE", second.item_type());
        assert_eq!(0.82, second.retail_sales());
        assert_eq!(0.22, second.retail_transfers());
        assert_eq!(4.0, second.warehouse_sales());
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let text = format!("{HEADER}\n2020,1,ACME,1,THING,BEER,N/A,,  7.5 \n");
        let records = parse_records(&text).unwrap();
        assert_eq!(1, records.len());
        assert_eq!(0.0, records[0].retail_sales());
        assert_eq!(0.0, records[0].retail_transfers());
        assert_eq!(7.5, records[0].warehouse_sales());
        assert_eq!(7.5, records[0].total_sales());
    }

    #[test]
    fn test_missing_columns() {
        let text = "YEAR,SUPPLIER,RETAIL SALES\n2019,ACME,12\n";
        let records = parse_records(text).unwrap();
        assert_eq!(1, records.len());
        let record = &records[0];
        assert_eq!(2019, record.year());
        assert_eq!(0, record.month());
        assert_eq!("", record.item_type());
        assert_eq!(12.0, record.retail_sales());
        assert_eq!(0.0, record.warehouse_sales());
    }

    #[test]
    fn test_short_row() {
        let text = format!("{HEADER}\n2020,3,ACME\n");
        let records = parse_records(&text).unwrap();
        assert_eq!(1, records.len());
        assert_eq!(3, records[0].month());
        assert_eq!("ACME", records[0].supplier());
        assert_eq!("", records[0].item_type());
        assert_eq!(0.0, records[0].total_sales());
    }

    #[test]
    fn test_header_only() {
        let records = parse_records(HEADER).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_coerce() {
        assert_eq!(0.0, coerce_number(None));
        assert_eq!(0.0, coerce_number(Some("")));
        assert_eq!(0.0, coerce_number(Some("NaN")));
        assert_eq!(0.0, coerce_number(Some("1,234")));
        assert_eq!(-3.25, coerce_number(Some(" -3.25 ")));
        assert_eq!(2020, coerce_int(Some("2020")));
        assert_eq!(2020, coerce_int(Some("2020.0")));
        assert_eq!(0, coerce_int(Some("two thousand")));
        assert_eq!(0, coerce_int(Some("inf")));
    }

    #[test]
    fn test_non_finite_cells_become_zero() {
        assert_eq!(0.0, coerce_number(Some("inf")));
        assert_eq!(0.0, coerce_number(Some("-Infinity")));
        assert_eq!(0.0, coerce_number(Some("1e400")));
        assert_eq!(1e300, coerce_number(Some("1e300")));

        let text = format!("{HEADER}\n2020,1,A,1,X,WINE,inf,1e400,-inf\n");
        let records = parse_records(&text).unwrap();
        assert_eq!(0.0, records[0].retail_sales());
        assert_eq!(0.0, records[0].retail_transfers());
        assert_eq!(0.0, records[0].warehouse_sales());
    }
}
