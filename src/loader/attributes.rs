//! Parser for the GFF/GTF attribute column

use std::collections::BTreeMap;

/// Key/value delimiter in GFF3 attribute columns (`ID=gene1;Name=BRCA1`)
pub const GFF_KEY_VALUE_DELIMITER: &str = "=";

/// Key/value delimiter in GTF attribute columns (`gene_id "X"; gene_name "Y";`)
pub const GTF_KEY_VALUE_DELIMITER: &str = " ";

/// Parsed attribute column
pub type Attributes = BTreeMap<String, String>;

/// Split a `;`-separated attribute string into a map.
///
/// Empty segments are skipped. A segment that does not split into exactly a
/// key and a value is kept as a key with an empty value. Later duplicates
/// overwrite earlier ones.
pub fn parse_attributes(column: &str, key_value_delimiter: &str) -> Attributes {
    let mut attributes = Attributes::new();

    for segment in column.split(';') {
        if segment.is_empty() {
            continue;
        }
        let parts: Vec<&str> = segment.trim().split(key_value_delimiter).collect();
        let value = if parts.len() == 2 { parts[1] } else { "" };
        attributes.insert(parts[0].to_string(), value.to_string());
    }

    attributes
}
