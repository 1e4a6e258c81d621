use extract::CompanyRecord;

pub const CSV_HEADER: &str = "Company Name,Parent Company,Equity";

/// One row per record, in input order. Lines are `\n`-joined without a trailing newline.
pub fn to_csv(records: &[CompanyRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        lines.push(format!(
            "{},{},{}",
            escape_field(&record.name),
            escape_field(&record.parent),
            escape_field(&record.equity)
        ));
    }
    lines.join("\n")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
