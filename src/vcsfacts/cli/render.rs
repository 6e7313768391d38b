//! Output formats: `name=value` lines in registry order, or one JSON object.

use vcsfacts::attributes::AttributeSet;
use vcsfacts::error::Result;
use vcsfacts::model::FactRecord;

pub fn lines(record: &FactRecord, wanted: AttributeSet) -> String {
    let mut out = String::new();
    for attr in wanted.iter() {
        out.push_str(attr.name());
        out.push('=');
        out.push_str(&record.get_attr(attr).to_string());
        out.push('\n');
    }
    out
}

pub fn json(record: &FactRecord, wanted: AttributeSet) -> Result<String> {
    let object: serde_json::Map<String, serde_json::Value> = wanted
        .iter()
        .map(|attr| (attr.name().to_string(), record.get_attr(attr).to_json()))
        .collect();
    let mut out = serde_json::to_string(&object)?;
    out.push('\n');
    Ok(out)
}
