use super::types::{ERROR_CATEGORY, ItemRecord};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Removes markdown code fences the model wraps around JSON despite being told not to.
///
/// This is a textual strip of every "```json" and "```" marker, not a grammar.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses a raw model reply into item records, checking every element against the schema.
pub fn parse_items(raw: &str) -> Result<Vec<ItemRecord>> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)?;

    let elements = match value {
        Value::Array(elements) => elements,
        Value::Object(map) if map.contains_key("error") => {
            return Err(Error::model_reported(describe_error_object(&map)));
        }
        other => {
            return Err(Error::schema(format!(
                "expected a JSON list, got {}",
                json_type(&other)
            )));
        }
    };

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let record: ItemRecord = serde_json::from_value(element)
            .map_err(|e| Error::schema(format!("item {}: {}", index, e)))?;
        check_record(index, &record)?;
        items.push(record);
    }

    Ok(items)
}

fn check_record(index: usize, record: &ItemRecord) -> Result<()> {
    if record.category == ERROR_CATEGORY {
        return Err(Error::model_reported(format!(
            "item {}: {}",
            index, record.item
        )));
    }

    if record.item.trim().is_empty() {
        return Err(Error::schema(format!("item {}: empty item name", index)));
    }

    if let Some(quantity) = &record.quantity {
        if quantity.as_f64().is_some_and(|q| q < 0.0) {
            return Err(Error::schema(format!(
                "item {}: negative quantity {}",
                index, quantity
            )));
        }
    }

    Ok(())
}

fn describe_error_object(map: &Map<String, Value>) -> String {
    let error = map
        .get("error")
        .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
        .unwrap_or_default();

    match map.get("details").and_then(Value::as_str) {
        Some(details) => format!("{}: {}", error, details),
        None => error,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
