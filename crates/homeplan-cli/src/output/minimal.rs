use serde_json::Value;

/// Well-known answer fields, most important first. Nested objects are
/// searched in the same order.
const PRIORITY_KEYS: [&str; 6] = [
    "max_allowed_loan_amount",
    "monthly_payment",
    "total_interest",
    "districts",
    "neighborhoods",
    "total_payment",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(val) = find_priority(result_obj) {
        println!("{}", format_minimal(val));
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn find_priority(value: &Value) -> Option<&Value> {
    let map = value.as_object()?;
    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return Some(val);
        }
    }
    // affordability nests its verdict beside the loan
    ["affordability", "loan"]
        .iter()
        .filter_map(|k| map.get(*k))
        .find_map(find_priority)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(format_minimal).collect::<Vec<_>>().join("\n"),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_affordability_prefers_max_allowed() {
        let value = json!({
            "result": {
                "loan": {"monthly_payment": "727176"},
                "affordability": {"max_allowed_loan_amount": "140000000"}
            }
        });
        let result = value.get("result").unwrap();
        assert_eq!(find_priority(result), Some(&json!("140000000")));
    }

    #[test]
    fn test_loan_prefers_monthly_payment() {
        let value = json!({"principal": "1", "monthly_payment": "2", "total_interest": "3"});
        assert_eq!(find_priority(&value), Some(&json!("2")));
    }
}
