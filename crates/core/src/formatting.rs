//! Display helpers for filter chips and option labels.

/// Label for one end of a price range filter.
///
/// An unset or zero bound reads as "any"; values of a thousand or more are
/// abbreviated with a `k` suffix.
pub fn format_price_value(value: Option<f64>, is_min: bool) -> String {
    match value {
        None => any_price(is_min),
        Some(v) if v == 0.0 => any_price(is_min),
        Some(v) if v >= 1000.0 => {
            let k = v / 1000.0;
            if is_min {
                format!("${k}k+")
            } else {
                format!("<${k}k")
            }
        }
        Some(v) => {
            if is_min {
                format!("${v}+")
            } else {
                format!("<${v}")
            }
        }
    }
}

fn any_price(is_min: bool) -> String {
    if is_min {
        "Any Min Price".to_string()
    } else {
        "Any Max Price".to_string()
    }
}

/// Split a PascalCase enumeration value into words: `WasherDryer` -> `Washer Dryer`.
pub fn format_enum_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out.trim().to_string()
}
