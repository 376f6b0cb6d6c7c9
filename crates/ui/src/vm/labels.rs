/// `logical_reasoning` -> `Logical Reasoning`.
#[must_use]
pub fn humanize_category(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-number percentage for display; the underlying value is untouched.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value.round())
}
