/// Convert a `SNAKE_CASE` catalog identifier into `camelCase`.
///
/// Every `_`-separated token is lowercased; tokens after the first get an
/// uppercase first letter. Empty tokens (doubled or trailing `_`) vanish.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (idx, token) in name.split('_').enumerate() {
        let lower = token.to_lowercase();
        if idx == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&capitalize_first(&lower));
        }
    }
    out
}

/// Uppercase only the first character.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase only the first character.
pub fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Type name for a table: `ORDER_ITEM` -> `OrderItem`.
pub fn type_name(table_name: &str) -> String {
    capitalize_first(&camel_case(table_name))
}

/// English plural of a field name.
///
/// - consonant + `y` -> `ies`
/// - vowel + `y` -> `ys`
/// - `s`, `ss`, `z`, `ch`, `sh`, `x` -> `es`
/// - anything else -> `s`
pub fn pluralize(word: &str) -> String {
    let mut tail = word.chars().rev();
    if let (Some('y'), Some(before)) = (tail.next(), tail.next()) {
        if matches!(before.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u') {
            return format!("{word}s");
        }
        return format!("{}ies", &word[..word.len() - 1]);
    }

    if ["s", "z", "ch", "sh", "x"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Convert `CamelCase` into `hyphen-case`: `OrderItemDto` -> `order-item-dto`.
pub fn camel_to_hyphen(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    for (idx, ch) in word.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
