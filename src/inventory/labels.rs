use crate::inventory::domain::StatKey;

/// Percentage attributes render as `46.6%`, flat ones as rounded integers
/// with thousands separators (`4,780`).
pub fn format_stat_value(key: &StatKey, value: f64) -> String {
    if key.is_percentage() {
        return format!("{value:.1}%");
    }

    group_thousands(value.round() as i64)
}

/// `gladiator-s-finale` → `Gladiator's Finale`.
pub fn format_set_name(slug: &str) -> String {
    if slug.trim().is_empty() {
        return String::new();
    }

    let words: Vec<String> = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect();

    let mut out = String::with_capacity(slug.len() + 2);
    for (index, word) in words.iter().enumerate() {
        let possessive = word == "S" && index > 0 && index + 1 < words.len();
        if possessive {
            out.push_str("'s");
            continue;
        }
        if index > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
