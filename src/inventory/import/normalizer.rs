/// Lookup form for alias tables: strips invisible characters, collapses
/// whitespace and lowercases.
pub(crate) fn normalize_lookup(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// `KujouSara` → `kujou-sara`: a hyphen before every capital, then lowercase.
pub(crate) fn hyphenate_compound(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }

    match out.strip_prefix('-') {
        Some(stripped) => stripped.to_string(),
        None => out,
    }
}
