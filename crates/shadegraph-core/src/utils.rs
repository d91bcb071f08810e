/// Reduce a display name to a bare identifier.
///
/// Every character outside `[A-Za-z_]` is dropped, digits included, so the
/// result can take a numeric suffix without ambiguity.
///
/// # Examples
/// ```
/// use shadegraph_core::utils::to_identifier;
/// assert_eq!(to_identifier("World Matrix"), "WorldMatrix");
/// assert_eq!(to_identifier("uv_2"), "uv_");
/// ```
pub fn to_identifier(display: &str) -> String {
    display
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_')
        .collect()
}

/// Make `base` unique among `taken` by appending `1`, `2`, ...
///
/// An empty `base` becomes `block`.
///
/// # Examples
/// ```
/// use shadegraph_core::utils::unique_identifier;
/// let taken = vec!["foo".to_string()];
/// assert_eq!(unique_identifier("foo", |n| taken.iter().any(|t| t == n)), "foo1");
/// ```
pub fn unique_identifier(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let base = if base.is_empty() { "block" } else { base };
    if !is_taken(base) {
        return base.to_string();
    }

    let mut index = 0u32;
    loop {
        index += 1;
        let candidate = format!("{base}{index}");
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

/// Render a float literal that always carries a decimal point.
///
/// Shading languages reject `2` where a float is expected, so integral
/// values gain a trailing `.0`.
///
/// # Examples
/// ```
/// use shadegraph_core::utils::float_literal;
/// assert_eq!(float_literal(2.0), "2.0");
/// assert_eq!(float_literal(0.5), "0.5");
/// ```
pub fn float_literal(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}
