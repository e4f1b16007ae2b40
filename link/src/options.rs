//! Query-string option assembly for write requests.

/// Build a query-string fragment from `(condition, option_name)` pairs.
///
/// Only entries whose condition holds are included, as `name=true`, joined by
/// `&` and prefixed with `?`. Output order equals input order; an all-false
/// (or empty) input yields the empty string.
///
/// # Examples
///
/// ```rust
/// use arango_link::options::build_options;
///
/// assert_eq!(build_options(&[]), "");
/// assert_eq!(
///     build_options(&[(true, "returnNew"), (false, "overwrite")]),
///     "?returnNew=true"
/// );
/// ```
pub fn build_options(entries: &[(bool, &str)]) -> String {
    let enabled: Vec<String> = entries
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| format!("{}=true", name))
        .collect();
    if enabled.is_empty() {
        String::new()
    } else {
        format!("?{}", enabled.join("&"))
    }
}
