use url::form_urlencoded;

/// Appends form-encoded query pairs to `base` without normalizing it.
///
/// `base` is kept byte for byte (no trailing slash is added to a bare host),
/// which is what the browser client expects to see in its address bar.
/// Uses `&` if `base` already carries a query string. A `#fragment` stays at
/// the end, after the query.
pub fn append_query(base: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return base.to_string();
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    let query = serializer.finish();

    let (base, fragment) = match base.find('#') {
        Some(idx) => base.split_at(idx),
        None => (base, ""),
    };

    let separator = if base.contains('?') {
        if base.ends_with('?') || base.ends_with('&') {
            ""
        } else {
            "&"
        }
    } else {
        "?"
    };

    format!("{base}{separator}{query}{fragment}")
}
