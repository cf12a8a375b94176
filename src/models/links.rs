use std::collections::HashSet;

const SEPARATOR: &str = "://";
const DELIMITERS: [char; 6] = [')', ']', ' ', '"', '\n', '\t'];

/// Collects the URLs in a comment body or self-post text.
///
/// A URL is anything from a `://` up to the next `)`, `]`, space, quote,
/// newline or tab. `http` and `https` schemes are kept, anything else
/// (including no scheme at all) is rewritten to `http`. Duplicates are removed.
///
/// ```
/// let links = redownr::links::extract_links("see http://a.com/x and https://b.com)");
/// assert!(links.contains("http://a.com/x"));
/// assert!(links.contains("https://b.com"));
/// assert_eq!(links.len(), 2);
/// ```
pub fn extract_links(text: &str) -> HashSet<String> {
    let mut links = HashSet::new();
    let mut from = 0;

    while let Some(offset) = text[from..].find(SEPARATOR) {
        let start = from + offset;
        let end = text[start..]
            .find(&DELIMITERS[..])
            .map_or(text.len(), |len| start + len);

        let scheme = scheme_before(&text[..start]);
        let scheme = if matches!(scheme, "http" | "https") {
            scheme
        } else {
            "http"
        };
        links.insert(format!("{scheme}{}", &text[start..end]));

        from = end.max(start + SEPARATOR.len());
        if from >= text.len() {
            break;
        }
    }

    links
}

/// Returns the trailing run of alphanumerics in `prefix`.
fn scheme_before(prefix: &str) -> &str {
    let begin = prefix
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric())
        .last()
        .map_or(prefix.len(), |(i, _)| i);
    &prefix[begin..]
}
