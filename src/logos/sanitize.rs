/// Reduce a make name to a token safe for file names and URL paths: keep
/// alphanumerics, spaces, `-` and `_`, trim, then drop the remaining spaces.
pub fn sanitize_make_name(make_name: &str) -> String {
    let kept: String = make_name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim().replace(' ', "")
}
