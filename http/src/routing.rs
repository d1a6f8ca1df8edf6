/// Splits the path into the next segment and the remainder.
///
/// # Example
/// ```
/// use bandroute_http::routing::next_segment;
///
/// let (segment, rest) = next_segment("albums/2/tracks");
/// assert_eq!(segment, "albums");
/// assert_eq!(rest, Some("2/tracks"));
///
/// let (segment, rest) = next_segment("2");
/// assert_eq!(segment, "2");
/// assert_eq!(rest, None);
/// ```
pub fn next_segment(path: &str) -> (&str, Option<&str>) {
    match path.split_once('/') {
        Some((segment, rest)) => (segment, Some(rest)),
        None => (path, None),
    }
}
