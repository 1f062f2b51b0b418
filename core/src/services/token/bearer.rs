//! Bearer credential extraction

/// Extracts the token from an `Authorization` header value
///
/// The value must be exactly two whitespace-separated parts, the first of
/// which is `bearer` in any letter case. Every other shape, including an
/// absent header, yields `None`.
pub fn extract_bearer(header_value: Option<&str>) -> Option<&str> {
    let mut parts = header_value?.split_whitespace();

    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token)
}
