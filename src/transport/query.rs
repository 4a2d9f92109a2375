use url::Url;

use super::TransportError;

/// Join `base_url` with percent-encoded path `segments` and append the non-empty
/// `params` as a form-encoded query, preserving their order.
///
/// The returned string is both the request URL and the URI that gets signed.
pub fn build_uri(
    base_url: &str,
    segments: &[String],
    params: &[(String, String)],
) -> Result<String, TransportError> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| TransportError::CannotBeABase {
            url: base_url.to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);

    let mut params = params.iter().filter(|(_, value)| !value.is_empty()).peekable();
    if params.peek().is_some() {
        url.query_pairs_mut()
            .extend_pairs(params.map(|(key, value)| (key.as_str(), value.as_str())));
    }

    Ok(url.into())
}
