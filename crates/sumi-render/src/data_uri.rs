//! `data:` URIs for raster images (seals, PNG export).

use crate::error::{RenderError, RenderResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes as a `data:image/png;base64,…` URI.
pub fn encode_png_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len() * 4 / 3 + 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut uri);
    uri
}

/// Decode the payload of a base64 `data:` URI of any media type.
pub fn decode_data_uri(uri: &str) -> RenderResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::DataUri("missing `data:` scheme".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::DataUri("missing `,` separator".into()))?;
    if !meta.ends_with(";base64") {
        return Err(RenderError::DataUri(format!("not base64 encoded: {meta}")));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| RenderError::DataUri(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let bytes = [0x89, b'P', b'N', b'G', 0, 1, 2, 255];
        let uri = encode_png_data_uri(&bytes);
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
        assert_eq!(decode_data_uri(&uri).unwrap(), bytes);
    }

    #[test]
    fn rejects_non_data_uris() {
        assert!(matches!(
            decode_data_uri("https://example.com/seal.png"),
            Err(RenderError::DataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:text/plain,hello"),
            Err(RenderError::DataUri(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,@@@"),
            Err(RenderError::DataUri(_))
        ));
    }
}
