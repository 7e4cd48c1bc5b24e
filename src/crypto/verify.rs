use std::collections::HashMap;

use crate::crypto::sign::{SIGN_FIELD, SignParams, SignType};
use crate::error::WxPayError;

/// Verify the `sign` field of a gateway XML response.
///
/// Every child element of the `<xml>` root except `sign` takes part in the
/// canonical string, including fields the typed response model ignores.
/// The algorithm is taken from the response `sign_type` when present,
/// otherwise from `default_sign_type`.
///
/// Returns `Ok(false)` on mismatch or when no `sign` is present.
pub fn verify_xml_sign(
    body: &str,
    api_key: &str,
    default_sign_type: SignType,
) -> Result<bool, WxPayError> {
    let fields: HashMap<String, String> = quick_xml::de::from_str(body)
        .map_err(|e| WxPayError::VerifyError(format!("parse response fields: {e}")))?;

    let Some(received) = fields.get(SIGN_FIELD) else {
        return Ok(false);
    };

    let sign_type = match fields.get("sign_type") {
        Some(v) => SignType::parse(v)?,
        None => default_sign_type,
    };

    let params: SignParams = fields
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let expected = params.sign(sign_type, api_key)?;

    Ok(expected.sign.eq_ignore_ascii_case(received))
}
