use tracing::{debug, warn};

use crate::client::WxPayClient;
use crate::crypto::nonce::random_nonce;
use crate::crypto::sign::{SignParams, Signed};
use crate::crypto::verify::verify_xml_sign;
use crate::error::WxPayError;
use crate::model::refund::{RefundPayload, RefundRequest, RefundResponse};
use crate::transport::XmlTransport;

const REFUND_PATH: &str = "/secapi/pay/refund";

impl<T: XmlTransport> WxPayClient<T> {
    /// Apply for a refund.
    ///
    /// POST /secapi/pay/refund (mutual TLS with the merchant certificate)
    ///
    /// Succeeds only when both `return_code` and `result_code` are `SUCCESS`.
    pub async fn refund(&self, req: &RefundRequest) -> Result<RefundResponse, WxPayError> {
        let (payload, signed) = self.build_refund_payload(req, random_nonce())?;
        debug!(out_refund_no = %req.out_refund_no, "requesting refund");

        let raw = self.post_xml(REFUND_PATH, &payload, &req.cert_path).await?;
        let resp = check_refund_response(&raw, &signed)?;

        if self.config.verify_response_sign
            && !verify_xml_sign(&raw, &self.config.api_key, self.config.sign_type)?
        {
            warn!(out_refund_no = %req.out_refund_no, "refund response signature mismatch");
            return Err(WxPayError::VerifyError(
                "refund response signature verification failed".into(),
            ));
        }

        Ok(resp)
    }

    /// Build the signed refund body for a given nonce.
    pub fn build_refund_payload(
        &self,
        req: &RefundRequest,
        nonce: String,
    ) -> Result<(RefundPayload, Signed), WxPayError> {
        let sign_type = self.config.sign_type.as_str();
        let refund_desc = req.refund_desc.clone().unwrap_or_default();

        let signed = SignParams::new()
            .with("appid", self.config.app_id.as_str())
            .with("mch_id", self.config.mch_id.as_str())
            .with("nonce_str", nonce.as_str())
            .with("out_refund_no", req.out_refund_no.as_str())
            .with("refund_desc", refund_desc.as_str())
            .with("refund_fee", req.refund_fee.as_str())
            .with("total_fee", req.total_fee.as_str())
            .with("sign_type", sign_type)
            .with("transaction_id", req.transaction_id.as_str())
            .sign(self.config.sign_type, &self.config.api_key)?;

        let payload = RefundPayload {
            appid: self.config.app_id.clone(),
            mch_id: self.config.mch_id.clone(),
            nonce_str: nonce,
            sign: signed.sign.clone(),
            sign_type: sign_type.to_string(),
            transaction_id: req.transaction_id.clone(),
            out_refund_no: req.out_refund_no.clone(),
            total_fee: req.total_fee.clone(),
            refund_fee: req.refund_fee.clone(),
            refund_desc,
        };

        Ok((payload, signed))
    }
}

/// Decode a refund reply and check the two-level status codes.
pub fn check_refund_response(raw: &str, signed: &Signed) -> Result<RefundResponse, WxPayError> {
    let resp: RefundResponse =
        quick_xml::de::from_str(raw).map_err(|e| WxPayError::Decode {
            message: e.to_string(),
            raw: raw.to_string(),
            canonical: signed.redacted_canonical(),
            sign: signed.sign.clone(),
        })?;

    if !resp.is_return_success() {
        warn!(return_msg = %resp.return_msg, "refund rejected by gateway");
        return Err(WxPayError::Gateway {
            message: resp.return_msg,
            raw: raw.to_string(),
            canonical: signed.redacted_canonical(),
            sign: signed.sign.clone(),
        });
    }

    if !resp.is_result_success() {
        let code = resp.err_code.unwrap_or_default();
        let message = resp.err_code_des.unwrap_or_default();
        warn!(err_code = %code, err_code_des = %message, "refund failed");
        return Err(WxPayError::Business { code, message });
    }

    Ok(resp)
}
