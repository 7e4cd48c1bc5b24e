use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Caller-supplied refund parameters.
///
/// Fees are integer amounts in fen, kept as strings so they reach the
/// gateway exactly as given.
#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub transaction_id: String,
    pub out_refund_no: String,
    pub total_fee: String,
    pub refund_fee: String,
    pub refund_desc: Option<String>,
    /// Merchant PKCS#12 client certificate (`apiclient_cert.p12`).
    pub cert_path: PathBuf,
}

/// Outbound `<xml>` body for `/secapi/pay/refund`.
#[derive(Debug, Clone, Serialize)]
pub struct RefundPayload {
    pub appid: String,
    pub mch_id: String,
    pub nonce_str: String,
    pub sign: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sign_type: String,
    pub transaction_id: String,
    pub out_refund_no: String,
    pub total_fee: String,
    pub refund_fee: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refund_desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RefundResponse {
    pub return_code: String,
    #[serde(default)]
    pub return_msg: String,
    #[serde(default)]
    pub appid: Option<String>,
    #[serde(default)]
    pub mch_id: Option<String>,
    #[serde(default)]
    pub nonce_str: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default)]
    pub result_code: Option<String>,
    #[serde(default)]
    pub err_code: Option<String>,
    #[serde(default)]
    pub err_code_des: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub out_trade_no: Option<String>,
    #[serde(default)]
    pub out_refund_no: Option<String>,
    #[serde(default)]
    pub refund_id: Option<String>,
    #[serde(default)]
    pub refund_fee: Option<String>,
    #[serde(default)]
    pub settlement_refund_fee: Option<String>,
    #[serde(default)]
    pub total_fee: Option<String>,
    #[serde(default)]
    pub settlement_total_fee: Option<String>,
    #[serde(default)]
    pub fee_type: Option<String>,
    #[serde(default)]
    pub cash_fee: Option<String>,
    #[serde(default)]
    pub cash_fee_type: Option<String>,
}

impl RefundResponse {
    pub fn is_return_success(&self) -> bool {
        self.return_code == super::SUCCESS
    }

    pub fn is_result_success(&self) -> bool {
        self.result_code.as_deref() == Some(super::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_XML: &str = "<xml>\
        <return_code><![CDATA[SUCCESS]]></return_code>\
        <return_msg><![CDATA[OK]]></return_msg>\
        <appid><![CDATA[wx2421b1c4370ec43b]]></appid>\
        <mch_id><![CDATA[10000100]]></mch_id>\
        <nonce_str><![CDATA[NfsMFbUFpdbEhPXP]]></nonce_str>\
        <sign><![CDATA[B7274EB9F8925EB93100DD2085FA56C0]]></sign>\
        <result_code><![CDATA[SUCCESS]]></result_code>\
        <transaction_id><![CDATA[1008450740201411110005820873]]></transaction_id>\
        <out_trade_no><![CDATA[1415757673]]></out_trade_no>\
        <out_refund_no><![CDATA[1415701182]]></out_refund_no>\
        <refund_id><![CDATA[2008450740201411110000174436]]></refund_id>\
        <refund_channel><![CDATA[]]></refund_channel>\
        <refund_fee>1</refund_fee>\
        <settlement_refund_fee>1</settlement_refund_fee>\
        <total_fee>2</total_fee>\
        <settlement_total_fee>2</settlement_total_fee>\
        <fee_type><![CDATA[CNY]]></fee_type>\
        <cash_fee>2</cash_fee>\
        <cash_fee_type><![CDATA[CNY]]></cash_fee_type>\
        <coupon_refund_fee>0</coupon_refund_fee>\
        </xml>";

    #[test]
    fn test_decode_success_fixture() {
        let resp: RefundResponse = quick_xml::de::from_str(SUCCESS_XML).unwrap();
        let expected = RefundResponse {
            return_code: "SUCCESS".into(),
            return_msg: "OK".into(),
            appid: Some("wx2421b1c4370ec43b".into()),
            mch_id: Some("10000100".into()),
            nonce_str: Some("NfsMFbUFpdbEhPXP".into()),
            sign: Some("B7274EB9F8925EB93100DD2085FA56C0".into()),
            result_code: Some("SUCCESS".into()),
            err_code: None,
            err_code_des: None,
            transaction_id: Some("1008450740201411110005820873".into()),
            out_trade_no: Some("1415757673".into()),
            out_refund_no: Some("1415701182".into()),
            refund_id: Some("2008450740201411110000174436".into()),
            refund_fee: Some("1".into()),
            settlement_refund_fee: Some("1".into()),
            total_fee: Some("2".into()),
            settlement_total_fee: Some("2".into()),
            fee_type: Some("CNY".into()),
            cash_fee: Some("2".into()),
            cash_fee_type: Some("CNY".into()),
        };
        assert_eq!(resp, expected);
        assert!(resp.is_return_success());
        assert!(resp.is_result_success());
    }

    #[test]
    fn test_decode_fail_fixture_leaves_optionals_empty() {
        let xml = "<xml><return_code><![CDATA[FAIL]]></return_code>\
                   <return_msg><![CDATA[签名错误]]></return_msg></xml>";
        let resp: RefundResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(resp.return_code, "FAIL");
        assert_eq!(resp.return_msg, "签名错误");
        assert!(resp.result_code.is_none());
        assert!(resp.refund_id.is_none());
        assert!(!resp.is_return_success());
        assert!(!resp.is_result_success());
    }

    #[test]
    fn test_decode_missing_return_code_fails() {
        let xml = "<xml><return_msg>OK</return_msg></xml>";
        assert!(quick_xml::de::from_str::<RefundResponse>(xml).is_err());
    }

    #[test]
    fn test_payload_serializes_in_wire_order() {
        let payload = RefundPayload {
            appid: "wx1".into(),
            mch_id: "100".into(),
            nonce_str: "n".into(),
            sign: "S".into(),
            sign_type: "MD5".into(),
            transaction_id: "t".into(),
            out_refund_no: "r".into(),
            total_fee: "2".into(),
            refund_fee: "1".into(),
            refund_desc: String::new(),
        };
        let xml = quick_xml::se::to_string_with_root("xml", &payload).unwrap();
        assert_eq!(
            xml,
            "<xml><appid>wx1</appid><mch_id>100</mch_id><nonce_str>n</nonce_str>\
             <sign>S</sign><sign_type>MD5</sign_type><transaction_id>t</transaction_id>\
             <out_refund_no>r</out_refund_no><total_fee>2</total_fee>\
             <refund_fee>1</refund_fee></xml>"
        );
    }

    #[test]
    fn test_payload_escapes_text() {
        let payload = RefundPayload {
            appid: "wx1".into(),
            mch_id: "100".into(),
            nonce_str: "n".into(),
            sign: "S".into(),
            sign_type: String::new(),
            transaction_id: "t".into(),
            out_refund_no: "r".into(),
            total_fee: "2".into(),
            refund_fee: "1".into(),
            refund_desc: "a<b&c".into(),
        };
        let xml = quick_xml::se::to_string_with_root("xml", &payload).unwrap();
        assert!(xml.contains("<refund_desc>a&lt;b&amp;c</refund_desc>"));
        assert!(!xml.contains("sign_type"));
    }
}
