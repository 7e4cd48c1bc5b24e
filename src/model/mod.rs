pub mod refund;

/// Value of `return_code` / `result_code` on success.
pub const SUCCESS: &str = "SUCCESS";
