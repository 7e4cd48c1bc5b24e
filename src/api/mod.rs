pub mod refund;
