//! The fixed-shape "add tender to existing check" request.
//!
//! Most fields are sent blank; only the check sequence, the operator and the
//! amounts are threaded through.

use serde::{Deserialize, Serialize};

/// Electronic payment block of a tender line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EPayment {
    pub acct_number: String,
    pub authorization_code: String,
    pub base_amount: String,
    pub tip_amount: String,
    pub cash_back_amount: String,
    pub device_id: String,
    pub interface_name: String,
}

/// Tender media line added to the check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TenderDetail {
    pub tmed_object_num: i32,
    pub partial_payment: String,
    pub reference: String,
    pub epayment: EPayment,
}

/// Request applying a payment to an open check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddToCheckRequest {
    pub check_seq: i32,
    pub employee_id_num: String,
    pub tender: TenderDetail,
}

impl AddToCheckRequest {
    pub fn new(check_seq: i32, employee_id_num: &str, txn_id: &str, bill: &str, tip: &str) -> Self {
        Self {
            check_seq,
            employee_id_num: employee_id_num.to_string(),
            tender: TenderDetail {
                reference: txn_id.to_string(),
                epayment: EPayment {
                    base_amount: bill.to_string(),
                    tip_amount: tip.to_string(),
                    ..EPayment::default()
                },
                ..TenderDetail::default()
            },
        }
    }
}
