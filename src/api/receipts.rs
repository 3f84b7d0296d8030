//! Receipt types, queries, and the envelope-shape fallback for the
//! receipts endpoint family.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::api::queries::{RECEIPTS_QUERY, RECEIPT_DETAIL_QUERY};
use crate::client::Client;
use crate::error::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptsWithCounts {
    pub in_warehouse: i32,
    pub gas_station: i32,
    pub car_wash: i32,
    pub gas_and_car_wash: i32,
    pub receipts: Vec<Receipt>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    pub warehouse_name: String,
    pub receipt_type: String,
    pub document_type: String,
    pub transaction_date_time: String,
    pub transaction_date: String,
    pub company_number: i32,
    pub warehouse_number: i32,
    pub operator_number: i32,
    pub warehouse_short_name: String,
    pub register_number: i32,
    pub transaction_number: i64,
    pub transaction_type: String,
    pub transaction_barcode: String,
    pub total: f64,
    pub warehouse_address1: String,
    pub warehouse_address2: String,
    pub warehouse_city: String,
    pub warehouse_state: String,
    pub warehouse_country: String,
    pub warehouse_postal_code: String,
    pub total_item_count: i32,
    pub sub_total: f64,
    pub taxes: f64,
    /// String for warehouse receipts, number for fuel receipts.
    pub invoice_number: Value,
    /// Same inconsistency as `invoice_number`.
    pub sequence_number: Value,
    pub item_array: Vec<ReceiptItem>,
    pub tender_array: Vec<Tender>,
    pub sub_taxes: Option<SubTaxes>,
    pub instant_savings: f64,
    pub membership_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptItem {
    pub item_number: String,
    pub item_description01: String,
    pub french_item_description1: String,
    pub item_description02: String,
    pub french_item_description2: String,
    pub item_identifier: String,
    pub item_department_number: i32,
    pub unit: i32,
    pub amount: f64,
    pub tax_flag: String,
    #[serde(rename = "merchantID")]
    pub merchant_id: String,
    pub entry_method: String,
    pub trans_department_number: i32,
    pub fuel_unit_quantity: f64,
    pub fuel_grade_code: String,
    pub item_unit_price_amount: f64,
    pub fuel_uom_code: String,
    pub fuel_uom_description: String,
    pub fuel_uom_description_fr: String,
    pub fuel_grade_description: String,
    pub fuel_grade_description_fr: String,
}

impl ReceiptItem {
    /// Whether this line is a discount applied to another item: negative
    /// amount and unit, description of the form "/1553261" naming the parent
    /// item. Returns also carry negative amounts but keep their normal
    /// descriptions, so they are not matched here.
    pub fn is_discount(&self) -> bool {
        self.amount < 0.0 && self.unit < 0 && self.item_description01.starts_with('/')
    }

    /// The item number this discount applies to ("/ 1857091" → "1857091"),
    /// or `None` when the line is not a discount.
    pub fn parent_item_number(&self) -> Option<&str> {
        if !self.is_discount() {
            return None;
        }
        Some(self.item_description01.trim_start_matches('/').trim())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tender {
    pub tender_type_code: String,
    pub tender_sub_type_code: String,
    pub tender_description: String,
    pub amount_tender: f64,
    pub display_account_number: String,
    pub sequence_number: String,
    pub approval_number: String,
    pub response_code: String,
    pub tender_type_name: String,
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    #[serde(rename = "merchantID")]
    pub merchant_id: String,
    pub entry_method: String,
    pub tender_acct_txn_number: String,
    pub tender_authorization_code: String,
    pub tender_type_name_fr: String,
    pub tender_entry_method_description: String,
    pub wallet_type: String,
    pub wallet_id: String,
    pub stored_value_bucket: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubTaxes {
    pub tax1: f64,
    pub tax2: f64,
    pub tax3: f64,
    pub tax4: f64,
    pub a_tax_percent: f64,
    pub a_tax_legend: String,
    pub a_tax_amount: f64,
    pub a_tax_print_code: String,
    #[serde(rename = "aTaxPrintCodeFR")]
    pub a_tax_print_code_fr: String,
    pub a_tax_identifier_code: String,
    pub b_tax_percent: f64,
    pub b_tax_legend: String,
    pub b_tax_amount: f64,
    pub b_tax_print_code: String,
    #[serde(rename = "bTaxPrintCodeFR")]
    pub b_tax_print_code_fr: String,
    pub b_tax_identifier_code: String,
    pub c_tax_percent: f64,
    pub c_tax_legend: String,
    pub c_tax_amount: f64,
    pub c_tax_identifier_code: String,
    pub d_tax_percent: f64,
    pub d_tax_legend: String,
    pub d_tax_amount: f64,
    pub d_tax_print_code: String,
    #[serde(rename = "dTaxPrintCodeFR")]
    pub d_tax_print_code_fr: String,
    pub d_tax_identifier_code: String,
    pub u_tax_legend: String,
    pub u_tax_amount: f64,
    pub u_taxable_amount: f64,
}

#[derive(Debug, Deserialize)]
struct ReceiptsObjectData {
    #[serde(rename = "receiptsWithCounts")]
    receipts_with_counts: ReceiptsWithCounts,
}

#[derive(Debug, Deserialize)]
struct ReceiptsArrayData {
    #[serde(rename = "receiptsWithCounts")]
    receipts_with_counts: Vec<ReceiptsWithCounts>,
}

#[derive(Debug, Deserialize)]
struct ReceiptDetailData {
    #[serde(rename = "receiptsWithCounts", default)]
    receipts_with_counts: ReceiptList,
}

#[derive(Debug, Default, Deserialize)]
struct ReceiptList {
    #[serde(default)]
    receipts: Vec<Receipt>,
}

impl Client {
    /// Fetch receipts with counts for a date range (M/DD/YYYY, the format
    /// this endpoint family expects).
    ///
    /// The endpoint wraps its payload in a bare object most of the time but
    /// has been observed returning a single-element array for the same
    /// query. Decoding tries the object shape first; a structural mismatch
    /// re-issues the query and decodes as an array, taking element zero.
    /// Both failing reports both causes. The fallback should be rare to
    /// never — it logs at warn so operators can tell when it fires.
    pub async fn get_receipts(
        &self,
        start_date: &str,
        end_date: &str,
        document_type: &str,
        document_sub_type: &str,
    ) -> Result<ReceiptsWithCounts, Error> {
        info!(start_date, end_date, document_type, "fetching receipts");

        let variables = json!({
            "startDate": start_date,
            "endDate": end_date,
            "documentType": document_type,
            "documentSubType": document_sub_type,
        });

        debug!(operation = "receiptsWithCounts", "executing graphql query");
        let object_err = match self
            .execute_authenticated_query::<ReceiptsObjectData>(RECEIPTS_QUERY, variables.clone())
            .await
        {
            Ok(result) => {
                info!(
                    receipt_count = result.receipts_with_counts.receipts.len(),
                    document_type, "fetched receipts"
                );
                return Ok(result.receipts_with_counts);
            }
            // Only a shape mismatch warrants the second decode attempt;
            // transport and semantic failures propagate as-is.
            Err(err @ Error::Decode(_)) => err,
            Err(err) => return Err(err),
        };

        warn!(
            object_error = %object_err,
            document_type,
            "object-shaped receipts decode failed, retrying as array"
        );

        match self
            .execute_authenticated_query::<ReceiptsArrayData>(RECEIPTS_QUERY, variables)
            .await
        {
            Ok(result) => {
                let counts = result
                    .receipts_with_counts
                    .into_iter()
                    .next()
                    .ok_or(Error::NoData("receipt"))?;
                warn!(
                    receipt_count = counts.receipts.len(),
                    document_type, "array-shaped receipts decode succeeded"
                );
                Ok(counts)
            }
            Err(array_err) => Err(Error::ShapeMismatch {
                object: Box::new(object_err),
                array: Box::new(array_err),
            }),
        }
    }

    /// Fetch full line-item detail for one receipt by barcode.
    /// `document_type` is "warehouse" or "fuel".
    pub async fn get_receipt_detail(
        &self,
        barcode: &str,
        document_type: &str,
    ) -> Result<Receipt, Error> {
        info!(barcode, document_type, "fetching receipt detail");

        let variables = json!({
            "barcode": barcode,
            "documentType": document_type,
        });

        debug!(operation = "receiptsWithCounts", "executing graphql query");
        let result: ReceiptDetailData = self
            .execute_authenticated_query(RECEIPT_DETAIL_QUERY, variables)
            .await?;

        let receipt = result
            .receipts_with_counts
            .receipts
            .into_iter()
            .next()
            .ok_or_else(|| Error::ReceiptNotFound(barcode.to_owned()))?;

        info!(
            barcode,
            item_count = receipt.item_array.len(),
            total = receipt.total,
            "fetched receipt detail"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discount_item(description: &str, amount: f64, unit: i32) -> ReceiptItem {
        ReceiptItem {
            item_description01: description.to_owned(),
            amount,
            unit,
            ..Default::default()
        }
    }

    #[test]
    fn discount_lines_are_detected() {
        let item = discount_item("/1553261", -4.50, -1);
        assert!(item.is_discount());
        assert_eq!(item.parent_item_number(), Some("1553261"));
    }

    #[test]
    fn parent_number_tolerates_spaces() {
        let item = discount_item("/ 1857091", -2.00, -1);
        assert_eq!(item.parent_item_number(), Some("1857091"));
    }

    #[test]
    fn returns_are_not_discounts() {
        // refunds carry negative amounts but normal descriptions
        let item = discount_item("KS WATER 40CT", -5.99, -1);
        assert!(!item.is_discount());
        assert_eq!(item.parent_item_number(), None);
    }

    #[test]
    fn positive_lines_are_not_discounts() {
        let item = discount_item("/1553261", 4.50, 1);
        assert!(!item.is_discount());
    }

    #[test]
    fn fuel_receipt_mixed_invoice_number_decodes() {
        let receipt: Receipt = serde_json::from_value(json!({
            "warehouseName": "MERIDIAN",
            "receiptType": "Gas Station",
            "invoiceNumber": 123456,
            "sequenceNumber": "A-9",
            "total": 54.20
        }))
        .unwrap();

        assert_eq!(receipt.invoice_number, json!(123456));
        assert_eq!(receipt.sequence_number, json!("A-9"));
        assert_eq!(receipt.total, 54.20);
    }
}
