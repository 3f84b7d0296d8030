//! Convenience operations that combine receipt listing with per-receipt
//! detail lookups.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::receipts::ReceiptItem;
use crate::client::Client;
use crate::error::Error;

/// A receipt joined with its full item detail.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionWithItems {
    pub transaction_barcode: String,
    pub transaction_date: Option<NaiveDateTime>,
    pub warehouse_name: String,
    pub total: f64,
    pub items: Vec<ReceiptItem>,
    pub membership_number: String,
}

/// A single purchase instance of an item, as returned by
/// [`Client::get_item_history`].
#[derive(Debug, Clone, Serialize)]
pub struct ItemPurchase {
    /// YYYY-MM-DD.
    pub date: String,
    pub quantity: i32,
    pub price: f64,
    pub barcode: String,
}

const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl Client {
    /// Fetch every receipt in the range and pull full item detail for each.
    ///
    /// Receipts without a barcode are skipped, as are ones whose detail
    /// lookup fails (logged and continued — one unreadable receipt should
    /// not sink the batch). Dates are M/DD/YYYY.
    pub async fn get_all_transaction_items(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<TransactionWithItems>, Error> {
        info!(start_date, end_date, "fetching all transaction items");

        let listing = self.get_receipts(start_date, end_date, "all", "all").await?;

        let mut transactions = Vec::with_capacity(listing.receipts.len());
        for receipt in listing.receipts {
            if receipt.transaction_barcode.is_empty() {
                continue;
            }

            let document_type =
                if receipt.receipt_type == "Gas Station" || receipt.document_type == "fuel" {
                    "fuel"
                } else {
                    "warehouse"
                };

            let detail = match self
                .get_receipt_detail(&receipt.transaction_barcode, document_type)
                .await
            {
                Ok(detail) => detail,
                Err(err) => {
                    warn!(
                        barcode = %receipt.transaction_barcode,
                        document_type,
                        error = %err,
                        "failed to get receipt details"
                    );
                    continue;
                }
            };

            let transaction_date =
                NaiveDateTime::parse_from_str(&detail.transaction_date_time, TRANSACTION_DATE_FORMAT)
                    .ok();

            transactions.push(TransactionWithItems {
                transaction_barcode: detail.transaction_barcode,
                transaction_date,
                warehouse_name: detail.warehouse_name,
                total: detail.total,
                items: detail.item_array,
                membership_number: detail.membership_number,
            });
        }

        Ok(transactions)
    }

    /// All purchases of one item number in the range, in listing order.
    pub async fn get_item_history(
        &self,
        item_number: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<ItemPurchase>, Error> {
        let transactions = self.get_all_transaction_items(start_date, end_date).await?;

        let mut history = Vec::new();
        for tx in &transactions {
            for item in &tx.items {
                if item.item_number == item_number {
                    history.push(ItemPurchase {
                        date: tx
                            .transaction_date
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default(),
                        quantity: item.unit,
                        price: item.amount,
                        barcode: tx.transaction_barcode.clone(),
                    });
                }
            }
        }

        Ok(history)
    }
}
