pub mod orders;
pub mod queries;
pub mod receipts;
pub mod transactions;

pub use orders::{OnlineOrder, OnlineOrdersPage, OrderLineItem, Shipment, TrackingEvent};
pub use receipts::{Receipt, ReceiptItem, ReceiptsWithCounts, SubTaxes, Tender};
pub use transactions::{ItemPurchase, TransactionWithItems};
