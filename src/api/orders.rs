//! Online order types and queries.
//!
//! GraphQL returns only the requested fields, so every container defaults
//! missing fields instead of failing the decode.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::api::queries::ONLINE_ORDERS_QUERY;
use crate::client::Client;
use crate::error::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnlineOrdersPage {
    pub page_number: i32,
    pub page_size: i32,
    pub total_number_of_records: i32,
    pub bc_orders: Vec<OnlineOrder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnlineOrder {
    pub order_header_id: String,
    pub order_placed_date: String,
    pub order_number: String,
    pub order_total: f64,
    pub warehouse_number: String,
    pub status: String,
    pub email_address: String,
    pub order_cancel_allowed: bool,
    pub order_payment_failed: bool,
    pub order_return_allowed: bool,
    pub order_line_items: Vec<OrderLineItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderLineItem {
    pub order_line_item_cancel_allowed: bool,
    pub order_line_item_id: String,
    pub order_return_allowed: bool,
    pub item_id: String,
    pub item_number: String,
    pub item_type_id: String,
    pub line_number: i32,
    pub item_description: String,
    pub delivery_date: String,
    pub warehouse_number: String,
    pub status: String,
    pub order_status: String,
    pub parent_order_line_item_id: String,
    #[serde(rename = "isFSAEligible")]
    pub is_fsa_eligible: bool,
    pub shipping_type: String,
    pub shipping_time_frame: String,
    pub is_ship_to_warehouse: bool,
    pub carrier_item_category: String,
    pub carrier_contact_phone: String,
    pub program_type_id: String,
    pub is_buy_again_eligible: bool,
    pub scheduled_delivery_date: String,
    pub scheduled_delivery_date_end: String,
    pub configured_item_data: String,
    pub shipment: Option<Shipment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shipment {
    pub shipment_id: String,
    pub order_header_id: String,
    pub order_ship_to_id: String,
    pub line_number: i32,
    pub order_number: String,
    pub shipping_type: String,
    pub shipping_time_frame: String,
    pub shipped_date: String,
    pub package_number: String,
    pub tracking_number: String,
    pub tracking_site_url: String,
    pub carrier_name: String,
    pub estimated_arrival_date: String,
    pub delivered_date: String,
    pub is_delivery_delayed: bool,
    pub is_estimated_arrival_date_eligible: bool,
    pub status_type_id: String,
    pub status: String,
    pub pick_up_ready_date: String,
    pub pick_up_completed_date: String,
    pub reason_code: String,
    pub tracking_event: Option<TrackingEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackingEvent {
    pub event: String,
    pub carrier_name: String,
    pub event_date: String,
    pub estimated_delivery_date: String,
    pub scheduled_delivery_date: String,
    pub tracking_number: String,
}

#[derive(Debug, Deserialize)]
struct OnlineOrdersData {
    #[serde(rename = "getOnlineOrders", default)]
    get_online_orders: Vec<OnlineOrdersPage>,
}

impl Client {
    /// Fetch one page of online orders in the date range (YYYY-MM-DD).
    pub async fn get_online_orders(
        &self,
        start_date: &str,
        end_date: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<OnlineOrdersPage, Error> {
        info!(
            start_date,
            end_date, page_number, page_size, "fetching online orders"
        );

        let variables = json!({
            "startDate": start_date,
            "endDate": end_date,
            "pageNumber": page_number,
            "pageSize": page_size,
            "warehouseNumber": self.config.warehouse_number,
        });

        debug!(operation = "getOnlineOrders", "executing graphql query");
        let result: OnlineOrdersData = self
            .execute_authenticated_query(ONLINE_ORDERS_QUERY, variables)
            .await?;

        let page = result
            .get_online_orders
            .into_iter()
            .next()
            .ok_or(Error::NoData("order"))?;

        info!(
            order_count = page.bc_orders.len(),
            date_range = format!("{} to {}", start_date, end_date),
            "fetched online orders"
        );
        Ok(page)
    }
}
