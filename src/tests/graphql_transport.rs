// Authenticated GraphQL exchange: headers, envelope handling, and the
// orders query surface.

#[cfg(test)]
mod test {
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::error::Error;
    use crate::tests::common::{
        fresh_credential, test_client, token_response_body, GRAPHQL_PATH, TOKEN_PATH,
    };

    #[tokio::test]
    async fn query_attaches_bearer_and_service_headers() {
        let token_server = MockServer::start_async().await;
        let graphql_server = MockServer::start_async().await;
        let gql = graphql_server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GRAPHQL_PATH)
                    .header("costco-x-authorization", "Bearer tok-1")
                    .header("client-identifier", "481b1aec-aa3b-454b-b81b-48187e28f205")
                    .header("costco.env", "ecom")
                    .header("costco.service", "restOrders")
                    .header("content-type", "application/json-patch+json")
                    .body_includes("getOnlineOrders");
                then.status(200).json_body(json!({
                    "data": {
                        "getOnlineOrders": [{
                            "pageNumber": 1,
                            "pageSize": 10,
                            "totalNumberOfRecords": 1,
                            "bcOrders": [{
                                "orderHeaderId": "12345",
                                "orderNumber": "ORD-001",
                                "orderTotal": 99.99,
                                "status": "Delivered",
                                "warehouseNumber": "847",
                                "orderLineItems": []
                            }]
                        }]
                    }
                }));
            })
            .await;

        let client = test_client(&token_server, &graphql_server, "hunter2");
        client.credentials.install(fresh_credential("tok-1")).await;

        let page = client
            .get_online_orders("2025-01-01", "2025-01-31", 1, 10)
            .await
            .unwrap();

        gql.assert_async().await;
        assert_eq!(page.total_number_of_records, 1);
        assert_eq!(page.bc_orders.len(), 1);
        assert_eq!(page.bc_orders[0].order_number, "ORD-001");
        assert_eq!(page.bc_orders[0].order_total, 99.99);
    }

    #[tokio::test]
    async fn stale_credential_is_renewed_before_the_query() {
        let token_server = MockServer::start_async().await;
        let graphql_server = MockServer::start_async().await;
        let auth = token_server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .form_urlencoded_tuple("grant_type", "password");
                then.status(200).json_body(token_response_body("R1"));
            })
            .await;
        graphql_server
            .mock_async(|when, then| {
                when.method(POST).path(GRAPHQL_PATH);
                then.status(200).json_body(json!({
                    "data": { "getOnlineOrders": [{ "pageNumber": 1, "bcOrders": [] }] }
                }));
            })
            .await;

        let client = test_client(&token_server, &graphql_server, "hunter2");

        client
            .get_online_orders("2025-01-01", "2025-01-31", 1, 10)
            .await
            .unwrap();

        assert_eq!(auth.hits_async().await, 1);
    }

    #[tokio::test]
    async fn semantic_errors_carry_every_message() {
        let token_server = MockServer::start_async().await;
        let graphql_server = MockServer::start_async().await;
        graphql_server
            .mock_async(|when, then| {
                when.method(POST).path(GRAPHQL_PATH);
                then.status(200).json_body(json!({
                    "data": null,
                    "errors": [
                        {"message": "invalid date range"},
                        {"message": "warehouse not found"}
                    ]
                }));
            })
            .await;

        let client = test_client(&token_server, &graphql_server, "hunter2");
        client.credentials.install(fresh_credential("tok-1")).await;

        let err = client
            .get_online_orders("2025-01-01", "2025-01-31", 1, 10)
            .await
            .unwrap_err();

        match err {
            Error::GraphQL(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages.contains(&"invalid date range".to_owned()));
                assert!(messages.contains(&"warehouse not found".to_owned()));
            }
            other => panic!("expected graphql error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_200_carries_status_and_body() {
        let token_server = MockServer::start_async().await;
        let graphql_server = MockServer::start_async().await;
        graphql_server
            .mock_async(|when, then| {
                when.method(POST).path(GRAPHQL_PATH);
                then.status(502).body("bad gateway");
            })
            .await;

        let client = test_client(&token_server, &graphql_server, "hunter2");
        client.credentials.install(fresh_credential("tok-1")).await;

        let err = client
            .get_online_orders("2025-01-01", "2025-01-31", 1, 10)
            .await
            .unwrap_err();

        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_orders_payload_is_a_no_data_error() {
        let token_server = MockServer::start_async().await;
        let graphql_server = MockServer::start_async().await;
        graphql_server
            .mock_async(|when, then| {
                when.method(POST).path(GRAPHQL_PATH);
                then.status(200)
                    .json_body(json!({"data": {"getOnlineOrders": []}, "errors": []}));
            })
            .await;

        let client = test_client(&token_server, &graphql_server, "hunter2");
        client.credentials.install(fresh_credential("tok-1")).await;

        let err = client
            .get_online_orders("2025-01-01", "2025-01-31", 1, 10)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoData("order")));
    }
}
