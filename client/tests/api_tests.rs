//! REST client and service flow tests
//!
//! Tests against a mock backend including:
//! - Bare array and paginated envelope list decoding
//! - Backend error body decoding
//! - Sale creation with refinement snapshots
//! - Liquidation conflicts
//! - camelCase dashboard payload

use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

use chrono::NaiveDate;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use candango_erp_client::config::DashboardConfig;
use candango_erp_client::error::ApiErrorBody;
use candango_erp_client::services::costs::{CostLineDraft, RefinementDraft};
use candango_erp_client::services::sales::{SaleDraft, SaleItemDraft};
use candango_erp_client::{AppError, Erp, ErpClient};
use shared::{SaleStatus, SaleType};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "code": format!("PRD-{:03}", id),
        "name": "Camiseta Básica",
        "unit": "un",
        "purchase_price": "10.00",
        "current_stock": "20",
        "min_stock": "5",
        "max_stock": "100",
        "active": true,
        "created_at": "2025-01-10T12:00:00Z",
        "updated_at": "2025-01-10T12:00:00Z"
    })
}

fn customer_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "code": format!("CLI-{:03}", id),
        "name": "Atacadão do Vestuário",
        "active": true,
        "created_at": "2025-01-10T12:00:00Z",
        "updated_at": "2025-01-10T12:00:00Z"
    })
}

fn company_json() -> serde_json::Value {
    json!({
        "id": 1,
        "razao_social": "Candango Confecções Ltda",
        "cnpj": "11.222.333/0001-81",
        "active": true,
        "created_at": "2025-01-10T12:00:00Z",
        "updated_at": "2025-01-10T12:00:00Z"
    })
}

fn cost_entry_json(
    id: i64,
    cost_type: &str,
    value: &str,
    locked: Option<(i64, &str)>,
) -> serde_json::Value {
    let mut entry = json!({
        "id": id,
        "product": 10,
        "product_name": "Camiseta Polo",
        "product_code": "CAM-001",
        "description": format!("Custo de {}", cost_type),
        "cost_type": cost_type,
        "value": value,
        "date": "2025-01-10",
        "refinement_code": "REF-CAM-000001",
        "refinement_name": "Lote camisetas",
        "is_locked": false,
        "created_at": "2025-01-10T12:00:00Z",
        "updated_at": "2025-01-10T12:00:00Z"
    });
    if let Some((sale, number)) = locked {
        entry["is_locked"] = json!(true);
        entry["locked_by_sale"] = json!(sale);
        entry["locked_by_sale_number"] = json!(number);
    }
    entry
}

fn sale_json(id: i64, number: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "sale_number": number,
        "sale_type": "venda",
        "sale_date": "2025-01-15",
        "total_amount": "10.00",
        "discount": "0.00",
        "final_amount": "10.00",
        "tax_percentage": "0.00",
        "status": status,
        "created_at": "2025-01-15T09:00:00Z",
        "updated_at": "2025-01-15T09:00:00Z"
    })
}

fn sale_with_item_json(id: i64, number: &str, refinement_code: &str) -> serde_json::Value {
    let mut sale = sale_json(id, number, "producao");
    sale["items"] = json!([{
        "id": 31,
        "product": 10,
        "quantity": "1",
        "unit_price": "100.00",
        "unit_cost": "80.00",
        "cost_refinement_code": refinement_code,
        "discount": "0",
        "tax": "0",
        "freight": "0",
        "total_price": "100.00",
        "total_cost": "80.00",
        "profit": "20.00"
    }]);
    sale
}

fn sale_draft(refinement_code: Option<&str>) -> SaleDraft {
    SaleDraft {
        sale_number: Some("00010".to_string()),
        sale_type: SaleType::Venda,
        customer_id: Some(1),
        sale_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        discount: Decimal::ZERO,
        payment_method: None,
        nf: None,
        tax_percentage: Decimal::ZERO,
        status: SaleStatus::Producao,
        notes: None,
        items: vec![SaleItemDraft {
            product_id: 10,
            purchase_price: dec("999.00"),
            quantity: Decimal::ONE,
            unit_price: dec("10.00"),
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            freight: Decimal::ZERO,
            refinement_code: refinement_code.map(String::from),
        }],
    }
}

fn erp(server: &MockServer) -> Erp {
    Erp::with_base_url(&server.uri(), DashboardConfig::default())
}

// ============================================================================
// List decoding
// ============================================================================

#[tokio::test]
async fn test_list_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(1)])))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    let products = client.products.list(&Default::default()).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].code, "PRD-001");
}

#[tokio::test]
async fn test_list_accepts_paginated_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [customer_json(1), customer_json(2)]
        })))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    let customers = client.customers.list(None).await.unwrap();

    assert_eq!(customers.len(), 2);
}

// ============================================================================
// Error decoding
// ============================================================================

#[tokio::test]
async fn test_field_error_body_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"value": ["Informe um número válido."]})),
        )
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    let err = client.products.list(&Default::default()).await.unwrap_err();

    match err {
        AppError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body.field(), Some("value"));
            assert_eq!(body.primary_message(), "value: Informe um número válido.");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detail_error_body_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    let err = client.sales.get(99).await.unwrap_err();

    match err {
        AppError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, ApiErrorBody::Message("Not found.".to_string()));
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

// ============================================================================
// Sales endpoints
// ============================================================================

#[tokio::test]
async fn test_next_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales/next_number/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"next_number": "00042"})))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());

    assert_eq!(client.sales.next_number().await.unwrap(), "00042");
}

/// The chosen refinement becomes the item's unit cost and snapshot
#[tokio::test]
async fn test_sale_creation_snapshots_refinement() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/production-costs/"))
        .and(query_param("refinement_code", "REF-CAM-000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            cost_entry_json(1, "tipo_tecido", "50.00", None),
            cost_entry_json(2, "costura", "30.00", None)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sales/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(sale_json(5, "00010", "producao")))
        .mount(&server)
        .await;

    let erp = erp(&server);
    let sale = erp
        .sales
        .create_sale(&sale_draft(Some("REF-CAM-000001")))
        .await
        .unwrap();
    assert_eq!(sale.sale_number, "00010");

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/sales/" && r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();

    // Refinement total wins over the product purchase price
    assert_eq!(body["items"][0]["unit_cost"], json!("80.00"));
    assert_eq!(body["items"][0]["cost_snapshot"]["total"], json!("80.00"));
    assert_eq!(
        body["items"][0]["cost_snapshot"]["breakdown"]["costura"],
        json!("30.00")
    );
    assert_eq!(body["items"][0]["cost_snapshot"]["cost_ids"], json!([1, 2]));
    assert_eq!(body["total_amount"], json!("10.00"));
}

/// Without a refinement the purchase price is the unit cost
#[tokio::test]
async fn test_sale_creation_falls_back_to_purchase_price() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sales/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(sale_json(5, "00010", "producao")))
        .mount(&server)
        .await;

    let erp = erp(&server);
    erp.sales.create_sale(&sale_draft(None)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/sales/" && r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();

    assert_eq!(body["items"][0]["unit_cost"], json!("999.00"));
    assert_eq!(body["items"][0]["cost_snapshot"], json!(null));
}

/// A refinement already claimed by another sale aborts the creation
#[tokio::test]
async fn test_sale_creation_blocked_when_refinement_liquidated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/production-costs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            cost_entry_json(1, "tipo_tecido", "50.00", Some((7, "00007")))
        ])))
        .mount(&server)
        .await;

    let erp = erp(&server);
    let err = erp
        .sales
        .create_sale(&sale_draft(Some("REF-CAM-000001")))
        .await
        .unwrap_err();

    match err {
        AppError::RefinementLocked { code, sale_number } => {
            assert_eq!(code, "REF-CAM-000001");
            assert_eq!(sale_number, "00007");
        }
        other => panic!("expected lock conflict, got {:?}", other),
    }
}

/// Liquidation fails when another sale claimed a referenced refinement
#[tokio::test]
async fn test_liquidate_blocks_lock_held_by_other_sale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales/5/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sale_with_item_json(5, "00005", "REF-CAM-000001")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/production-costs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            cost_entry_json(1, "tipo_tecido", "50.00", Some((7, "00007")))
        ])))
        .mount(&server)
        .await;

    let erp = erp(&server);
    let err = erp.sales.liquidate(5).await.unwrap_err();

    assert!(matches!(err, AppError::RefinementLocked { .. }));
}

/// A lock held by the sale itself does not block its liquidation
#[tokio::test]
async fn test_liquidate_allows_own_lock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales/5/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sale_with_item_json(5, "00005", "REF-CAM-000001")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/production-costs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            cost_entry_json(1, "tipo_tecido", "50.00", Some((5, "00005")))
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/sales/5/"))
        .and(body_json(json!({"status": "liquidado"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(sale_json(5, "00005", "liquidado")))
        .mount(&server)
        .await;

    let erp = erp(&server);
    let sale = erp.sales.liquidate(5).await.unwrap();

    assert_eq!(sale.status, SaleStatus::Liquidado);
}

// ============================================================================
// Refinement creation
// ============================================================================

/// One cost entry is posted per draft line, all under one fresh code
#[tokio::test]
async fn test_refinement_creation_fans_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/production-costs/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(cost_entry_json(1, "costura", "30.00", None)),
        )
        .mount(&server)
        .await;

    let erp = erp(&server);
    let draft = RefinementDraft {
        product_id: 10,
        product_code: "CAM-001".to_string(),
        refinement_name: "Lote camisetas".to_string(),
        customer_id: None,
        date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        notes: None,
        lines: vec![
            CostLineDraft {
                cost_type: "tipo_tecido".to_string(),
                description: "Malha fria".to_string(),
                value: dec("50.00"),
            },
            CostLineDraft {
                cost_type: "costura".to_string(),
                description: "Costura reta".to_string(),
                value: dec("30.00"),
            },
        ],
    };

    let created = erp.costs.create_refinement(&draft).await.unwrap();
    assert_eq!(created.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let posts: Vec<serde_json::Value> = requests
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();

    assert_eq!(posts.len(), 2);
    let code = posts[0]["refinement_code"].as_str().unwrap();
    assert!(code.starts_with("REF-CAM-001-"));
    assert_eq!(posts[1]["refinement_code"], json!(code));
    assert_eq!(posts[1]["refinement_name"], json!("Lote camisetas"));
}

/// Draft validation fails before any request is made
#[tokio::test]
async fn test_draft_validation_short_circuits() {
    // Unroutable port: any HTTP attempt would error out loudly
    let erp = Erp::with_base_url("http://127.0.0.1:9", DashboardConfig::default());

    let empty = RefinementDraft {
        product_id: 10,
        product_code: "CAM-001".to_string(),
        refinement_name: "Lote".to_string(),
        customer_id: None,
        date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        notes: None,
        lines: Vec::new(),
    };
    match erp.costs.create_refinement(&empty).await.unwrap_err() {
        AppError::Validation { field, .. } => assert_eq!(field, "lines"),
        other => panic!("expected validation error, got {:?}", other),
    }

    let mut duplicated = empty.clone();
    duplicated.lines = vec![
        CostLineDraft {
            cost_type: "costura".to_string(),
            description: "Primeira".to_string(),
            value: dec("10.00"),
        },
        CostLineDraft {
            cost_type: "costura".to_string(),
            description: "Segunda".to_string(),
            value: dec("15.00"),
        },
    ];
    match erp.costs.create_refinement(&duplicated).await.unwrap_err() {
        AppError::Validation { field, .. } => assert_eq!(field, "cost_type"),
        other => panic!("expected validation error, got {:?}", other),
    }

    let mut no_items = sale_draft(None);
    no_items.items.clear();
    match erp.sales.create_sale(&no_items).await.unwrap_err() {
        AppError::Validation { field, .. } => assert_eq!(field, "items"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

// ============================================================================
// Company and dashboard
// ============================================================================

#[tokio::test]
async fn test_company_current_takes_first_or_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    assert!(client.company.current().await.unwrap().is_none());

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([company_json()])))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    let company = client.company.current().await.unwrap().unwrap();
    assert_eq!(company.razao_social, "Candango Confecções Ltda");
}

/// The dashboard endpoint answers in camelCase and takes month/year
#[tokio::test]
async fn test_dashboard_summary_camel_case() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .and(query_param("month", "1"))
        .and(query_param("year", "2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalProducts": 12,
            "totalCustomers": 4,
            "totalSuppliers": 2,
            "lowStockProducts": [product_json(1)],
            "recentMovements": [],
            "recentSales": [],
            "monthlyResult": "150.00"
        })))
        .mount(&server)
        .await;

    let client = ErpClient::with_base_url(&server.uri());
    let summary = client
        .dashboard
        .summary(Some(shared::MonthRef::new(2025, 1)))
        .await
        .unwrap();

    assert_eq!(summary.total_products, 12);
    assert_eq!(summary.total_customers, 4);
    assert_eq!(summary.low_stock_products.len(), 1);
    assert_eq!(summary.monthly_result, Some(dec("150.00")));
}
