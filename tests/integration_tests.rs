// Integration tests for the Inmo Panel data service

use std::sync::Arc;

use actix_web::{test, web, App};
use inmo_panel::config::SourceSettings;
use inmo_panel::core::{BrandTagger, ZoneTagger};
use inmo_panel::models::{
    AnalyticsResponse, ClientQueryResponse, HealthResponse, MatchGroupsResponse,
    PropertyQueryResponse,
};
use inmo_panel::routes::{configure_routes, AppState};
use inmo_panel::services::{
    sample_properties, CatalogClient, DatasetStore, Datasets, PropertySource,
};
use inmo_panel::{parse_clients, parse_matches};

const MATCH_HEADER: &str = "client_id,client_name,property_id,link_inmueble,web,anunciante,zona,operacion,tipo,habitaciones,banos,m2,precio,score,s_price,s_area,s_rooms,s_baths,s_operation,zone_match,type_match,rank_client";

const CLIENT_HEADER: &str = "id,nombre,telefono,mail,fecha_inclusion,creado_info,operation,types,conditions,rooms_min,rooms_max,bath_min,bath_max,living_min,living_max,area_min_m2,area_max_m2,price_min_eur,price_max_eur,locations,flags,zona_std";

fn dead_sources() -> SourceSettings {
    SourceSettings {
        properties_url: "http://127.0.0.1:1/inmuebles.csv".to_string(),
        matches_url: "http://127.0.0.1:1/matches.csv".to_string(),
        clients_url: "http://127.0.0.1:1/contacts.csv".to_string(),
        properties_delimiter: ";".to_string(),
    }
}

fn sample_matches_csv() -> String {
    format!(
        "{MATCH_HEADER}\n\
         c1,Ana Pérez,1,https://ejemplo.com/propiedad1,Idealista,Inmobiliaria JBC,Centro,venta,piso,3,2,85,350000,0.91,0.9,0.9,1,1,1,exact,exact,1\n\
         c1,Ana Pérez,3,https://ejemplo.com/propiedad3,Idealista,HomeFinder,Chamberí,venta,piso,4,3,120,520000,0.74,0.7,0.8,0.5,1,1,partial,exact,2\n\
         c2,Luis Gil,1,https://ejemplo.com/propiedad1,Idealista,Inmobiliaria JBC,Centro,venta,piso,3,2,85,350000,0.83,0.8,0.9,1,1,1,exact,exact,1"
    )
}

fn sample_clients_csv() -> String {
    format!(
        "{CLIENT_HEADER}\n\
         c1,\"Pérez, Ana\",600111222,ana@mail.es,2024-03-01,web,venta,\"['piso']\",[],2,3,1,null,,,60,120,150000,400000,\"['Centro']\",[],Centro\n\
         c2,Luis Gil,600333444,luis@mail.es,2024-03-02,oficina,venta,[],[],,,,,,,,,,,[],[],"
    )
}

fn test_state() -> AppState {
    let store = DatasetStore::new(CatalogClient::new(dead_sources()), ';');
    store.install(Datasets::new(
        sample_properties(),
        parse_matches(&sample_matches_csv()),
        parse_clients(&sample_clients_csv()),
        PropertySource::Sample,
    ));

    AppState {
        store: Arc::new(store),
        brands: BrandTagger::new(&["jbc".to_string()]),
        zones: ZoneTagger::new(&["centro".to_string()]),
        per_page: 30,
    }
}

#[actix_web::test]
async fn test_health_reports_dataset_counts() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(health.status, "healthy");
    assert_eq!(health.properties, sample_properties().len());
    assert_eq!(health.matches, 3);
    assert_eq!(health.clients, 2);
    assert_eq!(health.property_source, PropertySource::Sample);
}

#[actix_web::test]
async fn test_property_query_filters_and_paginates() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/properties/query")
        .set_json(serde_json::json!({
            "filters": {"operations": ["sale"], "price": {"max": 400000}},
            "sort": "price",
            "direction": "desc"
        }))
        .to_request();
    let response: PropertyQueryResponse = test::call_and_read_body_json(&app, req).await;

    assert!(!response.items.is_empty());
    // Descending prices within the sale/price<=400000 subset
    let prices: Vec<f64> = response.items.iter().map(|p| p.price).collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(prices, sorted);
    assert!(prices.iter().all(|p| *p <= 400000.0));
    // Facets describe the full collection, not the filtered subset
    assert!(response.facets.zones.contains(&"Salamanca".to_string()));
}

#[actix_web::test]
async fn test_property_query_rejects_page_zero() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/properties/query")
        .set_json(serde_json::json!({"page": 0}))
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn test_client_query_searches_free_text() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients/query")
        .set_json(serde_json::json!({"search": "ana"}))
        .to_request();
    let response: ClientQueryResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.total_items, 1);
    assert_eq!(response.items[0].name, "Pérez, Ana");
    assert_eq!(response.summary.with_budget, 1);
}

#[actix_web::test]
async fn test_match_groups_aggregate_per_client() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/groups")
        .set_json(serde_json::json!({}))
        .to_request();
    let response: MatchGroupsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.summary.total_clients, 2);
    assert_eq!(response.summary.total_matches, 3);
    assert_eq!(response.summary.high_quality, 2);

    // Ana has two matches and sorts first; her JBC listing counts as own-brand
    let ana = &response.groups[0];
    assert_eq!(ana.client_id, "c1");
    assert_eq!(ana.total, 2);
    assert_eq!(ana.own_brand, 1);
    assert_eq!(ana.competitor, 1);
    let ranks: Vec<u32> = ana.matches.iter().map(|m| m.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[actix_web::test]
async fn test_match_groups_score_window() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/groups")
        .set_json(serde_json::json!({"score": {"min": 0.8}}))
        .to_request();
    let response: MatchGroupsResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.summary.total_matches, 2);
    assert!(response
        .groups
        .iter()
        .flat_map(|g| g.matches.iter())
        .all(|m| m.score >= 0.8));
}

#[actix_web::test]
async fn test_analytics_reports_strategic_zones() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/analytics").to_request();
    let response: AnalyticsResponse = test::call_and_read_body_json(&app, req).await;

    let report = response.report.expect("report for loaded properties");
    assert_eq!(report.total_properties, sample_properties().len());
    assert!(report.total_sales > 0);
    assert!(report.zones.iter().any(|z| z.zone == "Centro" && z.strategic));
}

#[actix_web::test]
async fn test_reload_fetches_remote_catalog() {
    let mut server = mockito::Server::new_async().await;

    let properties_csv = "habitaciones;baños;precio;link_inmueble;metros_cuadrados;anunciante;zona;web;fecha_inclusion;tipo_de_operacion\n3;2;300000;https://x/1;90;Acme;Centro;Idealista;2024-05-01;Venta";
    let _properties = server
        .mock("GET", "/inmuebles_unificado.csv")
        .with_status(200)
        .with_body(properties_csv)
        .create_async()
        .await;
    let _matches = server
        .mock("GET", "/matches.csv")
        .with_status(200)
        .with_body(sample_matches_csv())
        .create_async()
        .await;
    // Clients endpoint fails; the store must fall back to an empty list
    let _clients = server
        .mock("GET", "/contacts_today_parsed.csv")
        .with_status(500)
        .create_async()
        .await;

    let sources = SourceSettings {
        properties_url: format!("{}/inmuebles_unificado.csv", server.url()),
        matches_url: format!("{}/matches.csv", server.url()),
        clients_url: format!("{}/contacts_today_parsed.csv", server.url()),
        properties_delimiter: ";".to_string(),
    };
    let store = DatasetStore::new(CatalogClient::new(sources), ';');
    let datasets = store.reload().await;

    assert_eq!(datasets.property_source, PropertySource::Remote);
    assert_eq!(datasets.properties.len(), 1);
    assert_eq!(datasets.properties[0].zone, "Centro");
    assert_eq!(datasets.matches.len(), 3);
    assert!(datasets.clients.is_empty());
}
