//! Tests for catalog module

use super::*;
use crate::engine::{EngineConfig, PaginationEngine};
use crate::error::Error;
use crate::graphql::GraphQlClient;
use crate::http::{HttpClient, RetryPolicy};
use crate::queries;
use reqwest::header::HeaderMap;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// TypeNames Tests
// ============================================================================

#[test_case("product variant", "ProductVariant" ; "spaces")]
#[test_case("product_variant", "ProductVariant" ; "underscores")]
#[test_case("productVariant", "ProductVariant" ; "camel case")]
#[test_case("Shopify ProductTag", "ShopifyProductTag" ; "prefixed")]
#[test_case("PRICE", "Price" ; "all caps")]
#[test_case("", "" ; "empty")]
fn test_pascal_case(input: &str, expected: &str) {
    assert_eq!(pascal_case(input), expected);
}

#[test]
fn test_default_type_names() {
    let names = TypeNames::default();
    assert_eq!(names.article, "ShopifyArticle");
    assert_eq!(names.blog, "ShopifyBlog");
    assert_eq!(names.collection, "ShopifyCollection");
    assert_eq!(names.product, "ShopifyProduct");
    assert_eq!(names.product_variant, "ShopifyProductVariant");
    assert_eq!(names.page, "ShopifyPage");
    assert_eq!(names.product_type, "ShopifyProductType");
    assert_eq!(names.product_tag, "ShopifyProductTag");
    assert_eq!(names.image, IMAGE_TYPE);
    assert_eq!(names.price, PRICE_TYPE);
    assert_eq!(names.all().len(), 10);
}

#[test]
fn test_blank_prefix_still_prefixes_page() {
    let names = TypeNames::new("");
    assert_eq!(names.product, "Product");
    assert_eq!(names.page, "ShopifyPage");
    assert_eq!(names.image, "ShopifyImage");
}

#[test]
fn test_custom_prefix() {
    let names = TypeNames::new("store");
    assert_eq!(names.collection, "StoreCollection");
    assert_eq!(names.create("product variant"), "StoreProductVariant");
}

#[test]
fn test_included_types() {
    let names = TypeNames::default();
    assert_eq!(names.included(&[]).len(), 10);

    let included = names.included(&["product".to_string(), "Collection".to_string()]);
    assert_eq!(included, vec!["ShopifyProduct", "ShopifyCollection"]);
}

#[test_case("price", "gid://Variant/1/Price" ; "single segment")]
#[test_case("unitPrice", "gid://Variant/1/UnitPrice" ; "camel case")]
#[test_case("/priceRange/MinVariantPrice", "gid://Variant/1/PriceRange/MinVariantPrice" ; "nested")]
fn test_derived_id(name: &str, expected: &str) {
    assert_eq!(derived_id("gid://Variant/1", name), expected);
}

// ============================================================================
// NodeStore Tests
// ============================================================================

#[test]
fn test_store_add_and_get() {
    let mut store = NodeStore::new();
    store.add_collection("ShopifyBlog");

    let reference = store
        .add_node("ShopifyBlog", json!({"id": "b1", "title": "News"}))
        .unwrap();

    assert_eq!(reference, json!({"typeName": "ShopifyBlog", "id": "b1"}));
    let blogs = store.get("ShopifyBlog").unwrap();
    assert_eq!(blogs.len(), 1);
    assert_eq!(blogs.get("b1").unwrap()["title"], "News");
    assert!(store.get("ShopifyPage").is_none());
}

#[test]
fn test_store_add_collection_is_idempotent() {
    let mut store = NodeStore::new();
    store.add_collection("A");
    store.add_node("A", json!({"id": "1"})).unwrap();
    store.add_collection("A");

    assert_eq!(store.collections().len(), 1);
    assert_eq!(store.node_count(), 1);
}

#[test]
fn test_store_rejects_unknown_collection() {
    let mut store = NodeStore::new();
    let err = store.add_node("Missing", json!({"id": "1"})).unwrap_err();
    assert!(matches!(err, Error::UnknownCollection { ref type_name } if type_name == "Missing"));
}

#[test]
fn test_store_rejects_nodes_without_id() {
    let mut store = NodeStore::new();
    store.add_collection("A");

    assert!(matches!(
        store.add_node("A", json!({"title": "x"})),
        Err(Error::InvalidNode { .. })
    ));
    assert!(matches!(
        store.add_node("A", json!("bare")),
        Err(Error::InvalidNode { .. })
    ));
}

#[test]
fn test_store_duplicate_id_replaces_in_place() {
    let mut store = NodeStore::new();
    store.add_collection("A");
    store.add_node("A", json!({"id": "1", "v": 1})).unwrap();
    store.add_node("A", json!({"id": "2", "v": 2})).unwrap();
    store.add_node("A", json!({"id": "1", "v": 3})).unwrap();

    let nodes = store.get("A").unwrap().nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["v"], 3);
    assert_eq!(nodes[1]["v"], 2);
}

#[test]
fn test_store_serializes_in_creation_order() {
    let mut store = NodeStore::new();
    store.add_collection("Zeta");
    store.add_collection("Alpha");
    store.add_node("Alpha", json!({"id": "a"})).unwrap();

    let serialized = serde_json::to_string(&store).unwrap();
    assert_eq!(serialized, r#"{"Zeta":[],"Alpha":[{"id":"a"}]}"#);
}

// ============================================================================
// CatalogLoader Tests
// ============================================================================

fn engine_for(server: &MockServer) -> PaginationEngine {
    let http = HttpClient::new(
        server.uri(),
        HeaderMap::new(),
        Duration::from_secs(5),
        RetryPolicy::new(0, Duration::ZERO),
    )
    .unwrap();
    PaginationEngine::with_config(
        GraphQlClient::new(http),
        EngineConfig::new().with_page_backoff(Duration::ZERO),
    )
}

fn connection(nodes: Vec<Value>, type_name: Option<&str>) -> Value {
    let edges: Vec<Value> = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let mut edge = json!({"cursor": format!("c{i}"), "node": node});
            if let Some(type_name) = type_name {
                edge["typeName"] = json!(type_name);
            }
            edge
        })
        .collect();
    json!({"data": {"data": {"edges": edges, "pageInfo": {"hasNextPage": false}}}})
}

async fn mount_query(server: &MockServer, query: &str, body: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"query": query})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn money(amount: &str) -> Value {
    json!({"amount": amount, "currencyCode": "EUR"})
}

#[tokio::test]
async fn test_loader_builds_products_with_references() {
    let server = MockServer::start().await;
    mount_query(
        &server,
        queries::PRODUCTS_QUERY,
        connection(
            vec![json!({
                "id": "p1",
                "title": "Shirt",
                "collections": {"edges": [{"node": {"id": "col1"}}]},
                "priceRange": {"minVariantPrice": money("10.0"), "maxVariantPrice": money("20.0")},
                "compareAtPriceRange": {"minVariantPrice": money("0.0"), "maxVariantPrice": money("0.0")},
                "images": {"edges": [{"node": {"id": "img1", "url": "https://cdn/1.png"}}]},
                "variants": {"edges": [{"node": {
                    "id": "v1",
                    "image": {"id": "img1"},
                    "price": money("10.0"),
                    "unitPrice": null,
                    "compareAtPrice": money("12.0")
                }}]}
            })],
            Some("ProductEdge"),
        ),
    )
    .await;

    let loader = CatalogLoader::new(TypeNames::default(), &["Product".to_string()], 50);
    let mut engine = engine_for(&server);
    let store = loader.load(&mut engine).await.unwrap();

    let product = store.get("ShopifyProduct").unwrap().get("p1").unwrap();
    assert_eq!(
        product["collections"],
        json!([{"typeName": "ShopifyCollection", "id": "col1"}])
    );
    assert_eq!(
        product["priceRange"]["minVariantPrice"],
        json!({"typeName": "ShopifyPrice", "id": "p1/PriceRange/MinVariantPrice"})
    );
    assert_eq!(
        product["images"],
        json!([{"typeName": "ShopifyImage", "id": "img1"}])
    );
    assert_eq!(
        product["variants"],
        json!([{"typeName": "ShopifyProductVariant", "id": "v1"}])
    );

    let variant = store.get("ShopifyProductVariant").unwrap().get("v1").unwrap();
    assert_eq!(variant["image"], json!({"typeName": "ShopifyImage", "id": "img1"}));
    assert_eq!(variant["price"]["id"], "v1/Price");

    let prices = store.get("ShopifyPrice").unwrap();
    assert_eq!(prices.len(), 7);
    assert_eq!(prices.get("v1/Price").unwrap()["amount"], "10.0");
    assert_eq!(prices.get("v1/UnitPrice").unwrap().len(), 1);
    assert_eq!(
        prices.get("p1/CompareAtPriceRange/MaxVariantPrice").unwrap()["currencyCode"],
        "EUR"
    );
    assert_eq!(store.get("ShopifyImage").unwrap().len(), 1);
    assert!(store.get("ShopifyCollection").is_none());
}

#[tokio::test]
async fn test_loader_collections_reference_products() {
    let server = MockServer::start().await;
    let collection = json!({
        "id": "col1",
        "handle": "frontpage",
        "image": {"id": "img9", "url": "https://cdn/9.png"},
        "products": {
            "edges": [{"cursor": "pc0", "node": {"id": "p1"}}, {"cursor": "pc1", "node": {"id": "p2"}}],
            "pageInfo": {"hasNextPage": false}
        }
    });
    mount_query(
        &server,
        queries::COLLECTIONS_QUERY,
        connection(vec![collection], Some(queries::COLLECTION_EDGE)),
    )
    .await;

    let loader = CatalogLoader::new(TypeNames::default(), &["Collection".to_string()], 50);
    let store = loader.load(&mut engine_for(&server)).await.unwrap();

    let collection = store.get("ShopifyCollection").unwrap().get("col1").unwrap();
    assert_eq!(
        collection["products"],
        json!([
            {"typeName": "ShopifyProduct", "id": "p1"},
            {"typeName": "ShopifyProduct", "id": "p2"}
        ])
    );
    assert_eq!(collection["image"], json!({"typeName": "ShopifyImage", "id": "img9"}));
    assert_eq!(
        store.get("ShopifyImage").unwrap().get("img9").unwrap()["url"],
        "https://cdn/9.png"
    );
}

#[tokio::test]
async fn test_loader_titles_skip_empty_strings() {
    let server = MockServer::start().await;
    mount_query(
        &server,
        queries::PRODUCT_TYPES_QUERY,
        connection(vec![json!("Shirts"), json!(""), json!("Hats")], None),
    )
    .await;

    let loader = CatalogLoader::new(TypeNames::default(), &["ProductType".to_string()], 50);
    let store = loader.load(&mut engine_for(&server)).await.unwrap();

    let types = store.get("ShopifyProductType").unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types.nodes()[0]["title"], "Shirts");
    assert_eq!(types.nodes()[1]["title"], "Hats");
}

#[tokio::test]
async fn test_loader_articles_link_blog_only_when_included() {
    let article = json!({
        "id": "a1",
        "blog": {"id": "b1"},
        "image": null
    });

    let server = MockServer::start().await;
    mount_query(&server, queries::ARTICLES_QUERY, connection(vec![article.clone()], None)).await;
    mount_query(
        &server,
        queries::BLOGS_QUERY,
        connection(vec![json!({"id": "b1", "title": "News"})], None),
    )
    .await;

    let with_blogs = CatalogLoader::new(
        TypeNames::default(),
        &["Article".to_string(), "Blog".to_string()],
        50,
    );
    let store = with_blogs.load(&mut engine_for(&server)).await.unwrap();
    let loaded = store.get("ShopifyArticle").unwrap().get("a1").unwrap();
    assert_eq!(loaded["blog"], json!({"typeName": "ShopifyBlog", "id": "b1"}));
    assert!(loaded.get("image").is_none());

    let without_blogs = CatalogLoader::new(TypeNames::default(), &["Article".to_string()], 50);
    let store = without_blogs.load(&mut engine_for(&server)).await.unwrap();
    let loaded = store.get("ShopifyArticle").unwrap().get("a1").unwrap();
    assert_eq!(loaded["blog"], json!({"id": "b1"}));
}

#[tokio::test]
async fn test_loader_creates_setup_collections_first() {
    let server = MockServer::start().await;
    mount_query(
        &server,
        queries::PAGES_QUERY,
        connection(vec![json!({"id": "pg1", "title": "About"})], None),
    )
    .await;

    let loader = CatalogLoader::new(TypeNames::default(), &["Page".to_string()], 50);
    let store = loader.load(&mut engine_for(&server)).await.unwrap();

    let order: Vec<&str> = store
        .collections()
        .iter()
        .map(NodeCollection::type_name)
        .collect();
    assert_eq!(order, vec!["ShopifyPrice", "ShopifyImage", "ShopifyPage"]);
}

#[tokio::test]
async fn test_loader_sends_per_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"first": 7}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(connection(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let loader = CatalogLoader::new(TypeNames::default(), &["Blog".to_string()], 7);
    let store = loader.load(&mut engine_for(&server)).await.unwrap();
    assert!(store.get("ShopifyBlog").unwrap().is_empty());
}
