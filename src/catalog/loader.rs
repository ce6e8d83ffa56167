//! Catalog loader
//!
//! Runs every built-in query through the pagination engine and turns the
//! items into nodes, replacing nested objects with references.

use super::store::NodeStore;
use super::typenames::{derived_id, TypeNames};
use crate::config::ResolvedConfig;
use crate::engine::PaginationEngine;
use crate::error::{Error, Result};
use crate::queries::{self, QuerySpec};
use crate::types::{variables, JsonObject, JsonValue};
use serde_json::json;
use tracing::info;

/// Loads a store's catalog into a [`NodeStore`]
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    type_names: TypeNames,
    included: Vec<String>,
    per_page: u32,
}

impl CatalogLoader {
    pub fn new(type_names: TypeNames, types: &[String], per_page: u32) -> Self {
        let included = type_names.included(types);
        Self {
            type_names,
            included,
            per_page,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            TypeNames::new(&config.type_name),
            &config.types,
            config.per_page,
        )
    }

    pub fn type_names(&self) -> &TypeNames {
        &self.type_names
    }

    /// Type names that will be loaded
    pub fn included(&self) -> &[String] {
        &self.included
    }

    pub fn is_included(&self, type_name: &str) -> bool {
        self.included.iter().any(|t| t == type_name)
    }

    /// Load every included type, in a fixed order
    pub async fn load(&self, engine: &mut PaginationEngine) -> Result<NodeStore> {
        let mut store = NodeStore::new();

        store.add_collection(&self.type_names.price);
        store.add_collection(&self.type_names.image);

        let names = &self.type_names;
        self.load_titles(engine, &mut store, queries::product_types(), &names.product_type)
            .await?;
        self.load_titles(engine, &mut store, queries::product_tags(), &names.product_tag)
            .await?;
        self.load_collections(engine, &mut store).await?;
        self.load_products(engine, &mut store).await?;
        self.load_plain(engine, &mut store, queries::blogs(), &names.blog)
            .await?;
        self.load_articles(engine, &mut store).await?;
        self.load_plain(engine, &mut store, queries::pages(), &names.page)
            .await?;

        info!(
            "Loaded {} node(s) across {} collection(s)",
            store.node_count(),
            store.collections().len()
        );
        Ok(store)
    }

    async fn fetch(
        &self,
        engine: &mut PaginationEngine,
        spec: &QuerySpec,
    ) -> Result<Vec<JsonValue>> {
        engine
            .fetch_all(spec, variables([("first", self.per_page)]))
            .await
    }

    /// Product types and tags arrive as bare strings
    async fn load_titles(
        &self,
        engine: &mut PaginationEngine,
        store: &mut NodeStore,
        spec: QuerySpec,
        type_name: &str,
    ) -> Result<()> {
        if !self.is_included(type_name) {
            return Ok(());
        }
        store.add_collection(type_name);

        for title in self.fetch(engine, &spec).await? {
            match title.as_str() {
                Some(title) if !title.is_empty() => {
                    store.add_node(type_name, json!({ "id": title, "title": title }))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Items stored without any rewriting
    async fn load_plain(
        &self,
        engine: &mut PaginationEngine,
        store: &mut NodeStore,
        spec: QuerySpec,
        type_name: &str,
    ) -> Result<()> {
        if !self.is_included(type_name) {
            return Ok(());
        }
        store.add_collection(type_name);

        for item in self.fetch(engine, &spec).await? {
            store.add_node(type_name, item)?;
        }
        Ok(())
    }

    async fn load_collections(
        &self,
        engine: &mut PaginationEngine,
        store: &mut NodeStore,
    ) -> Result<()> {
        let names = &self.type_names;
        if !self.is_included(&names.collection) {
            return Ok(());
        }
        store.add_collection(&names.collection);

        for item in self.fetch(engine, &queries::collections()).await? {
            let mut collection = into_object(&names.collection, item)?;

            let products = references(&names.product, collection.get("products"));
            collection.insert("products".to_string(), products);

            if let Some(image) = present(collection.remove("image")) {
                let reference = store.add_node(&names.image, image)?;
                collection.insert("image".to_string(), reference);
            }

            store.add_node(&names.collection, JsonValue::Object(collection))?;
        }
        Ok(())
    }

    async fn load_products(
        &self,
        engine: &mut PaginationEngine,
        store: &mut NodeStore,
    ) -> Result<()> {
        let names = &self.type_names;
        if !self.is_included(&names.product) {
            return Ok(());
        }
        store.add_collection(&names.product);
        store.add_collection(&names.product_variant);

        for item in self.fetch(engine, &queries::products()).await? {
            let mut product = into_object(&names.product, item)?;
            let product_id = node_id(&names.product, &product)?;

            let collections = references(&names.collection, product.get("collections"));
            product.insert("collections".to_string(), collections);

            for key in ["priceRange", "compareAtPriceRange"] {
                let range = self.price_range(store, &product_id, key, product.get(key))?;
                product.insert(key.to_string(), range);
            }

            let mut images = Vec::new();
            for image in edge_nodes(product.get("images")) {
                images.push(store.add_node(&names.image, image)?);
            }
            product.insert("images".to_string(), JsonValue::Array(images));

            let mut variants = Vec::new();
            for variant in edge_nodes(product.get("variants")) {
                variants.push(self.add_variant(store, variant)?);
            }
            product.insert("variants".to_string(), JsonValue::Array(variants));

            store.add_node(&names.product, JsonValue::Object(product))?;
        }
        Ok(())
    }

    fn price_range(
        &self,
        store: &mut NodeStore,
        product_id: &str,
        key: &str,
        range: Option<&JsonValue>,
    ) -> Result<JsonValue> {
        let mut result = JsonObject::new();
        for bound in ["MinVariantPrice", "MaxVariantPrice"] {
            let money = range.and_then(|r| r.get(lower_first(bound)));
            let id = derived_id(product_id, &format!("/{key}/{bound}"));
            let reference = store.add_node(&self.type_names.price, price_node(&id, money))?;
            result.insert(lower_first(bound), reference);
        }
        Ok(JsonValue::Object(result))
    }

    fn add_variant(&self, store: &mut NodeStore, variant: JsonValue) -> Result<JsonValue> {
        let names = &self.type_names;
        let mut variant = into_object(&names.product_variant, variant)?;
        let variant_id = node_id(&names.product_variant, &variant)?;

        if let Some(image) = present(variant.remove("image")) {
            let reference = image
                .get("id")
                .and_then(JsonValue::as_str)
                .map(|id| NodeStore::create_reference(&names.image, id))
                .unwrap_or(JsonValue::Null);
            variant.insert("image".to_string(), reference);
        }

        for key in ["price", "unitPrice", "compareAtPrice"] {
            let id = derived_id(&variant_id, key);
            let node = price_node(&id, variant.get(key));
            let reference = store.add_node(&names.price, node)?;
            variant.insert(key.to_string(), reference);
        }

        store.add_node(&names.product_variant, JsonValue::Object(variant))
    }

    async fn load_articles(
        &self,
        engine: &mut PaginationEngine,
        store: &mut NodeStore,
    ) -> Result<()> {
        let names = &self.type_names;
        if !self.is_included(&names.article) {
            return Ok(());
        }
        store.add_collection(&names.article);
        let link_blogs = self.is_included(&names.blog);

        for item in self.fetch(engine, &queries::articles()).await? {
            let mut article = into_object(&names.article, item)?;

            if let Some(image) = present(article.remove("image")) {
                let reference = store.add_node(&names.image, image)?;
                article.insert("image".to_string(), reference);
            }

            if link_blogs {
                let blog_id = article
                    .get("blog")
                    .and_then(|b| b.get("id"))
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| {
                        Error::invalid_node(&names.article, "article has no blog id")
                    })?;
                let reference = NodeStore::create_reference(&names.blog, blog_id);
                article.insert("blog".to_string(), reference);
            }

            store.add_node(&names.article, JsonValue::Object(article))?;
        }
        Ok(())
    }
}

fn into_object(type_name: &str, item: JsonValue) -> Result<JsonObject> {
    match item {
        JsonValue::Object(object) => Ok(object),
        _ => Err(Error::invalid_node(type_name, "item is not an object")),
    }
}

fn node_id(type_name: &str, node: &JsonObject) -> Result<String> {
    node.get("id")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_node(type_name, "node has no id"))
}

/// `None` for missing or null values
fn present(value: Option<JsonValue>) -> Option<JsonValue> {
    value.filter(|v| !v.is_null())
}

/// Nodes of a `{ edges: [{ node }] }` connection
fn edge_nodes(connection: Option<&JsonValue>) -> Vec<JsonValue> {
    connection
        .and_then(|c| c.get("edges"))
        .and_then(JsonValue::as_array)
        .map(|edges| {
            edges
                .iter()
                .filter_map(|edge| edge.get("node").cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// References to every node of a connection, by node ID
fn references(type_name: &str, connection: Option<&JsonValue>) -> JsonValue {
    edge_nodes(connection)
        .iter()
        .filter_map(|node| node.get("id").and_then(JsonValue::as_str))
        .map(|id| NodeStore::create_reference(type_name, id))
        .collect()
}

/// Price node: the money fields with a derived ID
fn price_node(id: &str, money: Option<&JsonValue>) -> JsonValue {
    let mut node = JsonObject::new();
    node.insert("id".to_string(), JsonValue::from(id));
    if let Some(JsonValue::Object(fields)) = money {
        for (key, value) in fields {
            if key != "id" {
                node.insert(key.clone(), value.clone());
            }
        }
    }
    JsonValue::Object(node)
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
