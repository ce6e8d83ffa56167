//! Node type names and derived IDs

use regex::Regex;
use std::sync::LazyLock;

/// Regex for splitting a name into words
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").unwrap());

/// Type name of image nodes
pub const IMAGE_TYPE: &str = "ShopifyImage";

/// Type name of price nodes
pub const PRICE_TYPE: &str = "ShopifyPrice";

/// Prefix forced onto names that clash with host types when the prefix is blank
const FALLBACK_PREFIX: &str = "Shopify";

/// Names that always need a prefix
const RESERVED_NAMES: &[&str] = &["Page"];

/// PascalCase a free-form name
///
/// Words are split on anything that is not a letter or digit. Existing
/// inner capitals are kept, all-caps words are lowered after the first letter.
pub fn pascal_case(name: &str) -> String {
    WORD_REGEX
        .find_iter(name)
        .map(|word| {
            let word = word.as_str();
            let rest = &word[1..];
            let rest = if rest.chars().all(|c| !c.is_ascii_lowercase()) {
                rest.to_ascii_lowercase()
            } else {
                rest.to_string()
            };
            format!("{}{rest}", word[..1].to_ascii_uppercase())
        })
        .collect()
}

/// Derive a child ID, e.g. `gid://Product/1` + `price` → `gid://Product/1/Price`
///
/// Each `/`-separated segment of `name` is PascalCased.
pub fn derived_id(id: &str, name: &str) -> String {
    let key = name
        .split('/')
        .map(pascal_case)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("{id}/{key}")
}

/// Type names for one catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNames {
    prefix: String,
    pub article: String,
    pub blog: String,
    pub collection: String,
    pub product: String,
    pub product_variant: String,
    pub page: String,
    pub product_type: String,
    pub product_tag: String,
    pub image: String,
    pub price: String,
}

impl TypeNames {
    /// Build every type name under `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut names = Self {
            prefix: prefix.into(),
            article: String::new(),
            blog: String::new(),
            collection: String::new(),
            product: String::new(),
            product_variant: String::new(),
            page: String::new(),
            product_type: String::new(),
            product_tag: String::new(),
            image: IMAGE_TYPE.to_string(),
            price: PRICE_TYPE.to_string(),
        };
        names.article = names.create("Article");
        names.blog = names.create("Blog");
        names.collection = names.create("Collection");
        names.product = names.create("Product");
        names.product_variant = names.create("ProductVariant");
        names.page = names.create("Page");
        names.product_type = names.create("ProductType");
        names.product_tag = names.create("ProductTag");
        names
    }

    /// Prefix used for every name
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// PascalCase `"<prefix> <name>"`
    pub fn create(&self, name: &str) -> String {
        let prefix = if self.prefix.trim().is_empty() && RESERVED_NAMES.contains(&name) {
            FALLBACK_PREFIX
        } else {
            self.prefix.as_str()
        };
        pascal_case(&format!("{prefix} {name}"))
    }

    /// Every type name
    pub fn all(&self) -> Vec<&str> {
        vec![
            self.article.as_str(),
            self.blog.as_str(),
            self.collection.as_str(),
            self.product.as_str(),
            self.product_variant.as_str(),
            self.page.as_str(),
            self.product_type.as_str(),
            self.product_tag.as_str(),
            self.image.as_str(),
            self.price.as_str(),
        ]
    }

    /// Type names to load: `types` mapped through [`TypeNames::create`], or all
    pub fn included(&self, types: &[String]) -> Vec<String> {
        if types.is_empty() {
            self.all().into_iter().map(str::to_string).collect()
        } else {
            types.iter().map(|name| self.create(name)).collect()
        }
    }
}

impl Default for TypeNames {
    fn default() -> Self {
        Self::new(FALLBACK_PREFIX)
    }
}
