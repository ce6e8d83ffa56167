//! Storefront GraphQL documents
//!
//! Every top-level query aliases its connection as `data` and selects
//! `cursor` on each edge so the cursor paginator can advance.

macro_rules! image_fields {
    () => {
        "fragment ImageFields on Image { id altText url width height }"
    };
}

macro_rules! money_fields {
    () => {
        "fragment MoneyFields on MoneyV2 { amount currencyCode }"
    };
}

macro_rules! seo_fields {
    () => {
        "fragment SeoFields on SEO { title description }"
    };
}

pub const PRODUCT_TYPES_QUERY: &str = "query ProductTypes($first: Int!, $after: String) { \
    data: productTypes(first: $first, after: $after) { \
        pageInfo { hasNextPage } \
        edges { cursor node } \
    } \
}";

pub const PRODUCT_TAGS_QUERY: &str = "query ProductTags($first: Int!, $after: String) { \
    data: productTags(first: $first, after: $after) { \
        pageInfo { hasNextPage } \
        edges { cursor node } \
    } \
}";

pub const COLLECTIONS_QUERY: &str = concat!(
    "query Collections($first: Int!, $after: String) { \
        data: collections(first: $first, after: $after) { \
            pageInfo { hasNextPage } \
            edges { \
                cursor \
                typeName: __typename \
                node { \
                    id handle title description descriptionHtml updatedAt \
                    seo { ...SeoFields } \
                    image { ...ImageFields } \
                    products(first: $first) { \
                        pageInfo { hasNextPage } \
                        edges { cursor node { id } } \
                    } \
                } \
            } \
        } \
    } ",
    image_fields!(),
    " ",
    seo_fields!()
);

pub const COLLECTION_QUERY: &str = "query Collection($handle: String!, $first: Int!, $after: String) { \
    collection(handle: $handle) { \
        products(first: $first, after: $after) { \
            pageInfo { hasNextPage } \
            edges { cursor node { id } } \
        } \
    } \
}";

pub const PRODUCTS_QUERY: &str = concat!(
    "query Products($first: Int!, $after: String) { \
        data: products(first: $first, after: $after) { \
            pageInfo { hasNextPage } \
            edges { \
                cursor \
                typeName: __typename \
                node { \
                    id handle title description descriptionHtml productType vendor tags \
                    availableForSale createdAt updatedAt publishedAt \
                    seo { ...SeoFields } \
                    options { id name values } \
                    collections(first: 250) { edges { node { id } } } \
                    priceRange { \
                        minVariantPrice { ...MoneyFields } \
                        maxVariantPrice { ...MoneyFields } \
                    } \
                    compareAtPriceRange { \
                        minVariantPrice { ...MoneyFields } \
                        maxVariantPrice { ...MoneyFields } \
                    } \
                    images(first: 250) { edges { node { ...ImageFields } } } \
                    variants(first: 250) { \
                        edges { \
                            node { \
                                id title sku availableForSale quantityAvailable \
                                requiresShipping weight weightUnit \
                                selectedOptions { name value } \
                                image { id } \
                                price { ...MoneyFields } \
                                unitPrice { ...MoneyFields } \
                                compareAtPrice { ...MoneyFields } \
                            } \
                        } \
                    } \
                } \
            } \
        } \
    } ",
    image_fields!(),
    " ",
    money_fields!(),
    " ",
    seo_fields!()
);

pub const BLOGS_QUERY: &str = concat!(
    "query Blogs($first: Int!, $after: String) { \
        data: blogs(first: $first, after: $after) { \
            pageInfo { hasNextPage } \
            edges { \
                cursor \
                node { id handle title seo { ...SeoFields } } \
            } \
        } \
    } ",
    seo_fields!()
);

pub const ARTICLES_QUERY: &str = concat!(
    "query Articles($first: Int!, $after: String) { \
        data: articles(first: $first, after: $after) { \
            pageInfo { hasNextPage } \
            edges { \
                cursor \
                node { \
                    id handle title content contentHtml excerpt excerptHtml \
                    publishedAt tags \
                    authorV2 { name email bio } \
                    blog { id } \
                    image { ...ImageFields } \
                    seo { ...SeoFields } \
                } \
            } \
        } \
    } ",
    image_fields!(),
    " ",
    seo_fields!()
);

pub const PAGES_QUERY: &str = concat!(
    "query Pages($first: Int!, $after: String) { \
        data: pages(first: $first, after: $after) { \
            pageInfo { hasNextPage } \
            edges { \
                cursor \
                node { id handle title body bodySummary createdAt updatedAt seo { ...SeoFields } } \
            } \
        } \
    } ",
    seo_fields!()
);
