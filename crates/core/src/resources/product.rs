//! Shop products.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{RowId, Timestamp};
use crate::validation::RuleSet;

define_status_enum! {
    /// Catalogue state. `Oos` is "out of stock".
    ProductStatus {
        #[default]
        Active = "active",
        Draft = "draft",
        Archived = "archived",
        Oos = "oos",
    }
}

/// Category used when none is given.
pub const DEFAULT_CATEGORY: &str = "general";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: RowId,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub status: ProductStatus,
    pub image: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            price: 0.0,
            stock: 0,
            category: default_category(),
            status: ProductStatus::default(),
            image: String::new(),
        }
    }
}

pub struct Products;

impl Resource for Products {
    type Row = Product;
    type Draft = ProductDraft;

    const ENTITY: &'static str = "Product";
    const PATH: &'static str = "products";
    const FILTERS: &'static [&'static str] = &["category", "status"];

    fn id(row: &Product) -> &str {
        &row.id
    }

    fn created_at(row: &Product) -> Timestamp {
        row.created_at
    }

    fn search_fields(row: &Product) -> Vec<&str> {
        vec![row.name.as_str(), row.sku.as_str()]
    }

    fn filter_value<'a>(row: &'a Product, filter: &str) -> Option<&'a str> {
        match filter {
            "category" => Some(row.category.as_str()),
            "status" => Some(row.status.as_str()),
            _ => None,
        }
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .required("name", "Name is required")
            .required("sku", "SKU is required")
            .non_negative_number("price", "Price must be ≥ 0")
            .non_negative_integer("stock", "Stock must be ≥ 0")
    }

    fn to_draft(row: &Product) -> ProductDraft {
        ProductDraft {
            name: row.name.clone(),
            sku: row.sku.clone(),
            price: row.price,
            stock: row.stock,
            category: row.category.clone(),
            status: row.status,
            image: row.image.clone(),
        }
    }

    fn build(id: RowId, draft: &ProductDraft, now: Timestamp) -> Product {
        let mut product = Product {
            id,
            name: String::new(),
            sku: String::new(),
            price: 0.0,
            stock: 0,
            category: default_category(),
            status: ProductStatus::default(),
            image: String::new(),
            created_at: now,
            updated_at: now,
        };
        Self::apply(&mut product, draft, now);
        product
    }

    fn apply(row: &mut Product, draft: &ProductDraft, now: Timestamp) {
        row.name = draft.name.trim().to_string();
        row.sku = draft.sku.trim().to_string();
        row.price = draft.price;
        row.stock = draft.stock;
        row.category = if draft.category.trim().is_empty() {
            default_category()
        } else {
            draft.category.trim().to_string()
        };
        row.status = draft.status;
        row.image = draft.image.trim().to_string();
        row.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Ballie Fan Scarf".into(),
            sku: "SCF-001".into(),
            price: 19.99,
            stock: 120,
            ..ProductDraft::default()
        }
    }

    #[test]
    fn negative_price_and_stock_are_rejected() {
        let errors = Products::validate(&ProductDraft {
            price: -1.0,
            stock: -3,
            ..draft()
        });
        assert_eq!(errors.get("price"), Some("Price must be ≥ 0"));
        assert_eq!(errors.get("stock"), Some("Stock must be ≥ 0"));
    }

    #[test]
    fn free_product_is_valid() {
        assert!(Products::validate(&ProductDraft {
            price: 0.0,
            stock: 0,
            ..draft()
        })
        .is_empty());
    }

    #[test]
    fn missing_sku_is_required() {
        let errors = Products::validate(&ProductDraft {
            sku: String::new(),
            ..draft()
        });
        assert_eq!(errors.get("sku"), Some("SKU is required"));
    }

    #[test]
    fn apply_bumps_updated_at_and_keeps_created_at() {
        let created = Utc::now() - Duration::days(3);
        let mut product = Products::build("p1".into(), &draft(), created);
        let later = Utc::now();
        Products::apply(&mut product, &ProductDraft { stock: 0, ..draft() }, later);
        assert_eq!(product.created_at, created);
        assert_eq!(product.updated_at, later);
        assert_eq!(product.stock, 0);
    }
}
