//! Catalog product.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::category::Category;
use crate::error::DomainResult;

/// Book listed in the catalog.
///
/// Every price must lie in (1, 1000].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    /// Zero until the product is persisted
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(range(exclusive_min = 1.0, max = 1000.0, message = "List price must be greater than 1 and at most 1000"))]
    pub list_price: f64,
    #[validate(range(exclusive_min = 1.0, max = 1000.0, message = "Price for 1-50 must be greater than 1 and at most 1000"))]
    pub price: f64,
    #[validate(range(exclusive_min = 1.0, max = 1000.0, message = "Price for 50+ must be greater than 1 and at most 1000"))]
    pub price50: f64,
    #[validate(range(exclusive_min = 1.0, max = 1000.0, message = "Price for 100+ must be greater than 1 and at most 1000"))]
    pub price100: f64,
    pub category_id: i32,
    pub image_url: Option<String>,
    /// Loaded only when the category include is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    /// Whether this product still needs an insert
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn ensure_valid(&self) -> DomainResult<()> {
        self.validate().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn product_with_price(price: f64) -> Product {
        Product {
            id: 0,
            title: "Fortune of Time".to_string(),
            description: String::new(),
            isbn: "SWD9999001".to_string(),
            author: "Billy Spark".to_string(),
            list_price: 99.0,
            price,
            price50: 85.0,
            price100: 80.0,
            category_id: 1,
            image_url: None,
            category: None,
        }
    }

    fn invalid_fields(product: &Product) -> Vec<String> {
        match product.ensure_valid() {
            Err(DomainError::InvalidFields(fields)) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_price_in_range_is_accepted() {
        assert!(product_with_price(500.0).ensure_valid().is_ok());
        assert!(product_with_price(1000.0).ensure_valid().is_ok());
    }

    #[test]
    fn test_price_below_range_is_rejected() {
        assert_eq!(invalid_fields(&product_with_price(0.0)), vec!["price"]);
    }

    #[test]
    fn test_lower_bound_is_exclusive() {
        assert_eq!(invalid_fields(&product_with_price(1.0)), vec!["price"]);
    }

    #[test]
    fn test_price_above_range_is_rejected() {
        assert_eq!(invalid_fields(&product_with_price(1000.01)), vec!["price"]);
    }

    #[test]
    fn test_required_text_fields() {
        let mut product = product_with_price(50.0);
        product.title.clear();
        product.author.clear();
        assert_eq!(invalid_fields(&product), vec!["author", "title"]);
    }
}
