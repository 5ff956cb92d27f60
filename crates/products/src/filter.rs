//! Client-side narrowing of the loaded collection (search box + category
//! dropdown). Backend-side filtering goes through the list query instead.

use crate::product::Product;

/// Search text plus an optional category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub query: String,
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    /// Case-insensitive name substring, exact category.
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = product
            .name
            .to_lowercase()
            .contains(&self.query.to_lowercase());
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        matches_search && matches_category
    }

    /// Matching products in collection order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Distinct non-empty categories, in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockroom_core::ProductId;

    fn product(id: i64, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            unit: "Piece".to_string(),
            category: category.to_string(),
            brand: "Acme".to_string(),
            stock: 1,
            image: None,
            status: "In Stock".to_string(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Blue Pen", "Stationery"),
            product(2, "Stapler", "Office"),
            product(3, "Red pen", "Stationery"),
            product(4, "Penguin Mug", "Kitchen"),
            product(5, "Paper", ""),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let products = catalog();
        assert_eq!(ProductFilter::default().apply(&products), products);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let hits = ProductFilter::new("PEN").apply(&catalog());
        let ids: Vec<i64> = hits.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn category_is_exact() {
        let hits = ProductFilter::new("pen")
            .in_category("Stationery")
            .apply(&catalog());
        let ids: Vec<i64> = hits.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(ProductFilter::default().in_category("stationery").apply(&catalog()).is_empty());
    }

    #[test]
    fn blank_category_means_all() {
        let filter = ProductFilter::new("").in_category("");
        assert_eq!(filter.category, None);
        assert_eq!(filter.apply(&catalog()).len(), 5);
    }

    #[test]
    fn categories_are_distinct_and_ordered() {
        assert_eq!(categories(&catalog()), vec!["Stationery", "Office", "Kitchen"]);
        assert!(categories(&[]).is_empty());
    }

    proptest! {
        /// Property: filtering never reorders or invents products.
        #[test]
        fn filter_is_an_ordered_subsequence(query in "[a-zA-Z]{0,3}") {
            let products = catalog();
            let hits = ProductFilter::new(query).apply(&products);
            let mut cursor = products.iter();
            for hit in &hits {
                prop_assert!(cursor.any(|p| p == hit));
            }
        }
    }
}
