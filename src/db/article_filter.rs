// src/db/article_filter.rs

use sqlx::{Postgres, QueryBuilder};

use crate::models::article::ArticleFilter;
#[cfg(test)]
use crate::models::article::Article;

/// One predicate over an article. A filter is the AND of a list of these;
/// an empty list matches every article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleCondition {
    // Needles are stored lower-cased
    NameContains(String),
    ArticleNumberContains(String),
    CategoryEquals(String),
    SupplierEquals(String),
    ManufacturerEquals(String),
    AvailableOnly,
}

// Blank and whitespace-only values count as "not supplied".
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Translates the optional search fields into the list of conditions to AND together.
pub fn conditions(filter: &ArticleFilter) -> Vec<ArticleCondition> {
    let mut conditions = Vec::new();

    // 1. Substring searches (case-insensitive)
    if let Some(name) = supplied(&filter.name) {
        conditions.push(ArticleCondition::NameContains(name.to_lowercase()));
    }
    if let Some(number) = supplied(&filter.article_number) {
        conditions.push(ArticleCondition::ArticleNumberContains(number.to_lowercase()));
    }

    // 2. Exact matches
    if let Some(category) = supplied(&filter.category) {
        conditions.push(ArticleCondition::CategoryEquals(category.to_string()));
    }
    if let Some(supplier) = supplied(&filter.supplier) {
        conditions.push(ArticleCondition::SupplierEquals(supplier.to_string()));
    }
    if let Some(manufacturer) = supplied(&filter.manufacturer) {
        conditions.push(ArticleCondition::ManufacturerEquals(manufacturer.to_string()));
    }

    // 3. Availability only restricts when explicitly true; false means "all".
    if filter.is_available == Some(true) {
        conditions.push(ArticleCondition::AvailableOnly);
    }

    conditions
}

impl ArticleCondition {
    /// Appends this predicate (with bound parameters) to `builder`.
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            // strpos instead of LIKE so that % and _ in the needle stay literal
            ArticleCondition::NameContains(needle) => {
                builder
                    .push("strpos(lower(name), ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
            ArticleCondition::ArticleNumberContains(needle) => {
                builder
                    .push("strpos(lower(article_number), ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
            ArticleCondition::CategoryEquals(category) => {
                builder.push("category = ").push_bind(category.clone());
            }
            ArticleCondition::SupplierEquals(supplier) => {
                builder.push("supplier = ").push_bind(supplier.clone());
            }
            ArticleCondition::ManufacturerEquals(manufacturer) => {
                builder.push("manufacturer = ").push_bind(manufacturer.clone());
            }
            ArticleCondition::AvailableOnly => {
                builder.push("is_available = TRUE");
            }
        }
    }

    #[cfg(test)]
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            ArticleCondition::NameContains(needle) => article.name.to_lowercase().contains(needle.as_str()),
            ArticleCondition::ArticleNumberContains(needle) => {
                article.article_number.to_lowercase().contains(needle.as_str())
            }
            ArticleCondition::CategoryEquals(category) => article.category.as_deref() == Some(category.as_str()),
            ArticleCondition::SupplierEquals(supplier) => article.supplier == *supplier,
            ArticleCondition::ManufacturerEquals(manufacturer) => article.manufacturer == *manufacturer,
            ArticleCondition::AvailableOnly => article.is_available,
        }
    }
}

/// Appends ` WHERE c1 AND c2 ...`; nothing at all for an empty list.
pub fn push_where(builder: &mut QueryBuilder<'_, Postgres>, conditions: &[ArticleCondition]) {
    for (index, condition) in conditions.iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        condition.push_sql(builder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn article(name: &str, number: &str, manufacturer: &str, available: bool) -> Article {
        Article {
            id: Uuid::new_v4(),
            article_number: number.to_string(),
            name: name.to_string(),
            unit: "Stück".to_string(),
            purchase_price: Decimal::new(1000, 2),
            tax_rate_percent: Decimal::new(19, 0),
            selling_price: Decimal::new(1190, 2),
            manufacturer: manufacturer.to_string(),
            supplier: "Lieferant A".to_string(),
            category: Some("Hardware".to_string()),
            stock_level: 3,
            description: None,
            is_available: available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn matches_all(conditions: &[ArticleCondition], article: &Article) -> bool {
        conditions.iter().all(|c| c.matches(article))
    }

    #[test]
    fn empty_filter_is_identity() {
        let conditions = conditions(&ArticleFilter::default());
        assert!(conditions.is_empty());
        assert!(matches_all(&conditions, &article("x", "12345678", "m", false)));
    }

    #[test]
    fn blank_fields_are_ignored() {
        let filter = ArticleFilter {
            name: Some("   ".into()),
            manufacturer: Some("".into()),
            ..Default::default()
        };
        assert!(conditions(&filter).is_empty());
    }

    #[test]
    fn availability_false_does_not_restrict() {
        let filter = ArticleFilter {
            is_available: Some(false),
            ..Default::default()
        };
        assert!(conditions(&filter).is_empty());

        let filter = ArticleFilter {
            is_available: Some(true),
            ..Default::default()
        };
        assert_eq!(conditions(&filter), vec![ArticleCondition::AvailableOnly]);
    }

    #[test]
    fn manufacturer_and_availability_are_conjunctive() {
        let filter = ArticleFilter {
            manufacturer: Some("HerstellerX".into()),
            is_available: Some(true),
            ..Default::default()
        };
        let conditions = conditions(&filter);

        assert!(matches_all(&conditions, &article("Maus", "11112222", "HerstellerX", true)));
        assert!(!matches_all(&conditions, &article("Maus", "11112222", "HerstellerX", false)));
        assert!(!matches_all(&conditions, &article("Maus", "11112222", "HerstellerY", true)));
    }

    #[test]
    fn substring_searches_ignore_case() {
        let filter = ArticleFilter {
            name: Some("Mon".into()),
            article_number: Some("456".into()),
            ..Default::default()
        };
        let conditions = conditions(&filter);

        assert!(matches_all(&conditions, &article("LED-MONITOR", "12345678", "m", true)));
        assert!(!matches_all(&conditions, &article("Monitor", "99999999", "m", true)));
        assert!(!matches_all(&conditions, &article("Tastatur", "12345678", "m", true)));
    }

    #[test]
    fn exact_fields_are_case_sensitive() {
        let filter = ArticleFilter {
            manufacturer: Some("herstellerx".into()),
            ..Default::default()
        };
        assert!(!matches_all(&conditions(&filter), &article("Maus", "11112222", "HerstellerX", true)));
    }

    #[test]
    fn renders_parameterized_where_clause() {
        let filter = ArticleFilter {
            name: Some("Mon".into()),
            manufacturer: Some("HerstellerX".into()),
            is_available: Some(true),
            ..Default::default()
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM articles");
        push_where(&mut builder, &conditions(&filter));

        assert_eq!(
            builder.sql(),
            "SELECT * FROM articles WHERE strpos(lower(name), $1) > 0 \
             AND manufacturer = $2 AND is_available = TRUE"
        );
    }

    #[test]
    fn no_conditions_render_no_where_clause() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM articles");
        push_where(&mut builder, &[]);
        assert_eq!(builder.sql(), "SELECT * FROM articles");
    }
}
