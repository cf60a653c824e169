//! Declarative read queries: the filter/sort/limit triple Directus accepts on `GET /items/{collection}`.

use serde_json::{Map, Value};

/// Comparison applied to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Value),
    Neq(Value),
}

impl Condition {
    fn operator(&self) -> &'static str {
        match self {
            Condition::Eq(_) => "_eq",
            Condition::Neq(_) => "_neq",
        }
    }

    fn value(&self) -> &Value {
        match self {
            Condition::Eq(v) | Condition::Neq(v) => v,
        }
    }

    /// A missing field never equals anything and therefore always differs.
    fn holds_for(&self, actual: Option<&Value>) -> bool {
        match self {
            Condition::Eq(expected) => actual == Some(expected),
            Condition::Neq(expected) => actual != Some(expected),
        }
    }
}

/// Conjunction of per-field conditions, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Condition)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), Condition::Eq(value.into())));
        self
    }

    pub fn neq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), Condition::Neq(value.into())));
        self
    }

    /// Adds an equality condition only when a value is given.
    pub fn eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.eq(field, v),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// `{ "status": { "_eq": "published" }, ... }`
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for (field, condition) in &self.conditions {
            let mut op = Map::new();
            op.insert(condition.operator().to_string(), condition.value().clone());
            root.insert(field.clone(), Value::Object(op));
        }
        Value::Object(root)
    }

    /// Evaluates the filter against a record as returned by the API.
    pub fn matches(&self, record: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, condition)| condition.holds_for(record.get(field)))
    }
}

/// Everything a list read needs besides the collection name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    pub filter: Filter,
    /// Field names; a leading `-` sorts descending.
    pub sort: Vec<String>,
    pub limit: Option<usize>,
}

impl ItemQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            sort: Vec::new(),
            limit: None,
        }
    }

    pub fn sort_by(mut self, field: &str) -> Self {
        self.sort.push(field.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs for the REST endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.filter.is_empty() {
            pairs.push(("filter", self.filter.to_json().to_string()));
        }
        if !self.sort.is_empty() {
            pairs.push(("sort", self.sort.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_serialises_to_directus_operators() {
        let filter = Filter::new()
            .neq("status", "draft")
            .eq("is_featured", true);
        assert_eq!(
            filter.to_json(),
            json!({ "status": { "_neq": "draft" }, "is_featured": { "_eq": true } })
        );
    }

    #[test]
    fn eq_opt_skips_absent_and_empty_values() {
        let filter = Filter::new()
            .eq_opt("brand", None)
            .eq_opt("rim_size", Some(""))
            .eq_opt("size", Some("17"));
        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(filter.to_json(), json!({ "size": { "_eq": "17" } }));
    }

    #[test]
    fn neq_keeps_records_without_the_field() {
        let filter = Filter::new().neq("status", "draft");
        assert!(filter.matches(&json!({ "name": "no status" })));
        assert!(filter.matches(&json!({ "status": "out_of_stock" })));
        assert!(!filter.matches(&json!({ "status": "draft" })));
    }

    #[test]
    fn eq_requires_exact_json_value() {
        let filter = Filter::new().eq("is_featured", true);
        assert!(filter.matches(&json!({ "is_featured": true })));
        assert!(!filter.matches(&json!({ "is_featured": "true" })));
        assert!(!filter.matches(&json!({})));
    }

    #[test]
    fn query_pairs_cover_filter_sort_and_limit() {
        let query = ItemQuery::new(Filter::new().eq("status", "published"))
            .sort_by("-date_created")
            .limit(6);
        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("filter", r#"{"status":{"_eq":"published"}}"#.to_string()),
                ("sort", "-date_created".to_string()),
                ("limit", "6".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(ItemQuery::default().to_query_pairs().is_empty());
    }
}
