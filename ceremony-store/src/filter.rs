use serde_json::Value;

/// Collection queries support equality and range comparisons on a single
/// field. Range direction is deliberately its own variant rather than a
/// generic comparator so a store backend can map it directly onto its own
/// index operator.
#[derive(Clone, Debug)]
pub enum Filter {
    Eq(String, Value),
    Gte(String, Value),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gte(field.into(), value.into())
    }

    pub(crate) fn field(&self) -> &str {
        match self {
            Filter::Eq(f, _) | Filter::Gte(f, _) => f,
        }
    }

    pub(crate) fn matches(&self, doc: &Value) -> bool {
        let actual = doc.get(self.field());
        match (self, actual) {
            (Filter::Eq(_, want), Some(have)) => have == want,
            (Filter::Gte(_, want), Some(have)) => compare_numbers(have, want).is_ge(),
            _ => false,
        }
    }
}

fn compare_numbers(a: &Value, b: &Value) -> std::cmp::Ordering {
    let a = a.as_i64().unwrap_or(i64::MIN);
    let b = b.as_i64().unwrap_or(i64::MIN);
    a.cmp(&b)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn test_eq_filter_matches_equal_field() {
        let doc = json!({"status": "TIMEDOUT"});
        assert!(Filter::eq("status", "TIMEDOUT").matches(&doc));
        assert!(!Filter::eq("status", "DONE").matches(&doc));
    }

    #[test]
    fn test_gte_filter_on_numeric_field() {
        let doc = json!({"endDate": 1_000});
        assert!(Filter::gte("endDate", 1_000).matches(&doc));
        assert!(!Filter::gte("endDate", 1_001).matches(&doc));
    }
}
