use crate::models::{QuerySpec, QueryView, SearchRequest};

pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_CHILDREN: bool = true;

/// Turn a search body into the query object every `_search` call expects.
///
/// Filters keep the caller's order and count. Operators and keys are not
/// checked here; the registry rejects what it does not understand.
pub fn build_query(request: SearchRequest) -> QuerySpec {
    let overrides = request.view.unwrap_or_default();

    QuerySpec {
        filters: request.filters,
        view: QueryView {
            children: overrides.children.unwrap_or(DEFAULT_CHILDREN),
            limit: overrides.limit.unwrap_or(DEFAULT_LIMIT),
            offset: overrides.offset,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterDescriptor, Operator, ViewOverrides};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_preserves_filter_order_and_count() {
        let filters = vec![
            FilterDescriptor::new("name", "example*", Operator::Like),
            FilterDescriptor::new("created", "2024-01-01", Operator::GreaterEqual),
            FilterDescriptor::new("name", "example.org", Operator::NotEqual),
        ];

        let query = build_query(SearchRequest {
            filters: filters.clone(),
            view: None,
        });

        assert_eq!(query.filters, filters);
    }

    #[test]
    fn test_empty_filter_list_uses_defaults() {
        let query = build_query(SearchRequest::default());

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "filters": [], "view": { "children": true, "limit": 10 } })
        );
    }

    #[test]
    fn test_view_overrides() {
        let query = build_query(SearchRequest {
            filters: vec![],
            view: Some(ViewOverrides {
                children: Some(false),
                limit: Some(50),
                offset: Some(100),
            }),
        });

        assert_eq!(
            query.view,
            QueryView {
                children: false,
                limit: 50,
                offset: Some(100),
            }
        );
    }

    #[test]
    fn test_unknown_operator_is_forwarded() {
        let request: SearchRequest = serde_json::from_value(json!({
            "filters": [ { "key": "sld", "value": 3, "operator": "SOUNDS_LIKE" } ]
        }))
        .unwrap();

        let query = serde_json::to_value(build_query(request)).unwrap();

        assert_eq!(
            query["filters"],
            json!([ { "key": "sld", "value": "3", "operator": "SOUNDS_LIKE" } ])
        );
    }
}
