use lineup_core::store::ElementId;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub filter: Option<String>,
}

/// One page of ids plus pagination metadata.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub data: Vec<ElementId>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Filter `ids` by decimal-substring match, then slice out the requested
/// page. Page numbers are 1-based; out-of-range pages yield an empty `data`.
pub fn paginate(ids: Vec<ElementId>, query: &PageQuery, default_limit: usize) -> Page {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(default_limit).max(1);

    let filtered: Vec<ElementId> = match query.filter.as_deref() {
        Some(needle) if !needle.is_empty() => ids
            .into_iter()
            .filter(|id| id.to_string().contains(needle))
            .collect(),
        _ => ids,
    };

    let total = filtered.len();
    let total_pages = total.div_ceil(limit);
    let data = filtered
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    Page {
        data,
        total,
        page,
        total_pages,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<usize>, limit: Option<usize>, filter: Option<&str>) -> PageQuery {
        PageQuery {
            page,
            limit,
            filter: filter.map(str::to_string),
        }
    }

    #[test]
    fn first_page_with_defaults() {
        let page = paginate((1..=5).collect(), &PageQuery::default(), 20);
        assert_eq!(page.data, vec![1, 2, 3, 4, 5]);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn second_page_of_two() {
        let page = paginate((1..=5).collect(), &query(Some(2), Some(2), None), 20);
        assert_eq!(page.data, vec![3, 4]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let page = paginate((1..=5).collect(), &query(Some(9), Some(2), None), 20);
        assert!(page.data.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn filter_matches_decimal_substring() {
        let page = paginate((1..=15).collect(), &query(None, None, Some("1")), 20);
        assert_eq!(page.data, vec![1, 10, 11, 12, 13, 14, 15]);
        assert_eq!(page.total, 7);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let page = paginate((1..=3).collect(), &query(None, None, Some("")), 20);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn zero_page_and_limit_are_clamped() {
        let page = paginate((1..=4).collect(), &query(Some(0), Some(0), None), 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.data, vec![1]);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let page = paginate(vec![1], &PageQuery::default(), 20);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("totalPages").is_some());
    }
}
