//! Paginated resource pages.
//!
//! Every CRUD page is the same template: a pager, a row summary table, and
//! a two-step delete. The [`Resource`] enum carries everything that varies
//! per page; the console renders one [`ListView`] regardless of which
//! resource is open.

use serde_json::Value;

use dc_admin_api::PageQuery;
use dc_admin_state::Pager;

use crate::pane::format_bytes;

/// The resources the console can page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    News,
    NewsCategories,
    Notices,
    Rotations,
    Neighbors,
    Activities,
    Registrations,
    Questions,
    DataCards,
    DataSeries,
    Images,
    Files,
}

pub const ALL_RESOURCES: &[Resource] = &[
    Resource::Users,
    Resource::News,
    Resource::NewsCategories,
    Resource::Notices,
    Resource::Rotations,
    Resource::Neighbors,
    Resource::Activities,
    Resource::Registrations,
    Resource::Questions,
    Resource::DataCards,
    Resource::DataSeries,
    Resource::Images,
    Resource::Files,
];

impl Resource {
    /// Command token used with `/open`.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::News => "news",
            Resource::NewsCategories => "categories",
            Resource::Notices => "notices",
            Resource::Rotations => "banners",
            Resource::Neighbors => "neighbors",
            Resource::Activities => "activities",
            Resource::Registrations => "registrations",
            Resource::Questions => "questions",
            Resource::DataCards => "cards",
            Resource::DataSeries => "series",
            Resource::Images => "images",
            Resource::Files => "files",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Resource::Users => "Users",
            Resource::News => "News",
            Resource::NewsCategories => "News Categories",
            Resource::Notices => "Notices",
            Resource::Rotations => "Banners",
            Resource::Neighbors => "Neighborhood Posts",
            Resource::Activities => "Activities",
            Resource::Registrations => "Registrations",
            Resource::Questions => "Quiz Questions",
            Resource::DataCards => "Data Cards",
            Resource::DataSeries => "Data Series",
            Resource::Images => "Images",
            Resource::Files => "Files",
        }
    }

    pub fn parse(token: &str) -> Option<Resource> {
        ALL_RESOURCES.iter().copied().find(|r| r.name() == token)
    }

    /// Rows per page; image and file galleries show more than tables.
    pub fn page_size(&self, table_default: u32) -> u32 {
        match self {
            Resource::Images => 24,
            Resource::Files => 20,
            _ => table_default,
        }
    }

    /// Catalog key for creating a record, when the resource supports it.
    pub fn create_key(&self) -> Option<&'static str> {
        match self {
            Resource::Users => Some("userCreate"),
            Resource::News => Some("pressNewsCreate"),
            Resource::NewsCategories => Some("pressCategoryCreate"),
            Resource::Notices => Some("noticeCreate"),
            Resource::Rotations => Some("rotationCreate"),
            Resource::Neighbors => Some("neighborCreate"),
            Resource::Activities => Some("activityCreate"),
            Resource::Questions => Some("questionCreate"),
            Resource::DataCards => Some("dataCardCreate"),
            Resource::DataSeries => Some("dataSeriesCreate"),
            Resource::Registrations | Resource::Images | Resource::Files => None,
        }
    }

    pub fn update_key(&self) -> Option<&'static str> {
        match self {
            Resource::Users => Some("userUpdate"),
            Resource::News => Some("pressNewsUpdate"),
            Resource::NewsCategories => Some("pressCategoryUpdate"),
            Resource::Notices => Some("noticeUpdate"),
            Resource::Rotations => Some("rotationUpdate"),
            Resource::Neighbors => Some("neighborUpdate"),
            Resource::Activities => Some("activityUpdate"),
            Resource::Questions => Some("questionUpdate"),
            Resource::DataCards => Some("dataCardUpdate"),
            Resource::DataSeries => Some("dataSeriesUpdate"),
            Resource::Registrations | Resource::Images | Resource::Files => None,
        }
    }

    /// Media resources are deleted by URL rather than id.
    pub fn deletes_by_url(&self) -> bool {
        matches!(self, Resource::Images | Resource::Files)
    }
}

/// One row of the generic list table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary {
    pub id: Option<i64>,
    pub label: String,
    pub detail: String,
}

/// View state of the currently open page.
#[derive(Debug, Clone)]
pub struct ListView {
    pub resource: Resource,
    pub pager: Pager,
    pub rows: Vec<RowSummary>,
    /// Target of a pending two-step delete: id or, for media, URL.
    pub pending_delete: Option<String>,
}

impl ListView {
    pub fn new(resource: Resource, table_page_size: u32) -> Self {
        Self {
            resource,
            pager: Pager::new(resource.page_size(table_page_size)),
            rows: Vec::new(),
            pending_delete: None,
        }
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery::new(self.pager.page_num(), self.pager.page_size())
    }

    /// Apply a reloaded envelope: replace the rows, record the total, and
    /// drop any pending delete (its target may be gone).
    pub fn apply_envelope(&mut self, envelope: &Value) {
        let rows = envelope
            .get("data")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(|item| summarize(self.resource, item)).collect())
            .unwrap_or_default();
        self.rows = sort_by_id(rows);
        let total = envelope
            .get("total")
            .and_then(Value::as_i64)
            .unwrap_or(self.rows.len() as i64);
        self.pager.set_total(total);
        self.pending_delete = None;
    }
}

/// Ascending by id; rows without an id sink to the bottom in their
/// original relative order.
pub fn sort_by_id(mut rows: Vec<RowSummary>) -> Vec<RowSummary> {
    rows.sort_by(|a, b| match (a.id, b.id) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    rows
}

fn field<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or("")
}

fn record_id(item: &Value) -> Option<i64> {
    item.get("ID").or_else(|| item.get("id")).and_then(Value::as_i64)
}

/// Build a table row for one raw record.
pub fn summarize(resource: Resource, item: &Value) -> RowSummary {
    let id = record_id(item);
    let (label, detail) = match resource {
        Resource::Users => (
            field(item, "userName").to_string(),
            format!("{} {}", field(item, "nickName"), field(item, "phone")).trim().to_string(),
        ),
        Resource::News => (
            field(item, "title").to_string(),
            format!(
                "views {} likes {}",
                item.get("viewCount").and_then(Value::as_i64).unwrap_or(0),
                item.get("likeNum").and_then(Value::as_i64).unwrap_or(0)
            ),
        ),
        Resource::NewsCategories => (
            field(item, "name").to_string(),
            format!("sort {}", item.get("sort").and_then(Value::as_i64).unwrap_or(0)),
        ),
        Resource::Notices => (
            field(item, "title").to_string(),
            format!("status {} {}", field(item, "noticeStatus"), field(item, "publishDate"))
                .trim_end()
                .to_string(),
        ),
        Resource::Rotations => (
            field(item, "title").to_string(),
            format!(
                "type {} status {}",
                item.get("type").and_then(Value::as_i64).unwrap_or(0),
                field(item, "status")
            ),
        ),
        Resource::Neighbors => (
            field(item, "nickName").to_string(),
            truncate(field(item, "content"), 40),
        ),
        Resource::Activities => (
            field(item, "title").to_string(),
            format!(
                "{}/{} {}",
                item.get("currentCount").and_then(Value::as_i64).unwrap_or(0),
                item.get("totalCount").and_then(Value::as_i64).unwrap_or(0),
                field(item, "startDate")
            ),
        ),
        Resource::Registrations => (
            field(item, "nickName").to_string(),
            format!(
                "activity {} checkin {}",
                item.get("activityId").and_then(Value::as_i64).unwrap_or(0),
                field(item, "checkinStatus")
            ),
        ),
        Resource::Questions => (
            truncate(field(item, "question"), 40),
            format!("level {} score {}", field(item, "level"),
                item.get("score").and_then(Value::as_i64).unwrap_or(0)),
        ),
        Resource::DataCards => (
            field(item, "title").to_string(),
            format!("{} {} trend {}", field(item, "num"), field(item, "unit"),
                field(item, "trend")),
        ),
        Resource::DataSeries => (
            format!("series #{}", id.unwrap_or(0)),
            truncate(field(item, "data"), 40),
        ),
        Resource::Images | Resource::Files => (
            field(item, "name").to_string(),
            format!(
                "{} {}",
                format_bytes(item.get("size").and_then(Value::as_u64).unwrap_or(0)),
                field(item, "url")
            ),
        ),
    };
    RowSummary { id, label, detail }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_by_id_ascending_with_missing_last() {
        let rows = vec![
            RowSummary { id: Some(9), label: "a".into(), detail: String::new() },
            RowSummary { id: None, label: "x".into(), detail: String::new() },
            RowSummary { id: Some(3), label: "c".into(), detail: String::new() },
            RowSummary { id: None, label: "y".into(), detail: String::new() },
        ];
        let sorted = sort_by_id(rows);
        assert_eq!(sorted[0].id, Some(3));
        assert_eq!(sorted[1].id, Some(9));
        assert_eq!(sorted[2].label, "x");
        assert_eq!(sorted[3].label, "y");
    }

    #[test]
    fn test_apply_envelope_fills_rows_and_pager() {
        let mut view = ListView::new(Resource::Users, 10);
        view.pending_delete = Some("5".into());
        view.apply_envelope(&json!({
            "code": 200,
            "msg": "ok",
            "data": [
                { "ID": 2, "userName": "b" },
                { "ID": 1, "userName": "a" }
            ],
            "total": 25
        }));
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id, Some(1), "ascending by id");
        assert_eq!(view.pager.total(), 25);
        assert_eq!(view.pager.total_pages(), 3);
        assert!(view.pending_delete.is_none(), "reload cancels pending delete");
    }

    #[test]
    fn test_media_rows_show_byte_sizes() {
        let row = summarize(
            Resource::Images,
            &json!({ "name": "a.png", "url": "/uploads/a.png", "size": 2048 }),
        );
        assert!(row.id.is_none());
        assert!(row.detail.starts_with("2.0 KB"));
    }

    #[test]
    fn test_gallery_page_sizes() {
        assert_eq!(Resource::Images.page_size(10), 24);
        assert_eq!(Resource::Files.page_size(10), 20);
        assert_eq!(Resource::Users.page_size(10), 10);
    }

    #[test]
    fn test_resource_parsing() {
        assert_eq!(Resource::parse("users"), Some(Resource::Users));
        assert_eq!(Resource::parse("banners"), Some(Resource::Rotations));
        assert_eq!(Resource::parse("nope"), None);
    }
}
