//! Record models for each backend resource.
//!
//! Field names follow the backend's JSON exactly: camelCase for entity
//! fields, `ID`/`CreatedAt` for the ORM bookkeeping columns. Everything is
//! defaulted so partial objects (list rows vs. detail views) still decode.

use serde::{Deserialize, Serialize};

/// ORM bookkeeping columns shared by every persisted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: i64,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_name: String,
    pub nick_name: String,
    pub phone: String,
    pub email: String,
    pub sex: String,
    pub avatar: String,
    pub status: String,
    pub login_date: String,
    pub ip: String,
    pub id_card: String,
    pub address: String,
    pub introduction: String,
    pub balance: f64,
    pub score: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotationRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub pic_path: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressCategoryRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub parent_id: i64,
    pub sort: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressNewsRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub content: String,
    pub image_urls: String,
    pub category_id: i64,
    pub author: String,
    pub source: String,
    pub view_count: i64,
    pub like_num: i64,
    pub comment_num: i64,
    pub status: String,
    pub publish_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub notice_status: String,
    pub notice_content: String,
    pub publish_date: String,
    pub create_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeighborRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_id: i64,
    pub nick_name: String,
    pub user_img_url: String,
    pub content: String,
    pub img_url: String,
    pub comment_num: i64,
    pub like_num: i64,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeighborCommentRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub neighbor_id: i64,
    pub user_id: i64,
    pub nick_name: String,
    pub user_img_url: String,
    pub content: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub content: String,
    pub pic_path: String,
    pub category_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub address: String,
    pub total_count: i64,
    pub current_count: i64,
    pub status: String,
    pub create_by: String,
    pub create_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_id: i64,
    pub user_name: String,
    pub nick_name: String,
    pub phone: String,
    pub activity_id: i64,
    pub status: String,
    pub checkin_status: String,
    pub star: i64,
    pub comment: String,
    pub create_time: String,
}

/// Comment on a news article (the generic comment table).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(rename = "type")]
    pub kind: String,
    pub sid: i64,
    pub content: String,
    pub like_num: i64,
    pub reply_num: i64,
    pub user_id: i64,
    pub user_name: String,
    pub nick_name: String,
    pub user_img_url: String,
    pub create_time: String,
}

/// Uploaded image or file as reported by the media listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    pub name: String,
    pub url: String,
    pub thumb_url: Option<String>,
    pub size: u64,
    pub created: String,
}

/// Green-future dashboard card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataCardRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub icon: String,
    pub title: String,
    pub num: String,
    pub unit: String,
    pub trend: String,
    pub sort: i64,
}

/// Quiz question; options E/F may be blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub question_type: String,
    pub level: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub option_e: String,
    pub option_f: String,
    pub answer: String,
    pub score: i64,
    pub status: String,
}

/// Chart data series; `data` is a JSON-encoded array of `{name, data}` rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSeriesRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_record_decodes_orm_casing() {
        let user: UserRecord = serde_json::from_value(json!({
            "ID": 7,
            "CreatedAt": "2024-01-01T00:00:00Z",
            "userName": "test01",
            "nickName": "Tester",
            "score": 12
        }))
        .unwrap();
        assert_eq!(user.meta.id, 7);
        assert_eq!(user.user_name, "test01");
        assert_eq!(user.score, 12);
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_media_item_optional_thumb() {
        let item: MediaItem = serde_json::from_value(json!({
            "name": "a.png",
            "url": "/uploads/a.png",
            "size": 2048,
            "created": "2024-05-01"
        }))
        .unwrap();
        assert!(item.thumb_url.is_none());
        assert_eq!(item.size, 2048);
    }

    #[test]
    fn test_rotation_type_field_round_trip() {
        let rec = RotationRecord { kind: 2, ..Default::default() };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v.get("type").and_then(|t| t.as_i64()), Some(2));
    }
}
