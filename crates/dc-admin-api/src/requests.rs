//! Typed request payloads.
//!
//! One struct per write operation, carrying exactly the fields the backend
//! accepts. The playground is the only path that sends operator-typed JSON;
//! every page-level call goes through these.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub pass_word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneLoginRequest {
    pub phone: String,
    #[serde(rename = "SMSCode")]
    pub sms_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub nick_name: String,
    pub pass_word: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPwdRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Standard 1-based page window sent as query parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_num: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self { page_num, page_size }
    }
}

/// Notice listing filters by publication status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub notice_status: String,
}

/// Banner listing filters by banner type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Registration listing with optional activity/user filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// News listing restricted to one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNewsQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySearchRequest {
    pub words: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub activity_id: i64,
}

/// Post-event rating: free-text evaluation plus a 1-5 star score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCommentRequest {
    pub evaluate: String,
    pub star: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressCommentRequest {
    pub content: String,
    pub news_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborCommentRequest {
    pub content: String,
    pub neighborhood_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerItem {
    pub qid: i64,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePaperRequest {
    pub score: i64,
    pub answer: Vec<AnswerItem>,
}

// ── Create/update payloads per entity ──

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPayload {
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_word: Option<String>,
    pub nick_name: String,
    pub phone: String,
    pub email: String,
    pub sex: String,
    pub avatar: String,
    pub status: String,
    pub address: String,
    pub introduction: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotationPayload {
    pub title: String,
    pub pic_path: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressCategoryPayload {
    pub name: String,
    pub parent_id: i64,
    pub sort: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PressNewsPayload {
    pub title: String,
    pub content: String,
    pub image_urls: String,
    pub category_id: i64,
    pub author: String,
    pub source: String,
    pub status: String,
    pub publish_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticePayload {
    pub title: String,
    pub notice_status: String,
    pub notice_content: String,
    pub publish_date: String,
    pub create_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NeighborPayload {
    pub nick_name: String,
    pub user_img_url: String,
    pub content: String,
    pub img_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityPayload {
    pub title: String,
    pub content: String,
    pub pic_path: String,
    pub category_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub address: String,
    pub total_count: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionPayload {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataCardPayload {
    pub icon: String,
    pub title: String,
    pub num: String,
    pub unit: String,
    pub trend: String,
    pub sort: i64,
}

/// `data` is a JSON-encoded array of `{name, data: [numbers]}` rows, encoded
/// by the caller exactly as the web console did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSeriesPayload {
    pub data: String,
}
