//! Typed service surface over the transport.
//!
//! One method per backend operation, mirroring the endpoint catalog. Every
//! method returns the whole envelope so callers can inspect soft failures
//! (HTTP 2xx with `code != 200`); the only side effects live in the auth
//! methods, which store or clear the bearer token on the shared
//! [`AuthStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use dc_admin_api::{
    ActivityPayload, ActivityRecord, ActivitySearchRequest, CategoryNewsQuery, CommentRecord, DataCardPayload,
    DataCardRecord, DataSeriesPayload, DataSeriesRecord, Envelope, HttpMethod, LoginRequest,
    MediaItem, NeighborCommentRequest, NeighborPayload, NeighborRecord, NoticeListQuery,
    NoticePayload, NoticeRecord, PageQuery, PhoneLoginRequest, PressCategoryPayload,
    PressCategoryRecord, PressCommentRequest, PressNewsPayload, PressNewsRecord, QuestionPayload,
    QuestionRecord, RegisterRequest, RegistrationCommentRequest, RegistrationListQuery,
    RegistrationRecord, RegistrationRequest, ResetPwdRequest, RotationListQuery, RotationPayload,
    RotationRecord, SavePaperRequest, UserPayload, UserRecord,
};

use crate::error::ApiError;
use crate::transport::Transport;

/// Typed client for every cataloged backend operation.
#[derive(Debug, Clone)]
pub struct ApiService {
    transport: Transport,
}

impl ApiService {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    fn to_value(params: &impl Serialize) -> Result<Value, ApiError> {
        serde_json::to_value(params).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let query = Self::to_value(query)?;
        let query = match &query {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            _ => Some(&query),
        };
        self.transport.call(HttpMethod::Get, path, query, None).await
    }

    async fn write<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<Envelope, ApiError> {
        let body = Self::to_value(body)?;
        self.transport.request(method, path, None, Some(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<Envelope, ApiError> {
        self.transport.request(HttpMethod::Delete, path, None, None).await
    }

    // ── Auth ──

    /// Username/password login. Stores the returned token on success.
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope, ApiError> {
        let envelope = self.write(HttpMethod::Post, "/prod-api/api/login", request).await?;
        self.store_token(&envelope);
        Ok(envelope)
    }

    /// Phone + SMS-code login. Stores the returned token on success.
    pub async fn phone_login(&self, request: &PhoneLoginRequest) -> Result<Envelope, ApiError> {
        let envelope = self.write(HttpMethod::Post, "/prod-api/api/phone/login", request).await?;
        self.store_token(&envelope);
        Ok(envelope)
    }

    pub async fn sms_code(&self, phone: &str) -> Result<Envelope, ApiError> {
        let query = serde_json::json!({ "phone": phone });
        self.transport
            .request(HttpMethod::Get, "/prod-api/api/smsCode", Some(&query), None)
            .await
    }

    /// Create an account. The backend logs the new user in, so a returned
    /// token is stored the same way login does.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Envelope, ApiError> {
        let envelope = self.write(HttpMethod::Post, "/prod-api/api/register", request).await?;
        self.store_token(&envelope);
        Ok(envelope)
    }

    /// Log out. The local token is cleared whether or not the backend call
    /// succeeded, so a dead session can always be abandoned.
    pub async fn logout(&self) -> Result<Envelope, ApiError> {
        let result = self.transport.request(HttpMethod::Post, "/logout", None, None).await;
        self.transport.auth().clear();
        result
    }

    fn store_token(&self, envelope: &Envelope) {
        if !envelope.is_ok() {
            return;
        }
        if let Some(token) = envelope.token.as_deref().filter(|t| !t.is_empty()) {
            debug!("storing session token");
            self.transport.auth().set_token(token);
        }
    }

    // ── Users ──

    pub async fn user_list(&self, page: PageQuery) -> Result<Envelope<Vec<UserRecord>>, ApiError> {
        self.get("/prod-api/api/user/list", &page).await
    }

    pub async fn user_create(&self, payload: &UserPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/user", payload).await
    }

    pub async fn user_update(&self, id: i64, payload: &UserPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/user/{id}"), payload).await
    }

    pub async fn user_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/user/{id}")).await
    }

    pub async fn get_user_info(&self) -> Result<Envelope<UserRecord>, ApiError> {
        self.get("/prod-api/api/user/getUserInfo", &()).await
    }

    pub async fn update_user_info(&self, payload: &UserPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, "/prod-api/api/user/updateUserInfo", payload).await
    }

    pub async fn reset_pwd(&self, request: &ResetPwdRequest) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, "/prod-api/api/user/resetPwd", request).await
    }

    // ── Rotation banners ──

    pub async fn rotation_list(
        &self,
        query: &RotationListQuery,
    ) -> Result<Envelope<Vec<RotationRecord>>, ApiError> {
        self.get("/prod-api/api/rotation/list", query).await
    }

    pub async fn rotation_create(&self, payload: &RotationPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/rotation", payload).await
    }

    pub async fn rotation_update(
        &self,
        id: i64,
        payload: &RotationPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/rotation/{id}"), payload).await
    }

    pub async fn rotation_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/rotation/{id}")).await
    }

    // ── Press: categories, news, comments ──

    pub async fn press_category_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<PressCategoryRecord>>, ApiError> {
        self.get("/prod-api/api/press/category/list", &page).await
    }

    pub async fn press_category_create(
        &self,
        payload: &PressCategoryPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/press/category", payload).await
    }

    pub async fn press_category_update(
        &self,
        id: i64,
        payload: &PressCategoryPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/press/category/{id}"), payload).await
    }

    pub async fn press_category_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/press/category/{id}")).await
    }

    pub async fn press_news_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<PressNewsRecord>>, ApiError> {
        self.get("/prod-api/api/press/newsList", &page).await
    }

    pub async fn press_category_news_list(
        &self,
        query: &CategoryNewsQuery,
    ) -> Result<Envelope<Vec<PressNewsRecord>>, ApiError> {
        self.get("/prod-api/api/press/category/newsList", query).await
    }

    pub async fn press_news_detail(&self, id: i64) -> Result<Envelope<PressNewsRecord>, ApiError> {
        self.get(&format!("/prod-api/api/press/news/{id}"), &()).await
    }

    pub async fn press_news_create(&self, payload: &PressNewsPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/press/news", payload).await
    }

    pub async fn press_news_update(
        &self,
        id: i64,
        payload: &PressNewsPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/press/news/{id}"), payload).await
    }

    pub async fn press_news_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/press/news/{id}")).await
    }

    pub async fn press_like(&self, id: i64) -> Result<Envelope, ApiError> {
        self.transport
            .request(HttpMethod::Put, &format!("/prod-api/api/press/like/{id}"), None, None)
            .await
    }

    pub async fn press_comment(&self, request: &PressCommentRequest) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/comment/pressComment", request).await
    }

    /// Comments attached to one news article.
    pub async fn comment_list(
        &self,
        news_id: i64,
        page: PageQuery,
    ) -> Result<Envelope<Vec<CommentRecord>>, ApiError> {
        self.get(&format!("/prod-api/api/comment/comment/{news_id}"), &page).await
    }

    pub async fn comment_like(&self, id: i64) -> Result<Envelope, ApiError> {
        self.transport
            .request(HttpMethod::Put, &format!("/prod-api/api/comment/like/{id}"), None, None)
            .await
    }

    // ── Media ──

    pub async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<Envelope, ApiError> {
        self.transport.upload("/prod-api/api/common/upload", file_name, bytes).await
    }

    pub async fn image_list(&self, page: PageQuery) -> Result<Envelope<Vec<MediaItem>>, ApiError> {
        self.get("/prod-api/api/common/images", &page).await
    }

    /// Images are addressed by their server-relative URL, not an id.
    pub async fn image_delete(&self, url: &str) -> Result<Envelope, ApiError> {
        let query = serde_json::json!({ "url": url });
        self.transport
            .request(HttpMethod::Delete, "/prod-api/api/common/images", Some(&query), None)
            .await
    }

    pub async fn file_list(&self, page: PageQuery) -> Result<Envelope<Vec<MediaItem>>, ApiError> {
        self.get("/prod-api/api/common/files", &page).await
    }

    pub async fn file_delete(&self, url: &str) -> Result<Envelope, ApiError> {
        let query = serde_json::json!({ "url": url });
        self.transport
            .request(HttpMethod::Delete, "/prod-api/api/common/files", Some(&query), None)
            .await
    }

    // ── Notices ──

    pub async fn notice_list(
        &self,
        query: &NoticeListQuery,
    ) -> Result<Envelope<Vec<NoticeRecord>>, ApiError> {
        self.get("/prod-api/api/notice/list", query).await
    }

    pub async fn notice_detail(&self, id: i64) -> Result<Envelope<NoticeRecord>, ApiError> {
        self.get(&format!("/prod-api/api/notice/{id}"), &()).await
    }

    pub async fn notice_create(&self, payload: &NoticePayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/notice", payload).await
    }

    pub async fn notice_update(
        &self,
        id: i64,
        payload: &NoticePayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/notice/{id}"), payload).await
    }

    pub async fn notice_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/notice/{id}")).await
    }

    pub async fn read_notice(&self, id: i64) -> Result<Envelope, ApiError> {
        self.transport
            .request(HttpMethod::Put, &format!("/prod-api/api/readNotice/{id}"), None, None)
            .await
    }

    // ── Neighborhood posts ──

    pub async fn neighbor_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<NeighborRecord>>, ApiError> {
        self.get("/prod-api/api/friendly_neighborhood/list", &page).await
    }

    pub async fn neighbor_detail(&self, id: i64) -> Result<Envelope<NeighborRecord>, ApiError> {
        self.get(&format!("/prod-api/api/friendly_neighborhood/{id}"), &()).await
    }

    pub async fn neighbor_create(&self, payload: &NeighborPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/friendly_neighborhood", payload).await
    }

    pub async fn neighbor_update(
        &self,
        id: i64,
        payload: &NeighborPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/friendly_neighborhood/{id}"), payload)
            .await
    }

    pub async fn neighbor_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/friendly_neighborhood/{id}")).await
    }

    pub async fn neighbor_add_comment(
        &self,
        request: &NeighborCommentRequest,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/friendly_neighborhood/add/comment", request)
            .await
    }

    // ── Activities & registrations ──

    pub async fn activity_top_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<ActivityRecord>>, ApiError> {
        self.get("/prod-api/api/activity/topList", &page).await
    }

    pub async fn activity_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<ActivityRecord>>, ApiError> {
        self.get("/prod-api/api/activity/list", &page).await
    }

    /// Search posts the words as the body and pages through the query.
    pub async fn activity_search(
        &self,
        request: &ActivitySearchRequest,
        page: PageQuery,
    ) -> Result<Envelope<Vec<ActivityRecord>>, ApiError> {
        let body = Self::to_value(request)?;
        let query = Self::to_value(&page)?;
        self.transport
            .call(HttpMethod::Post, "/prod-api/api/activity/search", Some(&query), Some(&body))
            .await
    }

    pub async fn activity_detail(&self, id: i64) -> Result<Envelope<ActivityRecord>, ApiError> {
        self.get(&format!("/prod-api/api/activity/{id}"), &()).await
    }

    pub async fn activity_category_list(
        &self,
        category_id: i64,
        page: PageQuery,
    ) -> Result<Envelope<Vec<ActivityRecord>>, ApiError> {
        self.get(&format!("/prod-api/api/activity/category/list/{category_id}"), &page).await
    }

    pub async fn activity_create(&self, payload: &ActivityPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/activity", payload).await
    }

    pub async fn activity_update(
        &self,
        id: i64,
        payload: &ActivityPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/activity/{id}"), payload).await
    }

    pub async fn activity_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/activity/{id}")).await
    }

    pub async fn registration_list(
        &self,
        query: &RegistrationListQuery,
    ) -> Result<Envelope<Vec<RegistrationRecord>>, ApiError> {
        self.get("/prod-api/api/registration/list", query).await
    }

    pub async fn registration(&self, request: &RegistrationRequest) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/registration", request).await
    }

    pub async fn checkin(&self, registration_id: i64) -> Result<Envelope, ApiError> {
        self.transport
            .request(HttpMethod::Put, &format!("/prod-api/api/checkin/{registration_id}"), None, None)
            .await
    }

    pub async fn registration_comment(
        &self,
        registration_id: i64,
        request: &RegistrationCommentRequest,
    ) -> Result<Envelope, ApiError> {
        self.write(
            HttpMethod::Put,
            &format!("/prod-api/api/registration/comment/{registration_id}"),
            request,
        )
        .await
    }

    // ── Quiz questions ──

    /// Random draw of `count` questions at the given difficulty.
    pub async fn question_draw(
        &self,
        count: i64,
        level: &str,
    ) -> Result<Envelope<Vec<QuestionRecord>>, ApiError> {
        self.get(&format!("/prod-api/api/question/questionList/{count}/{level}"), &()).await
    }

    pub async fn question_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<QuestionRecord>>, ApiError> {
        self.get("/prod-api/api/question/list", &page).await
    }

    pub async fn question_create(&self, payload: &QuestionPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/question", payload).await
    }

    pub async fn question_update(
        &self,
        id: i64,
        payload: &QuestionPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/question/{id}"), payload).await
    }

    pub async fn question_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/question/{id}")).await
    }

    pub async fn save_paper(&self, request: &SavePaperRequest) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/question/savePaper", request).await
    }

    // ── Dashboard data ──

    pub async fn data_card_list(&self) -> Result<Envelope<Vec<DataCardRecord>>, ApiError> {
        self.get("/prod-api/api/common/datacard", &()).await
    }

    pub async fn data_card_create(&self, payload: &DataCardPayload) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/common/datacard", payload).await
    }

    pub async fn data_card_update(
        &self,
        id: i64,
        payload: &DataCardPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/common/datacard/{id}"), payload).await
    }

    pub async fn data_card_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/common/datacard/{id}")).await
    }

    pub async fn data_series_list(
        &self,
        page: PageQuery,
    ) -> Result<Envelope<Vec<DataSeriesRecord>>, ApiError> {
        self.get("/prod-api/api/data/list", &page).await
    }

    pub async fn data_series_by_key(
        &self,
        list_key: &str,
    ) -> Result<Envelope<DataSeriesRecord>, ApiError> {
        self.get(&format!("/prod-api/api/data/{list_key}"), &()).await
    }

    pub async fn data_series_create(
        &self,
        payload: &DataSeriesPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Post, "/prod-api/api/data/list", payload).await
    }

    pub async fn data_series_update(
        &self,
        id: i64,
        payload: &DataSeriesPayload,
    ) -> Result<Envelope, ApiError> {
        self.write(HttpMethod::Put, &format!("/prod-api/api/data/list/{id}"), payload).await
    }

    pub async fn data_series_delete(&self, id: i64) -> Result<Envelope, ApiError> {
        self.delete(&format!("/prod-api/api/data/list/{id}")).await
    }
}
