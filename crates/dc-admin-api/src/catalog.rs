//! Static endpoint catalog.
//!
//! Every backend operation the console can reach, as data: a symbolic key,
//! HTTP method, URL template with `{name}` placeholders, whether a bearer
//! token is expected, and a human label. The playground drives arbitrary
//! invocations off this table; typed service methods cover the same surface.

use serde::{Deserialize, Serialize};

/// HTTP methods used by the backend surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Metadata describing one invocable backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Unique key across the catalog.
    pub key: &'static str,
    pub method: HttpMethod,
    /// URL template; `{name}` segments must be substituted before dispatch.
    pub path: &'static str,
    /// Whether the endpoint expects a bearer token.
    pub auth: bool,
    pub description: &'static str,
}

/// Key of the file-upload endpoint, which bypasses JSON parameters and sends
/// a single-field multipart payload instead.
pub const UPLOAD_KEY: &str = "upload";

use HttpMethod::{Delete, Get, Post, Put};

/// The fixed catalog, ordered as presented to the operator.
pub const ENDPOINT_CATALOG: &[EndpointDescriptor] = &[
    EndpointDescriptor { key: "logout", method: Post, path: "/logout", auth: false, description: "log out" },
    EndpointDescriptor { key: "phoneLogin", method: Post, path: "/prod-api/api/phone/login", auth: false, description: "phone + SMS login" },
    EndpointDescriptor { key: "login", method: Post, path: "/prod-api/api/login", auth: false, description: "username login" },
    EndpointDescriptor { key: "smsCode", method: Get, path: "/prod-api/api/smsCode", auth: false, description: "request SMS code" },
    EndpointDescriptor { key: "register", method: Post, path: "/prod-api/api/register", auth: false, description: "register account" },
    EndpointDescriptor { key: "dataCard", method: Get, path: "/prod-api/api/common/datacard", auth: false, description: "green-future data cards" },
    EndpointDescriptor { key: "dataCardCreate", method: Post, path: "/prod-api/api/common/datacard", auth: true, description: "create data card" },
    EndpointDescriptor { key: "dataCardUpdate", method: Put, path: "/prod-api/api/common/datacard/{id}", auth: true, description: "update data card" },
    EndpointDescriptor { key: "dataCardDelete", method: Delete, path: "/prod-api/api/common/datacard/{id}", auth: true, description: "delete data card" },
    EndpointDescriptor { key: "questionList", method: Get, path: "/prod-api/api/question/questionList/{id}/{level}", auth: true, description: "random quiz draw" },
    EndpointDescriptor { key: "questionAdminList", method: Get, path: "/prod-api/api/question/list", auth: true, description: "question bank list" },
    EndpointDescriptor { key: "questionCreate", method: Post, path: "/prod-api/api/question", auth: true, description: "create question" },
    EndpointDescriptor { key: "questionUpdate", method: Put, path: "/prod-api/api/question/{id}", auth: true, description: "update question" },
    EndpointDescriptor { key: "questionDelete", method: Delete, path: "/prod-api/api/question/{id}", auth: true, description: "delete question" },
    EndpointDescriptor { key: "savePaper", method: Post, path: "/prod-api/api/question/savePaper", auth: true, description: "submit quiz answers" },
    EndpointDescriptor { key: "dataSeriesList", method: Get, path: "/prod-api/api/data/list", auth: true, description: "data series list" },
    EndpointDescriptor { key: "dataSeriesByKey", method: Get, path: "/prod-api/api/data/{listKey}", auth: true, description: "data series by key" },
    EndpointDescriptor { key: "dataSeriesCreate", method: Post, path: "/prod-api/api/data/list", auth: true, description: "create data series" },
    EndpointDescriptor { key: "dataSeriesUpdate", method: Put, path: "/prod-api/api/data/list/{id}", auth: true, description: "update data series" },
    EndpointDescriptor { key: "dataSeriesDelete", method: Delete, path: "/prod-api/api/data/list/{id}", auth: true, description: "delete data series" },
    EndpointDescriptor { key: "userList", method: Get, path: "/prod-api/api/user/list", auth: true, description: "user list" },
    EndpointDescriptor { key: "userCreate", method: Post, path: "/prod-api/api/user", auth: true, description: "create user" },
    EndpointDescriptor { key: "userUpdate", method: Put, path: "/prod-api/api/user/{id}", auth: true, description: "update user" },
    EndpointDescriptor { key: "userDelete", method: Delete, path: "/prod-api/api/user/{id}", auth: true, description: "delete user" },
    EndpointDescriptor { key: "getUserInfo", method: Get, path: "/prod-api/api/user/getUserInfo", auth: true, description: "fetch own profile" },
    EndpointDescriptor { key: "updateUserInfo", method: Put, path: "/prod-api/api/user/updateUserInfo", auth: true, description: "update own profile" },
    EndpointDescriptor { key: "resetPwd", method: Put, path: "/prod-api/api/user/resetPwd", auth: true, description: "reset password" },
    EndpointDescriptor { key: "rotationList", method: Get, path: "/prod-api/api/rotation/list", auth: false, description: "banner list" },
    EndpointDescriptor { key: "rotationCreate", method: Post, path: "/prod-api/api/rotation", auth: true, description: "create banner" },
    EndpointDescriptor { key: "rotationUpdate", method: Put, path: "/prod-api/api/rotation/{id}", auth: true, description: "update banner" },
    EndpointDescriptor { key: "rotationDelete", method: Delete, path: "/prod-api/api/rotation/{id}", auth: true, description: "delete banner" },
    EndpointDescriptor { key: "pressCategoryList", method: Get, path: "/prod-api/api/press/category/list", auth: true, description: "news category list" },
    EndpointDescriptor { key: "pressCategoryCreate", method: Post, path: "/prod-api/api/press/category", auth: true, description: "create news category" },
    EndpointDescriptor { key: "pressCategoryUpdate", method: Put, path: "/prod-api/api/press/category/{id}", auth: true, description: "update news category" },
    EndpointDescriptor { key: "pressCategoryDelete", method: Delete, path: "/prod-api/api/press/category/{id}", auth: true, description: "delete news category" },
    EndpointDescriptor { key: "pressNewsList", method: Get, path: "/prod-api/api/press/newsList", auth: true, description: "news list" },
    EndpointDescriptor { key: "pressNewsCreate", method: Post, path: "/prod-api/api/press/news", auth: true, description: "create news" },
    EndpointDescriptor { key: "pressNewsUpdate", method: Put, path: "/prod-api/api/press/news/{id}", auth: true, description: "update news" },
    EndpointDescriptor { key: "pressNewsDelete", method: Delete, path: "/prod-api/api/press/news/{id}", auth: true, description: "delete news" },
    EndpointDescriptor { key: "pressCategoryNewsList", method: Get, path: "/prod-api/api/press/category/newsList", auth: true, description: "news list by category" },
    EndpointDescriptor { key: "pressNewsDetail", method: Get, path: "/prod-api/api/press/news/{id}", auth: true, description: "news detail" },
    EndpointDescriptor { key: "pressLike", method: Put, path: "/prod-api/api/press/like/{id}", auth: true, description: "like news" },
    EndpointDescriptor { key: "pressComment", method: Post, path: "/prod-api/api/comment/pressComment", auth: true, description: "comment on news" },
    EndpointDescriptor { key: "commentList", method: Get, path: "/prod-api/api/comment/comment/{id}", auth: true, description: "news comment list" },
    EndpointDescriptor { key: "commentLike", method: Put, path: "/prod-api/api/comment/like/{id}", auth: true, description: "like comment" },
    EndpointDescriptor { key: "upload", method: Post, path: "/prod-api/api/common/upload", auth: true, description: "generic upload" },
    EndpointDescriptor { key: "imageList", method: Get, path: "/prod-api/api/common/images", auth: false, description: "image list" },
    EndpointDescriptor { key: "imageDelete", method: Delete, path: "/prod-api/api/common/images", auth: true, description: "delete image by url" },
    EndpointDescriptor { key: "fileList", method: Get, path: "/prod-api/api/common/files", auth: false, description: "file list" },
    EndpointDescriptor { key: "fileDelete", method: Delete, path: "/prod-api/api/common/files", auth: true, description: "delete file by url" },
    EndpointDescriptor { key: "noticeList", method: Get, path: "/prod-api/api/notice/list", auth: false, description: "notice list" },
    EndpointDescriptor { key: "noticeCreate", method: Post, path: "/prod-api/api/notice", auth: true, description: "create notice" },
    EndpointDescriptor { key: "noticeUpdate", method: Put, path: "/prod-api/api/notice/{id}", auth: true, description: "update notice" },
    EndpointDescriptor { key: "noticeDelete", method: Delete, path: "/prod-api/api/notice/{id}", auth: true, description: "delete notice" },
    EndpointDescriptor { key: "noticeDetail", method: Get, path: "/prod-api/api/notice/{id}", auth: true, description: "notice detail" },
    EndpointDescriptor { key: "readNotice", method: Put, path: "/prod-api/api/readNotice/{id}", auth: true, description: "mark notice read" },
    EndpointDescriptor { key: "neighborList", method: Get, path: "/prod-api/api/friendly_neighborhood/list", auth: false, description: "neighborhood post list" },
    EndpointDescriptor { key: "neighborCreate", method: Post, path: "/prod-api/api/friendly_neighborhood", auth: true, description: "create neighborhood post" },
    EndpointDescriptor { key: "neighborUpdate", method: Put, path: "/prod-api/api/friendly_neighborhood/{id}", auth: true, description: "update neighborhood post" },
    EndpointDescriptor { key: "neighborDelete", method: Delete, path: "/prod-api/api/friendly_neighborhood/{id}", auth: true, description: "delete neighborhood post" },
    EndpointDescriptor { key: "neighborAddComment", method: Post, path: "/prod-api/api/friendly_neighborhood/add/comment", auth: false, description: "comment on neighborhood post" },
    EndpointDescriptor { key: "neighborDetail", method: Get, path: "/prod-api/api/friendly_neighborhood/{id}", auth: false, description: "neighborhood post detail" },
    EndpointDescriptor { key: "activityTopList", method: Get, path: "/prod-api/api/activity/topList", auth: false, description: "top activities" },
    EndpointDescriptor { key: "activityList", method: Get, path: "/prod-api/api/activity/list", auth: false, description: "activity list" },
    EndpointDescriptor { key: "activitySearch", method: Post, path: "/prod-api/api/activity/search", auth: false, description: "activity search" },
    EndpointDescriptor { key: "activityDetail", method: Get, path: "/prod-api/api/activity/{id}", auth: false, description: "activity detail" },
    EndpointDescriptor { key: "activityCategoryList", method: Get, path: "/prod-api/api/activity/category/list/{id}", auth: false, description: "activities by category" },
    EndpointDescriptor { key: "activityCreate", method: Post, path: "/prod-api/api/activity", auth: true, description: "create activity" },
    EndpointDescriptor { key: "activityUpdate", method: Put, path: "/prod-api/api/activity/{id}", auth: true, description: "update activity" },
    EndpointDescriptor { key: "activityDelete", method: Delete, path: "/prod-api/api/activity/{id}", auth: true, description: "delete activity" },
    EndpointDescriptor { key: "registrationList", method: Get, path: "/prod-api/api/registration/list", auth: true, description: "registration list" },
    EndpointDescriptor { key: "registration", method: Post, path: "/prod-api/api/registration", auth: true, description: "register for activity" },
    EndpointDescriptor { key: "checkin", method: Put, path: "/prod-api/api/checkin/{id}", auth: true, description: "activity check-in" },
    EndpointDescriptor { key: "registrationComment", method: Put, path: "/prod-api/api/registration/comment/{id}", auth: true, description: "rate an activity" },
];

/// Look up a descriptor by its unique key.
pub fn find_endpoint(key: &str) -> Option<&'static EndpointDescriptor> {
    ENDPOINT_CATALOG.iter().find(|e| e.key == key)
}

/// Placeholder names appearing in a URL template, in order.
pub fn path_placeholders(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_are_unique() {
        let mut seen = HashSet::new();
        for entry in ENDPOINT_CATALOG {
            assert!(seen.insert(entry.key), "duplicate catalog key: {}", entry.key);
        }
    }

    #[test]
    fn test_catalog_placeholders_are_well_formed() {
        for entry in ENDPOINT_CATALOG {
            assert_eq!(
                entry.path.matches('{').count(),
                entry.path.matches('}').count(),
                "unbalanced braces in {}",
                entry.path
            );
            for name in path_placeholders(entry.path) {
                assert!(!name.is_empty(), "empty placeholder in {}", entry.path);
                assert!(
                    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                    "bad placeholder `{}` in {}",
                    name,
                    entry.path
                );
            }
        }
    }

    #[test]
    fn test_find_endpoint() {
        let login = find_endpoint("login").unwrap();
        assert_eq!(login.method, HttpMethod::Post);
        assert_eq!(login.path, "/prod-api/api/login");
        assert!(!login.auth);
        assert!(find_endpoint("nope").is_none());
    }

    #[test]
    fn test_placeholder_extraction() {
        assert_eq!(
            path_placeholders("/prod-api/api/question/questionList/{id}/{level}"),
            vec!["id", "level"]
        );
        assert!(path_placeholders("/prod-api/api/login").is_empty());
    }
}
