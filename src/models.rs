use serde::Serialize;
use uuid::Uuid;

/// Stored user record / 存储的用户记录
///
/// `id` is always generated by the backend, never taken from the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Record {
    /// Create a record with a fresh random identifier / 创建带随机ID的记录
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Values searched by queries / 参与搜索的字段值
    ///
    /// The generated `id` is left out: it carries nothing the user uploaded.
    pub fn searchable_fields(&self) -> [&str; 2] {
        [self.name.as_str(), self.email.as_str()]
    }
}
