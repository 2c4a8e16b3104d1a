use crate::models::users::entities::User;
use serde::{Deserialize, Serialize};

// 课程实体（响应中内嵌教师与选课学生）
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub teacher: Option<User>,
    pub students: Vec<User>,
    pub students_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程单元
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub order: i32,
}

// 资料类型
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Pdf,   // PDF 文档
    Video, // 视频
    Link,  // 外部链接
    Note,  // 文本笔记
}

impl<'de> Deserialize<'de> for ResourceKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!(
                "无效的资料类型: '{s}'. 支持的类型: pdf, video, link, note"
            )))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Pdf => write!(f, "pdf"),
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Link => write!(f, "link"),
            ResourceKind::Note => write!(f, "note"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ResourceKind::Pdf),
            "video" => Ok(ResourceKind::Video),
            "link" => Ok(ResourceKind::Link),
            "note" => Ok(ResourceKind::Note),
            _ => Err(format!("Invalid resource kind: {s}")),
        }
    }
}

// 学习资料
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub id: i64,
    pub course_id: i64,
    pub unit_id: Option<i64>,
    pub title: String,
    pub kind: ResourceKind,
    pub file_url: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
