use serde::Deserialize;
use std::str::FromStr;

// 批量用户操作
// user_ids / action 缺失或 action 非法时返回 400，由服务层校验
#[derive(Debug, Deserialize)]
pub struct BulkUserActionRequest {
    pub user_ids: Option<Vec<i64>>,
    pub action: Option<String>,
}

// 批量用户操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkUserAction {
    Activate,
    Deactivate,
    Delete,
}

impl FromStr for BulkUserAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activate" => Ok(BulkUserAction::Activate),
            "deactivate" => Ok(BulkUserAction::Deactivate),
            "delete" => Ok(BulkUserAction::Delete),
            _ => Err(()),
        }
    }
}

// 课程分配请求
#[derive(Debug, Deserialize)]
pub struct AssignCourseRequest {
    pub user_id: Option<i64>,
    pub course_ids: Option<Vec<i64>>,
    pub action: Option<String>,
}

// 课程分配操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignCourseAction {
    Assign,
    Remove,
}

impl FromStr for AssignCourseAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assign" => Ok(AssignCourseAction::Assign),
            "remove" => Ok(AssignCourseAction::Remove),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_action_parse() {
        assert_eq!(
            "deactivate".parse::<BulkUserAction>(),
            Ok(BulkUserAction::Deactivate)
        );
        assert!("suspend".parse::<BulkUserAction>().is_err());
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let req: BulkUserActionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_ids.is_none());
        assert!(req.action.is_none());
    }
}
