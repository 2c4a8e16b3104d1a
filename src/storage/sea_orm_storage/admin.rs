use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::admin::responses::DashboardStatsResponse;
use crate::models::users::entities::UserStatus;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 批量更新用户状态，返回受影响行数
    pub async fn bulk_update_user_status_impl(
        &self,
        user_ids: &[i64],
        status: UserStatus,
    ) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let result = Users::update_many()
            .col_expr(UserColumn::Status, Expr::value(status.to_string()))
            .col_expr(UserColumn::UpdatedAt, Expr::value(now))
            .filter(UserColumn::Id.is_in(user_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("批量更新用户失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 批量删除用户，返回受影响行数
    pub async fn bulk_delete_users_impl(&self, user_ids: &[i64]) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = Users::delete_many()
            .filter(UserColumn::Id.is_in(user_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("批量删除用户失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 仪表盘统计：学生数、教师数、课程数与最近注册用户
    pub async fn get_dashboard_stats_impl(&self) -> Result<DashboardStatsResponse> {
        let total_students = Users::find()
            .filter(UserColumn::Role.eq("student"))
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("统计学生数失败: {e}")))?;

        let total_teachers = Users::find()
            .filter(UserColumn::Role.eq("teacher"))
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("统计教师数失败: {e}")))?;

        let total_courses = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("统计课程数失败: {e}")))?;

        let recent_users = Users::find()
            .order_by_desc(UserColumn::CreatedAt)
            .limit(5)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询最近用户失败: {e}")))?
            .into_iter()
            .map(|u| u.into_user())
            .collect();

        Ok(DashboardStatsResponse {
            total_students,
            total_teachers,
            total_courses,
            recent_users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_user};
    use super::*;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_bulk_deactivate_reports_affected_rows() {
        let storage = memory_storage().await;
        let mut ids = Vec::new();
        for name in ["stu_a", "stu_b", "stu_c", "stu_d"] {
            ids.push(seed_user(&storage, name, UserRole::Student).await.id);
        }

        let affected = storage
            .bulk_update_user_status_impl(&ids[..3], UserStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(affected, 3);

        for (i, id) in ids.iter().enumerate() {
            let user = storage.get_user_by_id_impl(*id).await.unwrap().unwrap();
            let expected = if i < 3 {
                UserStatus::Inactive
            } else {
                UserStatus::Active
            };
            assert_eq!(user.status, expected);
        }
    }

    #[tokio::test]
    async fn test_bulk_update_with_empty_ids_touches_nothing() {
        let storage = memory_storage().await;
        let affected = storage
            .bulk_update_user_status_impl(&[], UserStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }
}
