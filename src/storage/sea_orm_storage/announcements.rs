use super::SeaOrmStorage;
use crate::access::{self, Actor};
use crate::entity::announcements::{
    ActiveModel, Column, Entity as Announcements, Model as AnnouncementModel,
};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    announcements::{
        entities::Announcement,
        requests::{AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest},
        responses::AnnouncementListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    // 批量补全公告的作者与课程信息
    async fn hydrate_announcements(
        &self,
        models: Vec<AnnouncementModel>,
    ) -> Result<Vec<Announcement>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i64> = models.iter().map(|m| m.author_id).collect();
        let course_ids: Vec<i64> = models.iter().filter_map(|m| m.course_id).collect();

        let authors: HashMap<i64, (String, String)> = Users::find()
            .filter(UserColumn::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, (u.username, u.role)))
            .collect();

        let course_titles: HashMap<i64, String> = if course_ids.is_empty() {
            HashMap::new()
        } else {
            Courses::find()
                .filter(CourseColumn::Id.is_in(course_ids))
                .all(&self.db)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("查询课程失败: {e}")))?
                .into_iter()
                .map(|c| (c.id, c.title))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let author = authors.get(&m.author_id).cloned();
                let course_title = m.course_id.and_then(|id| course_titles.get(&id).cloned());
                let mut announcement = m.into_announcement();
                if let Some((name, role)) = author {
                    announcement.author_name = Some(name);
                    announcement.author_role = Some(role);
                }
                announcement.course_title = course_title;
                announcement
            })
            .collect())
    }

    /// 发布公告，author 取自 actor
    pub async fn create_announcement_impl(
        &self,
        actor: Actor,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        let model = ActiveModel {
            course_id: Set(req.course_id),
            author_id: Set(actor.id),
            title: Set(req.title),
            content: Set(req.content),
            is_global: Set(req.is_global),
            priority: Set(req.priority),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("发布公告失败: {e}")))?;

        let announcements = self.hydrate_announcements(vec![result]).await?;
        announcements
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("公告组装失败"))
    }

    /// 通过 ID 获取公告（经访问策略过滤）
    pub async fn get_announcement_by_id_impl(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(id)
            .filter(access::announcement_scope(&actor))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询公告失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_announcements(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 分页列出公告（优先级降序、发布时间降序）
    pub async fn list_announcements_with_pagination_impl(
        &self,
        actor: Actor,
        query: AnnouncementListParams,
    ) -> Result<AnnouncementListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Announcements::find().filter(access::announcement_scope(&actor));
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        select = select
            .order_by_desc(Column::Priority)
            .order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询公告总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询公告页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询公告列表失败: {e}")))?;

        Ok(AnnouncementListResponse {
            items: self.hydrate_announcements(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新公告
    pub async fn update_announcement_impl(
        &self,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        let existing = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询公告失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(is_global) = update.is_global {
            model.is_global = Set(is_global);
        }
        if let Some(priority) = update.priority {
            model.priority = Set(priority);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新公告失败: {e}")))?;

        Ok(self
            .hydrate_announcements(vec![result])
            .await?
            .into_iter()
            .next())
    }

    /// 删除公告
    pub async fn delete_announcement_impl(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
