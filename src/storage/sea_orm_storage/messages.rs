use super::SeaOrmStorage;
use crate::access::{self, Actor};
use crate::entity::discussion_messages::{
    ActiveModel as DiscussionActiveModel, Column as DiscussionColumn, Entity as Discussions,
    Model as DiscussionModel,
};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages, Model as MessageModel};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    messages::{
        entities::{DiscussionMessage, Message},
        requests::{
            CreateDiscussionRequest, CreateMessageRequest, DiscussionListParams,
            MessageListParams, UpdateMessageRequest,
        },
        responses::{DiscussionListResponse, MessageListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    // 批量补全私信的收发双方用户名
    async fn hydrate_messages(&self, models: Vec<MessageModel>) -> Result<Vec<Message>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mut user_ids: Vec<i64> = models
            .iter()
            .flat_map(|m| [m.sender_id, m.receiver_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let sender_name = usernames.get(&m.sender_id).cloned();
                let receiver_name = usernames.get(&m.receiver_id).cloned();
                let mut message = m.into_message();
                message.sender_name = sender_name;
                message.receiver_name = receiver_name;
                message
            })
            .collect())
    }

    /// 发送私信，sender 取自 actor
    pub async fn create_message_impl(
        &self,
        actor: Actor,
        req: CreateMessageRequest,
    ) -> Result<Message> {
        let model = ActiveModel {
            sender_id: Set(actor.id),
            receiver_id: Set(req.receiver_id),
            content: Set(req.content),
            timestamp: Set(chrono::Utc::now().timestamp()),
            is_read: Set(false),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("发送私信失败: {e}")))?;

        let messages = self.hydrate_messages(vec![result]).await?;
        messages
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("私信组装失败"))
    }

    /// 通过 ID 获取私信（仅收发双方可见）
    pub async fn get_message_by_id_impl(&self, actor: Actor, id: i64) -> Result<Option<Message>> {
        let result = Messages::find_by_id(id)
            .filter(access::message_scope(&actor))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询私信失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_messages(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 分页列出私信（时间升序；可限定与某用户的会话）
    pub async fn list_messages_with_pagination_impl(
        &self,
        actor: Actor,
        query: MessageListParams,
    ) -> Result<MessageListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Messages::find().filter(access::message_scope(&actor));

        if let Some(with_user_id) = query.with_user_id {
            select = select.filter(
                Condition::any()
                    .add(Column::SenderId.eq(with_user_id))
                    .add(Column::ReceiverId.eq(with_user_id)),
            );
        }

        select = select.order_by_asc(Column::Timestamp);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询私信总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询私信页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询私信列表失败: {e}")))?;

        Ok(MessageListResponse {
            items: self.hydrate_messages(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新私信（标记已读）
    pub async fn update_message_impl(
        &self,
        id: i64,
        update: UpdateMessageRequest,
    ) -> Result<Option<Message>> {
        let existing = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询私信失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(is_read) = update.is_read {
            model.is_read = Set(is_read);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新私信失败: {e}")))?;

        Ok(self
            .hydrate_messages(vec![result])
            .await?
            .into_iter()
            .next())
    }

    /// 删除私信
    pub async fn delete_message_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除私信失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 批量补全讨论消息的用户名
    async fn hydrate_discussions(
        &self,
        models: Vec<DiscussionModel>,
    ) -> Result<Vec<DiscussionMessage>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i64> = models.iter().map(|m| m.user_id).collect();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let user_name = usernames.get(&m.user_id).cloned();
                let mut message = m.into_discussion_message();
                message.user_name = user_name;
                message
            })
            .collect())
    }

    /// 发布课程讨论消息，user 取自 actor
    pub async fn create_discussion_message_impl(
        &self,
        actor: Actor,
        req: CreateDiscussionRequest,
    ) -> Result<DiscussionMessage> {
        let model = DiscussionActiveModel {
            course_id: Set(req.course_id),
            user_id: Set(actor.id),
            content: Set(req.content),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("发布讨论失败: {e}")))?;

        let messages = self.hydrate_discussions(vec![result]).await?;
        messages
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("讨论消息组装失败"))
    }

    /// 通过 ID 获取讨论消息
    pub async fn get_discussion_message_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<DiscussionMessage>> {
        let result = Discussions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询讨论失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_discussions(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 分页列出课程讨论（时间升序）
    pub async fn list_discussion_messages_with_pagination_impl(
        &self,
        query: DiscussionListParams,
    ) -> Result<DiscussionListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Discussions::find();
        if let Some(course_id) = query.course_id {
            select = select.filter(DiscussionColumn::CourseId.eq(course_id));
        }
        select = select.order_by_asc(DiscussionColumn::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询讨论总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询讨论页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询讨论列表失败: {e}")))?;

        Ok(DiscussionListResponse {
            items: self.hydrate_discussions(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除讨论消息
    pub async fn delete_discussion_message_impl(&self, id: i64) -> Result<bool> {
        let result = Discussions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除讨论失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
