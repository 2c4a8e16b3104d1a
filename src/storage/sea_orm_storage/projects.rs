use super::SeaOrmStorage;
use crate::access::{self, Actor};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::project_files::{
    ActiveModel as ProjectFileActiveModel, Column as ProjectFileColumn, Entity as ProjectFiles,
    Model as ProjectFileModel,
};
use crate::entity::project_milestones::{
    ActiveModel as MilestoneActiveModel, Column as MilestoneColumn, Entity as Milestones,
};
use crate::entity::projects::{ActiveModel, Column, Entity as Projects, Model as ProjectModel};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    projects::{
        entities::{Project, ProjectFile, ProjectMilestone},
        requests::{
            CreateMilestoneRequest, CreateProjectFileRequest, CreateProjectRequest,
            MilestoneListParams, ProjectFileListParams, ProjectListParams, UpdateMilestoneRequest,
            UpdateProjectFileRequest, UpdateProjectRequest,
        },
        responses::{MilestoneListResponse, ProjectFileListResponse, ProjectListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    // 批量补全项目的派生字段与内嵌子资源
    async fn hydrate_projects(&self, models: Vec<ProjectModel>) -> Result<Vec<Project>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let course_titles: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        let mut milestones_by_project: HashMap<i64, Vec<ProjectMilestone>> = HashMap::new();
        for m in Milestones::find()
            .filter(MilestoneColumn::ProjectId.is_in(project_ids.clone()))
            .order_by_asc(MilestoneColumn::Date)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询里程碑失败: {e}")))?
        {
            milestones_by_project
                .entry(m.project_id)
                .or_default()
                .push(m.into_milestone());
        }

        let file_models = ProjectFiles::find()
            .filter(ProjectFileColumn::ProjectId.is_in(project_ids))
            .order_by_asc(ProjectFileColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目文件失败: {e}")))?;
        let mut files_by_project: HashMap<i64, Vec<ProjectFile>> = HashMap::new();
        for f in self.hydrate_project_files(file_models).await? {
            files_by_project.entry(f.project_id).or_default().push(f);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let student_name = usernames.get(&m.student_id).cloned();
                let course_title = course_titles.get(&m.course_id).cloned();
                let milestones = milestones_by_project.remove(&m.id).unwrap_or_default();
                let files = files_by_project.remove(&m.id).unwrap_or_default();
                let mut project = m.into_project();
                project.student_name = student_name;
                project.course_title = course_title;
                project.milestones = milestones;
                project.files = files;
                project
            })
            .collect())
    }

    /// 创建项目
    pub async fn create_project_impl(&self, req: CreateProjectRequest) -> Result<Project> {
        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            status: Set(req.status),
            deadline: Set(req.deadline),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建项目失败: {e}")))?;

        let projects = self.hydrate_projects(vec![result]).await?;
        projects
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("项目组装失败"))
    }

    /// 通过 ID 获取项目（经访问策略过滤）
    pub async fn get_project_by_id_impl(&self, actor: Actor, id: i64) -> Result<Option<Project>> {
        let result = Projects::find_by_id(id)
            .filter(access::project_scope(&actor))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_projects(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 分页列出项目（经访问策略过滤）
    pub async fn list_projects_with_pagination_impl(
        &self,
        actor: Actor,
        query: ProjectListParams,
    ) -> Result<ProjectListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Projects::find().filter(access::project_scope(&actor));
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目列表失败: {e}")))?;

        Ok(ProjectListResponse {
            items: self.hydrate_projects(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新项目
    pub async fn update_project_impl(
        &self,
        id: i64,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
        let existing = Projects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目失败: {e}")))?;
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
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }
        if let Some(deadline) = update.deadline {
            model.deadline = Set(deadline);
        }
        if let Some(grade) = update.grade {
            model.grade = Set(Some(grade));
        }
        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新项目失败: {e}")))?;

        Ok(self
            .hydrate_projects(vec![result])
            .await?
            .into_iter()
            .next())
    }

    /// 删除项目
    pub async fn delete_project_impl(&self, id: i64) -> Result<bool> {
        let result = Projects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除项目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建里程碑
    pub async fn create_milestone_impl(
        &self,
        req: CreateMilestoneRequest,
    ) -> Result<ProjectMilestone> {
        let model = MilestoneActiveModel {
            project_id: Set(req.project_id),
            title: Set(req.title),
            date: Set(req.date),
            status: Set(req.status),
            description: Set(req.description),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建里程碑失败: {e}")))?;

        Ok(result.into_milestone())
    }

    /// 通过 ID 获取里程碑
    pub async fn get_milestone_by_id_impl(&self, id: i64) -> Result<Option<ProjectMilestone>> {
        let result = Milestones::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询里程碑失败: {e}")))?;

        Ok(result.map(|m| m.into_milestone()))
    }

    /// 分页列出里程碑
    pub async fn list_milestones_with_pagination_impl(
        &self,
        query: MilestoneListParams,
    ) -> Result<MilestoneListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Milestones::find();
        if let Some(project_id) = query.project_id {
            select = select.filter(MilestoneColumn::ProjectId.eq(project_id));
        }
        select = select.order_by_asc(MilestoneColumn::Date);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询里程碑总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询里程碑页数失败: {e}")))?;
        let milestones = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询里程碑列表失败: {e}")))?;

        Ok(MilestoneListResponse {
            items: milestones.into_iter().map(|m| m.into_milestone()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新里程碑
    pub async fn update_milestone_impl(
        &self,
        id: i64,
        update: UpdateMilestoneRequest,
    ) -> Result<Option<ProjectMilestone>> {
        let existing = self.get_milestone_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = MilestoneActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新里程碑失败: {e}")))?;

        Ok(Some(result.into_milestone()))
    }

    /// 删除里程碑
    pub async fn delete_milestone_impl(&self, id: i64) -> Result<bool> {
        let result = Milestones::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除里程碑失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 批量补全项目文件的上传者名
    async fn hydrate_project_files(
        &self,
        models: Vec<ProjectFileModel>,
    ) -> Result<Vec<ProjectFile>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let uploader_ids: Vec<i64> = models.iter().map(|m| m.uploader_id).collect();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(uploader_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let uploader_name = usernames.get(&m.uploader_id).cloned();
                let mut file = m.into_project_file();
                file.uploader_name = uploader_name;
                file
            })
            .collect())
    }

    /// 登记项目文件，uploader 取自 actor
    pub async fn create_project_file_impl(
        &self,
        actor: Actor,
        req: CreateProjectFileRequest,
    ) -> Result<ProjectFile> {
        let model = ProjectFileActiveModel {
            project_id: Set(req.project_id),
            uploader_id: Set(actor.id),
            file_path: Set(req.file_path),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("登记项目文件失败: {e}")))?;

        let files = self.hydrate_project_files(vec![result]).await?;
        files
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("项目文件组装失败"))
    }

    /// 通过 ID 获取项目文件
    pub async fn get_project_file_by_id_impl(&self, id: i64) -> Result<Option<ProjectFile>> {
        let result = ProjectFiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目文件失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_project_files(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 更新项目文件
    pub async fn update_project_file_impl(
        &self,
        id: i64,
        update: UpdateProjectFileRequest,
    ) -> Result<Option<ProjectFile>> {
        let existing = ProjectFiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询项目文件失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ProjectFileActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(file_path) = update.file_path {
            model.file_path = Set(file_path);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新项目文件失败: {e}")))?;

        Ok(self
            .hydrate_project_files(vec![result])
            .await?
            .into_iter()
            .next())
    }

    /// 分页列出项目文件
    pub async fn list_project_files_with_pagination_impl(
        &self,
        query: ProjectFileListParams,
    ) -> Result<ProjectFileListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = ProjectFiles::find();
        if let Some(project_id) = query.project_id {
            select = select.filter(ProjectFileColumn::ProjectId.eq(project_id));
        }
        select = select.order_by_desc(ProjectFileColumn::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            EduSystemError::database_operation(format!("查询项目文件总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            EduSystemError::database_operation(format!("查询项目文件页数失败: {e}"))
        })?;
        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            EduSystemError::database_operation(format!("查询项目文件列表失败: {e}"))
        })?;

        Ok(ProjectFileListResponse {
            items: self.hydrate_project_files(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除项目文件
    pub async fn delete_project_file_impl(&self, id: i64) -> Result<bool> {
        let result = ProjectFiles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除项目文件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
