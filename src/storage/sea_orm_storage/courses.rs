use super::SeaOrmStorage;
use crate::entity::course_students::{
    ActiveModel as CourseStudentActiveModel, Column as CourseStudentColumn,
    Entity as CourseStudents,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model as CourseModel};
use crate::entity::resources::{
    ActiveModel as ResourceActiveModel, Column as ResourceColumn, Entity as Resources,
};
use crate::entity::units::{ActiveModel as UnitActiveModel, Column as UnitColumn, Entity as Units};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, Resource, Unit},
        requests::{
            CourseListParams, CourseScopedListParams, CreateCourseRequest, CreateResourceRequest,
            CreateUnitRequest, UpdateCourseRequest, UpdateResourceRequest, UpdateUnitRequest,
        },
        responses::{CourseListResponse, ResourceListResponse, UnitListResponse},
    },
    users::entities::User,
};
use crate::utils::escape_like_pattern;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    // 组装内嵌教师与学生的课程响应
    fn assemble_course(model: CourseModel, teacher: Option<User>, students: Vec<User>) -> Course {
        Course {
            id: model.id,
            title: model.title,
            description: model.description,
            students_count: students.len() as i64,
            teacher,
            students,
            created_at: DateTime::<Utc>::from_timestamp(model.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(model.updated_at, 0).unwrap_or_default(),
        }
    }

    // 批量补全课程的教师与学生
    async fn hydrate_courses(&self, models: Vec<CourseModel>) -> Result<Vec<Course>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut user_ids: Vec<i64> = models.iter().map(|m| m.teacher_id).collect();

        let links = CourseStudents::find()
            .filter(CourseStudentColumn::CourseId.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        user_ids.extend(links.iter().map(|l| l.student_id));
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<i64, User> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_user()))
            .collect();

        let mut students_by_course: HashMap<i64, Vec<User>> = HashMap::new();
        for link in links {
            if let Some(student) = users.get(&link.student_id) {
                students_by_course
                    .entry(link.course_id)
                    .or_default()
                    .push(student.clone());
            }
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let teacher = users.get(&m.teacher_id).cloned();
                let students = students_by_course.remove(&m.id).unwrap_or_default();
                Self::assemble_course(m, teacher, students)
            })
            .collect())
    }

    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建课程失败: {e}")))?;

        let courses = self.hydrate_courses(vec![result]).await?;
        courses
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("课程组装失败"))
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程失败: {e}")))?;

        match result {
            Some(model) => Ok(self.hydrate_courses(vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListParams,
    ) -> Result<CourseListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Courses::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: self.hydrate_courses(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程，student_ids 存在时整体替换选课学生集合
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新课程失败: {e}")))?;

        if let Some(student_ids) = update.student_ids {
            CourseStudents::delete_many()
                .filter(CourseStudentColumn::CourseId.eq(id))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    EduSystemError::database_operation(format!("清空选课记录失败: {e}"))
                })?;

            for student_id in student_ids {
                self.enroll_student_impl(id, student_id).await?;
            }
        }

        self.get_course_by_id_impl(id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生选课，已选时幂等返回 false
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let existing = CourseStudents::find()
            .filter(CourseStudentColumn::CourseId.eq(course_id))
            .filter(CourseStudentColumn::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        if existing.is_some() {
            return Ok(false);
        }

        let model = CourseStudentActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(true)
    }

    /// 学生退课
    pub async fn unenroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let result = CourseStudents::delete_many()
            .filter(CourseStudentColumn::CourseId.eq(course_id))
            .filter(CourseStudentColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 设置课程唯一授课教师
    pub async fn set_course_teacher_impl(&self, course_id: i64, teacher_id: i64) -> Result<bool> {
        let result = Courses::update_many()
            .col_expr(
                Column::TeacherId,
                sea_orm::sea_query::Expr::value(teacher_id),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("设置授课教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建课程单元
    pub async fn create_unit_impl(&self, req: CreateUnitRequest) -> Result<Unit> {
        let model = UnitActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            sort_order: Set(req.order),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建单元失败: {e}")))?;

        Ok(result.into_unit())
    }

    /// 通过 ID 获取单元
    pub async fn get_unit_by_id_impl(&self, id: i64) -> Result<Option<Unit>> {
        let result = Units::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询单元失败: {e}")))?;

        Ok(result.map(|m| m.into_unit()))
    }

    /// 分页列出单元（按 order 升序）
    pub async fn list_units_with_pagination_impl(
        &self,
        query: CourseScopedListParams,
    ) -> Result<UnitListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Units::find();
        if let Some(course_id) = query.course_id {
            select = select.filter(UnitColumn::CourseId.eq(course_id));
        }
        select = select.order_by_asc(UnitColumn::SortOrder);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询单元总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询单元页数失败: {e}")))?;
        let units = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询单元列表失败: {e}")))?;

        Ok(UnitListResponse {
            items: units.into_iter().map(|m| m.into_unit()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新单元
    pub async fn update_unit_impl(
        &self,
        id: i64,
        update: UpdateUnitRequest,
    ) -> Result<Option<Unit>> {
        let existing = self.get_unit_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = UnitActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(order) = update.order {
            model.sort_order = Set(order);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新单元失败: {e}")))?;

        Ok(Some(result.into_unit()))
    }

    /// 删除单元
    pub async fn delete_unit_impl(&self, id: i64) -> Result<bool> {
        let result = Units::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除单元失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建学习资料
    pub async fn create_resource_impl(&self, req: CreateResourceRequest) -> Result<Resource> {
        let model = ResourceActiveModel {
            course_id: Set(req.course_id),
            unit_id: Set(req.unit_id),
            title: Set(req.title),
            kind: Set(req.kind.to_string()),
            file_path: Set(req.file_path),
            url: Set(req.url),
            content: Set(req.content),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建资料失败: {e}")))?;

        Ok(result.into_resource())
    }

    /// 通过 ID 获取资料
    pub async fn get_resource_by_id_impl(&self, id: i64) -> Result<Option<Resource>> {
        let result = Resources::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_resource()))
    }

    /// 分页列出资料（按课程/单元过滤）
    pub async fn list_resources_with_pagination_impl(
        &self,
        query: CourseScopedListParams,
    ) -> Result<ResourceListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Resources::find();
        if let Some(course_id) = query.course_id {
            select = select.filter(ResourceColumn::CourseId.eq(course_id));
        }
        if let Some(unit_id) = query.unit_id {
            select = select.filter(ResourceColumn::UnitId.eq(unit_id));
        }
        select = select.order_by_desc(ResourceColumn::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询资料总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询资料页数失败: {e}")))?;
        let resources = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(ResourceListResponse {
            items: resources.into_iter().map(|m| m.into_resource()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新资料
    pub async fn update_resource_impl(
        &self,
        id: i64,
        update: UpdateResourceRequest,
    ) -> Result<Option<Resource>> {
        let existing = self.get_resource_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ResourceActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(unit_id) = update.unit_id {
            model.unit_id = Set(Some(unit_id));
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(kind) = update.kind {
            model.kind = Set(kind.to_string());
        }
        if let Some(url) = update.url {
            model.url = Set(Some(url));
        }
        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新资料失败: {e}")))?;

        Ok(Some(result.into_resource()))
    }

    /// 删除资料
    pub async fn delete_resource_impl(&self, id: i64) -> Result<bool> {
        let result = Resources::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
