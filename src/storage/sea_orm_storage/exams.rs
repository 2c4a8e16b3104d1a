use super::SeaOrmStorage;
use crate::access::{self, Actor};
use crate::entity::choices::{
    ActiveModel as ChoiceActiveModel, Column as ChoiceColumn, Entity as Choices,
};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::exam_submissions::{
    ActiveModel as ExamSubmissionActiveModel, Column as ExamSubmissionColumn,
    Entity as ExamSubmissions, Model as ExamSubmissionModel,
};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams, Model as ExamModel};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    exams::{
        entities::{Exam, ExamSubmission, Question},
        requests::{
            CreateExamRequest, CreateExamSubmissionRequest, ExamListParams,
            ExamSubmissionListParams, UpdateExamRequest, UpdateExamSubmissionRequest,
        },
        responses::{ExamListResponse, ExamSubmissionListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    // 批量补全考试的派生字段与内嵌试题
    async fn hydrate_exams(&self, models: Vec<ExamModel>) -> Result<Vec<Exam>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let exam_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let creator_ids: Vec<i64> = models.iter().map(|m| m.created_by).collect();
        let course_ids: Vec<i64> = models.iter().filter_map(|m| m.course_id).collect();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(creator_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
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

        let question_models = Questions::find()
            .filter(QuestionColumn::ExamId.is_in(exam_ids))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询试题失败: {e}")))?;
        let question_ids: Vec<i64> = question_models.iter().map(|q| q.id).collect();

        let mut choices_by_question: HashMap<i64, Vec<_>> = HashMap::new();
        if !question_ids.is_empty() {
            for c in Choices::find()
                .filter(ChoiceColumn::QuestionId.is_in(question_ids))
                .order_by_asc(ChoiceColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("查询选项失败: {e}")))?
            {
                choices_by_question
                    .entry(c.question_id)
                    .or_default()
                    .push(c.into_choice());
            }
        }

        let mut questions_by_exam: HashMap<i64, Vec<Question>> = HashMap::new();
        for q in question_models {
            let mut question = q.into_question();
            question.choices = choices_by_question.remove(&question.id).unwrap_or_default();
            questions_by_exam
                .entry(question.exam_id)
                .or_default()
                .push(question);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let created_by_name = usernames.get(&m.created_by).cloned();
                let course_title = m.course_id.and_then(|id| course_titles.get(&id).cloned());
                let questions = questions_by_exam.remove(&m.id).unwrap_or_default();
                let mut exam = m.into_exam();
                exam.created_by_name = created_by_name;
                exam.course_title = course_title;
                exam.questions = questions;
                exam
            })
            .collect())
    }

    /// 在单个事务内创建考试及其嵌套试题、选项，任一失败则整体回滚
    pub async fn create_exam_with_questions_impl(
        &self,
        actor: Actor,
        req: CreateExamRequest,
    ) -> Result<Exam> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let exam = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            course_id: Set(req.course_id),
            created_by: Set(actor.id),
            duration_minutes: Set(req.duration_minutes),
            total_marks: Set(req.total_marks),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EduSystemError::database_operation(format!("创建考试失败: {e}")))?;

        for question_req in req.questions {
            let question = QuestionActiveModel {
                exam_id: Set(exam.id),
                text: Set(question_req.text),
                marks: Set(question_req.marks),
                question_type: Set(question_req.question_type),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建试题失败: {e}")))?;

            for choice_req in question_req.choices {
                ChoiceActiveModel {
                    question_id: Set(question.id),
                    text: Set(choice_req.text),
                    is_correct: Set(choice_req.is_correct),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("创建选项失败: {e}")))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("提交事务失败: {e}")))?;

        let exams = self.hydrate_exams(vec![exam]).await?;
        exams
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("考试组装失败"))
    }

    /// 通过 ID 获取考试（经访问策略过滤）
    pub async fn get_exam_by_id_impl(&self, actor: Actor, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .filter(access::exam_scope(&actor))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试失败: {e}")))?;

        match result {
            Some(model) => Ok(self.hydrate_exams(vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// 分页列出考试（经访问策略过滤）
    pub async fn list_exams_with_pagination_impl(
        &self,
        actor: Actor,
        query: ExamListParams,
    ) -> Result<ExamListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Exams::find().filter(access::exam_scope(&actor));
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(ExamListResponse {
            items: self.hydrate_exams(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新考试基本字段
    pub async fn update_exam_impl(
        &self,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let existing = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试失败: {e}")))?;
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
        if let Some(course_id) = update.course_id {
            model.course_id = Set(Some(course_id));
        }
        if let Some(duration_minutes) = update.duration_minutes {
            model.duration_minutes = Set(duration_minutes);
        }
        if let Some(total_marks) = update.total_marks {
            model.total_marks = Set(total_marks);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新考试失败: {e}")))?;

        Ok(self.hydrate_exams(vec![result]).await?.into_iter().next())
    }

    /// 删除考试及其试题、选项、提交
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let question_ids: Vec<i64> = Questions::find()
            .filter(QuestionColumn::ExamId.eq(id))
            .all(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询试题失败: {e}")))?
            .into_iter()
            .map(|q| q.id)
            .collect();

        if !question_ids.is_empty() {
            Choices::delete_many()
                .filter(ChoiceColumn::QuestionId.is_in(question_ids))
                .exec(&txn)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("删除选项失败: {e}")))?;
        }

        Questions::delete_many()
            .filter(QuestionColumn::ExamId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除试题失败: {e}")))?;

        ExamSubmissions::delete_many()
            .filter(ExamSubmissionColumn::ExamId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除考试提交失败: {e}")))?;

        let result = Exams::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除考试失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 批量补全考试提交的派生字段
    async fn hydrate_exam_submissions(
        &self,
        models: Vec<ExamSubmissionModel>,
    ) -> Result<Vec<ExamSubmission>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let exam_ids: Vec<i64> = models.iter().map(|m| m.exam_id).collect();

        let usernames: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let exam_titles: HashMap<i64, String> = Exams::find()
            .filter(Column::Id.is_in(exam_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.title))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let student_name = usernames.get(&m.student_id).cloned();
                let exam_title = exam_titles.get(&m.exam_id).cloned();
                let mut submission = m.into_exam_submission();
                submission.student_name = student_name;
                submission.exam_title = exam_title;
                submission
            })
            .collect())
    }

    /// 创建考试提交，student 取自 actor
    pub async fn create_exam_submission_impl(
        &self,
        actor: Actor,
        req: CreateExamSubmissionRequest,
    ) -> Result<ExamSubmission> {
        let model = ExamSubmissionActiveModel {
            exam_id: Set(req.exam_id),
            student_id: Set(actor.id),
            score: Set(req.score),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建考试提交失败: {e}")))?;

        let submissions = self.hydrate_exam_submissions(vec![result]).await?;
        submissions
            .into_iter()
            .next()
            .ok_or_else(|| EduSystemError::database_operation("考试提交组装失败"))
    }

    /// 通过 ID 获取考试提交（经访问策略过滤）
    pub async fn get_exam_submission_by_id_impl(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<Option<ExamSubmission>> {
        let result = ExamSubmissions::find_by_id(id)
            .filter(access::exam_submission_scope(&actor))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试提交失败: {e}")))?;

        match result {
            Some(model) => Ok(self
                .hydrate_exam_submissions(vec![model])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 分页列出考试提交（经访问策略过滤）
    pub async fn list_exam_submissions_with_pagination_impl(
        &self,
        actor: Actor,
        query: ExamSubmissionListParams,
    ) -> Result<ExamSubmissionListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = ExamSubmissions::find().filter(access::exam_submission_scope(&actor));
        if let Some(exam_id) = query.exam_id {
            select = select.filter(ExamSubmissionColumn::ExamId.eq(exam_id));
        }
        select = select.order_by_desc(ExamSubmissionColumn::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            EduSystemError::database_operation(format!("查询考试提交总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            EduSystemError::database_operation(format!("查询考试提交页数失败: {e}"))
        })?;
        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            EduSystemError::database_operation(format!("查询考试提交列表失败: {e}"))
        })?;

        Ok(ExamSubmissionListResponse {
            items: self.hydrate_exam_submissions(models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新考试提交（重新评分）
    pub async fn update_exam_submission_impl(
        &self,
        id: i64,
        update: UpdateExamSubmissionRequest,
    ) -> Result<Option<ExamSubmission>> {
        let existing = ExamSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考试提交失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ExamSubmissionActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(score) = update.score {
            model.score = Set(score);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新考试提交失败: {e}")))?;

        Ok(self
            .hydrate_exam_submissions(vec![result])
            .await?
            .into_iter()
            .next())
    }

    /// 删除考试提交
    pub async fn delete_exam_submission_impl(&self, id: i64) -> Result<bool> {
        let result = ExamSubmissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("删除考试提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_user};
    use super::*;
    use crate::models::exams::requests::{CreateChoiceRequest, CreateQuestionRequest};
    use crate::models::users::entities::UserRole;

    fn nested_exam_request() -> CreateExamRequest {
        let choices = |correct: usize| {
            (0..3)
                .map(|i| CreateChoiceRequest {
                    text: format!("选项{i}"),
                    is_correct: i == correct,
                })
                .collect()
        };
        CreateExamRequest {
            title: "期中测验".to_string(),
            description: "第一单元".to_string(),
            course_id: None,
            duration_minutes: 60,
            total_marks: 100,
            questions: vec![
                CreateQuestionRequest {
                    text: "第一题".to_string(),
                    marks: 2,
                    question_type: "MCQ".to_string(),
                    choices: choices(0),
                },
                CreateQuestionRequest {
                    text: "第二题".to_string(),
                    marks: 3,
                    question_type: "MCQ".to_string(),
                    choices: choices(2),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_nested_exam_create_persists_questions_and_choices() {
        let storage = memory_storage().await;
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let actor = Actor::new(teacher.id, teacher.role);

        let exam = storage
            .create_exam_with_questions_impl(actor, nested_exam_request())
            .await
            .unwrap();

        assert_eq!(exam.questions.len(), 2);
        for question in &exam.questions {
            assert_eq!(question.exam_id, exam.id);
            assert_eq!(question.choices.len(), 3);
            for choice in &question.choices {
                assert_eq!(choice.question_id, question.id);
            }
        }

        assert_eq!(Questions::find().count(&storage.db).await.unwrap(), 2);
        assert_eq!(Choices::find().count(&storage.db).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_exam_hidden_from_other_teacher() {
        let storage = memory_storage().await;
        let owner = seed_user(&storage, "teacher_a", UserRole::Teacher).await;
        let other = seed_user(&storage, "teacher_b", UserRole::Teacher).await;

        let exam = storage
            .create_exam_with_questions_impl(
                Actor::new(owner.id, owner.role),
                nested_exam_request(),
            )
            .await
            .unwrap();

        let visible = storage
            .get_exam_by_id_impl(Actor::new(owner.id, owner.role), exam.id)
            .await
            .unwrap();
        assert!(visible.is_some());

        let hidden = storage
            .get_exam_by_id_impl(Actor::new(other.id, other.role), exam.id)
            .await
            .unwrap();
        assert!(hidden.is_none());
    }
}
