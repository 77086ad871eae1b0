use crate::{
    db::DbPool,
    entities::dashboard::{
        self, ActiveModel as DashboardActiveModel, Entity as DashboardEntity,
        Model as DashboardModel,
    },
    entities::report::{
        self, ActiveModel as ReportActiveModel, Entity as ReportEntity, Model as ReportModel,
    },
    entities::report_template::{
        self, ActiveModel as TemplateActiveModel, Entity as TemplateEntity,
        Model as TemplateModel, ReportKind,
    },
    entities::scheduled_report::{
        self, ActiveModel as ScheduleActiveModel, Entity as ScheduleEntity,
        Model as ScheduleModel, ScheduleFrequency,
    },
    errors::ServiceError,
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, message = "Template name is required"))]
    pub name: String,
    pub report_kind: String,
    pub description: Option<String>,
    pub parameters: Option<JsonValue>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub template_id: Uuid,
    #[validate(length(min = 1, message = "Report name is required"))]
    pub name: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    pub template_id: Uuid,
    pub frequency: String,
    pub run_at: NaiveTime,
    pub recipients: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateDashboardRequest {
    #[validate(length(min = 1, message = "Dashboard name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub layout: Option<JsonValue>,
    pub is_default: Option<bool>,
    pub owner_id: Option<Uuid>,
}

/// Report definitions, report instances, schedules, and dashboards.
///
/// Only the definitions are managed here. Producing report output is a
/// separate concern that is not wired up, so the generate action always
/// reports itself unavailable instead of silently succeeding.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_template(
        &self,
        request: CreateTemplateRequest,
    ) -> Result<TemplateModel, ServiceError> {
        request.validate()?;

        let kind = ReportKind::from_str(&request.report_kind).ok_or_else(|| {
            ServiceError::InvalidStatus(format!("unknown report kind: {}", request.report_kind))
        })?;

        let model = TemplateActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            report_kind: Set(kind.as_str().to_string()),
            description: Set(request.description),
            parameters: Set(request.parameters),
            is_active: Set(true),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(template_id = %model.id, "report template created");
        Ok(model)
    }

    #[instrument(skip(self), fields(template_id = %template_id))]
    pub async fn get_template(&self, template_id: Uuid) -> Result<TemplateModel, ServiceError> {
        TemplateEntity::find_by_id(template_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("report template {} not found", template_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn list_templates(&self) -> Result<Vec<TemplateModel>, ServiceError> {
        Ok(TemplateEntity::find()
            .filter(report_template::Column::IsActive.eq(true))
            .order_by_asc(report_template::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, request), fields(template_id = %request.template_id))]
    pub async fn create_report(&self, request: CreateReportRequest) -> Result<ReportModel, ServiceError> {
        request.validate()?;

        self.get_template(request.template_id).await?;
        if request.date_to < request.date_from {
            return Err(ServiceError::InvalidInput(
                "report end date must not precede its start date".into(),
            ));
        }

        let model = ReportActiveModel {
            id: Set(Uuid::new_v4()),
            template_id: Set(request.template_id),
            name: Set(request.name),
            date_from: Set(request.date_from),
            date_to: Set(request.date_to),
            result: Set(None),
            generated_at: Set(None),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(report_id = %model.id, "report created");
        Ok(model)
    }

    #[instrument(skip(self), fields(report_id = %report_id))]
    pub async fn get_report(&self, report_id: Uuid) -> Result<ReportModel, ServiceError> {
        ReportEntity::find_by_id(report_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("report {} not found", report_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_reports(
        &self,
        template_id: Option<Uuid>,
    ) -> Result<Vec<ReportModel>, ServiceError> {
        let mut query = ReportEntity::find().order_by_desc(report::Column::CreatedAt);
        if let Some(template_id) = template_id {
            query = query.filter(report::Column::TemplateId.eq(template_id));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    /// Generation is not wired to an engine; the action fails loudly so
    /// callers never mistake an empty report for a generated one.
    #[instrument(skip(self), fields(report_id = %report_id))]
    pub async fn generate_report(&self, report_id: Uuid) -> Result<ReportModel, ServiceError> {
        self.get_report(report_id).await?;
        Err(ServiceError::InvalidOperation(
            "report generation is not available".into(),
        ))
    }

    #[instrument(skip(self, request), fields(template_id = %request.template_id))]
    pub async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<ScheduleModel, ServiceError> {
        request.validate()?;

        self.get_template(request.template_id).await?;
        let frequency = ScheduleFrequency::from_str(&request.frequency).ok_or_else(|| {
            ServiceError::InvalidStatus(format!(
                "unknown schedule frequency: {}",
                request.frequency
            ))
        })?;

        let model = ScheduleActiveModel {
            id: Set(Uuid::new_v4()),
            template_id: Set(request.template_id),
            frequency: Set(frequency.as_str().to_string()),
            run_at: Set(request.run_at),
            recipients: Set(request.recipients),
            is_active: Set(true),
            last_run_at: Set(None),
            created_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(schedule_id = %model.id, "report schedule created");
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_schedules(&self) -> Result<Vec<ScheduleModel>, ServiceError> {
        Ok(ScheduleEntity::find()
            .order_by_asc(scheduled_report::Column::CreatedAt)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self), fields(schedule_id = %schedule_id))]
    pub async fn set_schedule_active(
        &self,
        schedule_id: Uuid,
        is_active: bool,
    ) -> Result<ScheduleModel, ServiceError> {
        let schedule = ScheduleEntity::find_by_id(schedule_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("report schedule {} not found", schedule_id))
            })?;

        let mut active: ScheduleActiveModel = schedule.into();
        active.is_active = Set(is_active);
        Ok(active.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_dashboard(
        &self,
        request: CreateDashboardRequest,
    ) -> Result<DashboardModel, ServiceError> {
        request.validate()?;

        let model = DashboardActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            description: Set(request.description),
            layout: Set(request.layout),
            is_default: Set(request.is_default.unwrap_or(false)),
            owner_id: Set(request.owner_id),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(dashboard_id = %model.id, "dashboard created");
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_dashboards(
        &self,
        owner_id: Option<Uuid>,
    ) -> Result<Vec<DashboardModel>, ServiceError> {
        let mut query = DashboardEntity::find().order_by_asc(dashboard::Column::Name);
        if let Some(owner_id) = owner_id {
            query = query.filter(dashboard::Column::OwnerId.eq(owner_id));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    #[instrument(skip(self), fields(dashboard_id = %dashboard_id))]
    pub async fn delete_dashboard(&self, dashboard_id: Uuid) -> Result<(), ServiceError> {
        let result = DashboardEntity::delete_by_id(dashboard_id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "dashboard {} not found",
                dashboard_id
            )));
        }
        Ok(())
    }
}
