//! PostgreSQL implementation of the profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use super::corrupt_row;
use crate::domain::entities::{
    Business, Courier, InvalidAttribute, NewBusiness, NewCourier, Role,
};
use crate::domain::repositories::{ProfileRepository, profile_exists};
use crate::error::AppError;

const COURIER_COLUMNS: &str = "id, user_id, first_name, last_name, gender, birth_year, \
     nationality, license_type, phone, province, district, working_hours, working_days, \
     working_type, moto_model, moto_cc, avatar_url, created_at";

const BUSINESS_COLUMNS: &str = "id, user_id, business_name, manager_first_name, \
     manager_last_name, phone, address, working_type, working_hours, avatar_url, created_at";

#[derive(Debug, FromRow)]
struct CourierRow {
    id: i64,
    user_id: Uuid,
    first_name: String,
    last_name: String,
    gender: String,
    birth_year: i32,
    nationality: String,
    license_type: String,
    phone: String,
    province: String,
    district: String,
    working_hours: String,
    working_days: Vec<String>,
    working_type: String,
    moto_model: String,
    moto_cc: i32,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CourierRow> for Courier {
    type Error = InvalidAttribute;

    fn try_from(row: CourierRow) -> Result<Self, Self::Error> {
        Ok(Courier {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            gender: row.gender.parse()?,
            birth_year: row.birth_year,
            nationality: row.nationality,
            license_type: row.license_type.parse()?,
            phone: row.phone,
            province: row.province,
            district: row.district,
            working_hours: row.working_hours.parse()?,
            working_days: row.working_days,
            working_type: row.working_type.parse()?,
            moto_model: row.moto_model,
            moto_cc: row.moto_cc,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct BusinessRow {
    id: i64,
    user_id: Uuid,
    business_name: String,
    manager_first_name: String,
    manager_last_name: String,
    phone: String,
    address: String,
    working_type: String,
    working_hours: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<BusinessRow> for Business {
    type Error = InvalidAttribute;

    fn try_from(row: BusinessRow) -> Result<Self, Self::Error> {
        Ok(Business {
            id: row.id,
            user_id: row.user_id,
            business_name: row.business_name,
            manager_first_name: row.manager_first_name,
            manager_last_name: row.manager_last_name,
            phone: row.phone,
            address: row.address,
            working_type: row.working_type.parse()?,
            working_hours: row.working_hours.parse()?,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
        })
    }
}

/// Opens a transaction that owns the registration lock for `user_id` and
/// fails if the user already holds a profile.
///
/// `UNIQUE (user_id)` guards each table on its own; the transaction-scoped
/// advisory lock serializes registrations across both.
async fn begin_registration(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let (courier, business): (bool, bool) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM couriers WHERE user_id = $1), \
                EXISTS (SELECT 1 FROM businesses WHERE user_id = $1)",
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    if courier {
        return Err(profile_exists(Role::Courier));
    }
    if business {
        return Err(profile_exists(Role::Business));
    }

    Ok(tx)
}

/// PostgreSQL repository for courier and business profiles.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn courier_id_for_user(&self, user_id: Uuid) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM couriers WHERE user_id = $1 LIMIT 1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(id)
    }

    async fn business_id_for_user(&self, user_id: Uuid) -> Result<Option<i64>, AppError> {
        let id =
            sqlx::query_scalar::<_, i64>("SELECT id FROM businesses WHERE user_id = $1 LIMIT 1")
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(id)
    }

    async fn find_courier(&self, user_id: Uuid) -> Result<Option<Courier>, AppError> {
        let row = sqlx::query_as::<_, CourierRow>(&format!(
            "SELECT {COURIER_COLUMNS} FROM couriers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Courier::try_from).transpose().map_err(corrupt_row)
    }

    async fn find_business(&self, user_id: Uuid) -> Result<Option<Business>, AppError> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Business::try_from).transpose().map_err(corrupt_row)
    }

    async fn create_courier(&self, user_id: Uuid, new: NewCourier) -> Result<Courier, AppError> {
        let mut tx = begin_registration(&self.pool, user_id).await?;

        let row = sqlx::query_as::<_, CourierRow>(&format!(
            r#"
            INSERT INTO couriers (
                user_id, first_name, last_name, gender, birth_year, nationality,
                license_type, phone, province, district, working_hours, working_days,
                working_type, moto_model, moto_cc, avatar_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {COURIER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.gender.as_str())
        .bind(new.birth_year)
        .bind(&new.nationality)
        .bind(new.license_type.as_str())
        .bind(&new.phone)
        .bind(&new.province)
        .bind(&new.district)
        .bind(new.working_hours.as_str())
        .bind(&new.working_days)
        .bind(new.working_type.as_str())
        .bind(&new.moto_model)
        .bind(new.moto_cc)
        .bind(new.avatar_url.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Courier::try_from(row).map_err(corrupt_row)
    }

    async fn create_business(
        &self,
        user_id: Uuid,
        new: NewBusiness,
    ) -> Result<Business, AppError> {
        let mut tx = begin_registration(&self.pool, user_id).await?;

        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            r#"
            INSERT INTO businesses (
                user_id, business_name, manager_first_name, manager_last_name,
                phone, address, working_type, working_hours, avatar_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new.business_name)
        .bind(&new.manager_first_name)
        .bind(&new.manager_last_name)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(new.working_type.as_str())
        .bind(new.working_hours.as_str())
        .bind(new.avatar_url.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Business::try_from(row).map_err(corrupt_row)
    }

    async fn set_courier_avatar(&self, courier_id: i64, url: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE couriers SET avatar_url = $2 WHERE id = $1")
            .bind(courier_id)
            .bind(url)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_business_avatar(&self, business_id: i64, url: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE businesses SET avatar_url = $2 WHERE id = $1")
            .bind(business_id)
            .bind(url)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
