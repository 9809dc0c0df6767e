use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use backend_domain::{
    DbConfig, EventId, Holder, HolderDirectory, NewRegistration, ParticipationDetails,
    ParticipationType, Registration, RegistrationRepository, StoreError, UserId,
};

const CREATE_HOLDERS: &str = r#"
CREATE TABLE IF NOT EXISTS holders (
    user_id BIGINT PRIMARY KEY,
    full_name TEXT NOT NULL
)
"#;

const CREATE_REGISTRATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS registrations (
    id BIGSERIAL PRIMARY KEY,
    event_id BIGINT NOT NULL,
    user_id BIGINT NOT NULL,
    participation_type TEXT NOT NULL,
    participation_category TEXT NOT NULL,
    team_name TEXT,
    team_members TEXT,
    scan_count INTEGER NOT NULL DEFAULT 0 CHECK (scan_count >= 0),
    registered_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT registrations_event_user_key UNIQUE (event_id, user_id)
)
"#;

const REGISTRATION_COLUMNS: &str = "event_id, user_id, participation_type, participation_category, \
     team_name, team_members, scan_count, registered_at";

#[derive(sqlx::FromRow)]
struct RegistrationRecord {
    event_id: i64,
    user_id: i64,
    participation_type: String,
    participation_category: String,
    team_name: Option<String>,
    team_members: Option<String>,
    scan_count: i32,
    registered_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRecord> for Registration {
    type Error = anyhow::Error;

    fn try_from(record: RegistrationRecord) -> Result<Self, Self::Error> {
        let participation_type = ParticipationType::parse(&record.participation_type)
            .ok_or_else(|| anyhow!("unknown participation_type '{}'", record.participation_type))?;
        Ok(Registration {
            event_id: EventId(u64::try_from(record.event_id)?),
            user_id: UserId(u64::try_from(record.user_id)?),
            details: ParticipationDetails {
                participation_type,
                participation_category: record.participation_category,
                team_name: record.team_name,
                team_members: record.team_members,
            },
            scan_count: u32::try_from(record.scan_count)?,
            registered_at: record.registered_at,
        })
    }
}

/// PostgreSQL-backed registration store and holder directory.
///
/// Uniqueness rides on the `(event_id, user_id)` constraint and the scan
/// counter is bumped by a single `UPDATE ... RETURNING`, so both stay correct
/// across any number of backend instances.
#[derive(Clone)]
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DbConfig) -> anyhow::Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| anyhow!("database_url is not configured"))?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }
}

fn backend_error(context: &str, err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(anyhow!("{}: {}", context, err))
}

fn decode_record(record: RegistrationRecord) -> Result<Registration, StoreError> {
    Registration::try_from(record).map_err(StoreError::Unavailable)
}

// Ids past i64::MAX cannot be stored, so a lookup for them finds nothing.
fn db_pair(event_id: EventId, user_id: UserId) -> Option<(i64, i64)> {
    Some((i64::try_from(event_id.0).ok()?, i64::try_from(user_id.0).ok()?))
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_HOLDERS)
            .execute(&self.pool)
            .await
            .map_err(|err| backend_error("failed to create holders table", err))?;
        sqlx::query(CREATE_REGISTRATIONS)
            .execute(&self.pool)
            .await
            .map_err(|err| backend_error("failed to create registrations table", err))?;
        Ok(())
    }

    async fn find_by_pair(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Registration>, StoreError> {
        let Some((event, user)) = db_pair(event_id, user_id) else {
            return Ok(None);
        };
        let record = sqlx::query_as::<_, RegistrationRecord>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| backend_error("failed to find registration", err))?;
        record.map(decode_record).transpose()
    }

    async fn create(&self, registration: NewRegistration) -> Result<Registration, StoreError> {
        let (event, user) = db_pair(registration.event_id, registration.user_id)
            .ok_or_else(|| StoreError::Unavailable(anyhow!("identifier out of range")))?;
        let details = &registration.details;
        let record = sqlx::query_as::<_, RegistrationRecord>(&format!(
            "INSERT INTO registrations \
                 (event_id, user_id, participation_type, participation_category, team_name, team_members) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (event_id, user_id) DO NOTHING \
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(event)
        .bind(user)
        .bind(details.participation_type.as_str())
        .bind(&details.participation_category)
        .bind(&details.team_name)
        .bind(&details.team_members)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| backend_error("failed to create registration", err))?;
        match record {
            Some(record) => decode_record(record),
            None => Err(StoreError::Duplicate),
        }
    }

    async fn increment_scan_count(
        &self,
        registration: &Registration,
    ) -> Result<Registration, StoreError> {
        let (event, user) =
            db_pair(registration.event_id, registration.user_id).ok_or(StoreError::Missing)?;
        let record = sqlx::query_as::<_, RegistrationRecord>(&format!(
            "UPDATE registrations SET scan_count = scan_count + 1 \
             WHERE event_id = $1 AND user_id = $2 \
             RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(event)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| backend_error("failed to increment scan count", err))?;
        match record {
            Some(record) => decode_record(record),
            None => Err(StoreError::Missing),
        }
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
        let Ok(event) = i64::try_from(event_id.0) else {
            return Ok(Vec::new());
        };
        let records = sqlx::query_as::<_, RegistrationRecord>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY user_id"
        ))
        .bind(event)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| backend_error("failed to list registrations", err))?;
        records.into_iter().map(decode_record).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|err| backend_error("ping failed", err))?;
        Ok(())
    }
}

#[async_trait]
impl HolderDirectory for PostgresRegistrationRepository {
    async fn find_holder(&self, user_id: UserId) -> anyhow::Result<Option<Holder>> {
        let Ok(user) = i64::try_from(user_id.0) else {
            return Ok(None);
        };
        let row: Option<(String,)> =
            sqlx::query_as("SELECT full_name FROM holders WHERE user_id = $1")
                .bind(user)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(full_name,)| Holder { user_id, full_name }))
    }

    async fn upsert_holders(&self, holders: &[Holder]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for holder in holders {
            sqlx::query(
                "INSERT INTO holders (user_id, full_name) VALUES ($1, $2) \
                 ON CONFLICT (user_id) DO UPDATE SET full_name = EXCLUDED.full_name",
            )
            .bind(i64::try_from(holder.user_id.0)?)
            .bind(&holder.full_name)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
