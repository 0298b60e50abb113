use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use contrib_core::{
    ContributionSettings, ContributionType, EmployeeSummary, ServiceError, SettingsService,
};

pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    /// Opens `database_url`, creating the file if it does not exist.
    ///
    /// Accepts a bare path, a `sqlite:` URL, or `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self, ServiceError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| ServiceError::Connection(e.to_string()))?
            .create_if_missing(true);
        let pool_options = if database_url.contains(":memory:") {
            // The database lives only as long as its one connection.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| ServiceError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), ServiceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    /// Executes every `.sql` file in `seeds_dir` in file-name order.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;
            self.run_seed(&path.display().to_string(), &sql).await?;
        }

        Ok(())
    }

    /// Executes one seed script. Seeds only insert missing rows.
    pub async fn run_seed(
        &self,
        name: &str,
        sql: &str,
    ) -> Result<()> {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to execute seed '{name}'"))?;
        debug!(seed = name, "seed applied");
        Ok(())
    }

    /// The election currently on file.
    pub async fn current_settings(&self) -> Result<ContributionSettings, ServiceError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            "SELECT contribution_type, contribution_value FROM contribution_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))?;

        row.ok_or_else(|| {
            ServiceError::Storage("no contribution settings on file (have you run the seeds?)".to_string())
        })?
        .try_into()
    }

    async fn write_settings(
        &self,
        settings: &ContributionSettings,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO contribution_settings (id, contribution_type, contribution_value, updated_at)
             VALUES (1, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                contribution_type = excluded.contribution_type,
                contribution_value = excluded.contribution_value,
                updated_at = excluded.updated_at",
        )
        .bind(settings.contribution_type.as_str())
        .bind(settings.contribution_value.normalize().to_string())
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[derive(FromRow)]
struct SettingsRow {
    contribution_type: String,
    contribution_value: String,
}

impl TryFrom<SettingsRow> for ContributionSettings {
    type Error = ServiceError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        Ok(ContributionSettings::new(
            parse_contribution_type(&row.contribution_type)?,
            parse_decimal(&row.contribution_value)?,
        ))
    }
}

#[derive(FromRow)]
struct SummaryRow {
    employee_name: String,
    plan_type: String,
    annual_salary: String,
    pay_frequency: i64,
    company_match_percent: String,
    ytd_contribution: String,
    ytd_employer_match: Option<String>,
    estimated_balance_at_retirement: String,
    age: i64,
    retirement_age: i64,
    contribution_type: String,
    contribution_value: String,
}

impl TryFrom<SummaryRow> for EmployeeSummary {
    type Error = ServiceError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(EmployeeSummary {
            employee_name: row.employee_name,
            plan_type: row.plan_type,
            annual_salary: parse_decimal(&row.annual_salary)?,
            pay_frequency: parse_count("pay_frequency", row.pay_frequency)?,
            company_match_percent: parse_decimal(&row.company_match_percent)?,
            ytd_contribution: parse_decimal(&row.ytd_contribution)?,
            ytd_employer_match: parse_optional_decimal(&row.ytd_employer_match)?,
            estimated_balance_at_retirement: parse_decimal(&row.estimated_balance_at_retirement)?,
            age: parse_count("age", row.age)?,
            retirement_age: parse_count("retirement_age", row.retirement_age)?,
            contribution_type: parse_contribution_type(&row.contribution_type)?,
            contribution_value: parse_decimal(&row.contribution_value)?,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, ServiceError> {
    s.parse::<Decimal>()
        .map_err(|e| ServiceError::Storage(format!("Failed to parse decimal '{}': {}", s, e)))
}

fn parse_optional_decimal(s: &Option<String>) -> Result<Option<Decimal>, ServiceError> {
    s.as_ref().map(|s| parse_decimal(s)).transpose()
}

fn parse_count(
    column: &str,
    value: i64,
) -> Result<u32, ServiceError> {
    u32::try_from(value)
        .map_err(|_| ServiceError::Storage(format!("Column '{}' out of range: {}", column, value)))
}

fn parse_contribution_type(s: &str) -> Result<ContributionType, ServiceError> {
    ContributionType::parse(s)
        .ok_or_else(|| ServiceError::Storage(format!("Invalid contribution type: {}", s)))
}

#[async_trait]
impl SettingsService for SqliteSettingsStore {
    async fn fetch_summary(&self) -> Result<EmployeeSummary, ServiceError> {
        let row: Option<SummaryRow> = sqlx::query_as(
            "SELECT p.employee_name, p.plan_type, p.annual_salary, p.pay_frequency,
                    p.company_match_percent, p.ytd_contribution, p.ytd_employer_match,
                    p.estimated_balance_at_retirement, p.age, p.retirement_age,
                    s.contribution_type, s.contribution_value
             FROM employee_profile p
             JOIN contribution_settings s ON s.id = 1
             WHERE p.id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))?;

        row.ok_or_else(|| {
            ServiceError::Storage("no employee profile on file (have you run the seeds?)".to_string())
        })?
        .try_into()
    }

    async fn fetch_settings(&self) -> Result<ContributionSettings, ServiceError> {
        self.current_settings().await
    }

    /// Persists `settings` and echoes what was stored.
    ///
    /// Out-of-range values are refused with the service's own wording rather
    /// than clamped.
    async fn submit_settings(
        &self,
        settings: &ContributionSettings,
    ) -> Result<ContributionSettings, ServiceError> {
        if let Err(e) = settings.validate() {
            warn!(?settings, error = %e, "rejecting contribution settings");
            return Err(ServiceError::Rejected(e.to_string()));
        }

        self.write_settings(settings).await?;
        let stored = self.current_settings().await?;
        info!(?stored, "contribution settings persisted");
        Ok(stored)
    }
}
