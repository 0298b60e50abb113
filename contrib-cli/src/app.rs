use std::io::Write;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;

use contrib_core::service::ServiceRegistry;
use contrib_core::{ContributionType, MAX_DOLLAR_CONTRIBUTION, SyncController, ValueInput};
use contrib_db_sqlite::SqliteServiceFactory;
use contrib_http::HttpServiceFactory;

use crate::cli::{Command, EditArgs};
use crate::config::AppConfig;
use crate::report::{PlanReport, describe_election};
use crate::utils::format_currency;

/// Registry with every settings backend this binary ships.
pub fn build_registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry.register(Box::new(SqliteServiceFactory));
    registry.register(Box::new(HttpServiceFactory));
    registry
}

/// Runs one command end to end, writing its report to `out`.
///
/// # Errors
/// Fails when the backend cannot be created, the plan cannot be loaded, or a
/// save is refused. The status line is written to `out` first.
pub async fn run(
    config: &AppConfig,
    command: &Command,
    out: &mut impl Write,
) -> Result<()> {
    let service_config = config.service_config();
    debug!(backend = %service_config.backend, "creating settings service");
    let service = build_registry()
        .create(&service_config)
        .await
        .with_context(|| format!("cannot open '{}' settings backend", service_config.backend))?;

    let controller = SyncController::new(service);
    if let Err(error) = controller.load().await {
        writeln!(out, "{error}")?;
        return Err(error.into());
    }

    match command {
        Command::Show => write_report(&controller, out),
        Command::Preview(edits) => {
            apply_edits(&controller, edits, out)?;
            write_report(&controller, out)
        }
        Command::Save(edits) => {
            apply_edits(&controller, edits, out)?;
            write_report(&controller, out)?;
            save(&controller, out).await
        }
    }
}

/// Applies the type switch first, then the value, as the pending election.
fn apply_edits(
    controller: &SyncController,
    edits: &EditArgs,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(contribution_type) = edits.contribution_type {
        controller.edit(|model| model.set_type(contribution_type));
    }
    if let Some(raw) = &edits.value {
        if let Some(ValueInput::Ignored) = controller.edit(|model| model.set_value(raw)) {
            writeln!(out, "Ignoring non-numeric value '{raw}'.")?;
        }
    }
    let over_limit = controller.edit(|model| *model.current()).filter(|pending| {
        pending.contribution_type == ContributionType::Dollar
            && pending.contribution_value > MAX_DOLLAR_CONTRIBUTION
    });
    if let Some(pending) = over_limit {
        writeln!(
            out,
            "Note: {} is above the usual per-paycheck limit of {}.",
            format_currency(pending.contribution_value),
            format_currency(MAX_DOLLAR_CONTRIBUTION)
        )?;
    }
    Ok(())
}

fn write_report(
    controller: &SyncController,
    out: &mut impl Write,
) -> Result<()> {
    let view = controller
        .view()
        .ok_or_else(|| anyhow!("no plan loaded"))?;
    let impact = view.impact().context("cannot project retirement savings")?;
    writeln!(out, "{}", PlanReport::new(&view, impact))?;
    Ok(())
}

async fn save(
    controller: &SyncController,
    out: &mut impl Write,
) -> Result<()> {
    let pending = match controller.view() {
        Some(view) if view.is_dirty() => view.settings.current,
        Some(_) => {
            writeln!(out, "No unsaved changes.")?;
            return Ok(());
        }
        None => bail!("no plan loaded"),
    };

    match controller.save().await {
        Ok(echo) => {
            writeln!(out)?;
            if echo != pending {
                writeln!(
                    out,
                    "Submitted {}, service stored {}.",
                    describe_election(&pending),
                    describe_election(&echo)
                )?;
            }
            if let Some(status) = controller.status() {
                writeln!(out, "{status}: {}", describe_election(&echo))?;
            }
            Ok(())
        }
        Err(error) => {
            writeln!(out)?;
            writeln!(out, "{error}")?;
            Err(error.into())
        }
    }
}
