//! Implementation of the `svcplan catalog` command.

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use svcplan_core::{
    application::CatalogService,
    domain::{CategoryKey, Service},
};

use crate::{
    cli::{CatalogArgs, GlobalArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, column, right},
};

#[derive(Serialize)]
struct CatalogReport<'a> {
    source: String,
    revision: Uuid,
    services: Vec<&'a Service>,
}

#[instrument(skip_all, fields(format = ?args.format, check = args.check))]
pub fn execute(
    args: CatalogArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (store, source) = super::open_store(&global, &config)?;
    let catalog = CatalogService::new(Box::new(store)).snapshot()?;

    if args.check {
        return check(&catalog, &output);
    }

    let category = args.category.map(CategoryKey::from);
    let services: Vec<&Service> = catalog
        .all()
        .iter()
        .filter(|s| args.phase.is_none_or(|p| s.phase.get() == p))
        .filter(|s| category.is_none_or(|c| CategoryKey::from(s.process_category) == c))
        .collect();

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header(&format!(
                "Service Catalog ({} of {} services, {})",
                services.len(),
                catalog.len(),
                source
            ))?;
            for service in &services {
                output.print(&table_row(service, &output))?;
            }
        }

        ListFormat::Json => {
            output.json(&CatalogReport {
                source: source.to_string(),
                revision: catalog.revision(),
                services,
            })?;
        }

        ListFormat::List => {
            for service in &services {
                output.data(service.id.as_str())?;
            }
        }

        ListFormat::Csv => {
            output.data(CSV_HEADER)?;
            for service in &services {
                output.data(&csv_row(service))?;
            }
        }
    }

    Ok(())
}

fn check(catalog: &svcplan_core::domain::Catalog, output: &OutputManager) -> CliResult<()> {
    let dangling = catalog.dangling_dependencies();

    if dangling.is_empty() {
        output.success(&format!(
            "Catalog OK: {} services, all dependencies resolve",
            catalog.len()
        ))?;
        return Ok(());
    }

    for (service, missing) in &dangling {
        output.error(&format!(
            "'{}' depends on unknown service '{}'",
            service.id, missing
        ))?;
    }
    Err(CliError::CatalogCheckFailed {
        dangling: dangling.len(),
    })
}

fn table_row(service: &Service, output: &OutputManager) -> String {
    let tag = CategoryKey::from(service.process_category);
    format!(
        "  {} {} {} {} {}",
        column(service.id.as_str(), 22),
        column(&format!("{} {}", service.phase, service.phase.label()), 18),
        column(tag.label(), 14),
        output.amount(&right(&service.price.to_string(), 10)),
        output.dim(&service.title),
    )
}

const CSV_HEADER: &str =
    "id,title,category,price,phase,process_category,technology_category,dependencies";

fn csv_row(service: &Service) -> String {
    let dependencies: Vec<&str> = service.dependencies.iter().map(|d| d.as_str()).collect();
    [
        service.id.to_string(),
        service.title.clone(),
        service.category.clone(),
        service.price.to_string(),
        service.phase.to_string(),
        service
            .process_category
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        service.technology_category.clone().unwrap_or_default(),
        dependencies.join(";"),
    ]
    .iter()
    .map(|field| csv_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quote a field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcplan_core::domain::ProcessCategory;

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn csv_row_has_every_column() {
        let service = Service::builder()
            .id("design")
            .title("Design, v2")
            .category("Architecture")
            .price(3500.0)
            .phase(2)
            .process_category(ProcessCategory::Innovate)
            .dependencies(["kickoff", "audit"])
            .build()
            .unwrap();

        assert_eq!(
            csv_row(&service),
            "design,\"Design, v2\",Architecture,3500.00,2,innovate,,audit;kickoff"
        );
        assert_eq!(CSV_HEADER.split(',').count(), 8);
    }
}
