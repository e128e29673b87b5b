//! Implementation of the `svcplan plan` command.
//!
//! Also hosts the human-readable composition renderer shared with
//! `svcplan interactive`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use svcplan_core::{
    application::{Composition, CompositionService},
    domain::Service,
};

use crate::{
    cli::{GlobalArgs, GroupBy, PlanArgs},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, column, right},
};

/// JSON document printed by `plan --output-format json`.
#[derive(Serialize)]
struct PlanReport<'a> {
    generated_at: DateTime<Utc>,
    unknown_ids: &'a [String],
    #[serde(flatten)]
    composition: &'a Composition,
}

#[instrument(skip_all, fields(ids = args.ids.len(), group = ?args.group))]
pub fn execute(
    args: PlanArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let direction = super::resolve_direction(args.direction, &config)?;
    let (store, _source) = super::open_store(&global, &config)?;
    let service = CompositionService::new(Box::new(store)).with_direction(direction);

    let catalog = service.catalog()?;
    let (selection, unknown) = super::select(&catalog, &args.ids, &output)?;
    let composition = service.compose(&selection)?;

    debug!(
        ordered = composition.plan.len(),
        unknown = unknown.len(),
        "plan composed"
    );

    if output.is_json() {
        return output.json(&PlanReport {
            generated_at: Utc::now(),
            unknown_ids: &unknown,
            composition: &composition,
        });
    }

    render_composition(&composition, args.group, &output)
}

/// Print plan, total and recommendations.
pub fn render_composition(
    composition: &Composition,
    group: GroupBy,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = &composition.plan;

    if plan.is_empty() {
        output.info("No services selected.")?;
    } else {
        output.header(&format!("Execution plan ({} services)", plan.len()))?;

        match group {
            GroupBy::Phase => {
                for group in &plan.by_phase {
                    output.print("")?;
                    output.header(&format!(
                        "Phase {} \u{00b7} {}  {}",
                        group.phase,
                        group.label,
                        output.dim(&format!("subtotal {}", group.subtotal()))
                    ))?;
                    print_services(&group.services, output)?;
                }
            }
            GroupBy::Category => {
                for group in &plan.by_category {
                    output.print("")?;
                    output.header(group.category.label())?;
                    print_services(&group.services, output)?;
                }
            }
            GroupBy::None => {
                output.print("")?;
                print_services(&plan.ordered, output)?;
            }
        }
    }

    output.print("")?;
    output.print(&format!(
        "Total: {}",
        output.amount(&composition.total_price.to_string())
    ))?;

    output.print("")?;
    render_recommendations(&composition.recommendations, output)
}

/// Print a recommendation list or a line saying there is none.
pub fn render_recommendations(recommendations: &[Service], output: &OutputManager) -> CliResult<()> {
    if recommendations.is_empty() {
        output.info("No recommendations.")?;
        return Ok(());
    }

    output.header("Recommended services")?;
    for service in recommendations {
        output.print(&format!(
            "  \u{2022} {} {} {}",
            column(service.id.as_str(), 22),
            right(&service.price.to_string(), 10),
            output.dim(&service.title)
        ))?;
    }
    Ok(())
}

fn print_services(services: &[Service], output: &OutputManager) -> CliResult<()> {
    for (position, service) in services.iter().enumerate() {
        output.print(&service_line(position + 1, service, output))?;
    }
    Ok(())
}

fn service_line(position: usize, service: &Service, output: &OutputManager) -> String {
    format!(
        "  {:>2}. {} {} {}",
        position,
        column(service.id.as_str(), 22),
        output.amount(&right(&service.price.to_string(), 10)),
        output.dim(&service.title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcplan_core::{
        application::CatalogStore,
        domain::{Price, RecommendationDirection, Selection},
    };
    use svcplan_adapters::InMemoryCatalogStore;

    fn store() -> InMemoryCatalogStore {
        let service = |id: &str, phase: i64, price: f64, deps: &[&str]| {
            Service::builder()
                .id(id)
                .title(id)
                .price(price)
                .phase(phase)
                .dependencies(deps.iter().copied())
                .build()
                .unwrap()
        };
        InMemoryCatalogStore::from_services([
            service("A", 1, 100.0, &[]),
            service("B", 1, 200.0, &["A"]),
            service("C", 2, 50.0, &[]),
        ])
        .unwrap()
    }

    #[test]
    fn report_flattens_composition() {
        let store = store();
        assert_eq!(store.list().unwrap().len(), 3);

        let service = CompositionService::new(Box::new(store));
        let catalog = service.catalog().unwrap();
        let selection = Selection::from_ids(&catalog, ["C", "B"]);
        let composition = service
            .compose_with(&selection, RecommendationDirection::Prerequisites)
            .unwrap();

        let unknown = vec!["ghost".to_string()];
        let report = PlanReport {
            generated_at: Utc::now(),
            unknown_ids: &unknown,
            composition: &composition,
        };
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["generated_at"].is_string());
        assert_eq!(json["unknown_ids"][0], "ghost");
        assert_eq!(json["total_price"], 250.0);
        assert_eq!(json["plan"]["ordered"][0]["id"], "B");
        assert_eq!(json["recommendations"][0]["id"], "A");
        let phase_sum: Price = composition.plan.by_phase.iter().map(|g| g.subtotal()).sum();
        assert_eq!(phase_sum, composition.total_price);
    }

    #[test]
    fn service_line_contains_position_and_price() {
        let args = crate::cli::GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            output_format: crate::cli::OutputFormat::Plain,
            catalog: None,
        };
        let output = OutputManager::new(&args, &AppConfig::default());
        let service = Service::builder()
            .id("kickoff")
            .title("Project Kickoff")
            .price(800.0)
            .phase(1)
            .build()
            .unwrap();

        let line = service_line(1, &service, &output);
        assert!(line.starts_with("   1. kickoff"));
        assert!(line.contains("800.00"));
        assert!(line.ends_with("Project Kickoff"));
    }
}
