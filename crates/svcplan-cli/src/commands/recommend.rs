//! Implementation of the `svcplan recommend` command.

use tracing::{debug, instrument};

use svcplan_core::application::CompositionService;

use crate::{
    cli::{GlobalArgs, RecommendArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(ids = args.ids.len()))]
pub fn execute(
    args: RecommendArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let direction = super::resolve_direction(args.direction, &config)?;
    let (store, _source) = super::open_store(&global, &config)?;
    let service = CompositionService::new(Box::new(store));

    let catalog = service.catalog()?;
    let (selection, _unknown) = super::select(&catalog, &args.ids, &output)?;
    let recommendations = service.recommend(&selection, direction)?;

    debug!(%direction, found = recommendations.len(), "recommendations computed");

    if output.is_json() {
        return output.json(&recommendations);
    }

    super::plan::render_recommendations(&recommendations, &output)
}
