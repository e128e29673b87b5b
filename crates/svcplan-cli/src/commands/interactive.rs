//! `svcplan interactive`: toggle services in a terminal menu and watch the
//! plan, total and recommendations update.

use crate::{
    cli::{GlobalArgs, InteractiveArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[cfg(feature = "interactive")]
pub fn execute(
    args: InteractiveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    session::run(args, global, config, output)
}

#[cfg(not(feature = "interactive"))]
pub fn execute(
    _args: InteractiveArgs,
    _global: GlobalArgs,
    _config: AppConfig,
    _output: OutputManager,
) -> CliResult<()> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(feature = "interactive")]
mod session {
    use console::Term;
    use dialoguer::{FuzzySelect, theme::ColorfulTheme};
    use tracing::{debug, instrument};

    use svcplan_core::{
        application::CompositionService,
        domain::{Catalog, Selection, Toggle},
    };

    use super::*;
    use crate::{
        cli::GroupBy,
        commands::plan::render_composition,
        error::CliError,
        output::{column, right},
    };

    /// One entry of the selection menu.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(super) enum MenuAction {
        Toggle(String),
        Clear,
        Done,
    }

    #[instrument(skip_all)]
    pub(super) fn run(
        args: InteractiveArgs,
        global: GlobalArgs,
        config: AppConfig,
        output: OutputManager,
    ) -> CliResult<()> {
        let direction = crate::commands::resolve_direction(args.direction, &config)?;
        let (store, source) = crate::commands::open_store(&global, &config)?;
        let service = CompositionService::new(Box::new(store)).with_direction(direction);

        let catalog = service.catalog()?;
        let (mut selection, _unknown) =
            crate::commands::select(&catalog, &args.ids, &output)?;

        output.header(&format!(
            "Interactive planner ({} services from {source})",
            catalog.len()
        ))?;

        let theme = ColorfulTheme::default();
        let mut cursor = 0;

        loop {
            let composition = service.compose(&selection)?;
            output.print("")?;
            render_composition(&composition, GroupBy::Phase, &output)?;
            output.print("")?;

            let catalog = service.catalog()?;
            let (labels, actions) = menu(&catalog, &selection);

            let choice = FuzzySelect::with_theme(&theme)
                .with_prompt("Toggle a service (Esc to finish)")
                .items(&labels)
                .default(cursor.min(labels.len().saturating_sub(1)))
                .interact_on_opt(&Term::stderr())
                .map_err(|e| CliError::Interaction {
                    message: e.to_string(),
                })?;

            let Some(index) = choice else {
                break;
            };
            cursor = index;

            match actions.get(index) {
                Some(MenuAction::Toggle(id)) => {
                    let outcome = selection.toggle(&catalog, id);
                    debug!(%id, ?outcome, "toggled");
                    if outcome == Toggle::Ignored {
                        output.warning(&format!("Unknown service '{id}' ignored"))?;
                    }
                }
                Some(MenuAction::Clear) => selection.clear(),
                Some(MenuAction::Done) | None => break,
            }
        }

        output.success(&format!("Final selection: {} services", selection.len()))?;
        Ok(())
    }

    /// Menu labels and the action behind each, in catalog order.
    pub(super) fn menu(catalog: &Catalog, selection: &Selection) -> (Vec<String>, Vec<MenuAction>) {
        let mut labels = Vec::with_capacity(catalog.len() + 2);
        let mut actions = Vec::with_capacity(catalog.len() + 2);

        for service in catalog.all() {
            let marker = if selection.contains(service.id.as_str()) {
                "[x]"
            } else {
                "[ ]"
            };
            labels.push(format!(
                "{marker} {} {} {}",
                column(service.id.as_str(), 22),
                right(&service.price.to_string(), 10),
                service.title
            ));
            actions.push(MenuAction::Toggle(service.id.to_string()));
        }

        labels.push("Clear selection".to_string());
        actions.push(MenuAction::Clear);
        labels.push("Done".to_string());
        actions.push(MenuAction::Done);

        (labels, actions)
    }
}
