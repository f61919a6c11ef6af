//! Site command - inspect or delete a deployed Function App

use crate::cli::args::{SiteAction, SiteArgs, SiteTarget};
use crate::config::Config;
use crate::error::{AzfnError, AzfnResult};
use crate::remote::{AzCliClient, SiteClient, SiteState};
use crate::site::children::AppSettingNode;
use crate::site::markers::resolve as resolve_markers;
use crate::site::{
    settings_are_read_only, ChildKind, ChildNode, EventSink, Marker, SiteNode, TreeEvent,
};
use crate::ui::{self, TaskSpinner, TreeProgress, UiContext};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Execute the site command
pub async fn execute(args: SiteArgs, config: &Config) -> AzfnResult<()> {
    let ctx = UiContext::detect();

    match args.action {
        SiteAction::Show { target } => {
            let (mut node, events) = connect(&ctx, &target, config).await?;
            show(&ctx, &mut node).await;
            finish(node, events).await;
        }
        SiteAction::Tree { target } => {
            let (mut node, events) = connect(&ctx, &target, config).await?;
            tree(&ctx, &mut node).await?;
            finish(node, events).await;
        }
        SiteAction::Settings {
            target,
            show_values,
        } => {
            let (node, events) = connect(&ctx, &target, config).await?;
            settings(&ctx, &node, show_values).await?;
            finish(node, events).await;
        }
        SiteAction::Pick { target, markers } => {
            let (mut node, events) = connect(&ctx, &target, config).await?;
            pick(&ctx, &mut node, markers).await?;
            finish(node, events).await;
        }
        SiteAction::Delete { target, yes } => {
            let ctx = ctx.with_auto_yes(yes);
            let (node, events) = connect(&ctx, &target, config).await?;
            delete(&ctx, &node).await?;
            finish(node, events).await;
        }
    }

    Ok(())
}

/// Resolve the target through the az CLI and build its tree node
async fn connect(
    ctx: &UiContext,
    target: &SiteTarget,
    config: &Config,
) -> AzfnResult<(SiteNode, JoinHandle<()>)> {
    let resource_group = target
        .resource_group
        .as_deref()
        .or(config.azure.resource_group.as_deref())
        .ok_or_else(|| {
            AzfnError::User(
                "No resource group given. Pass -g or set azure.resource_group".to_string(),
            )
        })?;

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Looking up {}...", target.name));

    let site = match AzCliClient::show_site(
        &target.name,
        resource_group,
        target.slot.as_deref(),
        &config.azure,
    )
    .await
    {
        Ok(site) => site,
        Err(e) => {
            spinner.stop_error(&format!("Could not resolve {}", target.name));
            return Err(e);
        }
    };
    spinner.stop(&format!("Found {}", site.full_name()));

    let client: Arc<dyn SiteClient> = Arc::new(AzCliClient::new(site.clone(), config.azure.clone()));
    let (sink, rx) = EventSink::channel();
    let events = tokio::spawn(log_events(rx));

    Ok((SiteNode::new(site, client, sink), events))
}

async fn log_events(mut rx: UnboundedReceiver<TreeEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            TreeEvent::ChildCreated { site, kind } => debug!("{}: created {} node", site, kind),
            TreeEvent::StateChanged { site, state } => info!("{} is now {}", site, state),
            TreeEvent::SiteDeleted { site } => info!("{} removed from tree", site),
        }
    }
}

/// Drop the node so the event channel closes, then drain the logger
async fn finish(node: SiteNode, events: JoinHandle<()>) {
    drop(node);
    if let Err(e) = events.await {
        debug!("Event logger ended abnormally: {}", e);
    }
}

async fn show(ctx: &UiContext, node: &mut SiteNode) {
    node.refresh().await;

    ui::section(ctx, &node.label());
    let state = node.site().state;
    ui::key_value_status(ctx, "State", &state.to_string(), state == SiteState::Running);
    ui::key_value(ctx, "Host", &node.site().default_host_name);
    if node.site().is_slot() {
        ui::key_value(ctx, "Slot of", &node.site().name);
    }

    let version = node.version().await;
    ui::key_value(ctx, "Runtime", version.as_setting());

    let host = node.host_configuration().await;
    let prefix = if host.route_prefix.is_empty() {
        "(none)".to_string()
    } else {
        host.route_prefix.clone()
    };
    ui::key_value(ctx, "Route prefix", &prefix);
    if let Some(timeout) = &host.function_timeout {
        ui::key_value(ctx, "Function timeout", timeout);
    }
    if host.is_default {
        ui::remark(ctx, "Host settings unavailable, showing defaults");
    }

    let plan = if node.is_consumption_plan().await {
        "Consumption"
    } else {
        "Dedicated"
    };
    ui::key_value(ctx, "Plan", plan);

    match node.is_read_only().await {
        Ok(read_only) => ui::key_value_status(
            ctx,
            "Read-only",
            if read_only { "yes (run from package)" } else { "no" },
            !read_only,
        ),
        Err(e) => ui::step_warn_hint(ctx, "Could not read app settings", &e.to_string()),
    }
}

async fn tree(ctx: &UiContext, node: &mut SiteNode) -> AzfnResult<()> {
    let children = node.load_children().await?;
    let route_prefix = node.host_configuration().await.route_prefix;
    let host_name = node.site().default_host_name.clone();
    let read_only = match node.is_read_only().await {
        Ok(read_only) => read_only,
        Err(e) => {
            debug!("Could not check read-only state: {}", e);
            false
        }
    };

    ui::section(ctx, &node.label());

    let progress = TreeProgress::new(ctx, children.len() as u64);
    let mut lines = Vec::with_capacity(children.len());
    for child in &children {
        progress.loading(child.kind().label());
        lines.push(describe_child(child, &host_name, &route_prefix).await);
        progress.inc();
    }
    progress.finish();

    for (child, detail) in children.iter().zip(lines) {
        let label = match child.kind() {
            ChildKind::Functions if read_only => format!("{} (read-only)", child.kind()),
            kind => kind.label().to_string(),
        };
        match detail {
            Ok(detail) => ui::key_value(ctx, &label, &detail),
            Err(e) => ui::step_warn_hint(ctx, &label, &e.to_string()),
        }
    }
    Ok(())
}

async fn describe_child(child: &ChildNode, host_name: &str, route_prefix: &str) -> AzfnResult<String> {
    let detail = match child {
        ChildNode::Functions(functions) => {
            let functions = functions.load().await?;
            let names: Vec<String> = functions
                .iter()
                .map(|f| match f.trigger_url(host_name, route_prefix) {
                    Some(url) => format!("{} <{}>", f.name, url),
                    None if f.is_disabled => format!("{} (disabled)", f.name),
                    None => f.name.clone(),
                })
                .collect();
            count_with(names.len(), "function", &names)
        }
        ChildNode::AppSettings(settings) => {
            let count = settings.load().await?.len();
            count_with(count, "setting", &[])
        }
        ChildNode::SiteFiles(folder) | ChildNode::LogFiles(folder) => {
            let entries = folder.list().await?;
            format!("{} ({} entries)", folder.root, entries.len())
        }
        ChildNode::Deployments(deployments) => deployments.description(),
        ChildNode::Proxies(proxies) => {
            let names: Vec<String> = proxies.load().await?.into_iter().map(|p| p.name).collect();
            count_with(names.len(), "proxy", &names)
        }
    };
    Ok(detail)
}

fn count_with(count: usize, noun: &str, names: &[String]) -> String {
    let plural = match (count, noun) {
        (1, _) => noun.to_string(),
        (_, "proxy") => "proxies".to_string(),
        _ => format!("{}s", noun),
    };
    if names.is_empty() {
        format!("{} {}", count, plural)
    } else {
        format!("{} {}: {}", count, plural, names.join(", "))
    }
}

async fn settings(ctx: &UiContext, node: &SiteNode, show_values: bool) -> AzfnResult<()> {
    let settings = node.application_settings().await?;
    let read_only = settings_are_read_only(&settings);
    let sorted: BTreeMap<String, String> = settings.into_iter().collect();

    ui::section(ctx, &format!("{} application settings", node.label()));
    for (name, value) in sorted {
        println!("  {}", AppSettingNode { name, value }.display(show_values));
    }

    if read_only {
        ui::remark(ctx, "Site runs from a package; wwwroot is read-only");
    }
    Ok(())
}

async fn pick(ctx: &UiContext, node: &mut SiteNode, markers: Vec<String>) -> AzfnResult<()> {
    let markers: Vec<Marker> = markers.into_iter().map(Marker::from).collect();

    let mut child = node.pick_child(&markers);
    if child.is_none() && resolve_markers(&markers) == Some(ChildKind::Deployments) {
        // Deployments only exist once the children have been listed
        node.load_children().await?;
        child = node.pick_child(&markers);
    }

    match child {
        Some(child) => {
            let kind = child.kind();
            match child.description() {
                Some(detail) => ui::step_ok_detail(ctx, kind.label(), &detail),
                None => ui::step_ok(ctx, kind.label()),
            }
            Ok(())
        }
        None => Err(AzfnError::User(format!(
            "No child of {} matches the given markers",
            node.label()
        ))),
    }
}

async fn delete(ctx: &UiContext, node: &SiteNode) -> AzfnResult<()> {
    let label = node.label();
    let confirmed = ui::confirm(ctx, &format!("Delete {}? This cannot be undone.", label), false).await?;
    if !confirmed {
        ui::outro_warn(ctx, "Nothing deleted");
        return Ok(());
    }

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Deleting {}...", label));
    match node.delete().await {
        Ok(()) => {
            spinner.stop(&format!("Deleted {}", label));
            Ok(())
        }
        Err(e) => {
            spinner.stop_error(&format!("Failed to delete {}", label));
            Err(e)
        }
    }
}
