//! Command dispatch: maps parsed arguments onto service calls and prints results.

use tracing::{debug, instrument};

use crate::cli::args::{Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{CreateFile, DomainError, FileAttrs, FileSpec, Node, NodeId, NodeTree};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(command: &Commands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Init => cmd_init(container),
        Commands::Tree { root } => cmd_tree(container, *root),
        Commands::Show { id } => cmd_show(container, *id),
        Commands::Size { id } => cmd_size(container, *id),
        Commands::Search { extension } => cmd_search(container, extension),
        Commands::Traverse { id } => cmd_traverse(container, *id),
        Commands::Xml { id } => cmd_xml(container, *id),
        Commands::Render { id } => cmd_render(container, *id),
        Commands::Mkdir { name, parent } => cmd_mkdir(container, name, *parent),
        Commands::Touch {
            kind,
            name,
            size,
            parent,
            pages,
            width,
            height,
            encoding,
        } => {
            let attrs = FileAttrs {
                pages: *pages,
                width: *width,
                height: *height,
                encoding: encoding
                    .clone()
                    .or_else(|| Some(container.settings.default_encoding.clone())),
            };
            cmd_touch(container, kind, name, *size, *parent, &attrs)
        }
        Commands::Rename { id, name } => cmd_rename(container, *id, name),
        Commands::Rm { id } => cmd_rm(container, *id),
        Commands::Config { command } => cmd_config(command, &container.settings),
        Commands::Completion { .. } => Err(CliError::Usage(
            "completion is handled before the store is opened".into(),
        )),
    }
}

#[instrument(skip(container))]
fn cmd_init(container: &ServiceContainer) -> CliResult<()> {
    let created = container.commands.seed_sample()?;
    if created == 0 {
        output::warning(&format!(
            "store {} already has nodes, nothing seeded",
            container.settings.store_path.display()
        ));
    } else {
        output::success(&format!(
            "seeded {} nodes into {}",
            created,
            container.settings.store_path.display()
        ));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, root: Option<NodeId>) -> CliResult<()> {
    let tree = container.query.get_tree(root)?;
    debug!("tree: {} nodes", tree.len());
    print_listing(&tree, tree.root(), 0);
    Ok(())
}

fn print_listing(tree: &NodeTree, node: &Node, depth: usize) {
    output::info(&format!(
        "{}{} {} {}",
        "  ".repeat(depth),
        node.name,
        output::dim(&format!("[{}]", node.kind_label())),
        output::dim(&node.id)
    ));
    for child in tree.children(node) {
        print_listing(tree, child, depth + 1);
    }
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, id: NodeId) -> CliResult<()> {
    let node = container.query.get_node(id)?;
    output::header(&node.name);
    output::detail(&format!("id:       {}", node.id));
    output::detail(&format!("kind:     {}", node.kind_label()));
    output::detail(&format!("size:     {}KB", node.size));
    output::detail(&format!("created:  {}", node.created_at.to_rfc3339()));
    match node.parent_id {
        Some(parent) => output::detail(&format!("parent:   {}", parent)),
        None => output::detail("parent:   (root)"),
    }
    match node.attribute_summary() {
        Some(summary) => output::detail(&format!("details:  {}", summary)),
        None => output::detail(&format!("children: {}", node.children().len())),
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_size(container: &ServiceContainer, id: NodeId) -> CliResult<()> {
    let report = container.query.get_size_report(id)?;
    for line in &report.traverse_log {
        output::detail(line);
    }
    output::action(&report.name, &format!("{}KB", report.total_size));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_search(container: &ServiceContainer, extension: &str) -> CliResult<()> {
    let result = container.query.search_by_extension(extension)?;
    for path in &result.paths {
        output::info(path);
    }
    output::action("matches", &result.count);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_traverse(container: &ServiceContainer, id: NodeId) -> CliResult<()> {
    for line in container.query.get_traversal_log(id)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_xml(container: &ServiceContainer, id: NodeId) -> CliResult<()> {
    let element = container.query.get_serialized_structure(id)?;
    let xml = element
        .to_xml()
        .map_err(|e| InfraError::io("write XML", e))?;
    output::info(&xml);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_render(container: &ServiceContainer, id: Option<NodeId>) -> CliResult<()> {
    output::info(&container.query.get_rendered_text(id)?);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_mkdir(container: &ServiceContainer, name: &str, parent: Option<NodeId>) -> CliResult<()> {
    let node = container.commands.create_directory(name, parent)?;
    output::success(&format!("created directory {} {}", node.name, output::dim(&node.id)));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_touch(
    container: &ServiceContainer,
    kind: &str,
    name: &str,
    size: f64,
    parent: Option<NodeId>,
    attrs: &FileAttrs,
) -> CliResult<()> {
    let spec = FileSpec::from_tag(kind, attrs)?;
    let node = container.commands.create_file(CreateFile {
        name: name.to_string(),
        size,
        parent_id: parent,
        spec,
    })?;
    output::success(&format!(
        "created {} {} {}",
        node.kind_label(),
        node.name,
        output::dim(&node.id)
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_rename(container: &ServiceContainer, id: NodeId, name: &str) -> CliResult<()> {
    let node = container.commands.rename(id, name)?;
    output::success(&format!("renamed {} to {}", node.id, node.name));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_rm(container: &ServiceContainer, id: NodeId) -> CliResult<()> {
    if container.commands.delete(id)? {
        output::success(&format!("deleted {} and its descendants", id));
        Ok(())
    } else {
        Err(DomainError::NotFound(id).into())
    }
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no config directory on this platform"),
            }
            output::action("store", &settings.store_path.display());
        }
    }
    Ok(())
}
