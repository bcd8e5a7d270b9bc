use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use proto_designer::{
    AssetLibrary, BodyExpander, EditContext, EditOutcome, EditReport, EngineOpts, FsTemplateStore,
    InstanceId, ParamRef, ProtoManager, RenderCounter, SceneGraph, Value, ValueKind,
};

#[derive(Parser, Debug)]
#[command(name = "proto-designer", version)]
struct Cli {
    /// Log engine decisions (same as RUST_LOG=debug).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Engine options JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a template and print the expanded scene as JSON.
    Expand(ExpandArgs),
    /// Load a template and print its parameter listing.
    Params(ParamsArgs),
    /// Load a template, apply edits in order and print the resulting scene as JSON.
    Edit(EditArgs),
}

#[derive(Parser, Debug)]
struct ExpandArgs {
    /// Template definition JSON. Nested templates resolve relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the scene JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ParamsArgs {
    /// Template definition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the rows as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Template definition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parameter edit `NAME=VALUE` on the loaded instance, applied in order.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    sets: Vec<String>,

    /// Asset library JSON used by `--insert`.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Fill node parameter `PARAM` with library asset `KEY` (`remove` clears it).
    #[arg(long = "insert", value_name = "PARAM=KEY")]
    inserts: Vec<String>,

    /// Write the scene JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Loaded template plus the collaborators it lives in.
struct Session {
    manager: ProtoManager,
    scene: SceneGraph,
    store: FsTemplateStore,
    render: RenderCounter,
    root: InstanceId,
}

impl Session {
    fn load(path: &Path, opts: EngineOpts) -> anyhow::Result<Self> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let url = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("template path '{}' has no file name", path.display()))?
            .to_string();

        let mut scene = SceneGraph::new();
        let world = scene.add_node("Group", Default::default(), None)?;
        let mut store = FsTemplateStore::new(dir);
        let mut render = RenderCounter::new();
        let mut manager = ProtoManager::new(opts);

        let root = {
            let mut ctx = EditContext::new(&mut scene, &mut store, &BodyExpander, &mut render);
            manager
                .load_root(&mut ctx, &url, Some(world))
                .with_context(|| format!("load template '{}'", path.display()))?
        };

        Ok(Self {
            manager,
            scene,
            store,
            render,
            root,
        })
    }

    fn set(&mut self, name: &str, text: &str) -> anyhow::Result<EditReport> {
        let kind = self.manager.instance(self.root)?.parameter(name)?.kind;
        let value = if kind == ValueKind::Node && text.eq_ignore_ascii_case("null") {
            Value::Node(None)
        } else {
            Value::parse_literal(kind, text)
                .with_context(|| format!("parse value for '{name}'"))?
        };

        let mut ctx = EditContext::new(
            &mut self.scene,
            &mut self.store,
            &BodyExpander,
            &mut self.render,
        );
        Ok(self
            .manager
            .set_parameter_value(&mut ctx, self.root, name, value)?)
    }

    fn insert(&mut self, library: &AssetLibrary, param: &str, key: &str) -> anyhow::Result<()> {
        let target = ParamRef::new(self.root, param);
        let mut ctx = EditContext::new(
            &mut self.scene,
            &mut self.store,
            &BodyExpander,
            &mut self.render,
        );
        match self.manager.insert_asset(&mut ctx, library, key, &target)? {
            Some(id) => eprintln!("inserted '{key}' into {target} as {id}"),
            None => eprintln!("cleared {target}"),
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = match &cli.config {
        Some(path) => EngineOpts::from_path(path)
            .with_context(|| format!("read engine options '{}'", path.display()))?,
        None => EngineOpts::default(),
    };

    match cli.cmd {
        Command::Expand(args) => cmd_expand(args, opts),
        Command::Params(args) => cmd_params(args, opts),
        Command::Edit(args) => cmd_edit(args, opts),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_expand(args: ExpandArgs, opts: EngineOpts) -> anyhow::Result<()> {
    let session = Session::load(&args.in_path, opts)?;
    write_scene(&session.scene, args.out.as_deref())
}

fn cmd_params(args: ParamsArgs, opts: EngineOpts) -> anyhow::Result<()> {
    let session = Session::load(&args.in_path, opts)?;
    let rows = session.manager.parameter_rows();

    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &rows).context("write parameter rows")?;
        writeln!(out)?;
        return Ok(());
    }
    for row in rows {
        let marker = if row.regenerates { " *" } else { "" };
        writeln!(
            out,
            "{:indent$}{} : {} = {}{marker}",
            "",
            row.name,
            row.kind,
            row.label,
            indent = row.depth * 2
        )?;
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, opts: EngineOpts) -> anyhow::Result<()> {
    let mut session = Session::load(&args.in_path, opts)?;

    for set in &args.sets {
        let (name, text) = split_pair(set, "--set")?;
        let report = session.set(name, text)?;
        eprintln!("{}", describe(&report));
    }

    if !args.inserts.is_empty() {
        let path = args
            .library
            .as_deref()
            .context("--insert needs --library")?;
        let library = AssetLibrary::from_path(path)
            .with_context(|| format!("read asset library '{}'", path.display()))?;
        for insert in &args.inserts {
            let (param, key) = split_pair(insert, "--insert")?;
            session.insert(&library, param, key)?;
        }
    }

    eprintln!("render requests: {}", session.render.requests);
    write_scene(&session.scene, args.out.as_deref())
}

fn split_pair<'a>(arg: &'a str, flag: &str) -> anyhow::Result<(&'a str, &'a str)> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .with_context(|| format!("{flag} expects NAME=VALUE, got '{arg}'"))
}

fn describe(report: &EditReport) -> String {
    let target = &report.target;
    let mut line = match &report.outcome {
        EditOutcome::Patched {
            bindings, failures, ..
        } => format!(
            "{target}: patched {} binding(s), {} write(s) skipped",
            bindings.len(),
            failures.len()
        ),
        EditOutcome::Regenerated { nodes } => {
            format!("{target}: regenerated {} root node(s)", nodes.len())
        }
        EditOutcome::Cleared { removed: Some(id) } => format!("{target}: removed {id}"),
        EditOutcome::Cleared { removed: None } => format!("{target}: already empty"),
    };
    for (id, e) in &report.failed {
        line.push_str(&format!("\n  {id} failed: {e}"));
    }
    line
}

fn write_scene(scene: &SceneGraph, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create scene file '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, scene).context("write scene JSON")?;
            w.flush()?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, scene).context("write scene JSON")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
