use crate::{
    context::Context,
    debug,
    error::ApplicationError,
    graph::ResolvedGraph,
    label::Label,
    target::{DepsType, OutputType, Target},
    toolchain::ToolType,
    utilities::write_file_if_changed,
};
use serde::Serialize;
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

const DEFAULT_EDITION: &str = "2015";
const SYSROOT_EDITION: &str = "2018";
const EDITION_PREFIX: &str = "--edition=";
const CFG_PREFIX: &str = "--cfg=";
const STD_CRATE: &str = "std";

// Some crates are listed twice. They are added only once per sysroot.
const SYSROOT_CRATES: &[&str] = &[
    "std",
    "core",
    "alloc",
    "collections",
    "libc",
    "panic_unwind",
    "proc_macro",
    "rustc_unicode",
    "std_unicode",
    "test",
    "alloc_jemalloc",
    "alloc_system",
    "compiler_builtins",
    "getopts",
    "panic_unwind",
    "panic_abort",
    "unwind",
    "build_helper",
    "rustc_asan",
    "rustc_lsan",
    "rustc_msan",
    "rustc_tsan",
    "syntax",
];

const STD_DEPS: &[&str] = &["alloc", "core", "panic_abort", "unwind"];

/// A project description for rust-analyzer.
#[derive(Debug, Default, Serialize)]
pub struct RustProject {
    // rust-analyzer requires this field although it is always empty.
    roots: Vec<String>,
    crates: Vec<Crate>,
}

impl RustProject {
    pub fn crates(&self) -> &[Crate] {
        &self.crates
    }
}

#[derive(Debug, Serialize)]
pub struct Crate {
    crate_id: usize,
    root_module: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    deps: Vec<CrateDependency>,
    edition: String,
    cfg: Vec<String>,
}

impl Crate {
    pub fn crate_id(&self) -> usize {
        self.crate_id
    }

    pub fn root_module(&self) -> &Path {
        &self.root_module
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn deps(&self) -> &[CrateDependency] {
        &self.deps
    }

    pub fn edition(&self) -> &str {
        &self.edition
    }

    pub fn cfg(&self) -> &[String] {
        &self.cfg
    }
}

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct CrateDependency {
    #[serde(rename = "crate")]
    crate_id: usize,
    name: String,
}

impl CrateDependency {
    pub fn crate_id(&self) -> usize {
        self.crate_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builds a crate graph of Rust targets in a build graph.
pub fn build_rust_project(graph: &ResolvedGraph) -> RustProject {
    let mut builder = CrateGraphBuilder {
        graph,
        project: Default::default(),
        target_indexes: Default::default(),
        sysroot_indexes: Default::default(),
    };

    for target in graph.targets() {
        if target.is_binary() && target.source_types_used().rust_source_used() {
            builder.add_target(target);
        }
    }

    builder.project
}

/// Renders a crate graph into JSON ending with a newline.
pub fn render_rust_project(project: &RustProject) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string_pretty(project)? + "\n")
}

/// Writes a crate graph into a file unless the file is up to date.
pub async fn write_rust_project(
    context: &Context,
    graph: &ResolvedGraph,
    path: &Path,
) -> Result<bool, ApplicationError> {
    let project = build_rust_project(graph);
    let written = write_file_if_changed(
        context.file_system(),
        path,
        render_rust_project(&project)?.as_bytes(),
    )
    .await?;

    let mut console = context.console().lock().await;

    if written {
        debug!(
            context,
            console,
            "wrote {} crates to {}",
            project.crates.len(),
            path.display()
        );
    } else {
        debug!(context, console, "{} is up to date", path.display());
    }

    Ok(written)
}

struct CrateGraphBuilder<'a> {
    graph: &'a ResolvedGraph,
    project: RustProject,
    target_indexes: HashMap<&'a Label, usize>,
    sysroot_indexes: HashMap<&'a str, HashMap<&'static str, usize>>,
}

impl<'a> CrateGraphBuilder<'a> {
    fn add_target(&mut self, target: &'a Target) {
        if self.target_indexes.contains_key(target.label()) {
            return;
        }

        let sysroot = self.sysroot(target);

        if let Some(sysroot) = sysroot {
            if !self.sysroot_indexes.contains_key(sysroot) {
                for &name in SYSROOT_CRATES {
                    self.add_sysroot_crate(sysroot, name);
                }
            }
        }

        let dependencies = self.rust_deps(target);

        for &dependency in &dependencies {
            self.add_target(dependency);
        }

        let mut deps = vec![];

        if let Some(&index) = sysroot
            .and_then(|sysroot| self.sysroot_indexes.get(sysroot))
            .and_then(|indexes| indexes.get(STD_CRATE))
        {
            deps.push(CrateDependency {
                crate_id: index,
                name: STD_CRATE.into(),
            });
        }

        for dependency in dependencies {
            deps.push(CrateDependency {
                crate_id: self.target_indexes[dependency.label()],
                name: dependency.rust_values().crate_name.clone(),
            });
        }

        let (edition, cfg) = self.parse_rustflags(target);
        let index = self.project.crates.len();

        self.target_indexes.insert(target.label(), index);
        self.project.crates.push(Crate {
            crate_id: index,
            root_module: target
                .rust_values()
                .crate_root
                .as_ref()
                .map(|root| self.graph.settings().full_path(root))
                .unwrap_or_default(),
            label: Some(target.label().user_visible_name(false)),
            deps,
            edition,
            cfg,
        });
    }

    fn add_sysroot_crate(&mut self, sysroot: &'a str, name: &'static str) {
        if self
            .sysroot_indexes
            .get(sysroot)
            .is_some_and(|indexes| indexes.contains_key(name))
        {
            return;
        }

        let mut deps = vec![];

        if name == STD_CRATE {
            for &dependency in STD_DEPS {
                self.add_sysroot_crate(sysroot, dependency);

                deps.push(CrateDependency {
                    crate_id: self.sysroot_indexes[sysroot][dependency],
                    name: dependency.into(),
                });
            }
        }

        let index = self.project.crates.len();

        self.sysroot_indexes
            .entry(sysroot)
            .or_default()
            .insert(name, index);
        self.project.crates.push(Crate {
            crate_id: index,
            root_module: self.sysroot_path(sysroot).join(format!(
                "lib/rustlib/src/rust/src/lib{name}/lib.rs"
            )),
            label: None,
            deps,
            edition: SYSROOT_EDITION.into(),
            cfg: vec![],
        });
    }

    fn sysroot(&self, target: &Target) -> Option<&'a str> {
        self.graph
            .toolchain_for(target)?
            .tool(ToolType::Rust)?
            .sysroot()
    }

    fn sysroot_path(&self, sysroot: &str) -> PathBuf {
        self.graph.settings().full_build_dir().join(sysroot)
    }

    // Groups are expanded into their Rust dependencies but Rust dependencies
    // are not expanded further.
    fn rust_deps(&self, target: &'a Target) -> Vec<&'a Target> {
        let mut dependencies = vec![];

        self.collect_rust_deps(target, &mut dependencies, &mut HashSet::new());

        dependencies
    }

    fn collect_rust_deps(
        &self,
        target: &'a Target,
        dependencies: &mut Vec<&'a Target>,
        groups: &mut HashSet<&'a Label>,
    ) {
        for dependency in self.graph.deps(target, DepsType::Linked) {
            if dependency.source_types_used().rust_source_used() {
                if !dependencies
                    .iter()
                    .any(|other| other.label() == dependency.label())
                {
                    dependencies.push(dependency);
                }
            } else if dependency.output_type() == OutputType::Group {
                assert!(
                    groups.insert(dependency.label()),
                    "dependency cycle through group {}",
                    dependency.label()
                );

                self.collect_rust_deps(dependency, dependencies, groups);

                groups.remove(dependency.label());
            }
        }
    }

    // The first edition flag wins.
    fn parse_rustflags(&self, target: &Target) -> (String, Vec<String>) {
        let mut edition = None;
        let mut cfg = vec![];

        for flag in target.config_values().rustflags.iter().chain(
            self.graph
                .resolved_configs(target)
                .flat_map(|config| &config.values().rustflags),
        ) {
            if let Some(value) = flag.strip_prefix(EDITION_PREFIX) {
                edition.get_or_insert(value);
            } else if let Some(value) = flag.strip_prefix(CFG_PREFIX) {
                cfg.push(value.into());
            }
        }

        (edition.unwrap_or(DEFAULT_EDITION).into(), cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build_settings::BuildSettings,
        config::{Config, ConfigValues},
        graph::Graph,
        infrastructure::{OsConsole, OsFileSystem},
        options::Options,
        path::SourceDir,
        toolchain::{Tool, Toolchain},
        value::{Origin, Scope, Value},
    };
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn directory() -> SourceDir {
        SourceDir::root().resolve_relative_dir("foo").unwrap()
    }

    fn toolchain_label() -> Label {
        Label::new(SourceDir::root(), "toolchain", None, "")
    }

    fn label(name: &str) -> Label {
        Label::new(directory(), name, Some(SourceDir::root()), "toolchain")
    }

    fn strings(strings: &[&str]) -> Value {
        Value::List(
            strings
                .iter()
                .map(|string| Value::String((*string).into()))
                .collect(),
        )
    }

    fn graph(sysroot: Option<&str>) -> Graph {
        let mut graph = Graph::new(BuildSettings::new(
            "/src".into(),
            SourceDir::root().resolve_relative_dir("out").unwrap(),
        ));
        let mut toolchain = Toolchain::new(toolchain_label());

        toolchain.set_tool(
            Tool::parse(
                ToolType::Rust,
                "rustc {{source}}",
                "RUST {{source}}",
                &[],
                sysroot.map(From::from),
            )
            .unwrap(),
        );
        toolchain.complete_setup();
        graph.define_toolchain(toolchain).unwrap();

        graph
    }

    fn define(graph: &mut Graph, function_name: &str, name: &str, values: Vec<(&str, Value)>) {
        graph
            .define_target(
                Scope::new(
                    directory(),
                    Some(toolchain_label()),
                    values
                        .into_iter()
                        .map(|(name, value)| (name.into(), value))
                        .collect(),
                ),
                Origin::new(format!("//foo/BUILD.gn:{name}")),
                function_name,
                &[Value::String(name.into())],
            )
            .unwrap();
    }

    fn dependency(crate_id: usize, name: &str) -> CrateDependency {
        CrateDependency {
            crate_id,
            name: name.into(),
        }
    }

    #[test]
    fn build_empty_project() {
        let project = build_rust_project(&graph(None).resolve().unwrap());

        assert!(project.crates().is_empty());
        assert_eq!(
            render_rust_project(&project).unwrap(),
            "{\n  \"roots\": [],\n  \"crates\": []\n}\n"
        );
    }

    #[test]
    fn build_diamond_through_group() {
        let mut graph = graph(None);

        define(
            &mut graph,
            "executable",
            "a",
            vec![
                ("sources", strings(&["a.rs"])),
                ("deps", strings(&[":b", ":g"])),
            ],
        );
        define(
            &mut graph,
            "static_library",
            "b",
            vec![("sources", strings(&["b.rs"])), ("deps", strings(&[":d"]))],
        );
        define(&mut graph, "group", "g", vec![("deps", strings(&[":c"]))]);
        define(
            &mut graph,
            "static_library",
            "c",
            vec![("sources", strings(&["c.rs"])), ("deps", strings(&[":d"]))],
        );
        define(
            &mut graph,
            "static_library",
            "d",
            vec![("sources", strings(&["d.rs"]))],
        );

        let project = build_rust_project(&graph.resolve().unwrap());

        assert_eq!(
            project
                .crates()
                .iter()
                .map(|krate| (krate.crate_id(), krate.label()))
                .collect::<Vec<_>>(),
            vec![
                (0, Some("//foo:d")),
                (1, Some("//foo:b")),
                (2, Some("//foo:c")),
                (3, Some("//foo:a")),
            ]
        );
        assert_eq!(
            project.crates()[3].deps(),
            &[dependency(1, "b"), dependency(2, "c")]
        );
        assert_eq!(project.crates()[1].deps(), &[dependency(0, "d")]);
        assert_eq!(project.crates()[2].deps(), &[dependency(0, "d")]);
        assert_eq!(
            project
                .crates()
                .iter()
                .filter(|krate| krate.label() == Some("//foo:d"))
                .count(),
            1
        );
        assert_eq!(
            project.crates()[3].root_module(),
            Path::new("/src/foo/a.rs")
        );
        assert_eq!(project.crates()[3].edition(), DEFAULT_EDITION);
    }

    #[test]
    fn skip_targets_without_rust_sources() {
        let mut graph = graph(None);

        define(
            &mut graph,
            "executable",
            "a",
            vec![("sources", strings(&["a.rs"])), ("deps", strings(&[":b"]))],
        );
        define(
            &mut graph,
            "static_library",
            "b",
            vec![("sources", strings(&["b.cc"]))],
        );

        let project = build_rust_project(&graph.resolve().unwrap());

        assert_eq!(project.crates().len(), 1);
        assert!(project.crates()[0].deps().is_empty());
    }

    #[test]
    fn parse_edition_and_cfg() {
        let mut graph = graph(None);

        graph
            .define_config(Config::new(
                label("config"),
                ConfigValues {
                    rustflags: vec!["--edition=2018".into(), "--cfg=bar".into()],
                    ..Default::default()
                },
            ))
            .unwrap();
        define(
            &mut graph,
            "executable",
            "a",
            vec![
                ("sources", strings(&["a.rs"])),
                ("configs", strings(&[":config"])),
                (
                    "rustflags",
                    strings(&["--edition=2021", "--cfg=feature=\"foo\"", "-O"]),
                ),
            ],
        );

        let project = build_rust_project(&graph.resolve().unwrap());

        assert_eq!(project.crates()[0].edition(), "2021");
        assert_eq!(project.crates()[0].cfg(), &["feature=\"foo\"", "bar"]);
    }

    #[test]
    fn use_edition_of_config() {
        let mut graph = graph(None);

        graph
            .define_config(Config::new(
                label("config"),
                ConfigValues {
                    rustflags: vec!["--edition=2018".into()],
                    ..Default::default()
                },
            ))
            .unwrap();
        define(
            &mut graph,
            "executable",
            "a",
            vec![
                ("sources", strings(&["a.rs"])),
                ("configs", strings(&[":config"])),
            ],
        );

        assert_eq!(
            build_rust_project(&graph.resolve().unwrap()).crates()[0].edition(),
            "2018"
        );
    }

    #[test]
    fn synthesize_sysroot_crates() {
        let mut graph = graph(Some("rust"));

        define(
            &mut graph,
            "executable",
            "a",
            vec![("sources", strings(&["a.rs"])), ("deps", strings(&[":b"]))],
        );
        define(
            &mut graph,
            "static_library",
            "b",
            vec![("sources", strings(&["b.rs"]))],
        );

        let project = build_rust_project(&graph.resolve().unwrap());
        let crates = project.crates();

        assert_eq!(crates.len(), 24);
        assert_eq!(
            crates[..4]
                .iter()
                .map(|krate| krate.root_module().to_path_buf())
                .collect::<Vec<_>>(),
            ["alloc", "core", "panic_abort", "unwind"]
                .iter()
                .map(|name| PathBuf::from(format!(
                    "/src/out/rust/lib/rustlib/src/rust/src/lib{name}/lib.rs"
                )))
                .collect::<Vec<_>>()
        );
        assert_eq!(
            crates[4].root_module(),
            Path::new("/src/out/rust/lib/rustlib/src/rust/src/libstd/lib.rs")
        );
        assert_eq!(
            crates[4].deps(),
            &[
                dependency(0, "alloc"),
                dependency(1, "core"),
                dependency(2, "panic_abort"),
                dependency(3, "unwind"),
            ]
        );
        assert!(crates[..22].iter().all(|krate| krate.label().is_none()
            && krate.edition() == SYSROOT_EDITION
            && krate.cfg().is_empty()));
        assert_eq!(crates[22].label(), Some("//foo:b"));
        assert_eq!(crates[22].deps(), &[dependency(4, "std")]);
        assert_eq!(crates[23].label(), Some("//foo:a"));
        assert_eq!(
            crates[23].deps(),
            &[dependency(4, "std"), dependency(22, "b")]
        );
    }

    #[test]
    fn use_absolute_sysroot() {
        let mut graph = graph(Some("/usr/local"));

        define(
            &mut graph,
            "executable",
            "a",
            vec![("sources", strings(&["a.rs"]))],
        );

        assert_eq!(
            build_rust_project(&graph.resolve().unwrap()).crates()[0].root_module(),
            Path::new("/usr/local/lib/rustlib/src/rust/src/liballoc/lib.rs")
        );
    }

    #[test]
    fn render_project() {
        let mut graph = graph(Some("rust"));

        define(
            &mut graph,
            "executable",
            "a",
            vec![("sources", strings(&["a.rs"]))],
        );

        let string =
            render_rust_project(&build_rust_project(&graph.resolve().unwrap())).unwrap();
        let json = serde_json::from_str::<serde_json::Value>(&string).unwrap();

        assert!(string.ends_with("}\n"));
        assert_eq!(json["roots"], serde_json::json!([]));
        assert_eq!(json["crates"][0].get("label"), None);
        assert_eq!(
            json["crates"][4]["deps"][0],
            serde_json::json!({ "crate": 0, "name": "alloc" })
        );
        assert_eq!(json["crates"][22]["label"], "//foo:a");
        assert_eq!(json["crates"][22]["edition"], DEFAULT_EDITION);
    }

    #[tokio::test]
    async fn write_project_once() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("out/rust-project.json");
        let context = Context::new(OsConsole::new(), OsFileSystem::new(), Options::default());
        let mut graph = graph(None);

        define(
            &mut graph,
            "executable",
            "a",
            vec![("sources", strings(&["a.rs"]))],
        );

        let graph = graph.resolve().unwrap();

        assert!(write_rust_project(&context, &graph, &path).await.unwrap());
        assert!(!write_rust_project(&context, &graph, &path).await.unwrap());
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            render_rust_project(&build_rust_project(&graph)).unwrap()
        );
    }
}
