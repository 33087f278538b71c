//! Configuration primitives and loader for the page-toc toolkit.
//!
//! The loader resolves configuration using a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Parsed settings are normalised into typed structures (compiled selectors,
//! glob patterns, class names) so downstream crates never touch raw TOML.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use page_toc_dom::Selector;
use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".page-toc.toml";

const DEFAULT_SELECTORS: &[&str] = &[".page-content", "main#content, main"];
const DEFAULT_TITLE: &str = "On this page";
const DEFAULT_FALLBACK_SLUG: &str = "section";
const DEFAULT_INCLUDE: &[&str] = &["**/*.html", "**/*.htm"];

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub project: ProjectSettings,
    pub content: ContentSettings,
    pub toc: TocSettings,
    pub classes: ClassNames,
    pub sources: ConfigSources,
}

/// Which files belong to the site being processed.
#[derive(Clone, Debug)]
pub struct ProjectSettings {
    pub root: PathBuf,
    pub include: PatternList,
    pub exclude: PatternList,
}

/// How the content container is located on each page.
#[derive(Clone, Debug)]
pub struct ContentSettings {
    /// Tried in order; the first selector with a match wins.
    pub selectors: Vec<Selector>,
}

/// Labels and fallbacks used while generating the navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocSettings {
    pub title: String,
    pub fallback_slug: String,
}

impl Default for TocSettings {
    fn default() -> Self {
        TocSettings {
            title: DEFAULT_TITLE.to_string(),
            fallback_slug: DEFAULT_FALLBACK_SLUG.to_string(),
        }
    }
}

/// Class names stamped onto the generated markup so host styling can target it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    pub layout: String,
    pub sidebar: String,
    pub main: String,
    pub nav: String,
    pub title: String,
    pub list: String,
    pub sublist: String,
    pub item: String,
    pub level2: String,
    pub level3: String,
    pub link: String,
}

impl ClassNames {
    pub fn get(&self, role: ClassRole) -> &str {
        match role {
            ClassRole::Layout => &self.layout,
            ClassRole::Sidebar => &self.sidebar,
            ClassRole::Main => &self.main,
            ClassRole::Nav => &self.nav,
            ClassRole::Title => &self.title,
            ClassRole::List => &self.list,
            ClassRole::Sublist => &self.sublist,
            ClassRole::Item => &self.item,
            ClassRole::Level2 => &self.level2,
            ClassRole::Level3 => &self.level3,
            ClassRole::Link => &self.link,
        }
    }

    fn slot(&mut self, role: ClassRole) -> &mut String {
        match role {
            ClassRole::Layout => &mut self.layout,
            ClassRole::Sidebar => &mut self.sidebar,
            ClassRole::Main => &mut self.main,
            ClassRole::Nav => &mut self.nav,
            ClassRole::Title => &mut self.title,
            ClassRole::List => &mut self.list,
            ClassRole::Sublist => &mut self.sublist,
            ClassRole::Item => &mut self.item,
            ClassRole::Level2 => &mut self.level2,
            ClassRole::Level3 => &mut self.level3,
            ClassRole::Link => &mut self.link,
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        let mut classes = ClassNames {
            layout: String::new(),
            sidebar: String::new(),
            main: String::new(),
            nav: String::new(),
            title: String::new(),
            list: String::new(),
            sublist: String::new(),
            item: String::new(),
            level2: String::new(),
            level3: String::new(),
            link: String::new(),
        };
        for role in ClassRole::ALL {
            *classes.slot(*role) = role.default_class().to_string();
        }
        classes
    }
}

/// Elements of the generated markup that carry a configurable class.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ClassRole {
    Layout,
    Sidebar,
    Main,
    Nav,
    Title,
    List,
    Sublist,
    Item,
    Level2,
    Level3,
    Link,
}

impl ClassRole {
    pub const ALL: &'static [ClassRole] = &[
        ClassRole::Layout,
        ClassRole::Sidebar,
        ClassRole::Main,
        ClassRole::Nav,
        ClassRole::Title,
        ClassRole::List,
        ClassRole::Sublist,
        ClassRole::Item,
        ClassRole::Level2,
        ClassRole::Level3,
        ClassRole::Link,
    ];

    /// Key used in the `[classes]` table.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassRole::Layout => "layout",
            ClassRole::Sidebar => "sidebar",
            ClassRole::Main => "main",
            ClassRole::Nav => "nav",
            ClassRole::Title => "title",
            ClassRole::List => "list",
            ClassRole::Sublist => "sublist",
            ClassRole::Item => "item",
            ClassRole::Level2 => "level2",
            ClassRole::Level3 => "level3",
            ClassRole::Link => "link",
        }
    }

    pub fn default_class(self) -> &'static str {
        match self {
            ClassRole::Layout => "toc-layout",
            ClassRole::Sidebar => "toc-sidebar",
            ClassRole::Main => "toc-main",
            ClassRole::Nav => "toc-nav",
            ClassRole::Title => "toc-title",
            ClassRole::List => "toc-list",
            ClassRole::Sublist => "toc-sublist",
            ClassRole::Item => "toc-item",
            ClassRole::Level2 => "level-2",
            ClassRole::Level3 => "level-3",
            ClassRole::Link => "toc-link",
        }
    }
}

impl fmt::Display for ClassRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClassRole {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ClassRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == value)
            .ok_or(())
    }
}

/// Pattern plus compiled matcher helper.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    matcher: GlobMatcher,
}

impl Pattern {
    fn new(source: ConfigSource, value: String) -> Result<Self, ConfigValidationError> {
        match Glob::new(&value) {
            Ok(glob) => Ok(Pattern {
                matcher: glob.compile_matcher(),
                original: value,
            }),
            Err(err) => Err(ConfigValidationError::new(
                Some(source),
                format!("invalid glob pattern '{value}': {err}"),
            )),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Ordered list of glob patterns.
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn new(patterns: Vec<Pattern>) -> Self {
        PatternList { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            project: resolved.project,
            content: resolved.content,
            toc: resolved.toc,
            classes: resolved.classes,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Built-in defaults rooted at `root`, without consulting the filesystem.
    pub fn builtin(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let source = ConfigSource::default(root.clone());
        let resolved = defaults_layer(source.clone())
            .finalize()
            .unwrap_or_else(|err| panic!("built-in page-toc defaults are invalid: {err}"));
        Config {
            project: resolved.project,
            content: resolved.content,
            toc: resolved.toc,
            classes: resolved.classes,
            sources: ConfigSources {
                working_directory: root,
                layers: vec![source],
            },
        }
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    let project = ProjectPartial {
        root: Some(Located::new(PathBuf::from("."), source.clone())),
        include: Some(Located::new(owned(DEFAULT_INCLUDE), source.clone())),
        exclude: Some(Located::new(Vec::new(), source.clone())),
    };

    let content = ContentPartial {
        selectors: Some(Located::new(owned(DEFAULT_SELECTORS), source.clone())),
    };

    let toc = TocPartial {
        title: Some(Located::new(DEFAULT_TITLE.into(), source.clone())),
        fallback_slug: Some(Located::new(DEFAULT_FALLBACK_SLUG.into(), source.clone())),
    };

    let classes = ClassRole::ALL
        .iter()
        .map(|role| {
            (
                role.as_str().to_string(),
                Located::new(role.default_class().to_string(), source.clone()),
            )
        })
        .collect();

    PartialConfig {
        project: Some(project),
        content: Some(content),
        toc: Some(toc),
        classes,
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    project: Option<ProjectPartial>,
    content: Option<ContentPartial>,
    toc: Option<TocPartial>,
    classes: HashMap<String, Located<String>>,
}

impl PartialConfig {
    fn merge(&mut self, mut other: PartialConfig) {
        if let Some(other_project) = other.project.take() {
            match &mut self.project {
                Some(project) => project.merge(other_project),
                None => self.project = Some(other_project),
            }
        }

        if let Some(other_content) = other.content.take() {
            match &mut self.content {
                Some(content) => content.merge(other_content),
                None => self.content = Some(other_content),
            }
        }

        if let Some(other_toc) = other.toc.take() {
            match &mut self.toc {
                Some(toc) => toc.merge(other_toc),
                None => self.toc = Some(other_toc),
            }
        }

        for (key, value) in other.classes {
            self.classes.insert(key, value);
        }
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();
        let fallback_source = || ConfigSource::default(PathBuf::from("."));

        let project_partial = self.project.unwrap_or_default();
        let root_loc = project_partial
            .root
            .unwrap_or_else(|| Located::new(PathBuf::from("."), fallback_source()));
        let root = resolve_path(&root_loc);
        let include = compile_patterns(
            project_partial.include.unwrap_or_default(),
            "project.include",
            &mut errors,
        );
        let exclude = compile_patterns(
            project_partial.exclude.unwrap_or_default(),
            "project.exclude",
            &mut errors,
        );

        let content_partial = self.content.unwrap_or_default();
        let selectors_loc = content_partial
            .selectors
            .unwrap_or_else(|| Located::new(owned(DEFAULT_SELECTORS), fallback_source()));
        let selectors = compile_selectors(selectors_loc, &mut errors);

        let toc_partial = self.toc.unwrap_or_default();
        let title = toc_partial
            .title
            .unwrap_or_else(|| Located::new(DEFAULT_TITLE.into(), fallback_source()));
        if title.value.trim().is_empty() {
            errors.push(
                ConfigValidationError::new(Some(title.source.clone()), "cannot be empty".into())
                    .with_context("toc.title"),
            );
        }

        let fallback_slug = toc_partial
            .fallback_slug
            .unwrap_or_else(|| Located::new(DEFAULT_FALLBACK_SLUG.into(), fallback_source()));
        if !fallback_slug
            .value
            .chars()
            .any(|ch| ch.is_ascii_alphanumeric())
        {
            errors.push(
                ConfigValidationError::new(
                    Some(fallback_slug.source.clone()),
                    format!(
                        "must contain at least one ASCII letter or digit (received '{}')",
                        fallback_slug.value
                    ),
                )
                .with_context("toc.fallback_slug"),
            );
        }

        let classes = resolve_classes(self.classes, &mut errors);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            project: ProjectSettings {
                root,
                include: PatternList::new(include),
                exclude: PatternList::new(exclude),
            },
            content: ContentSettings { selectors },
            toc: TocSettings {
                title: title.value,
                fallback_slug: fallback_slug.value,
            },
            classes,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct ProjectPartial {
    root: Option<Located<PathBuf>>,
    include: Option<Located<Vec<String>>>,
    exclude: Option<Located<Vec<String>>>,
}

impl ProjectPartial {
    fn merge(&mut self, other: ProjectPartial) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.include.is_some() {
            self.include = other.include;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ContentPartial {
    selectors: Option<Located<Vec<String>>>,
}

impl ContentPartial {
    fn merge(&mut self, other: ContentPartial) {
        if other.selectors.is_some() {
            self.selectors = other.selectors;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct TocPartial {
    title: Option<Located<String>>,
    fallback_slug: Option<Located<String>>,
}

impl TocPartial {
    fn merge(&mut self, other: TocPartial) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.fallback_slug.is_some() {
            self.fallback_slug = other.fallback_slug;
        }
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

impl Default for Located<Vec<String>> {
    fn default() -> Self {
        Located::new(Vec::new(), ConfigSource::default(PathBuf::from(".")))
    }
}

/// Resolve against the defining layer's directory, dropping `.` segments.
fn resolve_path(located: &Located<PathBuf>) -> PathBuf {
    let path = &located.value;
    let joined = if path.is_absolute() {
        path.clone()
    } else {
        located.source.base_dir.join(path)
    };
    joined.components().collect()
}

fn compile_patterns(
    located: Located<Vec<String>>,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for pattern in located.value {
        match Pattern::new(located.source.clone(), pattern) {
            Ok(compiled) => patterns.push(compiled),
            Err(err) => errors.push(err.with_context(context)),
        }
    }
    patterns
}

fn compile_selectors(
    located: Located<Vec<String>>,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<Selector> {
    if located.value.is_empty() {
        errors.push(
            ConfigValidationError::new(
                Some(located.source.clone()),
                "at least one selector is required".into(),
            )
            .with_context("content.selectors"),
        );
    }

    let mut selectors = Vec::new();
    for raw in located.value {
        match Selector::parse(&raw) {
            Ok(selector) => selectors.push(selector),
            Err(err) => errors.push(
                ConfigValidationError::new(Some(located.source.clone()), err.to_string())
                    .with_context("content.selectors"),
            ),
        }
    }
    selectors
}

fn resolve_classes(
    entries: HashMap<String, Located<String>>,
    errors: &mut Vec<ConfigValidationError>,
) -> ClassNames {
    let mut classes = ClassNames::default();
    let mut keys: Vec<_> = entries.into_iter().collect();
    keys.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, located) in keys {
        let Ok(role) = key.parse::<ClassRole>() else {
            errors.push(
                ConfigValidationError::new(
                    Some(located.source),
                    format!("unknown class role '{key}'"),
                )
                .with_context("classes"),
            );
            continue;
        };

        let value = located.value.trim();
        if value.is_empty() || value.contains(char::is_whitespace) {
            errors.push(
                ConfigValidationError::new(
                    Some(located.source.clone()),
                    format!("must be a single non-empty class name (received '{}')", located.value),
                )
                .with_context(format!("classes.{key}")),
            );
            continue;
        }
        *classes.slot(role) = value.to_string();
    }

    classes
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    project: ProjectSettings,
    content: ContentSettings,
    toc: TocSettings,
    classes: ClassNames,
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    project: Option<RawProject>,
    #[serde(default)]
    content: Option<RawContent>,
    #[serde(default)]
    toc: Option<RawToc>,
    #[serde(default)]
    classes: HashMap<String, String>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            project: self
                .project
                .map(|project| project.into_partial(source.clone())),
            content: self.content.map(|content| ContentPartial {
                selectors: content
                    .selectors
                    .map(|value| Located::new(value, source.clone())),
            }),
            toc: self.toc.map(|toc| TocPartial {
                title: toc.title.map(|value| Located::new(value, source.clone())),
                fallback_slug: toc
                    .fallback_slug
                    .map(|value| Located::new(value, source.clone())),
            }),
            classes: self
                .classes
                .into_iter()
                .map(|(key, value)| (key, Located::new(value, source.clone())))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

impl RawProject {
    fn into_partial(self, source: ConfigSource) -> ProjectPartial {
        ProjectPartial {
            root: self.root.map(|value| Located::new(value, source.clone())),
            include: self
                .include
                .map(|value| Located::new(value, source.clone())),
            exclude: self.exclude.map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawContent {
    #[serde(default)]
    selectors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawToc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    fallback_slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults_match_generated_markup_conventions() {
        let config = Config::builtin("/site");
        assert_eq!(config.project.root, PathBuf::from("/site"));
        assert_eq!(config.project.root.join("index.html").to_str(), Some("/site/index.html"));
        assert_eq!(config.classes, ClassNames::default());
        assert_eq!(config.classes.get(ClassRole::Level2), "level-2");
        assert_eq!(config.toc, TocSettings::default());
        let selectors: Vec<_> = config
            .content
            .selectors
            .iter()
            .map(|selector| selector.as_str().to_string())
            .collect();
        assert_eq!(selectors, vec![".page-content", "main#content, main"]);
    }

    #[test]
    fn class_roles_round_trip_through_keys() {
        for role in ClassRole::ALL {
            assert_eq!(role.as_str().parse::<ClassRole>(), Ok(*role));
        }
        assert!("sidebarz".parse::<ClassRole>().is_err());
    }
}
