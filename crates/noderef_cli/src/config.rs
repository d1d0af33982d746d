//! Configuration for the noderef command
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! the `noderef.toml` file, then command line flags.

use anyhow::{bail, Context, Result};
use noderef_gen::{DocTableFormat, DocTableOptions, GeneratorOptions, RuntimeProfile};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "noderef.toml";
/// Header prepended to the stubs when present
pub const DEFAULT_HEADER_FILE: &str = "IntellisenseHeader.js";
pub const DEFAULT_INPUT_FILE: &str = "all.json";
pub const DEFAULT_STUBS_FILE: &str = "all.js";

/// Contents of `noderef.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Documentation tree (JSON)
    pub input: Option<PathBuf>,
    /// JavaScript header prepended to the stubs
    pub header: Option<PathBuf>,
    pub stubs_output: Option<PathBuf>,
    pub doc_table_output: Option<PathBuf>,
    pub doc_table: DocTableOptions,
    pub runtime: RuntimeProfile,
}

impl Config {
    /// Parse a config file. Relative paths inside it are taken relative to
    /// the file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let mut config: Config = toml::from_str(&text)
            .with_context(|| format!("parsing config at {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.input,
            &mut self.header,
            &mut self.stubs_output,
            &mut self.doc_table_output,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Load `explicit` if given (it must exist), else `noderef.toml` in
    /// `dir` if present, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            return Self::load(path);
        }

        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            tracing::debug!("using config at {}", default_path.display());
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub header: Option<PathBuf>,
    pub stubs_output: Option<PathBuf>,
    pub doc_table_output: Option<PathBuf>,
    pub format: Option<DocTableFormat>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub header: Option<PathBuf>,
    pub stubs_output: PathBuf,
    pub doc_table_output: PathBuf,
    pub doc_table: DocTableOptions,
    pub runtime: RuntimeProfile,
}

impl Settings {
    /// Layer the overrides on top of the config. Relative default paths are
    /// resolved against `dir`.
    pub fn resolve(config: Config, overrides: Overrides, dir: &Path) -> Self {
        let mut doc_table = config.doc_table;
        if let Some(format) = overrides.format {
            doc_table.format = format;
        }

        let default_doc_table = match doc_table.format {
            DocTableFormat::CSharp => "modules.cs",
            DocTableFormat::Json => "modules.json",
        };

        // An explicit header must exist; the default one is optional
        let header = overrides.header.or(config.header).or_else(|| {
            let candidate = dir.join(DEFAULT_HEADER_FILE);
            candidate.exists().then_some(candidate)
        });

        Self {
            input: overrides
                .input
                .or(config.input)
                .unwrap_or_else(|| dir.join(DEFAULT_INPUT_FILE)),
            header,
            stubs_output: overrides
                .stubs_output
                .or(config.stubs_output)
                .unwrap_or_else(|| dir.join(DEFAULT_STUBS_FILE)),
            doc_table_output: overrides
                .doc_table_output
                .or(config.doc_table_output)
                .unwrap_or_else(|| dir.join(default_doc_table)),
            doc_table,
            runtime: config.runtime,
        }
    }

    /// Generator options, reading the header file if one is configured
    pub fn generator_options(&self) -> Result<GeneratorOptions> {
        let header = match &self.header {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("reading header at {}", path.display()))?,
            ),
            None => None,
        };

        Ok(GeneratorOptions {
            header,
            doc_table: self.doc_table.clone(),
            runtime: self.runtime.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        let settings = Settings::resolve(config, Overrides::default(), dir.path());

        assert_eq!(settings.input, dir.path().join("all.json"));
        assert_eq!(settings.stubs_output, dir.path().join("all.js"));
        assert_eq!(settings.doc_table_output, dir.path().join("modules.cs"));
        assert_eq!(settings.header, None);
        assert_eq!(settings.doc_table.format, DocTableFormat::CSharp);
    }

    #[test]
    fn test_config_file_is_discovered() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
input = "docs/all.json"

[doc_table]
format = "json"
class_name = "ModuleDocs"

[runtime]
platform = "linux"
"#,
        )
        .unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.input, Some(dir.path().join("docs/all.json")));
        assert_eq!(config.doc_table.class_name, "ModuleDocs");
        assert_eq!(config.doc_table.field_name, "_nodejsModules");
        assert_eq!(config.runtime.platform, "linux");
        assert_eq!(config.runtime.node_version, "0.10.0");

        let settings = Settings::resolve(config, Overrides::default(), dir.path());
        assert_eq!(settings.doc_table_output, dir.path().join("modules.json"));
    }

    #[test]
    fn test_overrides_win() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            input: Some(PathBuf::from("from-config.json")),
            ..Config::default()
        };
        let overrides = Overrides {
            input: Some(PathBuf::from("from-flag.json")),
            format: Some(DocTableFormat::Json),
            ..Overrides::default()
        };

        let settings = Settings::resolve(config, overrides, dir.path());
        assert_eq!(settings.input, PathBuf::from("from-flag.json"));
        assert_eq!(settings.doc_table.format, DocTableFormat::Json);
    }

    #[test]
    fn test_default_header_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_HEADER_FILE), "// header\n").unwrap();

        let settings = Settings::resolve(Config::default(), Overrides::default(), dir.path());
        assert_eq!(settings.header, Some(dir.path().join(DEFAULT_HEADER_FILE)));

        let options = settings.generator_options().unwrap();
        assert_eq!(options.header.as_deref(), Some("// header\n"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::discover(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "inptu = \"typo.json\"\n").unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, "[doc_table]\nclass_nmae = \"X\"\n").unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, "[runtime]\nplatfrom = \"linux\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_paths_relative_to_config_file() {
        let cwd = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let path = project.path().join("noderef.toml");
        fs::write(
            &path,
            "input = \"docs/all.json\"\nheader = \"header.js\"\nstubs_output = \"out/all.js\"\n",
        )
        .unwrap();

        let config = Config::discover(Some(&path), cwd.path()).unwrap();
        let settings = Settings::resolve(config, Overrides::default(), cwd.path());

        assert_eq!(settings.input, project.path().join("docs/all.json"));
        assert_eq!(settings.header, Some(project.path().join("header.js")));
        assert_eq!(settings.stubs_output, project.path().join("out/all.js"));
        assert_eq!(settings.doc_table_output, cwd.path().join("modules.cs"));
    }
}
