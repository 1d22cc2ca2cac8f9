//! Build pipeline orchestration
//!
//! Implements the fixed step sequence init -> configure -> deps -> generate
//! -> build on top of the [`FileSystem`] and [`CommandRunner`] seams. Every
//! decision in here is a plain conditional over file existence and command
//! results; all state lives in the project tree.

pub mod options;

pub use options::{BuildOptions, ConfigureOptions, DepsOptions, GenerateOptions, InitOptions};

use crate::config::Config;
use crate::error::{PilotError, PilotResult};
use crate::exec::{CommandLine, CommandRunner};
use crate::fs::FileSystem;
use crate::layout::{ProjectLayout, CONFIG_FILE_SUFFIX, DEPENDENCY_GRAPH_FILE};
use semver::Version;
use tracing::{debug, info};

/// The cache variable line scanned for during generator introspection
const GENERATOR_KEY: &str = "CMAKE_GENERATOR:STRING=";

/// Wrapper scripts written into the project root by the init step
const BOOTSTRAP_SCRIPTS: &[(&str, &str)] = &[
    (
        "1-configure.sh",
        "#!/bin/sh\nexec buildpilot configure \"$@\"\n",
    ),
    (
        "2-get-dependencies.sh",
        "#!/bin/sh\nexec buildpilot deps \"$@\"\n",
    ),
    ("3-generate.sh", "#!/bin/sh\nexec buildpilot generate \"$@\"\n"),
    ("4-build.sh", "#!/bin/sh\nexec buildpilot build \"$@\"\n"),
];

/// Result of the dependency step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepsOutcome {
    /// The project has no conanfile; nothing to fetch
    NoConanfile,
    /// Conan install ran for this configuration
    Installed { config: String },
}

/// The pipeline orchestrator
///
/// Owns the project layout plus explicit filesystem and command-runner
/// instances, so independent pipelines can coexist in tests.
pub struct Pipeline<F, R> {
    layout: ProjectLayout,
    config: Config,
    fs: F,
    runner: R,
}

impl<F: FileSystem, R: CommandRunner> Pipeline<F, R> {
    /// Create a pipeline over the given layout, filesystem and runner
    pub fn new(layout: ProjectLayout, config: Config, fs: F, runner: R) -> Self {
        Self {
            layout,
            config,
            fs,
            runner,
        }
    }

    /// The project layout
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// The filesystem instance, readable for test inspection
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// The command runner instance
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Place the bootstrap wrapper scripts into the project root and stamp
    /// the root with the tool version
    pub async fn init(&mut self, opts: InitOptions) -> PilotResult<()> {
        let template_dir = opts.template_dir.or_else(|| {
            self.config
                .scripts
                .template_dir
                .as_ref()
                .map(|d| self.layout.root().join(d))
        });

        match template_dir {
            Some(dir) => {
                for entry in self.fs.list_dir(&dir)? {
                    let source = dir.join(&entry);
                    if self.fs.is_file(&source) {
                        let target = self.layout.root().join(&entry);
                        self.fs.copy_file(&source, &target)?;
                        info!("Copied {}", target.display());
                    }
                }
            }
            None => {
                for (name, content) in BOOTSTRAP_SCRIPTS {
                    let target = self.layout.root().join(name);
                    self.fs.write_file(&target, content)?;
                    info!("Wrote {}", target.display());
                }
            }
        }

        self.fs.write_file(
            &self.layout.version_stamp_file(),
            env!("CARGO_PKG_VERSION"),
        )
    }

    /// Generate the configuration file for a named configuration, or list
    /// the available configurations when `opts.list` is set
    pub async fn configure(&mut self, opts: ConfigureOptions) -> PilotResult<()> {
        self.check_version_stamp()?;

        let command = if opts.list {
            CommandLine::new("cmake", Vec::new())
                .arg("-DLIST_CONFIGURATIONS=TRUE")
                .arg(format!("-DPROJECT_ROOT={}", self.layout.root().display()))
                .arg("-P")
                .arg(self.layout.config_script().display().to_string())
        } else {
            let name = opts.name.ok_or(PilotError::ConfigNameRequired)?;
            // A missing parent means the configuration inherits from the
            // existing configuration of the same name.
            let parent = opts.inherits.unwrap_or_else(|| name.clone());

            let mut command = CommandLine::new("cmake", Vec::new())
                .arg(format!("-DDERIVED_CONFIG={name}"))
                .arg(format!("-DPARENT_CONFIG={parent}"))
                .arg(format!("-DPROJECT_ROOT={}", self.layout.root().display()));

            for definition in &opts.definitions {
                if !definition.contains('=') {
                    return Err(PilotError::InvalidDefinition(definition.clone()));
                }
                command = command.arg(format!("-D{definition}"));
            }

            command
                .arg("-P")
                .arg(self.layout.config_script().display().to_string())
        };

        self.runner.run(&command, self.layout.root()).await
    }

    /// Fetch external packages with Conan for the given configuration
    ///
    /// A project without a conanfile skips the step successfully.
    pub async fn deps(&mut self, opts: DepsOptions) -> PilotResult<DepsOutcome> {
        self.check_version_stamp()?;

        if !self.fs.exists(&self.layout.conan_file()) {
            debug!("No conanfile at {}", self.layout.conan_file().display());
            return Ok(DepsOutcome::NoConanfile);
        }

        let name = self.resolve_config(opts.name.as_deref()).await?;

        let profile = self
            .layout
            .conan_profile(&name, &self.config.conan.profile_prefix);
        if !self.fs.exists(&profile) {
            return Err(PilotError::ProfileNotFound(profile));
        }

        let command = CommandLine::new("conan", Vec::new())
            .arg("install")
            .arg("-pr")
            .arg(profile.display().to_string())
            .arg("-if")
            .arg(self.layout.build_dir(&name).display().to_string())
            .arg(self.layout.sources_dir().display().to_string())
            .arg("--build=missing");

        self.runner.run(&command, self.layout.root()).await?;
        Ok(DepsOutcome::Installed { config: name })
    }

    /// Run CMake to generate build files, returning the configuration name
    ///
    /// Reuses the cached variables when a cache marker exists, otherwise
    /// performs the full generate with sources, build dir and config file.
    pub async fn generate(&mut self, opts: GenerateOptions) -> PilotResult<String> {
        self.check_version_stamp()?;

        let name = self.resolve_config(opts.name.as_deref()).await?;
        let build_dir = self.layout.build_dir(&name);

        if opts.clean && self.fs.exists(&build_dir) {
            debug!("Cleaning {}", build_dir.display());
            self.fs.remove_tree(&build_dir)?;
        }

        let graphviz = format!(
            "--graphviz={}",
            build_dir.join(DEPENDENCY_GRAPH_FILE).display()
        );

        let command = if self.has_cache_file(&name) {
            // Incremental generate from the cached variables
            CommandLine::new("cmake", Vec::new())
                .arg(build_dir.display().to_string())
                .arg(graphviz)
        } else {
            CommandLine::new("cmake", Vec::new())
                .arg("-S")
                .arg(self.layout.sources_dir().display().to_string())
                .arg("-B")
                .arg(build_dir.display().to_string())
                .arg("-C")
                .arg(self.layout.config_file(&name).display().to_string())
                .arg(graphviz)
        };

        self.runner.run(&command, self.layout.root()).await?;
        Ok(name)
    }

    /// Invoke the build for a configuration, returning its name
    pub async fn build(&mut self, opts: BuildOptions) -> PilotResult<String> {
        self.check_version_stamp()?;

        let name = match opts.name.as_deref() {
            Some(name) => {
                // Generate first when the cache marker or the configuration
                // file is still missing.
                if !self.has_cache_file(name) || !self.config_file_exists(name) {
                    self.generate(GenerateOptions {
                        name: Some(name.to_string()),
                        clean: false,
                    })
                    .await?;
                }
                name.to_string()
            }
            None => self
                .first_config_with_cache()?
                .ok_or(PilotError::NoCacheFile)?,
        };

        let cpus = self.effective_cpus(opts.cpus);
        let build_dir = self.layout.build_dir(&name);

        let mut command = CommandLine::new("cmake", Vec::new())
            .arg("--build")
            .arg(build_dir.display().to_string());

        if let Some(target) = &opts.target {
            command = command.arg("--target").arg(target.clone());
        }
        if let Some(build_type) = &opts.build_type {
            command = command.arg("--config").arg(build_type.clone());
        }
        if opts.clean {
            command = command.arg("--clean-first");
        }

        // The right parallelism flag depends on the generator behind the
        // cache; fall back to the portable flag when it is not recognized.
        match self.cmake_generator(&name).await? {
            Some(generator) if generator.contains("Visual Studio") => {
                command = command.arg("--").arg(format!("/maxcpucount:{cpus}"));
            }
            Some(generator) if generator == "Unix Makefiles" => {
                command = command.arg("--").arg(format!("-j{cpus}"));
            }
            _ => {
                command = command.arg("--parallel").arg(cpus.to_string());
            }
        }

        self.runner.run(&command, self.layout.root()).await?;
        Ok(name)
    }

    /// Names of all configurations that have a configuration file, in
    /// directory order
    pub fn existing_configs(&self) -> PilotResult<Vec<String>> {
        let dir = self.layout.configuration_dir();
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }

        let mut configs = Vec::new();
        for entry in self.fs.list_dir(&dir)? {
            if let Some(name) = entry.strip_suffix(CONFIG_FILE_SUFFIX) {
                if self.fs.is_file(&dir.join(&entry)) {
                    configs.push(name.to_string());
                }
            }
        }
        Ok(configs)
    }

    fn first_config_with_cache(&self) -> PilotResult<Option<String>> {
        Ok(self
            .existing_configs()?
            .into_iter()
            .find(|name| self.has_cache_file(name)))
    }

    fn has_cache_file(&self, config_name: &str) -> bool {
        self.fs.is_file(&self.layout.cache_file(config_name))
    }

    fn config_file_exists(&self, config_name: &str) -> bool {
        self.fs.is_file(&self.layout.config_file(config_name))
    }

    /// Resolve the configuration to operate on: a given name (running the
    /// configure step when its file is missing) or the first existing one
    async fn resolve_config(&mut self, name: Option<&str>) -> PilotResult<String> {
        match name {
            Some(name) => {
                if !self.config_file_exists(name) {
                    self.configure(ConfigureOptions {
                        name: Some(name.to_string()),
                        ..ConfigureOptions::default()
                    })
                    .await
                    .map_err(|_| PilotError::ConfigurationNotFound(name.to_string()))?;
                }
                Ok(name.to_string())
            }
            None => self
                .existing_configs()?
                .into_iter()
                .next()
                .ok_or(PilotError::NoConfigurations),
        }
    }

    /// Introspect the generator of a configuration from its cache variables
    async fn cmake_generator(&self, config_name: &str) -> PilotResult<Option<String>> {
        let command = CommandLine::new("cmake", Vec::new())
            .arg("-L")
            .arg("-N")
            .arg(self.layout.build_dir(config_name).display().to_string());

        let outputs = self
            .runner
            .capture_all(std::slice::from_ref(&command), self.layout.root())
            .await?;

        for output in &outputs {
            for line in output.stdout.lines() {
                if let Some(generator) = line.strip_prefix(GENERATOR_KEY) {
                    return Ok(Some(generator.to_string()));
                }
            }
        }
        Ok(None)
    }

    fn effective_cpus(&self, requested: Option<usize>) -> usize {
        if let Some(cpus) = requested {
            return cpus;
        }
        if self.config.build.default_cpus > 0 {
            return self.config.build.default_cpus;
        }
        self.runner.cpu_count()
    }

    /// Reject projects whose copied scripts were written by an incompatible
    /// major version of the tool
    fn check_version_stamp(&self) -> PilotResult<()> {
        let stamp_file = self.layout.version_stamp_file();
        if !self.fs.is_file(&stamp_file) {
            return Ok(());
        }

        let stamped_raw = self.fs.read_file(&stamp_file)?;
        let stamped =
            Version::parse(stamped_raw.trim()).map_err(|e| PilotError::StampInvalid {
                value: stamped_raw.trim().to_string(),
                reason: e.to_string(),
            })?;
        let current = Version::parse(env!("CARGO_PKG_VERSION")).map_err(|e| {
            PilotError::StampInvalid {
                value: env!("CARGO_PKG_VERSION").to_string(),
                reason: e.to_string(),
            }
        })?;

        if stamped.major != current.major {
            return Err(PilotError::StampIncompatible {
                stamped: stamped.to_string(),
                current: current.to_string(),
            });
        }
        Ok(())
    }
}
