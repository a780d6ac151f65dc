//! Declarative bundle configuration and build orchestration.
//!
//! The JavaScript bundler itself is an external collaborator. This module
//! holds the typed description of one bundle invocation: it renders the
//! tool's native configuration from the declarative rule set, stages the
//! build-invariant artifacts into the output directory, and runs the tool.
//! A failed build leaves no output artifacts behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::info;

use crate::{Error, Result};

/// Transform rule applied by the external bundler.
///
/// A static declaration: which files the rule tests, which directories are
/// excluded, and the loader with its presets. No conditional logic.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformRule {
    /// File extension the rule applies to.
    pub test: String,
    /// Directories excluded from the transform.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Loader applying the transform.
    pub loader: String,
    /// Presets handed to the loader.
    #[serde(default)]
    pub presets: Vec<String>,
}

/// Declarative description of one bundle invocation.
///
/// Loaded from `bundle.toml` when present; the compiled-in defaults mirror
/// the standard layout (entry `web/index.js`, output `dist/app.bundle.js`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Entry module the dependency graph traversal starts from.
    pub entry: PathBuf,
    /// Output directory receiving the artifact set.
    pub out_dir: PathBuf,
    /// File name of the combined script artifact.
    pub bundle_name: String,
    /// Shell document copied into the output directory.
    pub shell: PathBuf,
    /// Directory of static assets copied through unmodified, if present.
    pub static_dir: PathBuf,
    /// External bundler invocation, program first.
    pub command: Vec<String>,
    /// Where the rendered bundler configuration is written.
    pub config_out: PathBuf,
    /// Transform rules.
    pub rules: Vec<TransformRule>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("web/index.js"),
            out_dir: PathBuf::from("dist"),
            bundle_name: "app.bundle.js".to_string(),
            shell: PathBuf::from("web/app.html"),
            static_dir: PathBuf::from("web/static"),
            command: vec!["npx".to_string(), "webpack".to_string()],
            config_out: PathBuf::from("webpack.config.js"),
            rules: vec![TransformRule {
                test: "js".to_string(),
                exclude: vec!["node_modules".to_string()],
                loader: "babel-loader".to_string(),
                presets: vec!["react".to_string(), "env".to_string()],
            }],
        }
    }
}

impl BundleConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist. A file that exists but fails to parse is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Path of the combined script artifact.
    pub fn bundle_path(&self) -> PathBuf {
        self.out_dir.join(&self.bundle_name)
    }

    /// Render the external bundler's native configuration file.
    pub fn render_config(&self) -> String {
        let mut out = String::new();
        out.push_str("const path = require('path');\n\n");
        out.push_str("module.exports = {\n");
        out.push_str(&format!(
            "    entry: path.resolve(__dirname, '{}'),\n",
            self.entry.display()
        ));
        out.push_str("    output: {\n");
        out.push_str(&format!(
            "        path: path.resolve(__dirname, '{}'),\n",
            self.out_dir.display()
        ));
        out.push_str(&format!("        filename: '{}',\n", self.bundle_name));
        out.push_str("    },\n");
        out.push_str("    module: {\n");
        out.push_str("        rules: [\n");

        for rule in &self.rules {
            let exclude = rule
                .exclude
                .iter()
                .map(|dir| format!("/{}/", dir))
                .collect::<Vec<_>>()
                .join(", ");
            let presets = rule
                .presets
                .iter()
                .map(|preset| format!("'{}'", preset))
                .collect::<Vec<_>>()
                .join(", ");

            out.push_str("            {\n");
            out.push_str(&format!("                test: /\\.{}$/,\n", rule.test));
            out.push_str(&format!("                exclude: [{}],\n", exclude));
            out.push_str("                use: [{\n");
            out.push_str(&format!("                    loader: '{}',\n", rule.loader));
            out.push_str(&format!(
                "                    options: {{ presets: [{}] }},\n",
                presets
            ));
            out.push_str("                }],\n");
            out.push_str("            },\n");
        }

        out.push_str("        ],\n");
        out.push_str("    },\n");
        out.push_str("};\n");
        out
    }

    /// Create the output directory and copy the build-invariant artifacts
    /// into it: the shell document and anything under the static directory.
    pub fn stage(&self) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let shell_name = self
            .shell
            .file_name()
            .ok_or_else(|| Error::Bundle(format!("shell path {} has no file name", self.shell.display())))?;
        fs::copy(&self.shell, self.out_dir.join(shell_name))?;

        if self.static_dir.is_dir() {
            copy_tree(&self.static_dir, &self.out_dir)?;
        }

        Ok(())
    }

    /// Run the full bundle step: stage artifacts, write the rendered
    /// configuration, invoke the external tool, and verify the bundle
    /// artifact exists. On failure the output directory is removed and a
    /// diagnostic is returned.
    pub fn run(&self) -> Result<()> {
        if !self.entry.is_file() {
            return Err(Error::Bundle(format!(
                "entry module {} not found",
                self.entry.display()
            )));
        }

        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| Error::Bundle("bundler command is empty".to_string()))?;

        self.stage()?;
        fs::write(&self.config_out, self.render_config())?;

        info!(command = %self.command.join(" "), "running bundler");
        let status = Command::new(program)
            .args(args)
            .arg("--config")
            .arg(&self.config_out)
            .status();

        let diagnostic = match status {
            Ok(status) if status.success() => {
                if self.bundle_path().is_file() {
                    None
                } else {
                    Some(format!("bundler produced no {}", self.bundle_name))
                }
            }
            Ok(status) => Some(format!("bundler exited with {}", status)),
            Err(err) => Some(format!("failed to run {}: {}", program, err)),
        };

        if let Some(diagnostic) = diagnostic {
            let _ = fs::remove_dir_all(&self.out_dir);
            return Err(Error::Bundle(diagnostic));
        }

        info!(bundle = %self.bundle_path().display(), "bundle complete");
        Ok(())
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            fs::create_dir_all(&target)?;
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
