//! Expand and check templates, and list the variable vocabulary.
//!
//! ```bash
//! autosave-render expand "{project}-{serial}-{camera}" --scene scene.toml --serial 7
//! autosave-render check "{projcet}-{date}"
//! autosave-render variables
//! ```

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::{load_scene, parse_render_time};
use crate::variables::{
    ResolveOptions, VariableGroup, VariableResolver, unknown_tokens, variables_in,
};

/// Expand a template against a scene snapshot.
#[derive(Args)]
pub struct ExpandCommand {
    /// Template to expand, e.g. "//renders/{project}-{serial}"
    template: String,

    /// Scene snapshot (TOML or JSON); project variables are empty without one
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Serial number to substitute for {serial}
    #[arg(long)]
    serial: Option<u64>,

    /// Elapsed render time (seconds or H:MM:SS.cc) for {duration} and {rtime}
    #[arg(long)]
    render_time: Option<String>,
}

impl ExpandCommand {
    pub async fn execute(self) -> Result<()> {
        let scene = load_scene(self.scene.as_deref())?;

        let mut options = ResolveOptions::new();
        if let Some(serial) = self.serial {
            options = options.with_serial(serial);
        }
        if let Some(render_time) = self.render_time.as_deref() {
            options = options.with_render_time(parse_render_time(render_time)?);
        }

        let resolved = VariableResolver::new(&scene).resolve(&self.template, options);
        println!("{resolved}");
        Ok(())
    }
}

/// Report tokens that expansion would leave untouched.
#[derive(Args)]
pub struct CheckCommand {
    /// Template to check
    template: String,
}

impl CheckCommand {
    pub async fn execute(self) -> Result<()> {
        let unknown = unknown_tokens(&self.template);
        if unknown.is_empty() {
            println!("✅ All variables in '{}' are known", self.template);
            return Ok(());
        }

        for token in &unknown {
            println!("❌ Unknown variable {}", token.token.red());
            if !token.suggestions.is_empty() {
                println!("   Did you mean: {}", token.suggestions.join(", ").green());
            }
        }
        bail!("{} unknown variable(s) in template", unknown.len())
    }
}

/// Print every variable, grouped the way the host lists them.
#[derive(Args)]
pub struct VariablesCommand;

impl VariablesCommand {
    pub async fn execute(self) -> Result<()> {
        for group in VariableGroup::ALL {
            println!("{}", group.title().bold());
            for variable in variables_in(group) {
                let aliases = if variable.aliases.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", variable.aliases.join(", "))
                };
                let token = format!("{:<16}", variable.token);
                println!("  {} {}{}", token.cyan(), variable.description, aliases.dimmed());
            }
            println!();
        }
        Ok(())
    }
}
