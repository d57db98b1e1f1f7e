//! Output path variables
//!
//! Templates reference values with `{name}` tokens. Expansion is a fixed,
//! ordered list of `(token, resolver)` pairs applied with plain substring
//! replacement rather than format-string parsing, so a template can never make
//! expansion fail:
//!
//! - tokens outside the vocabulary pass through untouched
//! - a token whose value is unavailable (no render time yet, no serial
//!   supplied, no batch running) also passes through untouched
//! - aliases such as `{year}` are rewritten to their canonical token right
//!   before the canonical token is substituted
//!
//! The token spellings are part of the user-facing contract; templates saved
//! in project files depend on them verbatim.
//!
//! ```rust,no_run
//! use autosave_render::scene::SceneSnapshot;
//! use autosave_render::variables::{ResolveOptions, VariableResolver};
//!
//! let scene = SceneSnapshot::default();
//! let resolver = VariableResolver::new(&scene);
//! let path = resolver.resolve("{project}-{serial}-{camera}", ResolveOptions::new().with_serial(7));
//! ```

mod context;
mod resolver;

pub use context::{ResolutionContext, ResolveOptions};
pub use resolver::VariableResolver;

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use strsim::levenshtein;
use tracing::trace;

use crate::constants::{FRAME_WIDTH, NONE_VALUE};
use crate::render::{format_duration, format_rtime};
use crate::serial::format_serial;

/// Maximum Levenshtein distance, as a percentage of the token length, for a
/// known token to be suggested as a fix for an unknown one.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("token pattern is valid"));

/// Category a variable is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VariableGroup {
    Project,
    Rendering,
    System,
    Identifiers,
}

impl VariableGroup {
    pub const ALL: [VariableGroup; 4] = [
        VariableGroup::Project,
        VariableGroup::Rendering,
        VariableGroup::System,
        VariableGroup::Identifiers,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            VariableGroup::Project => "Project",
            VariableGroup::Rendering => "Rendering",
            VariableGroup::System => "System",
            VariableGroup::Identifiers => "Identifiers",
        }
    }
}

/// One entry of the substitution table.
#[derive(Clone, Copy)]
pub struct Variable {
    /// Canonical token including braces
    pub token: &'static str,
    /// Alternative spellings rewritten to `token` before substitution
    pub aliases: &'static [&'static str],
    pub group: VariableGroup,
    pub description: &'static str,
    /// Value for this context, `None` when unavailable
    pub resolve: fn(&ResolutionContext<'_>) -> Option<String>,
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variable")
            .field("token", &self.token)
            .field("aliases", &self.aliases)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

fn or_none(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| NONE_VALUE.to_string())
}

/// The substitution table, in application order.
pub static VARIABLES: &[Variable] = &[
    // Project
    Variable {
        token: "{project}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Project file name without extension",
        resolve: |ctx| Some(ctx.scene.project_name()),
    },
    Variable {
        token: "{scene}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Scene name",
        resolve: |ctx| Some(ctx.scene.scene.clone()),
    },
    Variable {
        token: "{collection}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Active collection",
        resolve: |ctx| Some(ctx.scene.collection.clone()),
    },
    Variable {
        token: "{camera}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Active camera",
        resolve: |ctx| Some(ctx.scene.camera.clone()),
    },
    Variable {
        token: "{item}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Active object, or None",
        resolve: |ctx| Some(or_none(ctx.scene.item.as_ref())),
    },
    Variable {
        token: "{material}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Active material of the active object, or None",
        resolve: |ctx| Some(or_none(ctx.scene.material.as_ref())),
    },
    Variable {
        token: "{node}",
        aliases: &[],
        group: VariableGroup::Project,
        description: "Node being rendered by a batch, or None",
        resolve: |ctx| Some(or_none(ctx.scene.node.as_ref())),
    },
    // Rendering
    Variable {
        token: "{renderengine}",
        aliases: &["{engine}"],
        group: VariableGroup::Rendering,
        description: "Render engine name",
        resolve: |ctx| Some(ctx.scene.engine.engine_name()),
    },
    Variable {
        token: "{device}",
        aliases: &[],
        group: VariableGroup::Rendering,
        description: "Render device (CPU or GPU)",
        resolve: |ctx| Some(ctx.scene.engine.device()),
    },
    Variable {
        token: "{samples}",
        aliases: &[],
        group: VariableGroup::Rendering,
        description: "Engine sample settings",
        resolve: |ctx| Some(ctx.scene.engine.samples()),
    },
    Variable {
        token: "{features}",
        aliases: &[],
        group: VariableGroup::Rendering,
        description: "Engine feature settings (bounces, effects)",
        resolve: |ctx| Some(ctx.scene.engine.features()),
    },
    Variable {
        token: "{duration}",
        aliases: &["{rendertime}"],
        group: VariableGroup::Rendering,
        description: "Render time in seconds (after rendering only)",
        resolve: |ctx| ctx.render_time.map(format_duration),
    },
    Variable {
        token: "{rtime}",
        aliases: &[],
        group: VariableGroup::Rendering,
        description: "Render time as H-MM-SS (after rendering only)",
        resolve: |ctx| ctx.render_time.map(format_rtime),
    },
    // System
    Variable {
        token: "{host}",
        aliases: &[],
        group: VariableGroup::System,
        description: "Computer name",
        resolve: |ctx| Some(ctx.host.clone()),
    },
    Variable {
        token: "{platform}",
        aliases: &[],
        group: VariableGroup::System,
        description: "Operating system and architecture",
        resolve: |ctx| Some(ctx.platform.clone()),
    },
    Variable {
        token: "{version}",
        aliases: &[],
        group: VariableGroup::System,
        description: "Host application version",
        resolve: |ctx| (!ctx.scene.app_version.is_empty()).then(|| ctx.scene.app_version.clone()),
    },
    // Identifiers
    Variable {
        token: "{date}",
        aliases: &[],
        group: VariableGroup::Identifiers,
        description: "Date as YYYY-MM-DD",
        resolve: |ctx| Some(ctx.now.format("%Y-%m-%d").to_string()),
    },
    Variable {
        token: "{y}",
        aliases: &["{year}"],
        group: VariableGroup::Identifiers,
        description: "Year",
        resolve: |ctx| Some(ctx.now.format("%Y").to_string()),
    },
    Variable {
        token: "{m}",
        aliases: &["{month}"],
        group: VariableGroup::Identifiers,
        description: "Month",
        resolve: |ctx| Some(ctx.now.format("%m").to_string()),
    },
    Variable {
        token: "{d}",
        aliases: &["{day}"],
        group: VariableGroup::Identifiers,
        description: "Day of month",
        resolve: |ctx| Some(ctx.now.format("%d").to_string()),
    },
    Variable {
        token: "{time}",
        aliases: &[],
        group: VariableGroup::Identifiers,
        description: "Time as HH-MM-SS",
        resolve: |ctx| Some(ctx.now.format("%H-%M-%S").to_string()),
    },
    Variable {
        token: "{H}",
        aliases: &["{hour}"],
        group: VariableGroup::Identifiers,
        description: "Hour",
        resolve: |ctx| Some(ctx.now.format("%H").to_string()),
    },
    Variable {
        token: "{M}",
        aliases: &["{minute}"],
        group: VariableGroup::Identifiers,
        description: "Minute",
        resolve: |ctx| Some(ctx.now.format("%M").to_string()),
    },
    Variable {
        token: "{S}",
        aliases: &["{second}"],
        group: VariableGroup::Identifiers,
        description: "Second",
        resolve: |ctx| Some(ctx.now.format("%S").to_string()),
    },
    Variable {
        token: "{serial}",
        aliases: &[],
        group: VariableGroup::Identifiers,
        description: "Serial number (must be supplied by the caller)",
        resolve: |ctx| ctx.serial.map(format_serial),
    },
    Variable {
        token: "{frame}",
        aliases: &[],
        group: VariableGroup::Identifiers,
        description: "Current frame, zero padded",
        resolve: |ctx| Some(format!("{:0width$}", ctx.scene.frame, width = FRAME_WIDTH)),
    },
    Variable {
        token: "{batch}",
        aliases: &[],
        group: VariableGroup::Identifiers,
        description: "Index within a batch render",
        resolve: |ctx| ctx.scene.batch_index.map(|index| index.to_string()),
    },
];

/// Expand every known token in `template` with values from `ctx`.
///
/// Total over all inputs: unknown or unavailable tokens are left as written.
#[must_use]
pub fn replace_variables(template: &str, ctx: &ResolutionContext<'_>) -> String {
    let mut output = template.to_string();

    for variable in VARIABLES {
        let mentioned = output.contains(variable.token)
            || variable.aliases.iter().any(|alias| output.contains(alias));
        if !mentioned {
            continue;
        }

        let Some(value) = (variable.resolve)(ctx) else {
            trace!("Leaving {} unresolved", variable.token);
            continue;
        };

        for alias in variable.aliases {
            output = output.replace(alias, variable.token);
        }
        output = output.replace(variable.token, &value);
    }

    output
}

/// Look up a variable by canonical token or alias (with braces).
#[must_use]
pub fn find_variable(token: &str) -> Option<&'static Variable> {
    VARIABLES.iter().find(|v| v.token == token || v.aliases.contains(&token))
}

/// Variables listed under `group`, in table order.
pub fn variables_in(group: VariableGroup) -> impl Iterator<Item = &'static Variable> {
    VARIABLES.iter().filter(move |v| v.group == group)
}

/// A `{token}` in a template that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    pub token: String,
    /// Closest known spellings, best first
    pub suggestions: Vec<String>,
}

/// List the tokens in `template` that expansion would leave untouched because
/// they are not in the vocabulary, each with up to three suggestions.
#[must_use]
pub fn unknown_tokens(template: &str) -> Vec<UnknownToken> {
    let known: Vec<&'static str> = VARIABLES
        .iter()
        .flat_map(|v| std::iter::once(v.token).chain(v.aliases.iter().copied()))
        .collect();

    let mut seen = BTreeSet::new();
    let mut unknown = Vec::new();

    for capture in TOKEN_PATTERN.find_iter(template) {
        let token = capture.as_str();
        if known.contains(&token) || !seen.insert(token.to_string()) {
            continue;
        }
        unknown.push(UnknownToken {
            token: token.to_string(),
            suggestions: similar_tokens(token, &known),
        });
    }

    unknown
}

fn similar_tokens(target: &str, known: &[&'static str]) -> Vec<String> {
    let limit = target.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<_> = known
        .iter()
        .map(|candidate| (*candidate, levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= limit)
        .collect();

    scored.sort_by_key(|(_, distance)| *distance);
    scored.into_iter().take(3).map(|(candidate, _)| candidate.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EngineSettings;
    use crate::scene::SceneSnapshot;
    use chrono::{Local, TimeZone};

    fn scene() -> SceneSnapshot {
        SceneSnapshot {
            blend_file: Some("/projects/forest/forest.blend".into()),
            scene: "Scene".to_string(),
            collection: "Trees".to_string(),
            camera: "Cam.001".to_string(),
            item: Some("Oak".to_string()),
            material: None,
            frame: 42,
            app_version: "4.2.1-release".to_string(),
            host: Some("workstation".to_string()),
            engine: EngineSettings::Other {
                name: "OCTANE".to_string(),
            },
            ..SceneSnapshot::default()
        }
    }

    fn fixed_ctx(scene: &SceneSnapshot, options: ResolveOptions) -> ResolutionContext<'_> {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        ResolutionContext::at(scene, options, now)
    }

    #[test]
    fn test_project_variables() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        assert_eq!(
            replace_variables("{project}/{scene}/{collection}/{camera}/{item}/{material}/{node}", &ctx),
            "forest/Scene/Trees/Cam.001/Oak/None/None"
        );
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        for template in ["{nope}", "{Project}", "{ project }", "{", "}{", "", "plain/path"] {
            assert_eq!(replace_variables(template, &ctx), template);
        }
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        assert_eq!(replace_variables("{camera}-{camera}/{camera}", &ctx), "Cam.001-Cam.001/Cam.001");
    }

    #[test]
    fn test_date_time_components_and_aliases() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        assert_eq!(replace_variables("{date} {time}", &ctx), "2024-03-09 14-05-07");
        assert_eq!(replace_variables("{y}{m}{d}{H}{M}{S}", &ctx), "20240309140507");
        assert_eq!(
            replace_variables("{year}-{month}-{day}_{hour}{minute}{second}", &ctx),
            "2024-03-09_140507"
        );
    }

    #[test]
    fn test_render_time_only_when_supplied() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        assert_eq!(
            replace_variables("{duration}-{rtime}-{rendertime}", &ctx),
            "{duration}-{rtime}-{rendertime}"
        );

        let ctx = fixed_ctx(&scene, ResolveOptions::new().with_render_time(3725.5));
        assert_eq!(
            replace_variables("{duration}-{rtime}-{rendertime}", &ctx),
            "3725.5s-1-02-05-3725.5s"
        );
    }

    #[test]
    fn test_serial_only_when_supplied() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        assert_eq!(replace_variables("{project}-{serial}", &ctx), "forest-{serial}");

        let ctx = fixed_ctx(&scene, ResolveOptions::new().with_serial(7));
        assert_eq!(replace_variables("{project}-{serial}", &ctx), "forest-0007");
    }

    #[test]
    fn test_frame_batch_and_system() {
        let scene = scene();
        let ctx = fixed_ctx(&scene, ResolveOptions::new());
        assert_eq!(replace_variables("{frame}", &ctx), "0042");
        assert_eq!(replace_variables("{batch}", &ctx), "{batch}");
        assert_eq!(replace_variables("{host} {version}", &ctx), "workstation 4.2.1-release");
        assert_eq!(replace_variables("{renderengine} {engine} {device}", &ctx), "OCTANE OCTANE unknown");

        let batch = SceneSnapshot {
            batch_index: Some(3),
            ..scene.clone()
        };
        let ctx = fixed_ctx(&batch, ResolveOptions::new());
        assert_eq!(replace_variables("{batch}", &ctx), "3");
    }

    #[test]
    fn test_deterministic_at_fixed_instant() {
        let scene = scene();
        let options = ResolveOptions::new().with_serial(12).with_render_time(1.5);
        let template = "{project}/{date}/{time}-{serial}-{duration}-{frame}";
        let first = replace_variables(template, &fixed_ctx(&scene, options));
        let second = replace_variables(template, &fixed_ctx(&scene, options));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_tokens_with_suggestions() {
        let unknown = unknown_tokens("{projct}-{serial}-{camra}-{projct}-{zzzzzzzzzz}");
        assert_eq!(unknown.len(), 3);
        assert_eq!(unknown[0].token, "{projct}");
        assert_eq!(unknown[0].suggestions[0], "{project}");
        assert_eq!(unknown[1].suggestions[0], "{camera}");
        assert!(unknown[2].suggestions.is_empty());
    }

    #[test]
    fn test_unknown_tokens_accepts_aliases() {
        assert!(unknown_tokens("{year}{rendertime}{engine}").is_empty());
    }

    #[test]
    fn test_find_variable_by_alias() {
        assert_eq!(find_variable("{hour}").map(|v| v.token), Some("{H}"));
        assert!(find_variable("{nope}").is_none());
    }

    #[test]
    fn test_every_group_has_variables() {
        for group in VariableGroup::ALL {
            assert!(variables_in(group).count() > 0, "{} is empty", group.title());
        }
    }
}
