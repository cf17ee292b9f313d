//! Choices computed by a script

use crate::ResolveContext;
use choiceparam_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ceiling on script operations before evaluation is aborted.
const MAX_OPERATIONS: u64 = 1_000_000;
/// Ceiling on nested call levels.
const MAX_CALL_LEVELS: usize = 32;

/// A provider whose choices are the result of evaluating a script.
///
/// Scripts run on a fresh, operation-limited engine with no filesystem or
/// process access. The script must produce an array; each element is
/// converted to its string form (unit elements are skipped). During value
/// resolution every failure is absorbed into an empty list; the
/// configuration-time test endpoint surfaces the same failures
/// synchronously instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptChoiceProvider {
    /// The script body
    pub script: String,
    /// Bind `root` and `job` into the script scope
    #[serde(default)]
    pub use_context_bindings: bool,
    /// The initially selected value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_choice: Option<String>,
}

impl ScriptChoiceProvider {
    /// Create a provider evaluating the given script.
    #[must_use]
    pub fn new(
        script: impl Into<String>,
        use_context_bindings: bool,
        default_choice: Option<String>,
    ) -> Self {
        Self {
            script: script.into(),
            use_context_bindings,
            default_choice,
        }
    }

    /// The current choice list.
    ///
    /// A script that produces no list (a unit result) yields an empty list;
    /// so does any evaluation error, with a warning logged.
    #[must_use]
    pub fn choice_list(&self, ctx: &ResolveContext<'_>) -> Vec<String> {
        match self.evaluate(ctx) {
            Ok(Some(choices)) => choices,
            Ok(None) => {
                debug!("Choice script returned no list");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to evaluate choice script");
                Vec::new()
            }
        }
    }

    /// Evaluate the script and return its choices.
    ///
    /// `Ok(None)` means the script deliberately produced nothing (a unit
    /// result). Used directly by the configuration-time test endpoint,
    /// which reports failures instead of swallowing them.
    pub fn evaluate(&self, ctx: &ResolveContext<'_>) -> Result<Option<Vec<String>>> {
        let engine = sandbox_engine();
        let mut scope = rhai::Scope::new();
        if self.use_context_bindings {
            scope.push("root", ctx.root_dir.to_string_lossy().into_owned());
            scope.push_dynamic(
                "job",
                ctx.job
                    .map_or(rhai::Dynamic::UNIT, |job| rhai::Dynamic::from(job.to_string())),
            );
        }

        let out: rhai::Dynamic = engine
            .eval_with_scope(&mut scope, &self.script)
            .map_err(|e| Error::script(e.to_string()))?;

        if out.is::<()>() {
            return Ok(None);
        }
        let Some(array) = out.try_cast::<rhai::Array>() else {
            return Err(Error::script("script must return an array of choices"));
        };
        Ok(Some(
            array
                .into_iter()
                .filter(|element| !element.is::<()>())
                .map(|element| element.to_string())
                .collect(),
        ))
    }
}

/// A fresh engine with evaluation limits applied.
fn sandbox_engine() -> rhai::Engine {
    let mut engine = rhai::Engine::new();
    engine.set_max_operations(MAX_OPERATIONS);
    engine.set_max_call_levels(MAX_CALL_LEVELS);
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderSettings;
    use choiceparam_store::ChoiceListStore;
    use std::path::Path;

    fn ctx_parts() -> (ChoiceListStore, ProviderSettings) {
        (ChoiceListStore::in_memory(), ProviderSettings::default())
    }

    #[test]
    fn array_result_becomes_the_choice_list() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new(r#"["a", "b", "c"]"#, false, None);
        assert_eq!(p.choice_list(&ctx), vec!["a", "b", "c"]);
    }

    #[test]
    fn non_string_elements_are_stringified() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new("[1, 2, true]", false, None);
        assert_eq!(p.choice_list(&ctx), vec!["1", "2", "true"]);
    }

    #[test]
    fn unit_elements_are_skipped() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new(r#"["a", (), "b"]"#, false, None);
        assert_eq!(p.choice_list(&ctx), vec!["a", "b"]);
    }

    #[test]
    fn unit_result_is_an_empty_list_not_an_error() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new("()", false, None);
        assert!(p.choice_list(&ctx).is_empty());
        assert_eq!(p.evaluate(&ctx).unwrap(), None);
    }

    #[test]
    fn evaluation_errors_degrade_to_empty() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new("this is not a script", false, None);
        assert!(p.choice_list(&ctx).is_empty());
        assert!(p.evaluate(&ctx).is_err());
    }

    #[test]
    fn non_array_result_degrades_to_empty() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new(r#""just a string""#, false, None);
        assert!(p.choice_list(&ctx).is_empty());
        assert!(p.evaluate(&ctx).is_err());
    }

    #[test]
    fn context_bindings_expose_root_and_job() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/srv/ci"), &store, &settings).for_job("nightly");
        let p = ScriptChoiceProvider::new("[root, job]", true, None);
        assert_eq!(p.choice_list(&ctx), vec!["/srv/ci", "nightly"]);
    }

    #[test]
    fn job_binding_is_unit_outside_a_job() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/srv/ci"), &store, &settings);
        let p = ScriptChoiceProvider::new(
            r#"if job == () { ["no job"] } else { [job] }"#,
            true,
            None,
        );
        assert_eq!(p.choice_list(&ctx), vec!["no job"]);
    }

    #[test]
    fn bindings_absent_when_not_requested() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/srv/ci"), &store, &settings);
        let p = ScriptChoiceProvider::new("[root]", false, None);
        // `root` is not in scope, so evaluation fails and the list is empty.
        assert!(p.choice_list(&ctx).is_empty());
    }

    #[test]
    fn runaway_scripts_are_cut_off() {
        let (store, settings) = ctx_parts();
        let ctx = ResolveContext::new(Path::new("/"), &store, &settings);
        let p = ScriptChoiceProvider::new("loop { }", false, None);
        assert!(p.evaluate(&ctx).is_err());
    }
}
