//! Build-lifecycle listeners
//!
//! The host invokes [`on_build_queued`] when a build is about to be
//! enqueued with its resolved parameter values, and [`on_build_completed`]
//! once when the build reaches a terminal state. Both walk the build's
//! string values, match them to choice parameter definitions by name, and
//! forward them to the provider's edit tracking. Neither can veto or fail
//! the build: recording an edited value is best-effort by design.

use crate::{ChoiceParameter, ParameterValue};
use choiceparam_core::{BuildStatus, Result};
use choiceparam_providers::ResolveContext;
use tracing::warn;

/// Persistence seam for job configurations.
///
/// When edit tracking mutates a provider that lives inside a job
/// configuration, the listeners ask the host to save that job through this
/// trait. Failures are logged and swallowed; losing one recorded value
/// must not fail the build.
pub trait JobConfigStore {
    /// Persist the configuration of the named job.
    fn persist(&self, job_name: &str) -> Result<()>;
}

/// A [`JobConfigStore`] for hosts that keep job configurations in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullJobConfigStore;

impl JobConfigStore for NullJobConfigStore {
    fn persist(&self, _job_name: &str) -> Result<()> {
        Ok(())
    }
}

/// Notify choice parameters that a build was enqueued.
///
/// Always lets the build proceed; this listener only watches.
pub fn on_build_queued(
    job_name: &str,
    parameters: &mut [ChoiceParameter],
    values: &[ParameterValue],
    ctx: &ResolveContext<'_>,
    jobs: &dyn JobConfigStore,
) {
    notify(job_name, parameters, values, ctx, jobs, |parameter, value, ctx| {
        parameter.provider.on_build_queued(value, ctx)
    });
}

/// Notify choice parameters that a build completed with `status`.
pub fn on_build_completed(
    job_name: &str,
    parameters: &mut [ChoiceParameter],
    values: &[ParameterValue],
    status: BuildStatus,
    ctx: &ResolveContext<'_>,
    jobs: &dyn JobConfigStore,
) {
    notify(job_name, parameters, values, ctx, jobs, |parameter, value, ctx| {
        parameter.provider.on_build_completed(value, status, ctx)
    });
}

fn notify(
    job_name: &str,
    parameters: &mut [ChoiceParameter],
    values: &[ParameterValue],
    ctx: &ResolveContext<'_>,
    jobs: &dyn JobConfigStore,
    mut forward: impl FnMut(&mut ChoiceParameter, &str, &ResolveContext<'_>) -> bool,
) {
    let ctx = ctx.for_job(job_name);
    let mut dirty = false;
    for value in values {
        let Some(parameter) = parameters.iter_mut().find(|p| p.name == value.name) else {
            continue;
        };
        if forward(parameter, &value.value, &ctx) {
            dirty = true;
        }
    }
    if dirty
        && let Err(e) = jobs.persist(job_name)
    {
        warn!(job = %job_name, error = %e, "Failed to save job configuration after recording an edited value");
    }
}
