use rayon::prelude::*;

use crate::assets::decode;
use crate::engine::composite::CompositeEngine;
use crate::foundation::core::TemplateRef;
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::template::descriptor::TemplateDescriptor;

/// Outcome of one template within a batch.
///
/// Results are correlated by [`TemplateRef`]; output order is not part of
/// the batch contract.
#[derive(Debug)]
pub struct CompositeResult {
    /// Identity of the template this result belongs to.
    pub template_ref: TemplateRef,
    /// PNG bytes on success, the isolated per-job failure otherwise.
    pub result: Result<Vec<u8>, FramefitError>,
}

impl CompositeResult {
    /// Whether the composite for this template succeeded.
    pub fn success(&self) -> bool {
        self.result.is_ok()
    }

    /// Machine-readable error code when the job failed.
    pub fn error_code(&self) -> Option<&'static str> {
        self.result.as_ref().err().map(FramefitError::code)
    }
}

impl CompositeEngine {
    /// Composite one artwork into every template, tolerating per-template
    /// failures.
    ///
    /// The artwork is decoded exactly once; undecodable artwork fails the
    /// whole batch before any job is dispatched, since it is a precondition
    /// shared by every job. Jobs fan out on the engine's bounded worker
    /// pool, each owning its buffers end-to-end; one template's failure
    /// never cancels or affects its siblings. Results are merged after the
    /// join, so no accumulator is written from worker threads.
    #[tracing::instrument(skip_all, fields(templates = templates.len()))]
    pub fn composite_batch(
        &self,
        artwork_bytes: &[u8],
        templates: &[TemplateDescriptor],
    ) -> FramefitResult<Vec<CompositeResult>> {
        let artwork = decode::decode_artwork(artwork_bytes)?;

        let results = self.pool.install(|| {
            templates
                .par_iter()
                .map(|template| {
                    let result = self.composite_prepared(&artwork, template);
                    if let Err(err) = &result {
                        tracing::debug!(
                            template = %template.template_ref(),
                            code = err.code(),
                            "template composite failed"
                        );
                    }
                    CompositeResult {
                        template_ref: template.template_ref(),
                        result,
                    }
                })
                .collect::<Vec<_>>()
        });

        Ok(results)
    }
}

/// Build the bounded worker pool used for batch fan-out.
pub(super) fn build_worker_pool(workers: usize) -> FramefitResult<rayon::ThreadPool> {
    if workers == 0 {
        return Err(anyhow::anyhow!("engine workers must be >= 1").into());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build worker thread pool: {e}").into())
}
