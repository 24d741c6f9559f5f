//! Operator capability passed into every mutating page operation.

/// Proof that the caller is an authenticated operator
///
/// The authentication layer builds one of these after validating the
/// session; the page core never reads session state itself. Carries audit
/// information that is written onto revisions and log lines.
///
/// ```
/// use mosaic_pages::OperatorContext;
///
/// let ctx = OperatorContext::authenticated("ada").with_correlation_id("req-42");
/// assert_eq!(ctx.actor(), "ada");
/// assert_eq!(ctx.correlation_id(), Some("req-42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContext {
    actor: String,
    correlation_id: Option<String>,
}

impl OperatorContext {
    pub fn authenticated(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            correlation_id: None,
        }
    }

    /// Correlates this operation with a request id in logs
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}
