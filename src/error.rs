//! Error types used by the taskforge runtime and its components.
//!
//! A single [`Error`] enum covers the whole taxonomy:
//!
//! - **Wiring errors**: [`Error::Unsatisfied`], [`Error::Ambiguous`],
//!   [`Error::DuplicateRegistration`], [`Error::InvalidDependency`],
//!   [`Error::DependencyCycle`], [`Error::NotInterceptable`]. These describe a static
//!   mistake in the registration table and are never retried.
//! - **Business errors**: [`Error::Validation`], raised by decorators before the
//!   delegate is reached. The only caller-recoverable variant.
//! - **Lifecycle errors**: [`Error::RuntimeClosed`], [`Error::Destruction`].
//! - **Component errors**: [`Error::Component`], [`Error::Interception`].
//!
//! The type is `Clone`: interceptors observe a copy of a failure while the chain
//! hands the original value back to the caller.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// # Errors produced by the runtime and by managed components.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No enabled descriptor matches the requested capability and qualifiers.
    #[error("unsatisfied resolution: no enabled component provides {capability} with {qualifiers}")]
    Unsatisfied {
        /// Capability type name.
        capability: String,
        /// Requested qualifier set, rendered.
        qualifiers: String,
    },

    /// Several equally-ranked candidates survived disambiguation.
    #[error("ambiguous resolution for {capability} with {qualifiers}: candidates {candidates:?}")]
    Ambiguous {
        /// Capability type name.
        capability: String,
        /// Requested qualifier set, rendered.
        qualifiers: String,
        /// Names of the surviving candidates, in registration order.
        candidates: Vec<String>,
    },

    /// A conflicting descriptor was registered twice.
    #[error("duplicate registration of '{component}': conflicts with '{existing}'")]
    DuplicateRegistration {
        /// Name of the rejected descriptor.
        component: String,
        /// Name of the descriptor already present.
        existing: String,
    },

    /// A declared dependency does not resolve to exactly one component.
    #[error("component '{component}' depends on {dependency}: {source}")]
    InvalidDependency {
        /// Component declaring the dependency.
        component: String,
        /// Rendered dependency (capability and qualifiers).
        dependency: String,
        /// Resolution failure for the dependency.
        source: Box<Error>,
    },

    /// Declared dependencies form a cycle.
    #[error("dependency cycle: {}", .path.join(" -> "))]
    DependencyCycle {
        /// Component names along the cycle; first and last are equal.
        path: Vec<String>,
    },

    /// Interceptor bindings were declared on a capability that cannot be woven.
    #[error("capability {capability} declares interceptor bindings but does not support interception")]
    NotInterceptable {
        /// Capability type name.
        capability: String,
    },

    /// Business-rule rejection raised before the delegate was invoked.
    #[error("validation failed: {message}")]
    Validation {
        /// Human-readable reason.
        message: String,
    },

    /// The runtime has been shut down.
    #[error("runtime closed")]
    RuntimeClosed,

    /// One or more singletons failed to run their destroy hook.
    #[error("destruction failed for {} component(s): {failures:?}", .failures.len())]
    Destruction {
        /// `component: reason` entries.
        failures: Vec<String>,
    },

    /// The interceptor chain did not reach its target exactly once.
    #[error("interception of {component}.{method} broken: {reason}")]
    Interception {
        /// Component whose method was intercepted.
        component: String,
        /// Method name.
        method: String,
        /// What went wrong.
        reason: String,
    },

    /// Failure reported by a managed component or observer.
    #[error("component '{component}' failed: {reason}")]
    Component {
        /// Component or observer name.
        component: String,
        /// Failure description.
        reason: String,
    },
}

impl Error {
    /// Shorthand for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::Component`].
    pub fn component(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Component {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use taskforge::Error;
    ///
    /// assert_eq!(Error::RuntimeClosed.as_label(), "runtime_closed");
    /// assert_eq!(Error::validation("empty").as_label(), "validation_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            Error::Unsatisfied { .. } => "resolution_unsatisfied",
            Error::Ambiguous { .. } => "resolution_ambiguous",
            Error::DuplicateRegistration { .. } => "registration_duplicate",
            Error::InvalidDependency { .. } => "dependency_invalid",
            Error::DependencyCycle { .. } => "dependency_cycle",
            Error::NotInterceptable { .. } => "capability_not_interceptable",
            Error::Validation { .. } => "validation_failed",
            Error::RuntimeClosed => "runtime_closed",
            Error::Destruction { .. } => "destruction_failed",
            Error::Interception { .. } => "interception_broken",
            Error::Component { .. } => "component_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            Error::Validation { message } => message.clone(),
            Error::Component { component, reason } => format!("{component}: {reason}"),
            other => other.to_string(),
        }
    }

    /// Indicates whether the caller can recover by changing its input.
    ///
    /// Only [`Error::Validation`] qualifies: the delegate was never invoked, so no
    /// partial state exists. Wiring and lifecycle errors are static mistakes.
    ///
    /// # Example
    /// ```
    /// use taskforge::Error;
    ///
    /// assert!(Error::validation("title too long").is_recoverable());
    /// assert!(!Error::RuntimeClosed.is_recoverable());
    /// ```
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
