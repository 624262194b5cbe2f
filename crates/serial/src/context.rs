//! Per-operation serialization policy.

use serde::{Deserialize, Serialize};

/// What happens to scratch buffers once a top-level operation finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourcePolicy {
    /// Free scratch buffers after every operation.
    #[default]
    AlwaysRelease,
    /// Keep scratch buffer capacity for the next operation.
    Retain,
}

/// Immutable policy flags threaded through every serialize and deserialize
/// call.
///
/// A context is created once per top-level operation and passed by
/// reference; nothing reads it from global state.
///
/// ```
/// use serial::{ResourcePolicy, SerializationContext};
///
/// let ctx: SerializationContext =
///     serde_json::from_str(r#"{ "resource_policy": "retain" }"#).unwrap();
/// assert_eq!(ctx.resource_policy(), ResourcePolicy::Retain);
/// assert!(!ctx.is_debug());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializationContext {
    resource_policy: ResourcePolicy,
    debug: bool,
}

impl SerializationContext {
    /// Releases scratch buffers after every operation.
    pub const ALWAYS_RELEASE: SerializationContext = SerializationContext {
        resource_policy: ResourcePolicy::AlwaysRelease,
        debug: false,
    };

    /// Retains scratch buffers between operations.
    pub const RETAIN: SerializationContext = SerializationContext {
        resource_policy: ResourcePolicy::Retain,
        debug: false,
    };

    pub const fn new(resource_policy: ResourcePolicy) -> Self {
        Self {
            resource_policy,
            debug: false,
        }
    }

    /// Returns a copy that logs a dump of the input when decoding fails.
    pub const fn with_debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }

    pub const fn resource_policy(&self) -> ResourcePolicy {
        self.resource_policy
    }

    pub const fn is_debug(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_always_release() {
        assert_eq!(
            SerializationContext::default(),
            SerializationContext::ALWAYS_RELEASE
        );
    }

    #[test]
    fn with_debug_keeps_policy() {
        let ctx = SerializationContext::RETAIN.with_debug(true);
        assert_eq!(ctx.resource_policy(), ResourcePolicy::Retain);
        assert!(ctx.is_debug());
    }

    #[test]
    fn loads_from_config() {
        let ctx: SerializationContext =
            serde_json::from_str(r#"{ "resource_policy": "always_release", "debug": true }"#)
                .unwrap();
        assert_eq!(ctx.resource_policy(), ResourcePolicy::AlwaysRelease);
        assert!(ctx.is_debug());

        let ctx: SerializationContext = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx, SerializationContext::ALWAYS_RELEASE);
    }

    #[test]
    fn rejects_unknown_policy() {
        let result =
            serde_json::from_str::<SerializationContext>(r#"{ "resource_policy": "pool" }"#);
        assert!(result.is_err());
    }
}
