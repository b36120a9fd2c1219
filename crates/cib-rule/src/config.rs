//! Parser configuration
//!
//! Callers restrict the rule language to what makes sense where the rule is
//! used: resource defaults only understand resource expressions, operation
//! defaults understand both resource and operation expressions.

use serde::{Deserialize, Serialize};

/// Which leaf expressions a rule may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParserConfig {
    /// Allow `resource standard:provider:type`
    pub allow_rsc_expr: bool,
    /// Allow `op name [interval=value]`
    pub allow_op_expr: bool,
}

impl RuleParserConfig {
    pub fn new(allow_rsc_expr: bool, allow_op_expr: bool) -> Self {
        Self { allow_rsc_expr, allow_op_expr }
    }

    /// Rules scoping resource defaults
    pub fn resource_defaults() -> Self {
        Self::new(true, false)
    }

    /// Rules scoping resource operation defaults
    pub fn operation_defaults() -> Self {
        Self::new(true, true)
    }

    /// Every leaf expression the parser knows
    pub fn all() -> Self {
        Self::new(true, true)
    }

    /// Index of the grammar cache slot for this configuration (0..4)
    pub fn cache_slot(&self) -> usize {
        usize::from(self.allow_rsc_expr) | (usize::from(self.allow_op_expr) << 1)
    }
}
