//! Count-driven fixed-point iteration of a single rule.
//!
//! A rule is applied until applying it no longer increases the number of facts it targets. Rules
//! only ever insert, so comparing counts before and after an application is enough to detect the
//! fixed point without diffing result sets.

use crate::config::InferenceConfig;
use crate::error::ClosureError;
use async_trait::async_trait;
use skigraph_common::{StoreError, TripleStoreGateway, Update};
use skigraph_rules::{Rule, RuleTemplate};
use tracing::{debug, info};

/// A rule that can be driven to its fixed point.
///
/// `apply_once` must never retract facts, hence `count_target_facts` must be non-decreasing
/// across applications.
#[async_trait]
pub trait MonotonicRule: Send + Sync {
    fn name(&self) -> String;

    async fn count_target_facts(&self) -> Result<u64, StoreError>;

    async fn apply_once(&self) -> Result<(), StoreError>;
}

/// A [`Rule`] bound to the gateway it is applied through.
pub struct GatewayRule<'a, G: ?Sized> {
    gateway: &'a G,
    rule: Rule,
    template: RuleTemplate,
    update: Update,
}

impl<'a, G: TripleStoreGateway + ?Sized> GatewayRule<'a, G> {
    pub fn new(gateway: &'a G, rule: Rule) -> Self {
        let template = rule.template();
        let update = template.to_update();
        Self {
            gateway,
            rule,
            template,
            update,
        }
    }
}

#[async_trait]
impl<'a, G: TripleStoreGateway + ?Sized> MonotonicRule for GatewayRule<'a, G> {
    fn name(&self) -> String {
        self.rule.to_string()
    }

    async fn count_target_facts(&self) -> Result<u64, StoreError> {
        self.gateway
            .count_matches(self.template.count_query())
            .await
    }

    async fn apply_once(&self) -> Result<(), StoreError> {
        self.gateway.apply_rule(&self.update).await
    }
}

/// What happened while closing a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureStats {
    pub rule: String,
    /// How many times the rule was applied, including the last, unproductive, application.
    pub applications: usize,
    pub initial_facts: u64,
    pub final_facts: u64,
}

impl ClosureStats {
    /// Returns the number of target facts the rule added.
    pub fn derived(&self) -> u64 {
        self.final_facts.saturating_sub(self.initial_facts)
    }
}

/// Drives rules to their fixed point, giving up after a configured number of applications.
#[derive(Debug, Clone, Copy)]
pub struct FixpointRunner {
    max_iterations: usize,
}

impl FixpointRunner {
    /// A rule is always applied at least once, even with `max_iterations` set to zero.
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            max_iterations: config.max_iterations.max(1),
        }
    }

    /// Applies `rule` until its target count stops increasing.
    pub async fn run_to_fixed_point<R: MonotonicRule + ?Sized>(
        &self,
        rule: &R,
    ) -> Result<ClosureStats, ClosureError> {
        let name = rule.name();
        let initial_facts = rule.count_target_facts().await?;
        let mut previous = initial_facts;
        let mut applications = 0;
        while applications < self.max_iterations {
            rule.apply_once().await?;
            applications += 1;
            let current = rule.count_target_facts().await?;
            debug!(rule = %name, applications, previous, current, "Applied rule");
            if current <= previous {
                info!(rule = %name, applications, facts = current, "Reached fixed point");
                return Ok(ClosureStats {
                    rule: name,
                    applications,
                    initial_facts,
                    final_facts: current,
                });
            }
            previous = current;
        }
        Err(ClosureError::NotReached {
            rule: name,
            iterations: applications,
        })
    }

    /// Applies `rule` exactly once, for rules whose pattern cannot produce anything on a second
    /// application.
    pub async fn apply_once<R: MonotonicRule + ?Sized>(
        &self,
        rule: &R,
    ) -> Result<ClosureStats, ClosureError> {
        let name = rule.name();
        let initial_facts = rule.count_target_facts().await?;
        rule.apply_once().await?;
        let final_facts = rule.count_target_facts().await?;
        debug!(rule = %name, initial_facts, final_facts, "Applied one-shot rule");
        Ok(ClosureStats {
            rule: name,
            applications: 1,
            initial_facts,
            final_facts,
        })
    }
}
