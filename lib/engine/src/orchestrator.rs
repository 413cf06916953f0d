use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::fixpoint::{ClosureStats, FixpointRunner, GatewayRule};
use skigraph_common::TripleStoreGateway;
use skigraph_model::SegmentKind;
use skigraph_rules::Rule;
use std::fmt::{Display, Formatter};
use tracing::{info, warn};

/// A step of the inference.
///
/// The phases form two independent branches:
/// - [`Phase::SetupDifficulty`], then [`Phase::DurationClosure`] and [`Phase::DifficultyClosure`]
///   concurrently.
/// - [`Phase::BelongsToRouteClosure`], then [`Phase::BelongsToPlaceClosure`], then
///   [`Phase::BelongsToRestaurantClosure`], each reading the `belongsTo` facts of the one before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    SetupDifficulty,
    DurationClosure,
    DifficultyClosure,
    BelongsToRouteClosure,
    BelongsToPlaceClosure,
    BelongsToRestaurantClosure,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::SetupDifficulty => "difficulty setup",
            Phase::DurationClosure => "duration closure",
            Phase::DifficultyClosure => "difficulty closure",
            Phase::BelongsToRouteClosure => "route membership closure",
            Phase::BelongsToPlaceClosure => "place membership closure",
            Phase::BelongsToRestaurantClosure => "restaurant membership closure",
        })
    }
}

/// The rules applied during one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub closures: Vec<ClosureStats>,
}

impl PhaseReport {
    pub fn derived(&self) -> u64 {
        self.closures.iter().map(ClosureStats::derived).sum()
    }
}

/// The outcome of a complete inference run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceReport {
    pub phases: Vec<PhaseReport>,
}

impl InferenceReport {
    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|report| report.phase == phase)
    }

    /// Returns the number of facts derived by all phases together.
    pub fn derived(&self) -> u64 {
        self.phases.iter().map(PhaseReport::derived).sum()
    }
}

/// Sequences the rules of the inference over a gateway.
pub struct Orchestrator<'a, G: ?Sized> {
    gateway: &'a G,
    runner: FixpointRunner,
}

impl<'a, G: TripleStoreGateway + ?Sized> Orchestrator<'a, G> {
    pub fn new(gateway: &'a G, config: InferenceConfig) -> Self {
        Self {
            gateway,
            runner: FixpointRunner::new(&config),
        }
    }

    /// Runs every phase and returns once all of them are finished.
    ///
    /// The two branches run concurrently and are both driven to their own end. If a branch
    /// failed, its error is returned once the other branch has stopped as well; the route metrics
    /// error wins when both failed.
    pub async fn run(&self) -> Result<InferenceReport, InferenceError> {
        let (metrics, membership) =
            futures::join!(self.infer_route_metrics(), self.infer_membership());
        let mut phases = metrics?;
        phases.extend(membership?);
        let report = InferenceReport { phases };
        info!(derived = report.derived(), "Inference completed");
        Ok(report)
    }

    /// Sets up the segment difficulties, then closes duration and difficulty concurrently.
    pub async fn infer_route_metrics(&self) -> Result<Vec<PhaseReport>, InferenceError> {
        let result = self.route_metrics_phases().await;
        log_branch("route metrics", &result);
        result
    }

    /// Closes `belongsTo` for route elements, then places, then restaurants.
    pub async fn infer_membership(&self) -> Result<Vec<PhaseReport>, InferenceError> {
        let result = self.membership_phases().await;
        log_branch("membership", &result);
        result
    }

    async fn route_metrics_phases(&self) -> Result<Vec<PhaseReport>, InferenceError> {
        let setup = self.setup_difficulty().await?;
        let (duration, difficulty) =
            futures::join!(self.close_duration(), self.close_difficulty());
        Ok(vec![setup, duration?, difficulty?])
    }

    async fn membership_phases(&self) -> Result<Vec<PhaseReport>, InferenceError> {
        let routes = self.close_route_membership().await?;
        let places = self.close_place_membership().await?;
        let restaurants = self.close_restaurant_membership().await?;
        Ok(vec![routes, places, restaurants])
    }

    pub async fn setup_difficulty(&self) -> Result<PhaseReport, InferenceError> {
        let phase = Phase::SetupDifficulty;
        let mut closures = Vec::with_capacity(SegmentKind::ALL.len());
        for kind in SegmentKind::ALL {
            closures.push(self.once(phase, Rule::DifficultyByKind(kind)).await?);
        }
        Ok(PhaseReport { phase, closures })
    }

    pub async fn close_duration(&self) -> Result<PhaseReport, InferenceError> {
        let phase = Phase::DurationClosure;
        let closures = vec![self.close(phase, Rule::DurationPropagation).await?];
        Ok(PhaseReport { phase, closures })
    }

    pub async fn close_difficulty(&self) -> Result<PhaseReport, InferenceError> {
        let phase = Phase::DifficultyClosure;
        let closures = vec![self.close(phase, Rule::DifficultyPropagation).await?];
        Ok(PhaseReport { phase, closures })
    }

    pub async fn close_route_membership(&self) -> Result<PhaseReport, InferenceError> {
        let phase = Phase::BelongsToRouteClosure;
        let first = self.once(phase, Rule::BelongsToFirst).await?;
        let rest = self.close(phase, Rule::BelongsToRest).await?;
        Ok(PhaseReport {
            phase,
            closures: vec![first, rest],
        })
    }

    /// Requires [`Self::close_route_membership`] to have completed.
    pub async fn close_place_membership(&self) -> Result<PhaseReport, InferenceError> {
        let phase = Phase::BelongsToPlaceClosure;
        let closures = vec![self.close(phase, Rule::BelongsToPlace).await?];
        Ok(PhaseReport { phase, closures })
    }

    /// Requires [`Self::close_place_membership`] to have completed.
    pub async fn close_restaurant_membership(&self) -> Result<PhaseReport, InferenceError> {
        let phase = Phase::BelongsToRestaurantClosure;
        let closures = vec![self.once(phase, Rule::BelongsToRestaurant).await?];
        Ok(PhaseReport { phase, closures })
    }

    async fn close(&self, phase: Phase, rule: Rule) -> Result<ClosureStats, InferenceError> {
        self.runner
            .run_to_fixed_point(&GatewayRule::new(self.gateway, rule))
            .await
            .map_err(|e| e.in_phase(phase))
    }

    async fn once(&self, phase: Phase, rule: Rule) -> Result<ClosureStats, InferenceError> {
        self.runner
            .apply_once(&GatewayRule::new(self.gateway, rule))
            .await
            .map_err(|e| e.in_phase(phase))
    }
}

fn log_branch(branch: &str, result: &Result<Vec<PhaseReport>, InferenceError>) {
    match result {
        Ok(phases) => {
            let derived: u64 = phases.iter().map(PhaseReport::derived).sum();
            info!(branch, derived, "Inference branch done");
        }
        Err(e) => warn!(branch, error = %e, "Inference branch failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skigraph_common::{CountQuery, StoreError, Update};
    use std::sync::Mutex;

    /// Records the rules it is asked to apply and never derives anything.
    #[derive(Default)]
    struct RecordingGateway {
        applied: Mutex<Vec<Rule>>,
        fail_on: Option<Rule>,
    }

    impl RecordingGateway {
        fn failing_on(rule: Rule) -> Self {
            Self {
                fail_on: Some(rule),
                ..Self::default()
            }
        }

        fn applied(&self) -> Vec<Rule> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TripleStoreGateway for RecordingGateway {
        async fn apply_rule(&self, update: &Update) -> Result<(), StoreError> {
            let rule = Rule::ALL
                .into_iter()
                .find(|rule| rule.template().to_update() == *update)
                .unwrap();
            self.applied.lock().unwrap().push(rule);
            if self.fail_on == Some(rule) {
                return Err(StoreError::unavailable("store went away"));
            }
            Ok(())
        }

        async fn count_matches(&self, _query: &CountQuery) -> Result<u64, StoreError> {
            Ok(0)
        }
    }

    fn position(applied: &[Rule], rule: Rule) -> usize {
        applied.iter().position(|r| *r == rule).unwrap()
    }

    #[tokio::test]
    async fn phases_respect_their_dependencies() {
        let gateway = RecordingGateway::default();
        let report = Orchestrator::new(&gateway, InferenceConfig::default())
            .run()
            .await
            .unwrap();

        let applied = gateway.applied();
        assert_eq!(applied.len(), Rule::ALL.len());
        let last_setup = position(&applied, Rule::DifficultyByKind(SegmentKind::SkiLift));
        for kind in [SegmentKind::BlueRun, SegmentKind::RedRun, SegmentKind::BlackRun] {
            assert!(position(&applied, Rule::DifficultyByKind(kind)) < last_setup);
        }
        assert!(last_setup < position(&applied, Rule::DurationPropagation));
        assert!(last_setup < position(&applied, Rule::DifficultyPropagation));
        assert!(position(&applied, Rule::BelongsToFirst) < position(&applied, Rule::BelongsToRest));
        assert!(position(&applied, Rule::BelongsToRest) < position(&applied, Rule::BelongsToPlace));
        assert!(
            position(&applied, Rule::BelongsToPlace)
                < position(&applied, Rule::BelongsToRestaurant)
        );

        let phases: Vec<_> = report.phases.iter().map(|p| p.phase).collect();
        assert_eq!(
            phases,
            vec![
                Phase::SetupDifficulty,
                Phase::DurationClosure,
                Phase::DifficultyClosure,
                Phase::BelongsToRouteClosure,
                Phase::BelongsToPlaceClosure,
                Phase::BelongsToRestaurantClosure,
            ]
        );
        assert_eq!(report.derived(), 0);
    }

    #[tokio::test]
    async fn store_failure_aborts_its_branch_only() {
        let gateway = RecordingGateway::failing_on(Rule::BelongsToRest);
        let err = Orchestrator::new(&gateway, InferenceConfig::default())
            .run()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InferenceError::StoreUnavailable {
                phase: Phase::BelongsToRouteClosure,
                ..
            }
        ));

        let applied = gateway.applied();
        assert!(!applied.contains(&Rule::BelongsToPlace));
        assert!(!applied.contains(&Rule::BelongsToRestaurant));
        assert!(applied.contains(&Rule::DurationPropagation));
        assert!(applied.contains(&Rule::DifficultyPropagation));
    }

    #[tokio::test]
    async fn metrics_error_is_reported_first() {
        let gateway = RecordingGateway::failing_on(Rule::DifficultyByKind(SegmentKind::BlueRun));
        let err = Orchestrator::new(&gateway, InferenceConfig::default())
            .run()
            .await
            .unwrap_err();
        assert_eq!(err.phase(), Phase::SetupDifficulty);
        assert!(gateway.applied().contains(&Rule::BelongsToRestaurant));
    }
}
