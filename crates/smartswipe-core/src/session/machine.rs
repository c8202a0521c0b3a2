use super::decision::{Decision, DecisionLog, SessionStats};
use super::recorder::DecisionRecorder;
use super::state::{ErrorReason, SessionState};
use crate::candidate::{CandidateItem, ItemSource, SourceError};
use crate::config::SessionSettings;
use crate::error::{FunnelError, Result};
use crate::gate::{self, GateVerdict};
use crate::gesture::GestureUpdate;
use crate::pool::CandidatePool;
use futures::FutureExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Non-blocking notice for the host to surface as a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAlert {
    /// The recorder rejected a decision. The decision stays in the log and is
    /// queued for [`SwipeSession::retry_failed_persistence`].
    DecisionNotSaved {
        item_id: String,
        sequence: usize,
        message: String,
    },
}

/// Result of one recorded decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub stats: SessionStats,
    /// State after the decision was applied.
    pub state: SessionState,
}

/// Result of attempting to leave the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitDecision {
    /// The gate allowed leaving. Carries the accepted items in decision order.
    Leave { accepted: Vec<CandidateItem> },
    /// The gate denied leaving.
    Denied { deficit: usize, minimum: usize },
}

struct PendingPersist {
    decision: Decision,
    handle: JoinHandle<Result<()>>,
}

type ReplenishResult = std::result::Result<Vec<CandidateItem>, SourceError>;

/// Swipe session state machine.
///
/// Owns the candidate pool and the decision log for one session. Decisions
/// are committed locally first; remote persistence and pool replenishment run
/// as background tasks whose results are folded back in on the next decision
/// (or explicitly via [`SwipeSession::poll_background`] / [`SwipeSession::settle`]).
///
/// Background tasks are detached: dropping the session does not cancel
/// in-flight persistence calls.
pub struct SwipeSession {
    id: String,
    settings: SessionSettings,
    pool: CandidatePool,
    log: DecisionLog,
    state: SessionState,
    item_source: Arc<dyn ItemSource>,
    recorder: Arc<dyn DecisionRecorder>,
    persisting: Vec<PendingPersist>,
    replenishing: Option<JoinHandle<ReplenishResult>>,
    /// Decisions the recorder failed to confirm, keyed by sequence position.
    retry_queue: BTreeMap<usize, Decision>,
    alerts: Vec<SessionAlert>,
}

impl SwipeSession {
    /// Creates a session in the `Loading` state. Call [`SwipeSession::start`]
    /// to load the initial pool.
    pub fn new(
        settings: SessionSettings,
        item_source: Arc<dyn ItemSource>,
        recorder: Arc<dyn DecisionRecorder>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pool: CandidatePool::new(settings.replenish_threshold),
            settings,
            log: DecisionLog::new(),
            state: SessionState::Loading,
            item_source,
            recorder,
            persisting: Vec::new(),
            replenishing: None,
            retry_queue: BTreeMap::new(),
            alerts: Vec::new(),
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.log.stats()
    }

    pub fn current_item(&self) -> Option<&CandidateItem> {
        self.pool.current_item()
    }

    pub fn next_item(&self) -> Option<&CandidateItem> {
        self.pool.peek_next()
    }

    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.log.iter()
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// Accepted items in decision order.
    pub fn accepted_items(&self) -> Vec<CandidateItem> {
        self.log
            .accepted_ids()
            .filter_map(|id| self.pool.get(id).cloned())
            .collect()
    }

    /// Decisions queued for another persistence attempt, in sequence order.
    pub fn pending_persistence_failures(&self) -> impl Iterator<Item = &Decision> {
        self.retry_queue.values()
    }

    /// Drains the alerts raised since the last call.
    pub fn take_alerts(&mut self) -> Vec<SessionAlert> {
        std::mem::take(&mut self.alerts)
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Loads the initial pool. `Loading → Active`, or `→ Error` on failure.
    ///
    /// # Errors
    ///
    /// Returns the failure that moved the session into `Error` (pool
    /// unavailable or timed out), or `InvalidTransition` if not `Loading`.
    pub async fn start(&mut self) -> Result<()> {
        self.require(matches!(self.state, SessionState::Loading), "start")?;
        self.load().await
    }

    /// Applies an accept/reject decision to the current item.
    ///
    /// The decision is appended before anything else happens, so the log order
    /// is the order in which decisions resolve, regardless of when the remote
    /// recorder answers.
    pub fn decide(&mut self, accepted: bool) -> Result<DecisionOutcome> {
        self.poll_background();
        self.require(self.state.is_active(), "decide")?;

        let item_id = match self.pool.current_item() {
            Some(item) => item.id.clone(),
            None => {
                self.enter_exhausted();
                return Err(FunnelError::invalid_transition("exhausted", "decide"));
            }
        };

        let decision = self.log.append(item_id, accepted);
        self.spawn_persist(decision.clone());

        if self.pool.advance().is_some() {
            self.spawn_replenish();
        }

        let stats = self.log.stats();
        if self.pool.current_item().is_none() {
            self.enter_exhausted();
        } else if self.settings.checkpoint_interval > 0
            && stats.total % self.settings.checkpoint_interval == 0
        {
            let verdict = gate::evaluate(stats.accepted, self.settings.checkpoint_minimum);
            self.transition(SessionState::Checkpoint {
                accepted: stats.accepted,
                verdict,
            });
        }

        Ok(DecisionOutcome {
            decision,
            stats,
            state: self.state,
        })
    }

    /// Feeds a gesture interpreter update. Only resolved accept/reject updates
    /// record a decision; everything else returns `Ok(None)`.
    pub fn apply_gesture(&mut self, update: &GestureUpdate) -> Result<Option<DecisionOutcome>> {
        match update {
            GestureUpdate::Resolved { signal, .. } => match signal.decision() {
                Some(accepted) => self.decide(accepted).map(Some),
                None => Ok(None),
            },
            GestureUpdate::Tracking(_) | GestureUpdate::Ignored => Ok(None),
        }
    }

    /// Resolves a checkpoint with "keep swiping". `Checkpoint → Active`.
    pub fn continue_swiping(&mut self) -> Result<()> {
        self.require(matches!(self.state, SessionState::Checkpoint { .. }), "continue")?;
        self.transition(SessionState::Active);
        Ok(())
    }

    /// Attempts to leave the session for the selection stage.
    ///
    /// From `Checkpoint` the checkpoint minimum applies and a denial forces
    /// the session back to `Active`. From `Exhausted` the stage-exit minimum
    /// applies and a denial leaves the session exhausted.
    pub fn request_exit(&mut self) -> Result<ExitDecision> {
        let minimum = match self.state {
            SessionState::Checkpoint { .. } => self.settings.checkpoint_minimum,
            SessionState::Exhausted { .. } => self.settings.stage_exit_minimum,
            _ => return Err(FunnelError::invalid_transition(self.state.name(), "leave")),
        };

        let accepted = self.log.stats().accepted;
        match gate::evaluate(accepted, minimum) {
            GateVerdict::Allow => {
                tracing::info!(
                    "[SwipeSession] Leaving session {} with {} accepted item(s)",
                    self.id,
                    accepted
                );
                Ok(ExitDecision::Leave {
                    accepted: self.accepted_items(),
                })
            }
            GateVerdict::Deny { deficit } => {
                if matches!(self.state, SessionState::Checkpoint { .. }) {
                    self.transition(SessionState::Active);
                }
                Ok(ExitDecision::Denied { deficit, minimum })
            }
        }
    }

    /// "Generate more" from an exhausted session. Re-enters `Loading` and
    /// appends to the existing pool.
    pub async fn generate_more(&mut self) -> Result<()> {
        self.require(matches!(self.state, SessionState::Exhausted { .. }), "generate more")?;
        self.poll_background();
        self.transition(SessionState::Loading);
        self.load().await
    }

    /// Manual retry out of `Error`. Re-enters `Loading`.
    ///
    /// If the session failed on persistence, queued decisions are re-sent
    /// first. Loading is skipped when items are still ahead of the cursor.
    pub async fn retry(&mut self) -> Result<()> {
        let SessionState::Error { reason } = self.state else {
            return Err(FunnelError::invalid_transition(self.state.name(), "retry"));
        };

        self.transition(SessionState::Loading);
        if reason == ErrorReason::DecisionPersistFailed {
            self.retry_failed_persistence();
        }
        self.load().await
    }

    /// Moves the session into `Error(DecisionPersistFailed)` when decisions are
    /// waiting for persistence. For hosts that block on unsaved decisions
    /// instead of showing a banner. Returns whether the state changed.
    pub fn escalate_persist_failure(&mut self) -> bool {
        self.poll_background();
        if self.retry_queue.is_empty() {
            return false;
        }
        self.transition(SessionState::Error {
            reason: ErrorReason::DecisionPersistFailed,
        });
        true
    }

    /// Re-sends every queued decision in sequence order. Returns how many
    /// were re-sent. Failures are queued again when they come back.
    pub fn retry_failed_persistence(&mut self) -> usize {
        let queued = std::mem::take(&mut self.retry_queue);
        let count = queued.len();
        for decision in queued.into_values() {
            self.spawn_persist(decision);
        }
        if count > 0 {
            tracing::info!("[SwipeSession] Retrying persistence of {} decision(s)", count);
        }
        count
    }

    // ============================================================================
    // Background work
    // ============================================================================

    /// Folds in results of background tasks that already finished. Never waits.
    pub fn poll_background(&mut self) {
        let mut index = 0;
        while index < self.persisting.len() {
            if !self.persisting[index].handle.is_finished() {
                index += 1;
                continue;
            }
            let mut pending = self.persisting.remove(index);
            match (&mut pending.handle).now_or_never() {
                Some(joined) => self.finish_persist(pending.decision, joined),
                None => {
                    self.persisting.insert(index, pending);
                    index += 1;
                }
            }
        }

        let finished = self
            .replenishing
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            return;
        }
        if let Some(mut handle) = self.replenishing.take() {
            match (&mut handle).now_or_never() {
                Some(joined) => self.finish_replenish(joined),
                None => self.replenishing = Some(handle),
            }
        }
    }

    /// Waits for every outstanding background task and folds in the results.
    pub async fn settle(&mut self) {
        while !self.persisting.is_empty() {
            let pending = self.persisting.remove(0);
            let joined = pending.handle.await;
            self.finish_persist(pending.decision, joined);
        }
        if let Some(handle) = self.replenishing.take() {
            let joined = handle.await;
            self.finish_replenish(joined);
        }
    }

    fn spawn_persist(&mut self, decision: Decision) {
        let recorder = Arc::clone(&self.recorder);
        let item_id = decision.item_id.clone();
        let accepted = decision.accepted;
        let handle = tokio::spawn(async move { recorder.record_decision(&item_id, accepted).await });
        self.persisting.push(PendingPersist { decision, handle });
    }

    fn spawn_replenish(&mut self) {
        let source = Arc::clone(&self.item_source);
        let size = self.settings.initial_pool_size;
        let handle = tokio::spawn(async move {
            if let Err(e) = source.request_generation().await {
                tracing::warn!("[SwipeSession] Background generation request failed: {}", e);
            }
            source.fetch_pool(size).await
        });
        self.replenishing = Some(handle);
    }

    fn finish_persist(
        &mut self,
        decision: Decision,
        joined: std::result::Result<Result<()>, tokio::task::JoinError>,
    ) {
        let message = match joined {
            Ok(Ok(())) => {
                tracing::debug!(
                    "[SwipeSession] Decision #{} ({}) persisted",
                    decision.sequence,
                    decision.item_id
                );
                return;
            }
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("persistence task failed: {}", e),
        };

        tracing::warn!(
            "[SwipeSession] Decision #{} ({}) not persisted: {}",
            decision.sequence,
            decision.item_id,
            message
        );
        self.alerts.push(SessionAlert::DecisionNotSaved {
            item_id: decision.item_id.to_string(),
            sequence: decision.sequence,
            message,
        });
        self.retry_queue.insert(decision.sequence, decision);
    }

    fn finish_replenish(&mut self, joined: std::result::Result<ReplenishResult, tokio::task::JoinError>) {
        let outcome = joined.unwrap_or_else(|e| Err(SourceError::Network(e.to_string())));
        self.pool.finish_replenishment(outcome);
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn load(&mut self) -> Result<()> {
        if self.pool.current_item().is_some() {
            self.transition(SessionState::Active);
            return Ok(());
        }

        let source = Arc::clone(&self.item_source);
        let limit = self.settings.initial_pool_size;
        let timeout = self.settings.pool_load_timeout();

        let loaded =
            match tokio::time::timeout(timeout, self.pool.load_initial_pool(source.as_ref(), limit)).await {
                Ok(result) => result,
                Err(_) => Err(FunnelError::Timeout {
                    operation: "load pool".to_string(),
                    millis: self.settings.pool_load_timeout_ms,
                }),
            };

        match loaded {
            Ok(added) => {
                tracing::debug!("[SwipeSession] Loaded {} item(s) into session {}", added, self.id);
                self.transition(SessionState::Active);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[SwipeSession] Pool load failed: {}", e);
                self.transition(SessionState::Error {
                    reason: ErrorReason::PoolUnavailable,
                });
                Err(e)
            }
        }
    }

    fn enter_exhausted(&mut self) {
        let accepted = self.log.stats().accepted;
        let can_leave = gate::evaluate(accepted, self.settings.stage_exit_minimum).is_allowed();
        self.transition(SessionState::Exhausted { can_leave });
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!("[SwipeSession] {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn require(&self, allowed: bool, action: &str) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(FunnelError::invalid_transition(self.state.name(), action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{CandidateId, Domain};
    use crate::gesture::{GestureInterpreter, GestureSample};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn items(range: std::ops::Range<usize>) -> Vec<CandidateItem> {
        range
            .map(|i| CandidateItem::new(format!("idea-{i}"), Domain::FinTech, format!("Idea {i}"), "", vec![]))
            .collect()
    }

    /// Serves fixed item batches. Every fetch after the scripted ones returns
    /// `fallback`.
    struct MockSource {
        batches: Mutex<Vec<std::result::Result<Vec<CandidateItem>, SourceError>>>,
        fallback: Vec<CandidateItem>,
    }

    impl MockSource {
        fn new(
            mut batches: Vec<std::result::Result<Vec<CandidateItem>, SourceError>>,
            fallback: Vec<CandidateItem>,
        ) -> Arc<Self> {
            batches.reverse();
            Arc::new(Self {
                batches: Mutex::new(batches),
                fallback,
            })
        }
    }

    #[async_trait]
    impl ItemSource for MockSource {
        async fn fetch_pool(&self, _limit: usize) -> std::result::Result<Vec<CandidateItem>, SourceError> {
            self.batches
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(self.fallback.clone()))
        }

        async fn request_generation(&self) -> std::result::Result<(), SourceError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockRecorder {
        failing: Mutex<HashSet<String>>,
        recorded: Mutex<Vec<(String, bool)>>,
    }

    impl MockRecorder {
        fn failing(ids: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                failing: Mutex::new(ids.iter().map(|s| s.to_string()).collect()),
                recorded: Mutex::new(Vec::new()),
            })
        }

        fn heal(&self) {
            self.failing.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl DecisionRecorder for MockRecorder {
        async fn record_decision(&self, item_id: &CandidateId, accepted: bool) -> Result<()> {
            if self.failing.lock().unwrap().contains(item_id.as_str()) {
                return Err(FunnelError::transport("503 Service Unavailable"));
            }
            self.recorded.lock().unwrap().push((item_id.to_string(), accepted));
            Ok(())
        }
    }

    async fn started(source: Arc<MockSource>, recorder: Arc<MockRecorder>) -> SwipeSession {
        let mut session = SwipeSession::new(SessionSettings::default(), source, recorder);
        session.start().await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_start_enters_active() {
        let session = started(MockSource::new(vec![Ok(items(0..15))], vec![]), MockRecorder::failing(&[])).await;

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.current_item().unwrap().id.as_str(), "idea-0");
        assert_eq!(session.next_item().unwrap().id.as_str(), "idea-1");
    }

    #[tokio::test]
    async fn test_start_without_items_enters_error() {
        let source = MockSource::new(vec![Err(SourceError::Empty), Err(SourceError::Empty)], vec![]);
        let mut session = SwipeSession::new(SessionSettings::default(), source, MockRecorder::failing(&[]));

        let err = session.start().await.unwrap_err();

        assert!(err.is_pool_unavailable());
        assert_eq!(
            session.state(),
            SessionState::Error {
                reason: ErrorReason::PoolUnavailable
            }
        );
    }

    #[tokio::test]
    async fn test_retry_recovers_from_pool_error() {
        let source = MockSource::new(vec![Err(SourceError::Empty), Err(SourceError::Empty)], items(0..4));
        let mut session = SwipeSession::new(SessionSettings::default(), source, MockRecorder::failing(&[]));
        assert!(session.start().await.is_err());

        session.retry().await.unwrap();

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.pool().len(), 4);
    }

    #[tokio::test]
    async fn test_decide_outside_active_is_invalid() {
        let source = MockSource::new(vec![Ok(items(0..3))], vec![]);
        let mut session = SwipeSession::new(SessionSettings::default(), source, MockRecorder::failing(&[]));

        let err = session.decide(true).unwrap_err();
        assert!(matches!(err, FunnelError::InvalidTransition { .. }));
        assert!(session.decisions().next().is_none());
    }

    #[tokio::test]
    async fn test_checkpoint_fires_every_interval() {
        let mut session =
            started(MockSource::new(vec![Ok(items(0..25))], vec![]), MockRecorder::failing(&[])).await;

        for i in 0..9 {
            let outcome = session.decide(i % 2 == 0).unwrap();
            assert_eq!(outcome.state, SessionState::Active);
        }
        let outcome = session.decide(true).unwrap();

        assert_eq!(outcome.stats.total, 10);
        assert_eq!(
            outcome.state,
            SessionState::Checkpoint {
                accepted: 6,
                verdict: GateVerdict::Allow
            }
        );
        assert!(session.decide(true).is_err(), "decide is blocked at a checkpoint");

        session.continue_swiping().unwrap();
        assert!(session.state().is_active());
    }

    #[tokio::test]
    async fn test_checkpoint_exit_denied_forces_active() {
        let mut session =
            started(MockSource::new(vec![Ok(items(0..25))], vec![]), MockRecorder::failing(&[])).await;

        for i in 0..10 {
            session.decide(i < 2).unwrap();
        }
        assert_eq!(
            session.state(),
            SessionState::Checkpoint {
                accepted: 2,
                verdict: GateVerdict::Deny { deficit: 3 }
            }
        );

        let exit = session.request_exit().unwrap();

        assert_eq!(exit, ExitDecision::Denied { deficit: 3, minimum: 5 });
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_exhaustion_takes_precedence_over_checkpoint() {
        let mut session =
            started(MockSource::new(vec![Ok(items(0..10))], vec![]), MockRecorder::failing(&[])).await;

        for _ in 0..9 {
            session.decide(true).unwrap();
        }
        let outcome = session.decide(false).unwrap();

        assert_eq!(outcome.state, SessionState::Exhausted { can_leave: true });
    }

    #[tokio::test]
    async fn test_exhausted_exit_uses_stage_minimum() {
        let mut session =
            started(MockSource::new(vec![Ok(items(0..4))], vec![]), MockRecorder::failing(&[])).await;

        for accepted in [true, false, true, false] {
            session.decide(accepted).unwrap();
        }
        assert_eq!(session.state(), SessionState::Exhausted { can_leave: false });

        let exit = session.request_exit().unwrap();
        assert_eq!(exit, ExitDecision::Denied { deficit: 1, minimum: 3 });
        assert_eq!(session.state(), SessionState::Exhausted { can_leave: false });
    }

    #[tokio::test]
    async fn test_leave_returns_accepted_items_in_decision_order() {
        let mut session =
            started(MockSource::new(vec![Ok(items(0..3))], vec![]), MockRecorder::failing(&[])).await;

        session.decide(true).unwrap();
        session.decide(true).unwrap();
        session.decide(true).unwrap();

        let ExitDecision::Leave { accepted } = session.request_exit().unwrap() else {
            panic!("expected leave");
        };
        let ids: Vec<_> = accepted.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["idea-0", "idea-1", "idea-2"]);
    }

    #[tokio::test]
    async fn test_replenishment_extends_an_active_session() {
        let source = MockSource::new(vec![Ok(items(0..4))], items(4..8));
        let mut session = started(source, MockRecorder::failing(&[])).await;

        session.decide(true).unwrap();
        session.decide(false).unwrap();
        assert!(session.pool().is_replenishing());

        session.settle().await;

        assert!(!session.pool().is_replenishing());
        assert_eq!(session.pool().len(), 8);
        for _ in 0..6 {
            session.decide(true).unwrap();
        }
        assert_eq!(session.stats().total, 8);
    }

    #[tokio::test]
    async fn test_late_replenishment_does_not_leave_exhausted() {
        let source = MockSource::new(vec![Ok(items(0..2))], items(2..5));
        let mut session = started(source, MockRecorder::failing(&[])).await;

        session.decide(true).unwrap();
        session.decide(true).unwrap();
        assert!(matches!(session.state(), SessionState::Exhausted { .. }));

        session.settle().await;
        assert!(matches!(session.state(), SessionState::Exhausted { .. }));

        session.generate_more().await.unwrap();
        assert!(session.state().is_active());
        assert_eq!(session.current_item().unwrap().id.as_str(), "idea-2");
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_decision_and_alerts() {
        let recorder = MockRecorder::failing(&["idea-1"]);
        let mut session = started(MockSource::new(vec![Ok(items(0..6))], vec![]), Arc::clone(&recorder)).await;

        session.decide(true).unwrap();
        session.decide(false).unwrap();
        session.decide(true).unwrap();
        session.settle().await;

        assert_eq!(session.stats().total, 3);
        assert!(session.state().is_active());
        let alerts = session.take_alerts();
        assert_eq!(alerts.len(), 1);
        assert!(matches!(
            &alerts[0],
            SessionAlert::DecisionNotSaved { item_id, sequence: 1, .. } if item_id == "idea-1"
        ));
        let pending: Vec<_> = session.pending_persistence_failures().map(|d| d.sequence).collect();
        assert_eq!(pending, vec![1]);

        recorder.heal();
        assert_eq!(session.retry_failed_persistence(), 1);
        session.settle().await;

        assert_eq!(session.pending_persistence_failures().count(), 0);
        assert_eq!(recorder.recorded.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_escalated_persist_failure_retries_on_recovery() {
        let recorder = MockRecorder::failing(&["idea-0"]);
        let mut session = started(MockSource::new(vec![Ok(items(0..6))], vec![]), Arc::clone(&recorder)).await;

        session.decide(true).unwrap();
        session.settle().await;
        assert!(session.escalate_persist_failure());
        assert_eq!(
            session.state(),
            SessionState::Error {
                reason: ErrorReason::DecisionPersistFailed
            }
        );

        recorder.heal();
        session.retry().await.unwrap();
        session.settle().await;

        assert!(session.state().is_active());
        assert_eq!(session.current_item().unwrap().id.as_str(), "idea-1");
        assert_eq!(session.pending_persistence_failures().count(), 0);
    }

    #[tokio::test]
    async fn test_gesture_updates_drive_decisions() {
        let mut session =
            started(MockSource::new(vec![Ok(items(0..5))], vec![]), MockRecorder::failing(&[])).await;
        let mut gestures = GestureInterpreter::default();

        let drag = gestures.feed(GestureSample::dragging(60.0, 0.1));
        assert_eq!(session.apply_gesture(&drag).unwrap(), None);

        let cancel = gestures.feed(GestureSample::released(60.0, 0.1));
        assert_eq!(session.apply_gesture(&cancel).unwrap(), None);

        gestures.feed(GestureSample::dragging(-140.0, 0.0));
        let reject = gestures.feed(GestureSample::released(-140.0, 0.0));
        let outcome = session.apply_gesture(&reject).unwrap().unwrap();

        assert!(!outcome.decision.accepted);
        assert_eq!(outcome.stats.rejected, 1);
    }
}
