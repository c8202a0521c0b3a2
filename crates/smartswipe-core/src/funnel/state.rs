use super::key::{FunnelKey, FunnelStage};
use super::store::FunnelStore;
use crate::candidate::{CandidateId, CandidateItem};
use crate::error::{FunnelError, Result};
use crate::questionnaire::QuestionnaireAnswers;
use crate::selection::{BROAD_SELECTION_CAPACITY, RANKING_SIZE, RankedSelection};
use crate::synthesis::Artifact;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;

/// Store key of the saved-ideas list. Not a funnel key: it outlives cycles.
pub const SAVED_ARTIFACTS_KEY: &str = "saved-ideas";

/// Typed, validated view over a [`FunnelStore`].
///
/// Reads fail with `FunnelStateMissing` when a key is absent, is not valid
/// JSON for its type, or breaks the structural rule the reading stage relies
/// on. Writes go through a [`StageWriter`].
#[derive(Clone)]
pub struct FunnelState {
    store: Arc<dyn FunnelStore>,
    accepted_minimum: usize,
}

impl FunnelState {
    /// `accepted_minimum` is the smallest accepted set later stages accept
    /// (the stage-exit gate minimum).
    pub fn new(store: Arc<dyn FunnelStore>, accepted_minimum: usize) -> Self {
        Self {
            store,
            accepted_minimum,
        }
    }

    /// Binds a writer to `stage`.
    pub fn writer(&self, stage: FunnelStage) -> StageWriter {
        StageWriter {
            stage,
            store: Arc::clone(&self.store),
        }
    }

    pub async fn read_accepted(&self) -> Result<Vec<CandidateItem>> {
        let items: Vec<CandidateItem> = self.read_json(FunnelKey::AcceptedItems).await?;
        if items.len() < self.accepted_minimum {
            return Err(missing(
                FunnelKey::AcceptedItems,
                format!("{} item(s), at least {} required", items.len(), self.accepted_minimum),
            ));
        }
        Ok(items)
    }

    /// Reads the broad shortlist and checks it against the accepted set.
    ///
    /// The shortlist is optional: an absent or invalid value returns
    /// `Ok(None)` and the caller falls back to the accepted set. A shortlist
    /// too short to fill a ranking is invalid.
    pub async fn read_shortlist(&self, accepted: &[CandidateItem]) -> Result<Option<Vec<CandidateItem>>> {
        let items: Vec<CandidateItem> = match self.read_json(FunnelKey::ShortlistItems).await {
            Ok(items) => items,
            Err(e) if e.is_state_missing() => {
                tracing::debug!("[FunnelState] No usable shortlist: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let accepted_ids: HashSet<&CandidateId> = accepted.iter().map(|i| &i.id).collect();
        let valid = (RANKING_SIZE..=BROAD_SELECTION_CAPACITY).contains(&items.len())
            && items.iter().all(|i| accepted_ids.contains(&i.id));
        if !valid {
            tracing::warn!(
                "[FunnelState] Ignoring shortlist of {} item(s) that does not fit the accepted set",
                items.len()
            );
            return Ok(None);
        }
        Ok(Some(items))
    }

    pub async fn read_selected(&self) -> Result<RankedSelection> {
        // The length rule is enforced by RankedSelection's deserializer.
        self.read_json(FunnelKey::SelectedItems).await
    }

    pub async fn read_answers(&self) -> Result<QuestionnaireAnswers> {
        let answers: QuestionnaireAnswers = self.read_json(FunnelKey::QuestionnaireAnswers).await?;
        answers
            .validate()
            .map_err(|reason| missing(FunnelKey::QuestionnaireAnswers, reason))?;
        Ok(answers)
    }

    /// Artifacts saved so far, oldest first. An absent list is empty.
    pub async fn saved_artifacts(&self) -> Result<Vec<Artifact>> {
        read_saved(self.store.as_ref()).await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: FunnelKey) -> Result<T> {
        let payload = self
            .store
            .read(key.as_str())
            .await?
            .ok_or_else(|| missing(key, "absent"))?;
        serde_json::from_str(&payload).map_err(|e| missing(key, format!("malformed: {e}")))
    }
}

/// Store handle bound to one stage. Writes to keys owned by another stage fail
/// with `WriterViolation` and leave the store untouched.
#[derive(Clone)]
pub struct StageWriter {
    stage: FunnelStage,
    store: Arc<dyn FunnelStore>,
}

impl StageWriter {
    pub fn stage(&self) -> FunnelStage {
        self.stage
    }

    pub async fn write_accepted(&self, items: &[CandidateItem]) -> Result<()> {
        self.write_json(FunnelKey::AcceptedItems, items).await
    }

    pub async fn write_shortlist(&self, items: &[CandidateItem]) -> Result<()> {
        self.write_json(FunnelKey::ShortlistItems, items).await
    }

    pub async fn write_selected(&self, ranked: &RankedSelection) -> Result<()> {
        self.write_json(FunnelKey::SelectedItems, ranked).await
    }

    pub async fn write_answers(&self, answers: &QuestionnaireAnswers) -> Result<()> {
        self.write_json(FunnelKey::QuestionnaireAnswers, answers).await
    }

    /// Clears one key. Allowed to the key's writer and to cycle-bounding stages.
    pub async fn clear(&self, key: FunnelKey) -> Result<()> {
        if !self.stage.bounds_cycle() {
            self.check_writer(key)?;
        }
        self.store.clear(key.as_str()).await
    }

    /// Clears every funnel key. Only cycle-bounding stages may do this.
    pub async fn clear_cycle(&self) -> Result<()> {
        if !self.stage.bounds_cycle() {
            return Err(FunnelError::WriterViolation {
                key: "*".to_string(),
                stage: self.stage.to_string(),
            });
        }
        for key in FunnelKey::ALL {
            self.store.clear(key.as_str()).await?;
        }
        tracing::info!("[FunnelState] Cleared funnel state for a new cycle ({})", self.stage);
        Ok(())
    }

    /// Appends `artifact` to the saved-ideas list and returns the new list
    /// length. Only the synthesis stage saves artifacts.
    pub async fn save_artifact(&self, artifact: &Artifact) -> Result<usize> {
        if self.stage != FunnelStage::Synthesis {
            return Err(FunnelError::WriterViolation {
                key: SAVED_ARTIFACTS_KEY.to_string(),
                stage: self.stage.to_string(),
            });
        }
        let mut saved = read_saved(self.store.as_ref()).await?;
        saved.push(artifact.clone());
        self.store
            .write(SAVED_ARTIFACTS_KEY, serde_json::to_string(&saved)?)
            .await?;
        tracing::info!("[FunnelState] Saved artifact {} ({} saved)", artifact.id, saved.len());
        Ok(saved.len())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: FunnelKey, value: &T) -> Result<()> {
        self.check_writer(key)?;
        let payload = serde_json::to_string(value)?;
        self.store.write(key.as_str(), payload).await?;
        tracing::debug!("[FunnelState] {} wrote {}", self.stage, key);
        Ok(())
    }

    fn check_writer(&self, key: FunnelKey) -> Result<()> {
        if key.writer() == self.stage {
            Ok(())
        } else {
            Err(FunnelError::WriterViolation {
                key: key.to_string(),
                stage: self.stage.to_string(),
            })
        }
    }
}

// A malformed list is reported rather than replaced, so saving never drops
// earlier entries.
async fn read_saved(store: &dyn FunnelStore) -> Result<Vec<Artifact>> {
    match store.read(SAVED_ARTIFACTS_KEY).await? {
        Some(payload) => serde_json::from_str(&payload)
            .map_err(|e| FunnelError::state_missing(SAVED_ARTIFACTS_KEY, format!("malformed: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn missing(key: FunnelKey, reason: impl Into<String>) -> FunnelError {
    FunnelError::state_missing(key.as_str(), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Domain;
    use crate::selection::TopKRanking;
    use crate::synthesis::compose_fallback;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct MapStore {
        entries: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl FunnelStore for MapStore {
        async fn write(&self, key: &str, payload: String) -> Result<()> {
            self.entries.write().await.insert(key.to_string(), payload);
            Ok(())
        }

        async fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn clear(&self, key: &str) -> Result<()> {
            self.entries.write().await.remove(key);
            Ok(())
        }
    }

    fn items(n: usize) -> Vec<CandidateItem> {
        (0..n)
            .map(|i| CandidateItem::new(format!("i{i}"), Domain::HealthTech, format!("Idea {i}"), "", vec![]))
            .collect()
    }

    fn state() -> (Arc<MapStore>, FunnelState) {
        let store = Arc::new(MapStore::default());
        let state = FunnelState::new(store.clone(), 3);
        (store, state)
    }

    #[tokio::test]
    async fn test_absent_key_is_state_missing() {
        let (_, state) = state();
        let err = state.read_accepted().await.unwrap_err();
        assert!(err.is_state_missing());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_state_missing() {
        let (store, state) = state();
        store.write("accepted-items", "{not json".to_string()).await.unwrap();

        let err = state.read_accepted().await.unwrap_err();
        assert!(matches!(err, FunnelError::FunnelStateMissing { ref key, .. } if key == "accepted-items"));
    }

    #[tokio::test]
    async fn test_accepted_below_minimum_is_state_missing() {
        let (_, state) = state();
        state.writer(FunnelStage::Swipe).write_accepted(&items(2)).await.unwrap();

        assert!(state.read_accepted().await.unwrap_err().is_state_missing());
    }

    #[tokio::test]
    async fn test_selected_items_must_be_exactly_three() {
        let (store, state) = state();
        let json = serde_json::to_string(&items(4)).unwrap();
        store.write("selected-items", json).await.unwrap();

        assert!(state.read_selected().await.unwrap_err().is_state_missing());
    }

    #[tokio::test]
    async fn test_writer_violation_writes_nothing() {
        let (store, state) = state();

        let err = state
            .writer(FunnelStage::Ranking)
            .write_accepted(&items(3))
            .await
            .unwrap_err();

        assert!(matches!(err, FunnelError::WriterViolation { .. }));
        assert!(store.read("accepted-items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_selected_round_trip_through_store() {
        let (_, state) = state();
        let mut ranking = TopKRanking::new(items(3));
        for id in ["i2", "i0", "i1"] {
            ranking.toggle(&id.into());
        }
        let ranked = ranking.submit().unwrap();

        state.writer(FunnelStage::Ranking).write_selected(&ranked).await.unwrap();

        assert_eq!(state.read_selected().await.unwrap(), ranked);
    }

    #[tokio::test]
    async fn test_shortlist_outside_accepted_set_is_ignored() {
        let (_, state) = state();
        let accepted = items(4);
        let mut stray = items(2);
        stray.push(CandidateItem::new("x", Domain::Gaming, "Stray", "", vec![]));
        state.writer(FunnelStage::Selection).write_shortlist(&stray).await.unwrap();

        assert_eq!(state.read_shortlist(&accepted).await.unwrap(), None);

        state
            .writer(FunnelStage::Selection)
            .write_shortlist(&accepted[..3])
            .await
            .unwrap();
        assert_eq!(state.read_shortlist(&accepted).await.unwrap().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_shortlist_shorter_than_ranking_is_ignored() {
        let (_, state) = state();
        let accepted = items(6);
        state
            .writer(FunnelStage::Selection)
            .write_shortlist(&accepted[..2])
            .await
            .unwrap();

        assert_eq!(state.read_shortlist(&accepted).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_cycle_is_restricted() {
        let (store, state) = state();
        state.writer(FunnelStage::Swipe).write_accepted(&items(3)).await.unwrap();

        assert!(state.writer(FunnelStage::Ranking).clear_cycle().await.is_err());
        assert!(store.read("accepted-items").await.unwrap().is_some());

        state.writer(FunnelStage::Synthesis).clear_cycle().await.unwrap();
        assert!(store.read("accepted-items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_saved_artifacts_survive_cycle_clear() {
        let (store, state) = state();
        let ranked = RankedSelection::try_from(items(3)).unwrap();
        let artifact = compose_fallback(&ranked, &QuestionnaireAnswers::default());
        let writer = state.writer(FunnelStage::Synthesis);

        assert_eq!(writer.save_artifact(&artifact).await.unwrap(), 1);
        assert_eq!(writer.save_artifact(&artifact).await.unwrap(), 2);
        writer.clear_cycle().await.unwrap();

        assert_eq!(state.saved_artifacts().await.unwrap().len(), 2);
        assert!(store.read(SAVED_ARTIFACTS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_only_synthesis_saves_artifacts() {
        let (_, state) = state();
        let ranked = RankedSelection::try_from(items(3)).unwrap();
        let artifact = compose_fallback(&ranked, &QuestionnaireAnswers::default());

        let err = state
            .writer(FunnelStage::Swipe)
            .save_artifact(&artifact)
            .await
            .unwrap_err();

        assert!(matches!(err, FunnelError::WriterViolation { ref key, .. } if key == SAVED_ARTIFACTS_KEY));
        assert!(state.saved_artifacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_saved_list_is_not_overwritten() {
        let (store, state) = state();
        store.write(SAVED_ARTIFACTS_KEY, "[{\"broken\"".to_string()).await.unwrap();
        let ranked = RankedSelection::try_from(items(3)).unwrap();
        let artifact = compose_fallback(&ranked, &QuestionnaireAnswers::default());

        let err = state
            .writer(FunnelStage::Synthesis)
            .save_artifact(&artifact)
            .await
            .unwrap_err();

        assert!(err.is_state_missing());
        assert_eq!(
            store.read(SAVED_ARTIFACTS_KEY).await.unwrap().as_deref(),
            Some("[{\"broken\"")
        );
    }
}
