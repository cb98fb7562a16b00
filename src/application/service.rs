//! MixService - Orchestrates session operations against the registry.
//!
//! Dispatches inbound requests to the owning session, coordinating the
//! lock discipline and the one flow that leaves the process: the batch
//! ELO fetch during `StartBalancing`.

use std::sync::Arc;

use futures::future;
use uuid::Uuid;

use crate::application::registry::SessionRegistry;
use crate::application::requests::{SessionAction, SessionRequest};
use crate::domain::foundation::{ChannelId, UserId};
use crate::domain::player::Participant;
use crate::domain::session::{SessionError, SessionPhase, SessionView};
use crate::ports::{EloSource, EloSourceError, LinkStore};

/// Application service for the session lifecycle.
pub struct MixService {
    registry: Arc<SessionRegistry>,
    elo_source: Arc<dyn EloSource>,
    link_store: Arc<dyn LinkStore>,
}

impl MixService {
    pub fn new(
        registry: Arc<SessionRegistry>,
        elo_source: Arc<dyn EloSource>,
        link_store: Arc<dyn LinkStore>,
    ) -> Self {
        Self {
            registry,
            elo_source,
            link_store,
        }
    }

    /// Open a new session in a channel.
    pub async fn open_session(&self, channel_id: ChannelId) -> Result<SessionView, SessionError> {
        let view = self.registry.open(channel_id.clone()).await?;

        tracing::info!(channel_id = %channel_id, "Session opened");
        Ok(view)
    }

    /// Read the current state of a channel's session.
    pub async fn session_view(&self, channel_id: &ChannelId) -> Result<SessionView, SessionError> {
        let cell = self.registry.get(channel_id).await?;
        let session = cell.lock().await;
        Ok(session.view())
    }

    /// Handle one session action.
    pub async fn handle(&self, request: SessionRequest) -> Result<SessionView, SessionError> {
        tracing::debug!(
            channel_id = %request.channel_id,
            actor = %request.actor,
            action = request.action.name(),
            "Handling session action"
        );

        match request.action {
            SessionAction::Join => self.join(&request.channel_id, &request.actor).await,
            SessionAction::Leave => self.leave(&request.channel_id, &request.actor).await,
            SessionAction::StartBalancing => self.start_balancing(&request.channel_id).await,
            SessionAction::Rebalance { seed } => self.rebalance(&request.channel_id, seed).await,
            SessionAction::Swap {
                team_a_users,
                team_b_users,
            } => self.swap(&request.channel_id, &team_a_users, &team_b_users).await,
            SessionAction::Finalize => self.finalize(&request.channel_id).await,
            SessionAction::Cancel => self.cancel(&request.channel_id).await,
        }
    }

    // ─── Individual Operations ────────────────────────────────────────

    async fn join(
        &self,
        channel_id: &ChannelId,
        actor: &UserId,
    ) -> Result<SessionView, SessionError> {
        // Resolve the link before touching the session lock
        let profile = self
            .link_store
            .get(actor)
            .await
            .map_err(|e| SessionError::store(e.to_string()))?
            .ok_or_else(|| SessionError::not_linked(actor.clone()))?;

        let cell = self.registry.get(channel_id).await?;
        let mut session = cell.lock().await;
        session.join(Participant::new(actor.clone(), profile))?;

        Ok(session.view())
    }

    async fn leave(
        &self,
        channel_id: &ChannelId,
        actor: &UserId,
    ) -> Result<SessionView, SessionError> {
        let cell = self.registry.get(channel_id).await?;
        let mut session = cell.lock().await;
        session.leave(actor)?;

        Ok(session.view())
    }

    /// Freeze the roster, fetch ratings for everyone, and build teams.
    ///
    /// The session lock is held only to enter and leave the `Starting`
    /// phase; the batch fetch runs lock-free so cancel stays responsive.
    /// Any single fetch failure reopens the roster with no partial
    /// snapshot installed.
    async fn start_balancing(&self, channel_id: &ChannelId) -> Result<SessionView, SessionError> {
        let cell = self.registry.get(channel_id).await?;

        // 1. Enter Starting and snapshot the roster
        let roster = {
            let mut session = cell.lock().await;
            session.begin_balancing()?
        };

        // 2. Fetch all ratings in parallel, all-or-nothing
        let fetched = self.fetch_ratings(&roster).await;

        // 3. Re-lock and settle the outcome
        let mut session = cell.lock().await;
        match fetched {
            Ok(rated) => {
                if session.phase() != SessionPhase::Starting {
                    // Cancelled while the fetch was in flight; the result
                    // is discarded and the caller sees the session gone
                    return Err(SessionError::not_found(channel_id.clone()));
                }
                session.complete_balancing(rated)?;

                tracing::info!(
                    channel_id = %channel_id,
                    players = session.participant_count(),
                    "Teams balanced"
                );
                Ok(session.view())
            }
            Err(e) => {
                if session.phase() == SessionPhase::Starting {
                    session.fail_balancing()?;
                }

                tracing::warn!(
                    channel_id = %channel_id,
                    error = %e,
                    "ELO fetch failed; roster reopened"
                );
                Err(SessionError::elo_fetch_failed(e.to_string()))
            }
        }
    }

    async fn rebalance(
        &self,
        channel_id: &ChannelId,
        seed: Option<u64>,
    ) -> Result<SessionView, SessionError> {
        let seed = seed.unwrap_or_else(random_seed);

        let cell = self.registry.get(channel_id).await?;
        let mut session = cell.lock().await;
        session.rebalance(seed)?;

        Ok(session.view())
    }

    async fn swap(
        &self,
        channel_id: &ChannelId,
        team_a_users: &[UserId],
        team_b_users: &[UserId],
    ) -> Result<SessionView, SessionError> {
        let cell = self.registry.get(channel_id).await?;
        let mut session = cell.lock().await;
        session.swap(team_a_users, team_b_users)?;

        Ok(session.view())
    }

    async fn finalize(&self, channel_id: &ChannelId) -> Result<SessionView, SessionError> {
        let cell = self.registry.get(channel_id).await?;

        let view = {
            let mut session = cell.lock().await;
            session.finalize()?;
            session.view()
        };

        self.registry.remove(channel_id).await;

        tracing::info!(channel_id = %channel_id, "Session finalized");
        Ok(view)
    }

    async fn cancel(&self, channel_id: &ChannelId) -> Result<SessionView, SessionError> {
        let cell = self.registry.get(channel_id).await?;

        let view = {
            let mut session = cell.lock().await;
            session.cancel()?;
            session.view()
        };

        self.registry.remove(channel_id).await;

        tracing::info!(channel_id = %channel_id, "Session cancelled");
        Ok(view)
    }

    /// Fetch a current rating for every roster member in parallel.
    async fn fetch_ratings(
        &self,
        roster: &[Participant],
    ) -> Result<Vec<Participant>, EloSourceError> {
        let fetches = roster.iter().map(|participant| {
            let source = Arc::clone(&self.elo_source);
            async move {
                let elo = source.current_elo(participant.profile()).await?;
                Ok(participant.with_snapshot(elo))
            }
        });

        future::try_join_all(fetches).await
    }
}

/// Seed for caller-less rebalances, drawn from random UUID bytes.
fn random_seed() -> u64 {
    let bytes = Uuid::new_v4().into_bytes();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::faceit::MockEloSource;
    use crate::adapters::link_store::InMemoryLinkStore;
    use crate::domain::foundation::Elo;
    use crate::domain::player::FaceitProfile;
    use crate::ports::EloSourceError;

    fn channel(id: &str) -> ChannelId {
        ChannelId::new(id).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn link(store: &InMemoryLinkStore, user_id: &str, nickname: &str, elo: u32) {
        let profile =
            FaceitProfile::new(format!("pid-{nickname}"), nickname, Some(Elo::new(elo))).unwrap();
        store.put(&user(user_id), &profile).await.unwrap();
    }

    /// Service over a four-player registry with four linked users.
    async fn rigged_service() -> (MixService, Arc<SessionRegistry>, MockEloSource) {
        let source = MockEloSource::new()
            .with_player("nick-a", "pid-nick-a", 1800)
            .with_player("nick-b", "pid-nick-b", 1500)
            .with_player("nick-c", "pid-nick-c", 1400)
            .with_player("nick-d", "pid-nick-d", 1200);

        let store = InMemoryLinkStore::new();
        link(&store, "u-a", "nick-a", 1800).await;
        link(&store, "u-b", "nick-b", 1500).await;
        link(&store, "u-c", "nick-c", 1400).await;
        link(&store, "u-d", "nick-d", 1200).await;

        let registry = Arc::new(SessionRegistry::new(4));
        let service = MixService::new(
            Arc::clone(&registry),
            Arc::new(source.clone()),
            Arc::new(store),
        );

        (service, registry, source)
    }

    async fn join_all(service: &MixService, channel_id: &ChannelId) {
        for user_id in ["u-a", "u-b", "u-c", "u-d"] {
            service
                .handle(SessionRequest::new(
                    channel_id.clone(),
                    user(user_id),
                    SessionAction::Join,
                ))
                .await
                .unwrap();
        }
    }

    // ─── Join / Leave ────────────────────────────────────────────────

    #[tokio::test]
    async fn linked_user_joins_open_session() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();

        let view = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::Join,
            ))
            .await
            .unwrap();

        assert_eq!(view.participants.len(), 1);
        assert_eq!(view.participants[0].display_name, "nick-a");
    }

    #[tokio::test]
    async fn unlinked_user_cannot_join() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();

        let result = service
            .handle(SessionRequest::new(
                channel_id,
                user("stranger"),
                SessionAction::Join,
            ))
            .await;

        assert!(matches!(result, Err(SessionError::NotLinked(_))));
    }

    #[tokio::test]
    async fn join_without_open_session_is_not_found() {
        let (service, _, _) = rigged_service().await;

        let result = service
            .handle(SessionRequest::new(
                channel("empty"),
                user("u-a"),
                SessionAction::Join,
            ))
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn leave_then_rejoin_works() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();

        for action in [SessionAction::Join, SessionAction::Leave, SessionAction::Join] {
            service
                .handle(SessionRequest::new(channel_id.clone(), user("u-a"), action))
                .await
                .unwrap();
        }

        let view = service.session_view(&channel_id).await.unwrap();
        assert_eq!(view.participants.len(), 1);
    }

    // ─── StartBalancing ──────────────────────────────────────────────

    #[tokio::test]
    async fn full_roster_balances_into_two_teams() {
        let (service, _, source) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        join_all(&service, &channel_id).await;

        let view = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await
            .unwrap();

        assert_eq!(view.phase, SessionPhase::Active);
        let assignment = view.assignment.unwrap();
        assert_eq!(assignment.team_a.members.len(), 2);
        assert_eq!(assignment.team_b.members.len(), 2);
        // One live rating per roster member
        assert_eq!(source.elo_call_count(), 4);
    }

    #[tokio::test]
    async fn balancing_uses_fresh_ratings_not_stored_ones() {
        let (service, _, source) = rigged_service().await;
        // nick-a climbed since linking
        let _ = source.clone().with_current_elo("nick-a", 2600);

        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        join_all(&service, &channel_id).await;

        let view = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await
            .unwrap();

        let assignment = view.assignment.unwrap();
        let all_elos: Vec<Option<u32>> = assignment
            .team_a
            .members
            .iter()
            .chain(assignment.team_b.members.iter())
            .map(|m| m.elo)
            .collect();
        assert!(all_elos.contains(&Some(2600)));
        assert!(!all_elos.contains(&Some(1800)));
    }

    #[tokio::test]
    async fn fetch_failure_reopens_the_roster_and_retry_succeeds() {
        let (service, _, source) = rigged_service().await;
        let source = source.with_elo_error("nick-c", EloSourceError::upstream("503"));

        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        join_all(&service, &channel_id).await;

        let result = service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await;
        assert!(matches!(result, Err(SessionError::EloFetchFailed(_))));

        // No partial snapshot: the roster is back to Gathering intact
        let view = service.session_view(&channel_id).await.unwrap();
        assert_eq!(view.phase, SessionPhase::Gathering);
        assert_eq!(view.participants.len(), 4);
        assert!(view.assignment.is_none());

        // Upstream recovers; the same request now lands
        let _ = source.with_current_elo("nick-c", 1400);
        let view = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await
            .unwrap();
        assert_eq!(view.phase, SessionPhase::Active);
    }

    #[tokio::test]
    async fn short_roster_cannot_start() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();

        service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::Join,
            ))
            .await
            .unwrap();

        let result = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await;

        assert!(matches!(
            result,
            Err(SessionError::InsufficientPlayers { have: 1, need: 4 })
        ));
    }

    // ─── Rebalance / Swap ────────────────────────────────────────────

    #[tokio::test]
    async fn rebalance_with_generated_seed_stays_active() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        join_all(&service, &channel_id).await;
        service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await
            .unwrap();

        let view = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::Rebalance { seed: None },
            ))
            .await
            .unwrap();

        assert_eq!(view.phase, SessionPhase::Active);
        assert!(view.assignment.is_some());
    }

    #[tokio::test]
    async fn rebalance_before_active_is_rejected() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();

        let result = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::Rebalance { seed: Some(7) },
            ))
            .await;

        assert!(matches!(result, Err(SessionError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn swap_exchanges_members_across_teams() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        join_all(&service, &channel_id).await;
        let view = service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await
            .unwrap();

        let assignment = view.assignment.unwrap();
        let from_a = user(&assignment.team_a.members[0].user_id);
        let from_b = user(&assignment.team_b.members[0].user_id);

        let view = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::Swap {
                    team_a_users: vec![from_a.clone()],
                    team_b_users: vec![from_b.clone()],
                },
            ))
            .await
            .unwrap();

        let swapped = view.assignment.unwrap();
        let team_a_ids: Vec<&str> = swapped.team_a.members.iter().map(|m| m.user_id.as_str()).collect();
        assert!(team_a_ids.contains(&from_b.as_str()));
        assert!(!team_a_ids.contains(&from_a.as_str()));
    }

    // ─── Finalize / Cancel ───────────────────────────────────────────

    #[tokio::test]
    async fn finalize_removes_the_session() {
        let (service, registry, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        join_all(&service, &channel_id).await;
        service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::StartBalancing,
            ))
            .await
            .unwrap();

        let view = service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::Finalize,
            ))
            .await
            .unwrap();

        assert_eq!(view.phase, SessionPhase::Finalized);
        assert!(!registry.contains(&channel_id).await);
    }

    #[tokio::test]
    async fn cancel_frees_the_channel_for_a_new_session() {
        let (service, registry, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();

        let view = service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::Cancel,
            ))
            .await
            .unwrap();

        assert_eq!(view.phase, SessionPhase::Cancelled);
        assert!(!registry.contains(&channel_id).await);

        service.open_session(channel_id).await.unwrap();
    }

    #[tokio::test]
    async fn operations_on_finalized_channel_are_not_found() {
        let (service, _, _) = rigged_service().await;
        let channel_id = channel("general");
        service.open_session(channel_id.clone()).await.unwrap();
        service
            .handle(SessionRequest::new(
                channel_id.clone(),
                user("u-a"),
                SessionAction::Cancel,
            ))
            .await
            .unwrap();

        let result = service
            .handle(SessionRequest::new(
                channel_id,
                user("u-a"),
                SessionAction::Join,
            ))
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    // ─── Seeds ───────────────────────────────────────────────────────

    #[test]
    fn generated_seeds_vary() {
        let seeds: Vec<u64> = (0..8).map(|_| random_seed()).collect();
        let distinct: std::collections::HashSet<u64> = seeds.iter().copied().collect();
        assert!(distinct.len() > 1);
    }
}
