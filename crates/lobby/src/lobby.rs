use crate::Directory;
use crate::Rejection;
use parlor_core::ID;
use parlor_core::Player;
use parlor_core::Turns;
use parlor_core::Unique;
use parlor_engine::Action;
use parlor_engine::Game;
use parlor_engine::GameError;
use parlor_engine::GameSummary;
use parlor_engine::GameView;
use parlor_engine::Kind;
use parlor_store::GameStore;
use parlor_store::StoreError;
use std::sync::Arc;

/// Front door for game lifecycle operations.
///
/// Every operation authenticates first, loads fresh state, runs the rule
/// engine against it, and persists through the store's compare-and-swap
/// before anything is returned. Views leaving here are always concealed
/// for the caller and carry directory snapshots of the seated players.
pub struct Lobby {
    store: Arc<dyn GameStore>,
    directory: Arc<dyn Directory>,
}

impl Lobby {
    pub fn new(store: Arc<dyn GameStore>, directory: Arc<dyn Directory>) -> Self {
        Self { store, directory }
    }

    /// Opens a game of the given kind hosted by the caller. `rounds`
    /// overrides the round limit for kinds that have one.
    pub async fn create(
        &self,
        caller: Option<ID<Player>>,
        kind: Kind,
        rounds: Option<Turns>,
    ) -> Result<GameView, Rejection> {
        let caller = authenticate(caller)?;
        let game = Game::open_with(caller, kind, rounds);
        let saved = self.store.save(&game).await?;
        log::info!("[lobby] {} opened {} game {}", caller, kind, saved.id());
        Ok(self.render(&saved, caller).await)
    }

    /// All games of one kind, as index summaries.
    pub async fn list(
        &self,
        caller: Option<ID<Player>>,
        kind: Kind,
    ) -> Result<Vec<GameSummary>, Rejection> {
        authenticate(caller)?;
        self.index(kind).await
    }

    /// The caller's concealed view of one game.
    pub async fn find(
        &self,
        caller: Option<ID<Player>>,
        id: ID<Game>,
    ) -> Result<GameView, Rejection> {
        let caller = authenticate(caller)?;
        let game = self.store.load(id).await?;
        Ok(self.render(&game, caller).await)
    }

    /// Seats the caller as the second player.
    pub async fn join(
        &self,
        caller: Option<ID<Player>>,
        id: ID<Game>,
    ) -> Result<GameView, Rejection> {
        let caller = authenticate(caller)?;
        let mut game = self.store.load(id).await?;
        if let Err(reason) = game.join(caller) {
            return Err(self.rejected(reason, &game, caller).await);
        }
        let saved = self.persist(&game, caller).await?;
        Ok(self.render(&saved, caller).await)
    }

    /// Concedes on behalf of the caller.
    pub async fn forfeit(
        &self,
        caller: Option<ID<Player>>,
        id: ID<Game>,
    ) -> Result<GameView, Rejection> {
        let caller = authenticate(caller)?;
        let mut game = self.store.load(id).await?;
        if let Err(reason) = game.forfeit(caller) {
            return Err(self.rejected(reason, &game, caller).await);
        }
        let saved = self.persist(&game, caller).await?;
        Ok(self.render(&saved, caller).await)
    }

    /// Withdraws an open game entirely; returns the refreshed index of
    /// its kind.
    pub async fn delete(
        &self,
        caller: Option<ID<Player>>,
        id: ID<Game>,
    ) -> Result<Vec<GameSummary>, Rejection> {
        let caller = authenticate(caller)?;
        let game = self.store.load(id).await?;
        if let Err(reason) = game.deletable(caller) {
            return Err(self.rejected(reason, &game, caller).await);
        }
        self.store.delete(id).await?;
        log::info!("[lobby] {} deleted game {}", caller, id);
        self.index(game.kind()).await
    }

    /// Validates and applies one move on behalf of the caller.
    pub async fn apply(
        &self,
        caller: Option<ID<Player>>,
        id: ID<Game>,
        action: Action,
    ) -> Result<GameView, Rejection> {
        let caller = authenticate(caller)?;
        let mut game = self.store.load(id).await?;
        if let Err(reason) = game.apply(caller, action) {
            return Err(self.rejected(reason, &game, caller).await);
        }
        let saved = self.persist(&game, caller).await?;
        Ok(self.render(&saved, caller).await)
    }
}

impl Lobby {
    /// Conditional write. A lost race surfaces as a stale-state conflict
    /// carrying the record as it stands now, so the caller can re-render
    /// and retry.
    async fn persist(&self, game: &Game, caller: ID<Player>) -> Result<Game, Rejection> {
        match self.store.save(game).await {
            Ok(saved) => Ok(saved),
            Err(StoreError::VersionConflict) => {
                let current = self.store.load(game.id()).await?;
                let reason = GameError::Conflict("stale game state");
                Err(self.rejected(reason, &current, caller).await)
            }
            Err(error) => Err(Rejection::from(error)),
        }
    }
    async fn rejected(&self, reason: GameError, game: &Game, caller: ID<Player>) -> Rejection {
        Rejection::new(reason, self.render(game, caller).await)
    }
    async fn render(&self, game: &Game, caller: ID<Player>) -> GameView {
        let one = self.snapshot(game.player_one()).await;
        let two = match game.player_two() {
            Some(id) => Some(self.snapshot(id).await),
            None => None,
        };
        GameView::conceal(game, Some(caller)).with_players(one, two)
    }
    async fn index(&self, kind: Kind) -> Result<Vec<GameSummary>, Rejection> {
        let mut summaries = Vec::new();
        for game in self.store.list(kind).await? {
            let one = self.snapshot(game.player_one()).await;
            let two = match game.player_two() {
                Some(id) => Some(self.snapshot(id).await),
                None => None,
            };
            summaries.push(GameSummary::of(&game).with_players(one, two));
        }
        Ok(summaries)
    }
    async fn snapshot(&self, id: ID<Player>) -> Player {
        match self.directory.lookup(id).await {
            Some(player) => player,
            None => Player::unknown(id),
        }
    }
}

fn authenticate(caller: Option<ID<Player>>) -> Result<ID<Player>, Rejection> {
    caller.ok_or(Rejection::bare(GameError::Unauthenticated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Roster;
    use parlor_core::Arbitrary;
    use parlor_engine::Cell;
    use parlor_engine::Choice;
    use parlor_engine::Slot;
    use parlor_engine::StateView;
    use parlor_store::MemoryStore;

    async fn fixture() -> (Lobby, ID<Player>, ID<Player>) {
        let host = ID::random();
        let guest = ID::random();
        let roster = Roster::new();
        roster.enroll(Player::new(host, "astrid", 120)).await;
        roster.enroll(Player::new(guest, "bjorn", 80)).await;
        let lobby = Lobby::new(Arc::new(MemoryStore::new()), Arc::new(roster));
        (lobby, host, guest)
    }

    fn place(label: &str) -> Action {
        Action::Place(Cell::try_from(label).unwrap())
    }

    #[tokio::test]
    async fn anonymous_callers_rejected_everywhere() {
        let (lobby, host, _) = fixture().await;
        let view = lobby.create(Some(host), Kind::TicTacToe, None).await.unwrap();
        for rejection in [
            lobby.create(None, Kind::TicTacToe, None).await.unwrap_err(),
            lobby.list(None, Kind::TicTacToe).await.unwrap_err(),
            lobby.find(None, view.id).await.unwrap_err(),
            lobby.join(None, view.id).await.unwrap_err(),
            lobby.apply(None, view.id, place("A1")).await.unwrap_err(),
            lobby.delete(None, view.id).await.unwrap_err(),
        ] {
            assert_eq!(rejection.reason(), &GameError::Unauthenticated);
            assert!(rejection.game().is_none());
        }
    }

    #[tokio::test]
    async fn create_renders_the_host_snapshot() {
        let (lobby, host, _) = fixture().await;
        let view = lobby.create(Some(host), Kind::Battleships, None).await.unwrap();
        assert_eq!(view.kind, Kind::Battleships);
        assert_eq!(view.turn, 0);
        assert_eq!(view.player_one.username(), "astrid");
        assert!(view.player_two.is_none());
    }

    #[tokio::test]
    async fn unenrolled_players_fall_back_to_placeholders() {
        let (lobby, _, _) = fixture().await;
        let stranger = ID::random();
        let view = lobby.create(Some(stranger), Kind::TicTacToe, None).await.unwrap();
        assert_eq!(view.player_one.username(), "unknown");
        assert_eq!(view.player_one.points(), 0);
    }

    #[tokio::test]
    async fn list_filters_by_kind() {
        let (lobby, host, guest) = fixture().await;
        let ttt = lobby.create(Some(host), Kind::TicTacToe, None).await.unwrap();
        lobby.create(Some(guest), Kind::Battleships, None).await.unwrap();
        let summaries = lobby.list(Some(host), Kind::TicTacToe).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, ttt.id);
        assert_eq!(summaries[0].player_one.username(), "astrid");
    }

    #[tokio::test]
    async fn join_full_game_rejected_with_current_state() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::TicTacToe, None).await.unwrap();
        lobby.join(Some(guest), view.id).await.unwrap();
        let stranger = ID::random();
        let rejection = lobby.join(Some(stranger), view.id).await.unwrap_err();
        assert_eq!(rejection.reason(), &GameError::Conflict("game already full"));
        let current = rejection.game().unwrap();
        assert_eq!(current.player_two.as_ref().unwrap().username(), "bjorn");
    }

    #[tokio::test]
    async fn tictactoe_win_plays_through_the_lobby() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::TicTacToe, None).await.unwrap();
        lobby.join(Some(guest), view.id).await.unwrap();
        let script = [
            (host, "A1"),
            (guest, "B1"),
            (host, "A2"),
            (guest, "B2"),
            (host, "A3"),
        ];
        let mut last = None;
        for (mover, label) in script {
            last = Some(
                lobby
                    .apply(Some(mover), view.id, place(label))
                    .await
                    .unwrap(),
            );
        }
        let last = last.unwrap();
        assert!(last.finished);
        assert_eq!(last.winners, vec![host]);
        assert_eq!(last.turn, 5);
        // Further moves bounce off the terminal record but still show it.
        let rejection = lobby
            .apply(Some(guest), view.id, place("C1"))
            .await
            .unwrap_err();
        assert_eq!(
            rejection.reason(),
            &GameError::Conflict("game already finished")
        );
        assert!(rejection.game().unwrap().finished);
    }

    #[tokio::test]
    async fn rps_round_limit_set_at_creation() {
        let (lobby, host, _) = fixture().await;
        let view = lobby
            .create(Some(host), Kind::RockPaperScissors, Some(5))
            .await
            .unwrap();
        let StateView::RockPaperScissors { limit, .. } = view.state else {
            panic!("wrong view variant");
        };
        assert_eq!(limit, 5);
        // Without an override the default applies.
        let view = lobby
            .create(Some(host), Kind::RockPaperScissors, None)
            .await
            .unwrap();
        let StateView::RockPaperScissors { limit, .. } = view.state else {
            panic!("wrong view variant");
        };
        assert_eq!(limit, 3);
    }

    #[tokio::test]
    async fn rps_throws_concealed_from_the_opponent() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::RockPaperScissors, None).await.unwrap();
        lobby.join(Some(guest), view.id).await.unwrap();
        lobby
            .apply(Some(host), view.id, Action::Throw(Choice::Rock))
            .await
            .unwrap();
        let seen = lobby.find(Some(guest), view.id).await.unwrap();
        let StateView::RockPaperScissors { one, two, .. } = seen.state else {
            panic!("wrong view variant");
        };
        assert_eq!(one, Slot::Submitted);
        assert_eq!(two, Slot::Empty);
        let seen = lobby.find(Some(host), view.id).await.unwrap();
        let StateView::RockPaperScissors { one, .. } = seen.state else {
            panic!("wrong view variant");
        };
        assert_eq!(one, Slot::Thrown(Choice::Rock));
    }

    #[tokio::test]
    async fn forfeit_awards_the_opponent() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::RockPaperScissors, None).await.unwrap();
        // No second seat yet: forfeiting is not an exit path.
        let rejection = lobby.forfeit(Some(host), view.id).await.unwrap_err();
        assert_eq!(
            rejection.reason(),
            &GameError::Conflict("awaiting player two; delete instead")
        );
        lobby.join(Some(guest), view.id).await.unwrap();
        let after = lobby.forfeit(Some(guest), view.id).await.unwrap();
        assert!(after.finished);
        assert_eq!(after.winners, vec![host]);
    }

    #[tokio::test]
    async fn delete_rules_and_refreshed_index() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::TicTacToe, None).await.unwrap();
        let rejection = lobby.delete(Some(guest), view.id).await.unwrap_err();
        assert_eq!(
            rejection.reason(),
            &GameError::Forbidden("only the host can delete")
        );
        let remaining = lobby.delete(Some(host), view.id).await.unwrap();
        assert!(remaining.is_empty());
        let rejection = lobby.find(Some(host), view.id).await.unwrap_err();
        assert_eq!(rejection.reason(), &GameError::NotFound);
        assert!(rejection.game().is_none());
    }

    #[tokio::test]
    async fn joined_games_cannot_be_deleted() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::Battleships, None).await.unwrap();
        lobby.join(Some(guest), view.id).await.unwrap();
        let rejection = lobby.delete(Some(host), view.id).await.unwrap_err();
        assert_eq!(
            rejection.reason(),
            &GameError::Conflict("only open games can be deleted")
        );
    }

    #[tokio::test]
    async fn rejected_moves_leave_the_stored_record_unchanged() {
        let (lobby, host, guest) = fixture().await;
        let view = lobby.create(Some(host), Kind::TicTacToe, None).await.unwrap();
        lobby.join(Some(guest), view.id).await.unwrap();
        lobby.apply(Some(host), view.id, place("B2")).await.unwrap();
        let before = lobby.find(Some(host), view.id).await.unwrap();
        // Out of turn.
        lobby
            .apply(Some(host), view.id, place("A1"))
            .await
            .unwrap_err();
        let after = lobby.find(Some(host), view.id).await.unwrap();
        assert_eq!(
            serde_json::to_value(&before).unwrap(),
            serde_json::to_value(&after).unwrap()
        );
    }
}
