use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::entities::games::Game;
use crate::repos::games;
use crate::services::game_flow::GameFlowService;
use crate::store::{with_txn, DocumentStore, TxnStep};
use crate::AppError;

#[derive(Debug, Clone)]
pub struct GameFlowMutationResult {
    pub final_game: Game,
    pub transitions: Vec<GameTransition>,
}

impl<S: DocumentStore + ?Sized> GameFlowService<S> {
    /// Apply `mutation` to the freshest copy of a game inside a transaction.
    ///
    /// The mutation validates against the document it is handed and edits it
    /// in place; an `Err` aborts with nothing written. It may run more than
    /// once when another writer commits first, so it must not have side
    /// effects beyond the document. An unchanged document is not rewritten.
    pub async fn run_mutation<F>(
        &self,
        game_id: &str,
        mut mutation: F,
    ) -> Result<GameFlowMutationResult, AppError>
    where
        F: FnMut(&mut Game, i64) -> Result<Vec<GameTransition>, AppError> + Send,
    {
        let clock = &self.clock;
        let key = games::key(game_id);

        with_txn(&*self.store, &key, |current: Option<Game>| {
            // Re-read per attempt so a retry checks deadlines at its own time
            let now = clock.now_ms();
            let original = current.ok_or_else(|| games::not_found(game_id))?;
            let before = GameLifecycleView::of(&original);

            let mut game = original.clone();
            let mut explicit_transitions = mutation(&mut game, now)?;

            if game == original {
                return Ok(TxnStep::Keep(GameFlowMutationResult {
                    final_game: original,
                    transitions: explicit_transitions,
                }));
            }

            game.updated_at = now;
            let after = GameLifecycleView::of(&game);
            let mut transitions = derive_game_transitions(&before, &after);

            // Merge explicit transitions
            transitions.append(&mut explicit_transitions);

            Ok(TxnStep::Put(
                game.clone(),
                GameFlowMutationResult {
                    final_game: game,
                    transitions,
                },
            ))
        })
        .await
    }
}
