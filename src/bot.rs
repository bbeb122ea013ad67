// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot owns configuration and a base seed, and nothing mutable. Every turn is
// decided from the snapshot alone: filter lethal moves, then score the rest.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::{Config, SelectorConfig};
use crate::debug_logger::DebugLogger;
use crate::moves::safe_moves;
use crate::selector::{choose_move, turn_seed, Decision};
use crate::types::{Battlesnake, Board, Direction, Game, MoveResponse};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    /// Mixed with the turn number to seed each turn's generator
    base_seed: u64,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        let base_seed = match config.selector.seed {
            Some(seed) => seed,
            None => rand::rng().random(),
        };

        Bot {
            config,
            base_seed,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Attaches a turn logger; turns are written only if the logger is enabled
    pub fn with_debug_logger(mut self, debug_logger: DebugLogger) -> Self {
        self.debug_logger = debug_logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("Starting game {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("Ending game {}", game.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on the blocking pool under the effective time budget.
    /// If it does not finish in time the configured fallback move is sent.
    pub async fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> MoveResponse {
        let start_time = Instant::now();

        info!("Turn {}: Calculating move for game {}", turn, game.id);

        let seed = turn_seed(self.base_seed, *turn);
        let board_clone = board.clone();
        let you_clone = you.clone();
        let selector = self.config.selector.clone();

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let decision = decide_within(budget, self.config.selector.fallback_move, *turn, move || {
            let mut rng = StdRng::seed_from_u64(seed);
            Bot::compute_move(&board_clone, &you_clone, &selector, &mut rng)
        })
        .await;

        info!(
            "Turn {}: Chose {} (time: {}ms)",
            turn,
            decision.direction,
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(&game.id, *turn, &you.id, seed, board.clone(), &decision);

        MoveResponse {
            direction: decision.direction,
            shout: decision.shout,
        }
    }

    /// Filters lethal moves and selects among the survivors.
    /// Pure given its inputs; the RNG is only consulted by the random heuristic.
    pub fn compute_move<R: Rng>(
        board: &Board,
        you: &Battlesnake,
        selector: &SelectorConfig,
        rng: &mut R,
    ) -> Decision {
        let moves = safe_moves(you.head, board);
        choose_move(&moves, you.head, board, selector, rng)
    }
}

/// Runs `work` on the blocking pool and waits at most `budget` for it.
/// An overrun or a panicked task answers `fallback` with an empty shout.
pub async fn decide_within<F>(budget: Duration, fallback: Direction, turn: i32, work: F) -> Decision
where
    F: FnOnce() -> Decision + Send + 'static,
{
    let fallback_decision = Decision {
        direction: fallback,
        shout: String::new(),
    };

    match tokio::time::timeout(budget, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(decision)) => decision,
        Ok(Err(e)) => {
            warn!("Turn {}: move computation failed: {}", turn, e);
            fallback_decision
        }
        Err(_) => {
            warn!(
                "Turn {}: move computation exceeded {}ms budget",
                turn,
                budget.as_millis()
            );
            fallback_decision
        }
    }
}
