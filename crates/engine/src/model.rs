//! The game model: factories, center, supply, boards, and the round state machine.

use std::mem;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    Color, ConfigError, Destination, EngineError, GameConfig, InvariantError, Move, MoveError,
    PlayerBoard, PlayerIdx, Source, TileSupply, Token, ALL_COLORS, BOARD_SIZE, FACTORY_CAPACITY,
    TILES_PER_COLOR, TILE_COLORS,
};

/// Round lifecycle: `Setup -> Drafting -> Cleanup -> (Setup | GameOver)`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for factories to be dealt
    Setup,
    /// Players drafting
    Drafting,
    /// Every source drained; waiting for wall tiling and scoring
    Cleanup,
    /// Terminal; no more rounds
    GameOver,
}

/// Where every tile of the game currently is, summed by color.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TileCensus {
    pub colors: [usize; TILE_COLORS],
    pub markers: usize,
}

/// Complete game state plus the rules that move it forward.
///
/// All mutation goes through the lifecycle operations, so the model is never
/// observed half way through a move or a round transition.
#[derive(Clone, Debug)]
pub struct Model {
    config: GameConfig,
    boards: Vec<PlayerBoard>,
    factories: Vec<Vec<Color>>,
    center: Vec<Token>,
    supply: TileSupply,

    /// Whose turn it is while drafting
    next_player: PlayerIdx,
    /// Who opened the current round
    round_starter: PlayerIdx,

    phase: Phase,
    /// Number of rounds completed so far (0 at game start)
    round: u32,
    endgame_scored: bool,
}

impl Model {
    /// A fresh two-player game in [`Phase::Setup`].
    pub fn start() -> Self {
        Self::build(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let factory_count = config.factory_count().unwrap_or_default();
        Model {
            boards: (0..config.players).map(|_| PlayerBoard::empty()).collect(),
            // Independent containers, one per factory
            factories: (0..factory_count)
                .map(|_| Vec::with_capacity(FACTORY_CAPACITY))
                .collect(),
            center: vec![Token::Marker],
            supply: TileSupply::full(),
            next_player: 0,
            round_starter: 0,
            phase: Phase::Setup,
            round: 0,
            endgame_scored: false,
            config,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_count(&self) -> usize {
        self.boards.len()
    }

    pub fn boards(&self) -> &[PlayerBoard] {
        &self.boards
    }

    pub fn board(&self, player: PlayerIdx) -> Option<&PlayerBoard> {
        self.boards.get(player)
    }

    pub fn factories(&self) -> &[Vec<Color>] {
        &self.factories
    }

    pub fn center(&self) -> &[Token] {
        &self.center
    }

    pub fn draw_pile(&self) -> &[Color] {
        self.supply.draw_pile()
    }

    pub fn discard_pile(&self) -> &[Color] {
        self.supply.discard_pile()
    }

    pub fn next_player(&self) -> PlayerIdx {
        self.next_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Board whose floor line holds the first-player marker, if any.
    pub fn marker_holder(&self) -> Option<PlayerIdx> {
        self.boards.iter().position(PlayerBoard::holds_marker)
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    // =========================================================================
    // Round setup
    // =========================================================================

    /// Deal [`FACTORY_CAPACITY`] tiles to every factory, drawing uniformly
    /// without replacement. The discard pile is poured back into the draw
    /// pile first if the draw pile cannot cover the deal.
    pub fn setup_round(&mut self, rng: &mut impl Rng) -> Result<(), EngineError> {
        self.expect_phase(Phase::Setup, "setup_round")?;

        let needed = self.factories.len() * FACTORY_CAPACITY;
        if self.supply.draw_pile().len() < needed {
            debug!(
                draw = self.supply.draw_pile().len(),
                discard = self.supply.discard_pile().len(),
                "replenishing draw pile"
            );
            self.supply.replenish();
        }

        let available = self.supply.draw_pile().len();
        if available < needed {
            self.check_conservation()?;
            if self.config.supply_covers_every_round() {
                return Err(InvariantError::DrawPileExhausted { needed, available }.into());
            }
            warn!(needed, available, "tile supply short, dealing partial factories");
        }

        for factory in &mut self.factories {
            for _ in 0..FACTORY_CAPACITY {
                match self.supply.draw(rng) {
                    Some(color) => factory.push(color),
                    None => break,
                }
            }
        }

        self.round_starter = self.next_player;
        // A supply that ran completely dry deals nothing to draft
        self.phase = if self.round_over() {
            Phase::Cleanup
        } else {
            Phase::Drafting
        };
        debug!(
            round = self.round,
            starter = self.next_player,
            draw = self.supply.draw_pile().len(),
            "factories dealt"
        );
        self.debug_check_conservation();
        Ok(())
    }

    // =========================================================================
    // Drafting
    // =========================================================================

    /// Number of `color` tiles in `source`.
    fn source_count(&self, source: Source, color: Color) -> Result<usize, MoveError> {
        let count = match source {
            Source::Factory(idx) => self
                .factories
                .get(idx)
                .ok_or(MoveError::NoSuchFactory(idx))?
                .iter()
                .filter(|&&tile| tile == color)
                .count(),
            Source::Center => self
                .center
                .iter()
                .filter(|&&token| token == Token::Tile(color))
                .count(),
        };
        Ok(count)
    }

    /// Check `mv` for `player` without changing anything.
    pub fn validate_move(&self, mv: &Move, player: PlayerIdx) -> Result<(), MoveError> {
        if self.phase != Phase::Drafting {
            return Err(MoveError::WrongPhase(self.phase));
        }
        if player != self.next_player {
            return Err(MoveError::NotPlayersTurn {
                expected: self.next_player,
                actual: player,
            });
        }
        if self.source_count(mv.source, mv.color)? == 0 {
            return Err(MoveError::ColorNotInSource {
                from: mv.source,
                color: mv.color,
            });
        }
        match mv.destination {
            // Floor always allowed
            Destination::Floor => Ok(()),
            Destination::PatternLine(row) => self.boards[player].check_pattern_line(row, mv.color),
        }
    }

    pub fn is_valid_move(&self, mv: &Move, player: PlayerIdx) -> bool {
        self.validate_move(mv, player).is_ok()
    }

    /// Apply a draft for the player whose turn it is.
    ///
    /// The move is validated first; a rejected move returns the reason and
    /// leaves the model untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let player = self.next_player;
        if let Err(err) = self.validate_move(&mv, player) {
            warn!(player, %mv, %err, "rejected move");
            return Err(err);
        }

        let taken = self.source_count(mv.source, mv.color)?;

        // Step 1: hand the drafted tiles to the board
        let board = &mut self.boards[player];
        let overflow = match mv.destination {
            Destination::Floor => board.add_to_floor_line(mv.color, taken),
            Destination::PatternLine(row) => board.add_to_pattern_line(row, mv.color, taken)?,
        };
        self.supply.discard(overflow);

        // Step 2: drain the source
        match mv.source {
            Source::Factory(idx) => {
                let factory = mem::take(&mut self.factories[idx]);
                self.center.extend(
                    factory
                        .into_iter()
                        .filter(|&tile| tile != mv.color)
                        .map(Token::Tile),
                );
            }
            Source::Center => {
                let took_marker = self.center.contains(&Token::Marker);
                self.center
                    .retain(|&token| token != Token::Tile(mv.color) && !token.is_marker());
                if took_marker {
                    let bumped = self.boards[player].place_marker();
                    self.supply.discard(bumped);
                }
            }
        }

        debug!(player, %mv, taken, "move applied");

        self.next_player = (player + 1) % self.boards.len();
        if self.round_over() {
            self.phase = Phase::Cleanup;
            debug!(round = self.round, "round drafted out");
        }
        self.debug_check_conservation();
        Ok(())
    }

    /// True when every factory is empty and no colored tile is left in the
    /// center. A center holding only the marker counts as empty.
    pub fn round_over(&self) -> bool {
        self.factories.iter().all(Vec::is_empty)
            && !self.center.iter().any(|token| token.color().is_some())
    }

    /// Sources that still hold tiles: factories first, then the center.
    pub fn available_sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self
            .factories
            .iter()
            .enumerate()
            .filter(|(_, factory)| !factory.is_empty())
            .map(|(idx, _)| Source::Factory(idx))
            .collect();
        if self.center.iter().any(|token| token.color().is_some()) {
            sources.push(Source::Center);
        }
        sources
    }

    /// Every valid move for the player whose turn it is.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.phase != Phase::Drafting {
            return Vec::new();
        }

        let destinations = (0..BOARD_SIZE)
            .map(Destination::PatternLine)
            .chain([Destination::Floor]);

        let mut moves = Vec::new();
        for source in self.available_sources() {
            for color in ALL_COLORS {
                for destination in destinations.clone() {
                    let mv = Move::new(source, color, destination);
                    if self.is_valid_move(&mv, self.next_player) {
                        moves.push(mv);
                    }
                }
            }
        }
        moves
    }

    // =========================================================================
    // Round cleanup and endgame
    // =========================================================================

    /// Tile walls and score every board, then hand the first turn of the next
    /// round to whoever holds the marker.
    pub fn cleanup_round(&mut self) -> Result<(), EngineError> {
        self.expect_phase(Phase::Cleanup, "cleanup_round")?;

        let holder = self.marker_holder();
        for (player, board) in self.boards.iter_mut().enumerate() {
            let before = board.score();
            let discard = board.score_round()?;
            debug!(
                player,
                before,
                after = board.score(),
                discarded = discard.len(),
                "round scored"
            );
            self.supply.discard(discard);
        }

        // score_round dropped the marker from the holder's floor
        if holder.is_some() {
            self.center.push(Token::Marker);
        }
        self.next_player = holder.unwrap_or(self.round_starter);
        self.round += 1;

        self.phase = if self.game_over() {
            Phase::GameOver
        } else {
            Phase::Setup
        };
        info!(
            round = self.round,
            next_player = self.next_player,
            phase = ?self.phase,
            "round cleaned up"
        );
        self.debug_check_conservation();
        Ok(())
    }

    /// True once any board has a complete wall row.
    pub fn game_over(&self) -> bool {
        self.boards.iter().any(PlayerBoard::has_complete_row)
    }

    /// Award endgame bonuses to every board. Allowed once, after the game ended.
    pub fn score_endgame(&mut self) -> Result<(), EngineError> {
        self.expect_phase(Phase::GameOver, "score_endgame")?;
        if self.endgame_scored {
            return Err(EngineError::EndgameAlreadyScored);
        }
        for (player, board) in self.boards.iter_mut().enumerate() {
            let bonus = board.score_endgame();
            info!(player, bonus, score = board.score(), "endgame bonus");
        }
        self.endgame_scored = true;
        Ok(())
    }

    /// Player with the highest score.
    ///
    /// Ties go to the player with more complete wall rows, then to the lower
    /// player index.
    pub fn winner(&self) -> PlayerIdx {
        self.boards
            .iter()
            .enumerate()
            .max_by_key(|&(idx, board)| {
                (
                    board.score(),
                    board.complete_rows(),
                    std::cmp::Reverse(idx),
                )
            })
            .map_or(0, |(idx, _)| idx)
    }

    // =========================================================================
    // Tile conservation
    // =========================================================================

    /// Count every tile across supply, factories, center, and boards.
    pub fn tile_census(&self) -> TileCensus {
        let mut census = TileCensus {
            colors: self.supply.counts(),
            markers: 0,
        };
        for tile in self.factories.iter().flatten() {
            census.colors[tile.index()] += 1;
        }
        for token in &self.center {
            match token {
                Token::Tile(color) => census.colors[color.index()] += 1,
                Token::Marker => census.markers += 1,
            }
        }
        for board in &self.boards {
            for (total, count) in census.colors.iter_mut().zip(board.tile_counts()) {
                *total += count;
            }
            census.markers += board
                .floor_line()
                .iter()
                .filter(|token| token.is_marker())
                .count();
        }
        census
    }

    /// Every color at its full count and exactly one marker.
    pub fn check_conservation(&self) -> Result<(), InvariantError> {
        let census = self.tile_census();
        for color in ALL_COLORS {
            let found = census.colors[color.index()];
            if found != TILES_PER_COLOR {
                return Err(InvariantError::TileCount {
                    color,
                    expected: TILES_PER_COLOR,
                    found,
                });
            }
        }
        if census.markers != 1 {
            return Err(InvariantError::MarkerCount(census.markers));
        }
        Ok(())
    }

    fn debug_check_conservation(&self) {
        debug_assert_eq!(self.check_conservation(), Ok(()));
    }
}
