use super::event::GameEvent;
use super::government::Government;
use super::player::{PlayerId, Role};
use super::votes::Votes;
use super::{Game, GameState, LegislativeSessionTurn, WinCondition};
use crate::error::GameError;

impl Game {
    /// Called when the president nominates a chancellor.
    pub fn nominate(&mut self, player: PlayerId, nominee: PlayerId) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_player(player)?;
        self.check_player(nominee)?;

        let GameState::Election { president, chancellor, eligible_chancellors, .. } = &mut self.state else {
            return Err(GameError::StateMismatch);
        };
        if chancellor.is_some() {
            return Err(GameError::StateMismatch);
        }
        if player != *president {
            return Err(GameError::NotYourTurn);
        }
        if !eligible_chancellors.includes(nominee) {
            return Err(GameError::IllegalTarget);
        }

        *chancellor = Some(nominee);
        let president = *president;
        self.log.public(GameEvent::ChancellorNominated {
            president,
            chancellor: nominee,
        });
        Ok(())
    }

    /// Called when a player casts their vote. The election resolves once every living player has voted.
    pub fn cast_vote(&mut self, player: PlayerId, vote: bool) -> Result<(), GameError> {
        self.check_not_over()?;
        let alive = self.check_player(player)?.alive;

        let GameState::Election { chancellor, votes, .. } = &mut self.state else {
            return Err(GameError::StateMismatch);
        };
        let Some(nominee) = *chancellor else {
            return Err(GameError::StateMismatch);
        };
        if !alive || votes.has_cast(player) {
            return Err(GameError::NotYourTurn);
        }

        votes.vote(player, vote);
        let outcome = votes.outcome();
        self.log.public(GameEvent::VoteCast {
            voter: player,
            nominee,
            vote,
        });

        if outcome.is_some() {
            self.end_voting()?;
        }
        Ok(())
    }

    /// Resolves a fully voted election.
    fn end_voting(&mut self) -> Result<(), GameError> {
        let GameState::Election { president, chancellor: Some(chancellor), votes, .. } = &self.state else {
            return Err(GameError::StateMismatch);
        };
        let Some(passed) = votes.outcome() else {
            return Err(GameError::StateMismatch);
        };
        let government = Government {
            president: *president,
            chancellor: *chancellor,
        };
        let (yes, no) = (votes.yes(), votes.no());

        if passed {
            self.election_tracker = 0;
        } else {
            self.election_tracker += 1;
        }
        self.log.public(GameEvent::ElectionResolved {
            president: government.president,
            chancellor: government.chancellor,
            passed,
            yes,
            no,
            election_tracker: self.election_tracker,
        });

        if !passed {
            return self.failed_government();
        }

        self.term_limits.elected(government);
        self.last_government = Some(government);

        // Check whether Hitler was elected chancellor
        if self.board.fascist_cards >= self.opts.hitler_zone {
            let player = &mut self.players[government.chancellor.0];
            if player.role == Role::Hitler {
                self.end_game(WinCondition::HitlerElected);
                return Ok(());
            }
            player.not_hitler = true;
        }

        self.state = GameState::LegislativeSession {
            president: government.president,
            chancellor: government.chancellor,
            turn: LegislativeSessionTurn::Draw,
        };
        Ok(())
    }

    /// Moves on after a government fails to form or vetoes its agenda,
    /// enacting the top policy if too many governments have failed in a row.
    pub(super) fn failed_government(&mut self) -> Result<(), GameError> {
        if self.election_tracker >= self.opts.chaos_threshold {
            self.chaos_policy()?;
            if self.game_over() {
                return Ok(());
            }
        }
        self.start_election(None);
        Ok(())
    }

    /// Enacts the top card of the deck. No executive power is granted.
    fn chaos_policy(&mut self) -> Result<(), GameError> {
        let card = self.draw_cards(1)?[0];
        self.deck.enact(card.party);
        self.board.play_card(card.party);
        self.election_tracker = 0;
        self.term_limits.clear();
        log::debug!("Chaos: enacted a {} policy", card.party);
        self.log.public(GameEvent::ChaosPolicy {
            party: card.party,
            liberal_cards: self.board.liberal_cards,
            fascist_cards: self.board.fascist_cards,
        });
        self.check_game_over();
        Ok(())
    }

    /// Begins a new round, with either the given president or the next one in rotation.
    pub(super) fn start_election(&mut self, president: Option<PlayerId>) {
        let special = president.is_some();
        let president = president.unwrap_or_else(|| {
            self.presidential_turn = self.next_player(self.presidential_turn);
            self.players[self.presidential_turn].id
        });

        self.round += 1;
        self.state = GameState::Election {
            president,
            chancellor: None,
            eligible_chancellors: self.eligible_players().exclude(president).not_term_limited().make(),
            votes: Votes::new(self.num_players(), self.num_players_alive()),
        };
        self.log.public(GameEvent::ElectionStarted {
            round: self.round,
            president,
            special,
        });
    }
}
