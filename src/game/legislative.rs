use super::deck::{Card, CardId};
use super::event::GameEvent;
use super::player::PlayerId;
use super::{Game, GameState, LegislativeSessionTurn, VetoStatus};
use crate::error::{GameError, InvariantViolation};

/// Splits `cards` into the chosen card and the rest, in their original order.
fn take_card<const N: usize, const M: usize>(cards: [Card; N], id: CardId) -> Option<(Card, [Card; M])> {
    let chosen = *cards.iter().find(|c| c.id == id)?;
    let rest = cards.iter().filter(|c| c.id != id).copied().collect::<Vec<_>>();
    Some((chosen, rest.try_into().ok()?))
}

impl Game {
    /// Called when the president draws the top three policies.
    pub fn draw_policies(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_player(player)?;

        let GameState::LegislativeSession { president, turn, .. } = &self.state else {
            return Err(GameError::StateMismatch);
        };
        let LegislativeSessionTurn::Draw = turn else {
            return Err(GameError::StateMismatch);
        };
        if player != *president {
            return Err(GameError::NotYourTurn);
        }

        let drawn = self.draw_cards(3)?;
        let available = drawn.len();
        let cards = match <[Card; 3]>::try_from(drawn) {
            Ok(cards) => cards,
            Err(_) => return Err(self.abort(InvariantViolation::InsufficientCards { requested: 3, available })),
        };
        if let GameState::LegislativeSession { turn, .. } = &mut self.state {
            *turn = LegislativeSessionTurn::President { cards };
        }
        self.log.private(player, GameEvent::PoliciesDrawn {
            president: player,
            cards: cards.to_vec(),
        });
        Ok(())
    }

    /// Called when the president discards one of their three policies, passing the other two on.
    pub fn discard_policy(&mut self, player: PlayerId, card: CardId) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_player(player)?;

        let veto_available = self.opts.veto && self.board.veto_unlocked();
        let GameState::LegislativeSession { president, chancellor, turn } = &mut self.state else {
            return Err(GameError::StateMismatch);
        };
        let LegislativeSessionTurn::President { cards } = *turn else {
            return Err(GameError::StateMismatch);
        };
        if player != *president {
            return Err(GameError::NotYourTurn);
        }
        let Some((discarded, passed)) = take_card::<3, 2>(cards, card) else {
            return Err(GameError::InvalidDiscard);
        };

        *turn = LegislativeSessionTurn::Chancellor {
            cards: passed,
            veto: if veto_available {
                VetoStatus::CanVeto
            } else {
                VetoStatus::CannotVeto
            },
        };
        let chancellor = *chancellor;
        self.deck.discard(discarded.party);
        self.log.private(player, GameEvent::PolicyDiscarded {
            player,
            card: discarded,
        });
        self.log.private(chancellor, GameEvent::PoliciesPassed {
            president: player,
            chancellor,
            cards: passed.to_vec(),
        });
        Ok(())
    }

    /// Called when the chancellor discards one of their two policies, enacting the other.
    pub fn chancellor_discard(&mut self, player: PlayerId, card: CardId) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_player(player)?;

        let GameState::LegislativeSession { president, chancellor, turn } = &self.state else {
            return Err(GameError::StateMismatch);
        };
        let LegislativeSessionTurn::Chancellor { cards, .. } = *turn else {
            return Err(GameError::StateMismatch);
        };
        if player != *chancellor {
            return Err(GameError::NotYourTurn);
        }
        let Some((discarded, [enacted])) = take_card::<2, 1>(cards, card) else {
            return Err(GameError::InvalidCard);
        };

        let president = *president;
        self.deck.discard(discarded.party);
        self.log.private(player, GameEvent::PolicyDiscarded {
            player,
            card: discarded,
        });
        self.enact_policy(president, player, enacted)
    }

    /// Called when the chancellor asks to veto the agenda.
    pub fn propose_veto(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_player(player)?;

        let GameState::LegislativeSession { chancellor, turn, .. } = &mut self.state else {
            return Err(GameError::StateMismatch);
        };
        let LegislativeSessionTurn::Chancellor { cards, veto } = *turn else {
            return Err(GameError::StateMismatch);
        };
        if player != *chancellor {
            return Err(GameError::NotYourTurn);
        }
        if veto != VetoStatus::CanVeto {
            return Err(GameError::StateMismatch);
        }

        *turn = LegislativeSessionTurn::VetoRequested { cards };
        self.log.public(GameEvent::VetoProposed { chancellor: player });
        Ok(())
    }

    /// Called when the president accepts or rejects a proposed veto.
    pub fn respond_veto(&mut self, player: PlayerId, approve: bool) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_player(player)?;

        let GameState::LegislativeSession { president, turn, .. } = &mut self.state else {
            return Err(GameError::StateMismatch);
        };
        let LegislativeSessionTurn::VetoRequested { cards } = *turn else {
            return Err(GameError::StateMismatch);
        };
        if player != *president {
            return Err(GameError::NotYourTurn);
        }

        if !approve {
            *turn = LegislativeSessionTurn::Chancellor {
                cards,
                veto: VetoStatus::VetoDenied,
            };
            self.log.public(GameEvent::VetoResolved {
                president: player,
                approved: false,
            });
            return Ok(());
        }

        for card in cards {
            self.deck.discard(card.party);
        }
        self.election_tracker += 1;
        self.log.public(GameEvent::VetoResolved {
            president: player,
            approved: true,
        });
        self.failed_government()
    }

    /// Plays a card onto the board, then either grants an executive power or starts the next round.
    fn enact_policy(&mut self, president: PlayerId, chancellor: PlayerId, card: Card) -> Result<(), GameError> {
        self.deck.enact(card.party);
        self.board.play_card(card.party);
        self.log.public(GameEvent::PolicyEnacted {
            president,
            chancellor,
            card,
            liberal_cards: self.board.liberal_cards,
            fascist_cards: self.board.fascist_cards,
        });

        if self.check_game_over() {
            return Ok(());
        }
        match self.board.get_executive_power(card.party) {
            Some(power) => self.start_executive_action(president, power),
            None => self.start_election(None),
        }
        Ok(())
    }
}
