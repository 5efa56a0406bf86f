use super::{board::Board, party::Party};
use crate::error::InvariantViolation;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::iter::repeat;

/// Identifies one physical policy card from the moment it is drawn until it is discarded or enacted.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
pub struct CardId(pub u32);

/// A policy card in the hands of the president or chancellor.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Card {
    pub id: CardId,
    pub party: Party,
}

/// Public view of the piles; never reveals which cards they contain.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DeckCounts {
    pub draw_pile: usize,
    pub discard_pile: usize,
}

#[derive(Clone, Debug)]
pub struct Deck {
    /// Total number of liberal cards in the deck, discard pile, hands and game board
    liberal: usize,
    /// Total number of fascist cards in the deck, discard pile, hands and game board
    fascist: usize,
    /// The current draw pile; the front is the top of the deck
    draw: VecDeque<Party>,
    /// The discard pile
    discard: Vec<Party>,
    /// Cards drawn but not yet discarded or enacted, indexed by party
    held: [usize; 2],
    /// Source of card identities
    next_card_id: u32,
}

fn slot(party: Party) -> usize {
    match party {
        Party::Liberal => 0,
        Party::Fascist => 1,
    }
}

impl Deck {
    /// Creates a full, shuffled draw pile.
    pub fn new(liberal: usize, fascist: usize, rng: &mut impl Rng) -> Self {
        let mut cards = Vec::with_capacity(liberal + fascist);
        cards.extend(repeat(Party::Liberal).take(liberal));
        cards.extend(repeat(Party::Fascist).take(fascist));
        cards.shuffle(rng);
        Self {
            liberal,
            fascist,
            draw: cards.into(),
            discard: vec![],
            held: [0, 0],
            next_card_id: 0,
        }
    }

    /// Draws `count` cards from the top of the deck, shuffling the discard pile
    /// underneath the remaining draw pile first if there are not enough cards.
    pub fn draw(&mut self, count: usize, rng: &mut impl Rng) -> Result<Vec<Card>, InvariantViolation> {
        self.ensure(count, rng)?;
        let cards = self
            .draw
            .drain(..count)
            .map(|party| {
                let id = CardId(self.next_card_id);
                self.next_card_id += 1;
                Card { id, party }
            })
            .collect::<Vec<_>>();
        for card in &cards {
            self.held[slot(card.party)] += 1;
        }
        Ok(cards)
    }

    /// Looks at the top `count` cards without drawing them.
    pub fn peek(&mut self, count: usize, rng: &mut impl Rng) -> Result<Vec<Party>, InvariantViolation> {
        self.ensure(count, rng)?;
        Ok(self.draw.iter().take(count).copied().collect())
    }

    /// Returns a held card to the discard pile.
    pub fn discard(&mut self, party: Party) {
        self.release(party);
        self.discard.push(party);
    }

    /// Retires a held card onto the board; it never returns to the deck.
    pub fn enact(&mut self, party: Party) {
        self.release(party);
    }

    /// The number of cards in each pile.
    pub fn remaining(&self) -> DeckCounts {
        DeckCounts {
            draw_pile: self.draw.len(),
            discard_pile: self.discard.len(),
        }
    }

    /// Checks that every card of each kind is accounted for exactly once.
    pub fn check(&self, board: &Board) -> Result<(), InvariantViolation> {
        for (party, total, enacted) in [
            (Party::Liberal, self.liberal, board.liberal_cards),
            (Party::Fascist, self.fascist, board.fascist_cards),
        ] {
            let found = self.draw.iter().filter(|p| **p == party).count()
                + self.discard.iter().filter(|p| **p == party).count()
                + self.held[slot(party)]
                + enacted;
            if found != total {
                return Err(InvariantViolation::DeckAccounting {
                    party: party.to_string(),
                    expected: total,
                    found,
                });
            }
        }
        Ok(())
    }

    fn ensure(&mut self, count: usize, rng: &mut impl Rng) -> Result<(), InvariantViolation> {
        if self.draw.len() >= count {
            return Ok(());
        }
        let available = self.draw.len() + self.discard.len();
        if available < count {
            return Err(InvariantViolation::InsufficientCards {
                requested: count,
                available,
            });
        }
        log::debug!("Reshuffling {} discarded policies into the deck", self.discard.len());
        self.discard.shuffle(rng);
        self.draw.extend(self.discard.drain(..));
        Ok(())
    }

    fn release(&mut self, party: Party) {
        let held = &mut self.held[slot(party)];
        *held = held.saturating_sub(1);
    }

    /// Replaces both piles, for setting up specific situations in tests.
    /// The card totals are recounted so that the board and any held cards stay accounted for.
    #[cfg(test)]
    pub fn stack(&mut self, draw: Vec<Party>, discard: Vec<Party>, board: &Board) {
        let count = |party| draw.iter().chain(&discard).filter(|p| **p == party).count();
        self.liberal = count(Party::Liberal) + self.held[slot(Party::Liberal)] + board.liberal_cards;
        self.fascist = count(Party::Fascist) + self.held[slot(Party::Fascist)] + board.fascist_cards;
        self.draw = draw.into();
        self.discard = discard;
    }

    #[cfg(test)]
    pub fn draw_pile(&self) -> Vec<Party> {
        self.draw.iter().copied().collect()
    }
}
