use super::deck::CardId;
use super::executive_power::ExecutivePower;
use super::player::PlayerId;
use super::Game;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// A move submitted by a player.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    StartGame,
    NominateChancellor {
        chancellor: PlayerId,
    },
    CastVote {
        yes: bool,
    },
    DrawPolicies,
    PresidentDiscard {
        card: CardId,
    },
    ChancellorDiscard {
        card: CardId,
    },
    ProposeVeto,
    RespondVeto {
        approve: bool,
    },
    ResolvePower {
        power: ExecutivePower,
        target: Option<PlayerId>,
    },
    Statement {
        text: String,
        addressed_to: Option<PlayerId>,
    },
    Response {
        in_response_to: PlayerId,
        text: String,
    },
}

impl Game {
    /// Applies a command on behalf of `actor`.
    ///
    /// Either the whole command applies and its events are appended, or an error is
    /// returned and nothing observable changes. The one exception is an internal
    /// consistency failure, which aborts the game.
    pub fn apply(&mut self, actor: PlayerId, command: Command) -> Result<(), GameError> {
        use Command::*;

        self.check_not_over()?;
        self.check_player(actor)?;

        match command {
            StartGame => self.start(),
            NominateChancellor { chancellor } => self.nominate(actor, chancellor),
            CastVote { yes } => self.cast_vote(actor, yes),
            DrawPolicies => self.draw_policies(actor),
            PresidentDiscard { card } => self.discard_policy(actor, card),
            ChancellorDiscard { card } => self.chancellor_discard(actor, card),
            ProposeVeto => self.propose_veto(actor),
            RespondVeto { approve } => self.respond_veto(actor, approve),
            ResolvePower { power, target } => self.resolve_power(actor, power, target),
            Statement { text, addressed_to } => self.statement(actor, text, addressed_to),
            Response { in_response_to, text } => self.response(actor, in_response_to, text),
        }?;

        self.check_deck()
    }
}
