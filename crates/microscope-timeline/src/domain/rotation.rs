//! Round-robin lens and active-player rotation.
//!
//! Real rounds (index ≥ 1) are grouped into blocks of `n + 1`, where `n` is
//! the roster size. Each block belongs to one lens, cycling through the
//! roster once per `n` blocks. Inside a block the active player walks the
//! roster starting at the lens, and the last slot hands play back to the
//! lens.

use microscope_core::error::DomainError;
use microscope_core::player::Player;

/// Roster positions of the lens and active player for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSlot {
    /// Roster index of the lens.
    pub lens: usize,
    /// Roster index of the active player.
    pub player: usize,
}

/// Computes the rotation slot of real round `round` for a roster of
/// `roster_len` players.
///
/// # Errors
///
/// Returns `DomainError::MissingPlayers` if the roster is empty.
/// Returns `DomainError::InvalidArgument` for round 0, which has no lens.
pub fn rotation_slot(roster_len: usize, round: usize) -> Result<RotationSlot, DomainError> {
    if roster_len == 0 {
        return Err(DomainError::MissingPlayers);
    }
    if round == 0 {
        return Err(DomainError::InvalidArgument(
            "round 0 is the implicit pre-game round and has no rotation".to_owned(),
        ));
    }

    let idx = round - 1;
    let cycle = roster_len + 1;
    let lens = (idx / cycle) % roster_len;
    let pos = idx % cycle;
    let player = if pos < roster_len {
        (lens + pos) % roster_len
    } else {
        lens
    };

    Ok(RotationSlot { lens, player })
}

/// Resolves the lens and active player of real round `round`.
///
/// # Errors
///
/// See [`rotation_slot`].
pub fn rotate(roster: &[Player], round: usize) -> Result<(&Player, &Player), DomainError> {
    let slot = rotation_slot(roster.len(), round)?;
    Ok((&roster[slot.lens], &roster[slot.player]))
}
