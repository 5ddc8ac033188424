//! Selections and the action history.
//!
//! A `Selection` is what the presentation layer hands to `Board::apply`:
//! positional indices into the option list it was shown. Most sub-states take
//! a single index; Goal Mill, Let's Simplify and an inflated Everybody Gets 1
//! take a list.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// One or more positional indices into the current option list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// A single option.
    One(usize),
    /// Several options at once (possibly none).
    Many(SmallVec<[usize; 4]>),
}

impl Selection {
    /// Build a multi-index selection.
    #[must_use]
    pub fn many(indices: &[usize]) -> Self {
        Self::Many(SmallVec::from_slice(indices))
    }

    /// All indices in the selection, in the order given.
    #[must_use]
    pub fn indices(&self) -> SmallVec<[usize; 4]> {
        match self {
            Selection::One(i) => SmallVec::from_slice(&[*i]),
            Selection::Many(v) => v.clone(),
        }
    }

    /// The single index, if this selection names exactly one option.
    #[must_use]
    pub fn single(&self) -> Option<usize> {
        match self {
            Selection::One(i) => Some(*i),
            Selection::Many(v) if v.len() == 1 => Some(v[0]),
            Selection::Many(_) => None,
        }
    }
}

impl From<usize> for Selection {
    fn from(index: usize) -> Self {
        Selection::One(index)
    }
}

impl From<Vec<usize>> for Selection {
    fn from(indices: Vec<usize>) -> Self {
        Selection::Many(SmallVec::from_vec(indices))
    }
}

impl From<&[usize]> for Selection {
    fn from(indices: &[usize]) -> Self {
        Selection::many(indices)
    }
}

/// A successfully applied selection, kept for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who made the selection.
    pub player: PlayerId,

    /// Sub-state the board was in (`"normal"`, `"steal"`, ...).
    pub action_type: String,

    /// The selection applied.
    pub selection: Selection,

    /// Turn counter when the selection was applied.
    pub turn: u32,

    /// Global sequence number.
    pub sequence: u32,
}
