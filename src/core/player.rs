//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The game has exactly two seats, numbered 1 and 2 to match the board
//! layout (player 1 deploys on the left edge, player 2 on the right).
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier: 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first player (moves first, deploys on column 0).
    pub const ONE: PlayerId = PlayerId(1);

    /// The second player (deploys on the last column).
    pub const TWO: PlayerId = PlayerId(2);

    /// Create a player ID from its number.
    ///
    /// Returns `None` for anything other than 1 or 2.
    ///
    /// ```
    /// use grids_tactics::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(2), Some(PlayerId::TWO));
    /// assert_eq!(PlayerId::new(0), None);
    /// ```
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        match id {
            1 | 2 => Some(Self(id)),
            _ => None,
        }
    }

    /// The player number (1 or 2).
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Zero-based index for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Check if this is player 1.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0 == 1
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        if self.0 == 1 {
            Self::TWO
        } else {
            Self::ONE
        }
    }

    /// Both players, in seat order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use grids_tactics::core::{PlayerId, PlayerMap};
///
/// let mut blocked: PlayerMap<u32> = PlayerMap::with_value(0);
/// blocked[PlayerId::TWO] = 3;
///
/// assert_eq!(blocked[PlayerId::ONE], 0);
/// assert_eq!(blocked[PlayerId::TWO], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
