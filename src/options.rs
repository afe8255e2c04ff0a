use crate::game::{Boundary, FoodPolicy, Rules};
use crate::util::EnumExt;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU16;
use std::time::Duration;

/// Gameplay options chosen before the program starts
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    pub(crate) boundary: Boundary,
    pub(crate) food: FoodPolicy,
    pub(crate) speed: Speed,
    pub(crate) cell_size: CellSize,
}

impl Options {
    pub(crate) fn rules(&self) -> Rules {
        Rules {
            boundary: self.boundary,
            food: self.food,
        }
    }
}

/// How quickly the snake moves
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Speed {
    Fast,
    #[default]
    Normal,
    Slow,
}

impl Speed {
    /// Time between movements of the snake
    pub(crate) fn interval(self) -> Duration {
        match self {
            Speed::Fast => Duration::from_millis(150),
            Speed::Normal => Duration::from_millis(300),
            Speed::Slow => Duration::from_millis(450),
        }
    }

    /// The key that selects this speed during play
    pub(crate) fn key(self) -> char {
        match self {
            Speed::Fast => '1',
            Speed::Normal => '2',
            Speed::Slow => '3',
        }
    }

    pub(crate) fn from_key(key: char) -> Option<Speed> {
        Speed::iter().find(|speed| speed.key() == key)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Speed::Fast => "Fast",
            Speed::Normal => "Normal",
            Speed::Slow => "Slow",
        };
        f.pad(name)
    }
}

/// Size of one grid cell in board pixels.  A terminal column is one pixel
/// wide and a terminal row is [`CellSize::ROW_PX`] pixels tall, so the size
/// must be a multiple of that for cells to come out square.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "u16")]
pub(crate) struct CellSize(NonZeroU16);

impl CellSize {
    pub(crate) const ROW_PX: u16 = 2;

    pub(crate) fn new(px: u16) -> Option<CellSize> {
        NonZeroU16::new(px)
            .filter(|n| n.get() % Self::ROW_PX == 0)
            .map(CellSize)
    }

    pub(crate) fn px(self) -> u16 {
        self.0.get()
    }

    /// Width of one cell in terminal columns
    pub(crate) fn columns(self) -> u16 {
        self.px()
    }

    /// Height of one cell in terminal rows
    pub(crate) fn rows(self) -> u16 {
        self.px() / Self::ROW_PX
    }
}

impl Default for CellSize {
    fn default() -> CellSize {
        CellSize(NonZeroU16::MIN.saturating_add(1))
    }
}

impl TryFrom<u16> for CellSize {
    type Error = String;

    fn try_from(px: u16) -> Result<CellSize, String> {
        CellSize::new(px).ok_or_else(|| {
            format!(
                "cell size must be a positive multiple of {}, got {px}",
                CellSize::ROW_PX
            )
        })
    }
}
