use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "team A"),
            Side::B => write!(f, "team B"),
        }
    }
}

/// One value per team slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamPair<T> {
    pub a: T,
    pub b: T,
}

impl<T> TeamPair<T> {
    pub fn map<U, F>(self, mut op: F) -> TeamPair<U>
    where
        F: FnMut(T) -> U,
    {
        TeamPair {
            a: op(self.a),
            b: op(self.b),
        }
    }

    pub fn select(&self, side: Side) -> &T {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn select_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamColor {
    Green,
    Blue,
    Red,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Brown,
    Pink,
    Black,
}

impl TeamColor {
    pub const PALETTE: [TeamColor; 10] = [
        TeamColor::Green,
        TeamColor::Blue,
        TeamColor::Red,
        TeamColor::Yellow,
        TeamColor::Purple,
        TeamColor::Orange,
        TeamColor::Cyan,
        TeamColor::Brown,
        TeamColor::Pink,
        TeamColor::Black,
    ];

    /// 0xAARRGGBB
    pub fn argb(self) -> u32 {
        match self {
            TeamColor::Green => 0xFF4C_AF50,
            TeamColor::Blue => 0xFF21_96F3,
            TeamColor::Red => 0xFFF4_4336,
            TeamColor::Yellow => 0xFFFF_EB3B,
            TeamColor::Purple => 0xFF9C_27B0,
            TeamColor::Orange => 0xFFFF_9800,
            TeamColor::Cyan => 0xFF00_BCD4,
            TeamColor::Brown => 0xFF79_5548,
            TeamColor::Pink => 0xFFE9_1E63,
            TeamColor::Black => 0xFF00_0000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamColor::Green => "Verde",
            TeamColor::Blue => "Azul",
            TeamColor::Red => "Vermelho",
            TeamColor::Yellow => "Amarelo",
            TeamColor::Purple => "Roxo",
            TeamColor::Orange => "Laranja",
            TeamColor::Cyan => "Ciano",
            TeamColor::Brown => "Marrom",
            TeamColor::Pink => "Rosa",
            TeamColor::Black => "Preto",
        }
    }
}

impl Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Default for TeamPair<TeamColor> {
    fn default() -> TeamPair<TeamColor> {
        TeamPair {
            a: TeamColor::Green,
            b: TeamColor::Blue,
        }
    }
}

impl TeamPair<TeamColor> {
    /// No uniqueness between the two slots is enforced.
    pub fn set(&mut self, side: Side, color: TeamColor) {
        *self.select_mut(side) = color;
    }
}
