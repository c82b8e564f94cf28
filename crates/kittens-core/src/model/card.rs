use core::fmt;
use serde::{Deserialize, Serialize};

/// Every card kind the game knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CardKind {
    ExplodingKitten = 0,
    Defuse = 1,
    Skip = 2,
    Attack = 3,
    SeeTheFuture = 4,
    Shuffle = 5,
    Favor = 6,
    Nope = 7,
    TacoCat = 8,
    BeardCat = 9,
    RainbowRalphingCat = 10,
    HairyPotatoCat = 11,
    Cattermelon = 12,
}

impl CardKind {
    pub const ALL: [CardKind; 13] = [
        CardKind::ExplodingKitten,
        CardKind::Defuse,
        CardKind::Skip,
        CardKind::Attack,
        CardKind::SeeTheFuture,
        CardKind::Shuffle,
        CardKind::Favor,
        CardKind::Nope,
        CardKind::TacoCat,
        CardKind::BeardCat,
        CardKind::RainbowRalphingCat,
        CardKind::HairyPotatoCat,
        CardKind::Cattermelon,
    ];

    pub const FILLERS: [CardKind; 5] = [
        CardKind::TacoCat,
        CardKind::BeardCat,
        CardKind::RainbowRalphingCat,
        CardKind::HairyPotatoCat,
        CardKind::Cattermelon,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Cat cards have no effect on their own and only count towards combos.
    pub const fn is_filler(self) -> bool {
        matches!(
            self,
            CardKind::TacoCat
                | CardKind::BeardCat
                | CardKind::RainbowRalphingCat
                | CardKind::HairyPotatoCat
                | CardKind::Cattermelon
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            CardKind::ExplodingKitten => "Exploding Kitten",
            CardKind::Defuse => "Defuse",
            CardKind::Skip => "Skip",
            CardKind::Attack => "Attack",
            CardKind::SeeTheFuture => "See the Future",
            CardKind::Shuffle => "Shuffle",
            CardKind::Favor => "Favor",
            CardKind::Nope => "Nope",
            CardKind::TacoCat => "Taco Cat",
            CardKind::BeardCat => "Beard Cat",
            CardKind::RainbowRalphingCat => "Rainbow-Ralphing Cat",
            CardKind::HairyPotatoCat => "Hairy Potato Cat",
            CardKind::Cattermelon => "Cattermelon",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardKind,
    pub can_combo: bool,
}

impl Card {
    pub const fn new(kind: CardKind) -> Self {
        Self {
            kind,
            can_combo: kind.is_filler(),
        }
    }

    /// House rules sometimes let any matching pair combo.
    pub const fn with_combo(kind: CardKind, can_combo: bool) -> Self {
        Self { kind, can_combo }
    }

    pub const fn is_defuse(self) -> bool {
        matches!(self.kind, CardKind::Defuse)
    }
}

impl From<CardKind> for Card {
    fn from(kind: CardKind) -> Self {
        Card::new(kind)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
