use std::str::FromStr;

use glicko2_duel::Score;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

#[serde_as]
#[derive(Deserialize, Debug)]
pub struct RawEncounter {
    pub first: String,
    pub second: String,
    #[serde_as(as = "DisplayFromStr")]
    pub result: MatchResult,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchResult {
    Unknown,
    FirstWins,
    SecondWins,
    Draw,
}

#[derive(Debug, Error)]
#[error("invalid match result")]
pub struct InvalidMatchResult;

impl FromStr for MatchResult {
    type Err = InvalidMatchResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1-0" => MatchResult::FirstWins,
            "0-1" => MatchResult::SecondWins,
            "1/2-1/2" => MatchResult::Draw,
            "*" => MatchResult::Unknown,
            _ => return Err(InvalidMatchResult),
        })
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            MatchResult::FirstWins => "1-0",
            MatchResult::SecondWins => "0-1",
            MatchResult::Draw => "1/2-1/2",
            MatchResult::Unknown => "*",
        })
    }
}

impl MatchResult {
    pub fn first_score(self) -> Option<Score> {
        Some(match self {
            MatchResult::FirstWins => Score::WIN,
            MatchResult::SecondWins => Score::LOSS,
            MatchResult::Draw => Score::DRAW,
            MatchResult::Unknown => return None,
        })
    }
}
