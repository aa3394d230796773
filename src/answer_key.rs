use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::types::{option_from_letter, option_letter, ALTERNATIVES};

/// The expected answer for one question and the points it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    pub answer: usize,
    pub points: f64,
}

impl KeyEntry {
    pub fn new(answer: usize, points: f64) -> Self {
        Self { answer, points }
    }
}

impl Display for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} pts)", option_letter(self.answer), self.points)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnswerKeyError {
    #[error("question {question}: answer {answer} is not one of the {} options", ALTERNATIVES)]
    InvalidAnswer { question: usize, answer: String },

    #[error("question {question}: points must be a non-negative number, got {points}")]
    InvalidPoints { question: usize, points: f64 },
}

/// Maps 0-based question indexes to their expected answer and weight.
///
/// Grading walks the key from question 0 and stops at the first missing
/// index, so a key with a gap only grades the questions before the gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerKey {
    entries: BTreeMap<usize, KeyEntry>,
}

impl AnswerKey {
    pub fn new<I>(entries: I) -> Result<Self, AnswerKeyError>
    where
        I: IntoIterator<Item = (usize, KeyEntry)>,
    {
        let mut map = BTreeMap::new();
        for (question, entry) in entries {
            if entry.answer >= ALTERNATIVES {
                return Err(AnswerKeyError::InvalidAnswer {
                    question,
                    answer: entry.answer.to_string(),
                });
            }
            if !entry.points.is_finite() || entry.points < 0.0 {
                return Err(AnswerKeyError::InvalidPoints {
                    question,
                    points: entry.points,
                });
            }
            map.insert(question, entry);
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, question: usize) -> Option<&KeyEntry> {
        self.entries.get(&question)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &KeyEntry)> {
        self.entries.iter().map(|(question, entry)| (*question, entry))
    }

    /// Sum of every entry's points: the best score a sheet can get.
    pub fn max_score(&self) -> f64 {
        self.entries.values().map(|entry| entry.points).sum()
    }
}

/// An answer written either as an option index or as its letter.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Index(usize),
    Letter(String),
}

#[derive(Debug, Clone, Deserialize)]
struct RawKeyEntry {
    answer: RawAnswer,
    points: f64,
}

impl<'de> Deserialize<'de> for AnswerKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<usize, RawKeyEntry>::deserialize(deserializer)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (question, entry) in raw {
            let answer = match entry.answer {
                RawAnswer::Index(index) => index,
                RawAnswer::Letter(letter) => option_from_letter(&letter).ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(AnswerKeyError::InvalidAnswer {
                        question,
                        answer: letter.clone(),
                    })
                })?,
            };
            entries.push((question, KeyEntry::new(answer, entry.points)));
        }
        AnswerKey::new(entries).map_err(serde::de::Error::custom)
    }
}
