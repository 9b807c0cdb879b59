//! The ranking board of the interactive client: the cards in their current
//! order and the two exports (student ranking line, admin JSON).
//!
//! Rendering, drag events and clipboard access belong to the client. This module
//! only keeps the order consistent with what the decoder expects.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::*;
use crate::{extract_filename_number, extract_initials};

/// An image of the board, with the numbers shown to the user.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CatalogImage {
    pub filename: String,
    pub initials: String,
    /// 1-based position in the alphabetical order of the filenames.
    pub position: u32,
    /// `position`, zero-padded to 3 digits.
    pub display_number: String,
    /// The number embedded in the filename, or `display_number` when there is none.
    ///
    /// Images without an embedded number cannot be decoded by the admin tool.
    pub filename_number: String,
}

/// Sorts the filenames alphabetically and numbers them.
pub fn process_image_files(images: &[String]) -> Vec<CatalogImage> {
    let mut sorted: Vec<&String> = images.iter().collect();
    sorted.sort();
    sorted
        .iter()
        .enumerate()
        .map(|(idx, filename)| {
            let position = (idx + 1) as u32;
            let display_number = format!("{:03}", position);
            let filename_number = extract_filename_number(filename)
                .map(|s| s.to_string())
                .unwrap_or_else(|| display_number.clone());
            CatalogImage {
                filename: filename.to_string(),
                initials: extract_initials(filename).to_string(),
                position,
                display_number,
                filename_number,
            }
        })
        .collect()
}

/// What the admin export contains.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AdminExport {
    pub object: String,
    pub timestamp: String,
    /// Contributor initials, best first.
    pub rankings: Vec<String>,
}

impl AdminExport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankingBoard {
    object: String,
    cards: Vec<CatalogImage>,
}

impl RankingBoard {
    /// A board in alphabetical order. Call [`RankingBoard::shuffle`] before showing it.
    pub fn new(object: &str, images: &[String]) -> RankingBoard {
        RankingBoard {
            object: object.to_string(),
            cards: process_image_files(images),
        }
    }

    pub fn from_manifest(manifest: &Manifest, object: &str) -> Result<RankingBoard, RankingError> {
        let entry = manifest
            .get(object)
            .ok_or_else(|| RankingError::UnknownObject {
                object: object.to_string(),
            })?;
        Ok(RankingBoard::new(object, &entry.images))
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn cards(&self) -> &[CatalogImage] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Puts the cards in an order that is hard to guess from the filenames.
    ///
    /// The order is a function of the seed: the same seed always gives the same
    /// order for the same images.
    pub fn shuffle(&mut self, seed: u32) {
        self.cards.sort_by_cached_key(|card| {
            (
                sha256::digest(format!("{:08}{}", seed, card.filename)),
                card.filename.clone(),
            )
        });
        debug!("shuffle: {}: seed {}", self.object, seed);
    }

    /// Drag-and-drop: takes the card at `from` and inserts it at `to`.
    ///
    /// Returns false when `from` is not a card. A `to` past the end drops the card last.
    pub fn move_card(&mut self, from: usize, to: usize) -> bool {
        if from >= self.cards.len() {
            return false;
        }
        let card = self.cards.remove(from);
        let to = to.min(self.cards.len());
        self.cards.insert(to, card);
        true
    }

    /// Swaps the card at `index` with the next one. The last card goes in front of
    /// the first one.
    pub fn swap_with_next(&mut self, index: usize) -> bool {
        let total = self.cards.len();
        if total < 2 || index >= total {
            return false;
        }
        let next = (index + 1) % total;
        if next == 0 {
            let card = self.cards.remove(index);
            self.cards.insert(0, card);
        } else {
            self.cards.swap(index, next);
        }
        true
    }

    pub fn rank_of(&self, index: usize) -> Option<u32> {
        if index < self.cards.len() {
            Some((index + 1) as u32)
        } else {
            None
        }
    }

    /// The student export: `object,number,number,...` in the current order.
    pub fn ranking_line(&self) -> String {
        let mut fields: Vec<&str> = vec![self.object.as_str()];
        fields.extend(self.cards.iter().map(|c| c.filename_number.as_str()));
        fields.join(",")
    }

    pub fn admin_export(&self, timestamp: &str) -> AdminExport {
        AdminExport {
            object: self.object.clone(),
            timestamp: timestamp.to_string(),
            rankings: self.cards.iter().map(|c| c.initials.clone()).collect(),
        }
    }

    pub fn storage_key(&self) -> String {
        format!("rankings-{}", self.object)
    }

    pub fn screenshot_file_name(&self) -> String {
        format!("rankings-{}.png", self.object)
    }

    pub fn export_file_name(&self, millis: u128) -> String {
        format!("rankings-{}-{}.json", self.object, millis)
    }
}
