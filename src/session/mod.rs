use crate::catalog::{FocusArea, TipRecord};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTip {
    pub area: FocusArea,
    pub tip: TipRecord,
    pub saved_at: String,
}

/// Ephemeral per-session memory: the tips the user chose to keep and the
/// most recently shown recommendation. Discarded when the app exits.
#[derive(Debug, Default)]
pub struct SessionState {
    saved_tips: Vec<SavedTip>,
    last_recommendation: Option<SavedTip>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    pub fn record_recommendation(&mut self, area: FocusArea, tip: &TipRecord) {
        self.last_recommendation = Some(SavedTip {
            area,
            tip: tip.clone(),
            saved_at: Self::timestamp(),
        });
    }

    pub fn last_recommendation(&self) -> Option<&SavedTip> {
        self.last_recommendation.as_ref()
    }

    /// Appends the last shown recommendation to the saved list. Saves are
    /// de-duplicated on (area, label); returns false when the tip was
    /// already kept or nothing has been shown yet.
    pub fn save_last(&mut self) -> bool {
        let Some(current) = self.last_recommendation.clone() else {
            return false;
        };
        if self.is_saved(current.area, &current.tip.label) {
            return false;
        }
        self.saved_tips.push(SavedTip {
            saved_at: Self::timestamp(),
            ..current
        });
        true
    }

    pub fn is_saved(&self, area: FocusArea, label: &str) -> bool {
        self.saved_tips
            .iter()
            .any(|saved| saved.area == area && saved.tip.label == label)
    }

    /// Saved tips in append order.
    pub fn saved(&self) -> &[SavedTip] {
        &self.saved_tips
    }
}
