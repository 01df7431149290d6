use crate::catalog::{Catalog, FocusArea, TipRecord};
use rand::seq::SliceRandom;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    UnknownFocusArea,
    UnknownTip { area: FocusArea, label: String },
}

impl fmt::Display for RecommendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFocusArea => {
                write!(f, "Sorry, we don't have tips for that focus area.")
            }
            Self::UnknownTip { area, label } => {
                write!(f, "No tip called \"{label}\" under {area}.")
            }
        }
    }
}

impl std::error::Error for RecommendError {}

/// Exact, case-sensitive label match within the named focus area. The
/// area itself is resolved with the normalized `FocusArea::parse`.
pub fn find_by_label<'a>(
    catalog: &'a Catalog,
    area: &str,
    label: &str,
) -> Result<(FocusArea, &'a TipRecord), RecommendError> {
    let area = FocusArea::parse(area).ok_or(RecommendError::UnknownFocusArea)?;
    catalog
        .tips(area)
        .iter()
        .find(|tip| tip.label == label)
        .map(|tip| (area, tip))
        .ok_or_else(|| RecommendError::UnknownTip {
            area,
            label: label.to_string(),
        })
}

/// Draws one tip uniformly at random, from the named focus area or,
/// with no area, from the whole catalog.
pub fn pick_random<'a>(
    catalog: &'a Catalog,
    area: Option<&str>,
) -> Result<(FocusArea, &'a TipRecord), RecommendError> {
    let mut rng = rand::thread_rng();
    let pool: Vec<(FocusArea, &TipRecord)> = match area {
        Some(raw_area) => {
            let area = FocusArea::parse(raw_area).ok_or(RecommendError::UnknownFocusArea)?;
            catalog.tips(area).iter().map(|tip| (area, tip)).collect()
        }
        None => FocusArea::ALL
            .into_iter()
            .flat_map(|area| catalog.tips(area).iter().map(move |tip| (area, tip)))
            .collect(),
    };

    // Catalog::load rejects empty focus areas, so the pool is never empty.
    Ok(*pool
        .choose(&mut rng)
        .expect("catalog invariant: every focus area holds at least one tip"))
}

#[cfg(test)]
mod tests {
    use super::{find_by_label, pick_random, RecommendError};
    use crate::catalog::{Catalog, FocusArea};
    use std::collections::BTreeSet;

    fn catalog() -> Catalog {
        Catalog::load().expect("embedded catalog should load").catalog
    }

    #[test]
    fn every_listed_label_round_trips_to_its_record() {
        let catalog = catalog();
        for area in FocusArea::ALL {
            for label in catalog.labels(area) {
                let (found_area, tip) = find_by_label(&catalog, area.as_str(), label)
                    .expect("listed label should resolve");
                assert_eq!(found_area, area);
                assert_eq!(tip.label, label);
            }
        }
    }

    #[test]
    fn find_by_label_returns_the_record_field_for_field() {
        let catalog = catalog();
        for area in FocusArea::ALL {
            for expected in catalog.tips(area) {
                let (_, found) = find_by_label(&catalog, area.as_str(), &expected.label)
                    .expect("catalog record should be findable");
                assert_eq!(found, expected);
            }
        }
    }

    #[test]
    fn smaller_plates_scenario_matches_expected_content() {
        let catalog = catalog();
        let (area, tip) = find_by_label(&catalog, "Portion Control", "Use smaller plates")
            .expect("known tip should resolve");
        assert_eq!(area, FocusArea::PortionControl);
        assert!(tip
            .description
            .starts_with("Using smaller plates can help you control your portions better"));
        assert_eq!(tip.activity.as_deref(), Some("Walking"));
    }

    #[test]
    fn unknown_focus_area_is_reported_by_both_operations() {
        let catalog = catalog();
        let find_error = find_by_label(&catalog, "NotARealCategory", "Use smaller plates")
            .expect_err("unknown area should fail lookup");
        assert_eq!(find_error, RecommendError::UnknownFocusArea);
        assert_eq!(
            find_error.to_string(),
            "Sorry, we don't have tips for that focus area."
        );

        let random_error = pick_random(&catalog, Some("NotARealCategory"))
            .expect_err("unknown area should fail random pick");
        assert_eq!(random_error, RecommendError::UnknownFocusArea);
    }

    #[test]
    fn unknown_label_within_a_valid_area_is_reported() {
        let catalog = catalog();
        let error = find_by_label(&catalog, "Binge Eating", "Use smaller plates")
            .expect_err("label from another area should not match");
        assert!(matches!(error, RecommendError::UnknownTip { .. }));
    }

    #[test]
    fn focus_area_matching_is_case_insensitive() {
        let catalog = catalog();
        let (area, tip) = find_by_label(&catalog, "  portion CONTROL ", "Eat slowly")
            .expect("normalized area input should resolve");
        assert_eq!(area, FocusArea::PortionControl);
        assert_eq!(tip.label, "Eat slowly");
    }

    #[test]
    fn scoped_random_pick_stays_inside_the_area() {
        let catalog = catalog();
        for _ in 0..50 {
            let (area, tip) = pick_random(&catalog, Some("Emotional Eating"))
                .expect("valid area should yield a tip");
            assert_eq!(area, FocusArea::EmotionalEating);
            assert!(catalog.tips(area).iter().any(|candidate| candidate == tip));
        }
    }

    #[test]
    fn unscoped_random_pick_is_a_catalog_member_and_visits_every_area() {
        let catalog = catalog();
        let mut seen = BTreeSet::new();
        for _ in 0..2000 {
            let (area, tip) = pick_random(&catalog, None).expect("catalog is non-empty");
            assert!(catalog.tips(area).iter().any(|candidate| candidate == tip));
            seen.insert(area);
        }
        assert_eq!(
            seen.len(),
            FocusArea::ALL.len(),
            "2000 uniform draws should visit all focus areas"
        );
    }
}
