//! Row shapes mirroring the read-only relational tables and the two
//! write-side record shapes from §4.8, field names per
//! `original_source/app/models/tenders.py`.

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TenderPositionRow {
    pub id: i64,
    pub tender_id: i64,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TenderPositionAttributeRow {
    pub characteristic_id: i64,
    pub tender_position_id: i64,
    pub name: String,
    pub value: String,
    pub unit: Option<String>,
}

/// `tender_matches` row. `percentage_match_score` is `round(score / max * 100, 1)`.
#[derive(Debug, Clone)]
pub struct TenderMatchRecord {
    pub tender_position_id: i64,
    pub product_id: i64,
    pub match_score: i32,
    pub max_match_score: i32,
    pub percentage_match_score: f64,
}

impl TenderMatchRecord {
    pub fn new(tender_position_id: i64, product_id: i64, points: usize, max_points: usize) -> Self {
        let percentage = if max_points == 0 {
            0.0
        } else {
            ((points as f64 / max_points as f64) * 100.0 * 10.0).round() / 10.0
        };
        Self {
            tender_position_id,
            product_id,
            match_score: points as i32,
            max_match_score: max_points as i32,
            percentage_match_score: percentage,
        }
    }
}

/// `tenders_position_attributes_matches` row: one per matched attribute
/// pair, carrying original (pre-standardization) names/values/units on
/// both sides.
#[derive(Debug, Clone)]
pub struct TenderPositionAttributeMatchRecord {
    pub tender_id: i64,
    pub tender_position_id: i64,
    pub product_mongo_id: String,
    pub position_attr_id: Option<i64>,
    pub position_attr_name: String,
    pub position_attr_value: String,
    pub position_attr_unit: Option<String>,
    pub product_attr_name: String,
    pub product_attr_value: String,
}
