// Subcategory row layout
//
// Maps a vertical pointer position to the subcategory row under it, so a
// bar can be dropped into another row during a move.

use crate::models::category::{CategoryId, SubcategoryId, TimelineCategory};
use crate::models::settings::TimelineSettings;

/// Row heights used to stack the timeline grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub header_height: f32,
    pub row_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::from(&TimelineSettings::default())
    }
}

impl From<&TimelineSettings> for LayoutMetrics {
    fn from(settings: &TimelineSettings) -> Self {
        Self {
            header_height: settings.header_height,
            row_height: settings.row_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryRow {
    pub subcategory_id: SubcategoryId,
    pub category_id: CategoryId,
    /// Distance from the top of the grid
    pub offset_y: f32,
    pub height: f32,
}

impl SubcategoryRow {
    /// Half-open: the lower boundary belongs to the next row.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.offset_y && y < self.offset_y + self.height
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubcategoryLayout {
    rows: Vec<SubcategoryRow>,
    /// Global y of the grid's top edge
    origin_y: f32,
    total_height: f32,
}

impl SubcategoryLayout {
    /// Stack categories in display order. Each category takes a header;
    /// expanded ones add a row per visible subcategory beneath it.
    pub fn build(categories: &[TimelineCategory], metrics: LayoutMetrics) -> Self {
        let mut layout = Self::default();
        layout.rebuild(categories, metrics);
        layout
    }

    /// Recompute rows after the category list or an expansion flag changed.
    /// The captured origin is kept.
    pub fn rebuild(&mut self, categories: &[TimelineCategory], metrics: LayoutMetrics) {
        let mut rows = Vec::new();
        let mut y = 0.0;

        for category in categories {
            y += metrics.header_height;
            if !category.is_expanded {
                continue;
            }
            for sub in category.visible_subcategories() {
                rows.push(SubcategoryRow {
                    subcategory_id: sub.id,
                    category_id: category.id.clone(),
                    offset_y: y,
                    height: metrics.row_height,
                });
                y += metrics.row_height;
            }
        }

        log::debug!("Rebuilt timeline layout: {} rows, {} high", rows.len(), y);
        self.rows = rows;
        self.total_height = y;
    }

    /// Capture the grid's global top edge (on first display and whenever the
    /// scroll container is resized).
    pub fn set_origin(&mut self, origin_y: f32) {
        self.origin_y = origin_y;
    }

    pub fn origin(&self) -> f32 {
        self.origin_y
    }

    pub fn rows(&self) -> &[SubcategoryRow] {
        &self.rows
    }

    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Row under a global y position. Headers and positions outside the
    /// grid have no row. Linear scan; row counts are small.
    pub fn row_at(&self, global_y: f32) -> Option<&SubcategoryRow> {
        let y = global_y - self.origin_y;
        self.rows.iter().find(|row| row.contains(y))
    }

    pub fn subcategory_at(&self, global_y: f32) -> Option<SubcategoryId> {
        self.row_at(global_y).map(|row| row.subcategory_id)
    }

    pub fn row_for(&self, id: SubcategoryId) -> Option<&SubcategoryRow> {
        self.rows.iter().find(|row| row.subcategory_id == id)
    }
}
