pub mod classes;
pub mod palette;

use std::collections::{BTreeMap, BTreeSet};

use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};

use pcv_core::pointcloud::point::{Color, PointCloud};

use crate::classes::class_description;
use crate::palette::qualitative_color;

/// Maps each distinct classification code to one palette color.
///
/// Codes are enumerated in ascending numeric order, so the mapping is
/// deterministic for a given set of codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassColorMap {
    colors: BTreeMap<u8, Color>,
}

#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub code: u8,
    pub label: &'static str,
    pub color: Color,
}

impl ClassColorMap {
    pub fn from_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let distinct: BTreeSet<u8> = codes.into_iter().collect();
        let colors = distinct
            .into_iter()
            .enumerate()
            .map(|(index, code)| (code, qualitative_color(index)))
            .collect();

        ClassColorMap { colors }
    }

    pub fn color_of(&self, code: u8) -> Option<Color> {
        self.colors.get(&code).copied()
    }

    pub fn class_count(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Color)> + '_ {
        self.colors.iter().map(|(&code, &color)| (code, color))
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.iter()
            .map(|(code, color)| LegendEntry {
                code,
                label: class_description(code),
                color,
            })
            .collect()
    }
}

/// Builds the class color map for a cloud and emits one color per point,
/// index-aligned with the point order.
pub fn color_points(cloud: &PointCloud) -> (ClassColorMap, Vec<Color>) {
    let palette = ClassColorMap::from_codes(cloud.classifications());

    let colors = cloud
        .points
        .par_iter()
        .map(|point| palette.color_of(point.classification).unwrap_or_default())
        .collect();

    (palette, colors)
}
