use std::path::PathBuf;

use las::Reader;

use pcv_core::pointcloud::point::{Point, PointCloud};

use super::{Parser, ParserProvider};
use crate::error::LoadError;

pub struct LasParserProvider {
    pub filenames: Vec<PathBuf>,
}

impl ParserProvider for LasParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(LasParser {
            filenames: self.filenames.clone(),
        })
    }
}

pub struct LasParser {
    pub filenames: Vec<PathBuf>,
}

impl Parser for LasParser {
    fn parse(&self) -> Result<PointCloud, LoadError> {
        let mut points = Vec::new();

        for filename in &self.filenames {
            let mut reader = Reader::from_path(filename)?;

            for las_point in reader.points() {
                let las_point = las_point?;

                points.push(Point {
                    x: las_point.x,
                    y: las_point.y,
                    z: las_point.z,
                    classification: u8::from(las_point.classification),
                });
            }
        }

        Ok(PointCloud::new(points))
    }
}
