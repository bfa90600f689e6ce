use std::collections::HashMap;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};

use pcv_core::pointcloud::point::{Point, PointCloud};

use super::{Parser, ParserProvider};
use crate::error::LoadError;

pub struct CsvParserProvider {
    pub filenames: Vec<PathBuf>,
}

impl ParserProvider for CsvParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(CsvParser {
            filenames: self.filenames.clone(),
        })
    }
}

pub struct CsvParser {
    pub filenames: Vec<PathBuf>,
}

const REQUIRED_FIELDS: [&str; 4] = ["x", "y", "z", "classification"];

impl Parser for CsvParser {
    fn parse(&self) -> Result<PointCloud, LoadError> {
        let mut points = Vec::new();

        for filename in &self.filenames {
            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(filename)?;

            let mut records = reader.records();
            let first = match records.next() {
                Some(record) => record?,
                None => continue,
            };

            let (field_mapping, first_is_data) = create_field_mapping(&first)?;
            if first_is_data {
                points.push(parse_record(&first, &field_mapping)?);
            }

            for record in records {
                let record = record?;
                points.push(parse_record(&record, &field_mapping)?);
            }
        }

        Ok(PointCloud::new(points))
    }
}

// A headerless file is detected by its first row starting with a number;
// columns are then taken in x, y, z, classification order.
fn create_field_mapping(
    first: &StringRecord,
) -> Result<(HashMap<&'static str, usize>, bool), LoadError> {
    let mut mapping = HashMap::new();

    let first_is_data = first
        .get(0)
        .map(|value| value.trim().parse::<f64>().is_ok())
        .unwrap_or(false);

    if first_is_data {
        for (index, field_name) in REQUIRED_FIELDS.iter().enumerate() {
            mapping.insert(*field_name, index);
        }
    } else {
        for (index, header) in first.iter().enumerate() {
            let normalized_header = header.to_lowercase().replace(['_', '-'], "");
            for field_name in &REQUIRED_FIELDS {
                if normalized_header == *field_name {
                    mapping.insert(*field_name, index);
                    break;
                }
            }
        }

        for field_name in &REQUIRED_FIELDS {
            if !mapping.contains_key(*field_name) {
                return Err(LoadError::MissingField(field_name));
            }
        }
    }

    Ok((mapping, first_is_data))
}

fn parse_record(
    record: &StringRecord,
    field_mapping: &HashMap<&'static str, usize>,
) -> Result<Point, LoadError> {
    let x: f64 = parse_required_field(record, field_mapping, "x")?;
    let y: f64 = parse_required_field(record, field_mapping, "y")?;
    let z: f64 = parse_required_field(record, field_mapping, "z")?;
    let classification: u8 = parse_required_field(record, field_mapping, "classification")?;

    Ok(Point {
        x,
        y,
        z,
        classification,
    })
}

fn parse_required_field<T: std::str::FromStr>(
    record: &StringRecord,
    field_mapping: &HashMap<&'static str, usize>,
    field_name: &'static str,
) -> Result<T, LoadError> {
    let index = field_mapping
        .get(field_name)
        .copied()
        .ok_or(LoadError::MissingField(field_name))?;
    let value = record
        .get(index)
        .ok_or(LoadError::MissingField(field_name))?;

    value
        .trim()
        .parse::<T>()
        .map_err(|_| LoadError::InvalidField {
            field: field_name,
            value: value.to_string(),
        })
}
