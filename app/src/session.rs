use std::ffi::OsStr;
use std::path::PathBuf;

use thiserror::Error;

use pcv_colorizer::{color_points, ClassColorMap};
use pcv_core::pointcloud::point::{Color, PointCloud};
use pcv_exporter::{RenderError, Renderer};
use pcv_parser::error::LoadError;
use pcv_parser::parsers::csv::CsvParserProvider;
use pcv_parser::parsers::las::LasParserProvider;
use pcv_parser::parsers::{get_extension, Extension, ParserProvider as _};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no input files were given")]
    NoInputFiles,

    #[error("file extension is not found: {0}")]
    MissingExtension(PathBuf),

    #[error("multiple extensions are not supported: {0:?}")]
    MixedExtensions(Vec<String>),

    #[error("no point cloud loaded, run load first")]
    NotLoaded,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Holds the input file list and the cloud loaded from it. The cloud is
/// immutable once loaded; coloring and rendering are derived on demand.
pub struct VisualizerSession {
    files: Vec<PathBuf>,
    cloud: Option<PointCloud>,
}

impl VisualizerSession {
    pub fn new(files: Vec<PathBuf>) -> Result<Self, SessionError> {
        if files.is_empty() {
            return Err(SessionError::NoInputFiles);
        }

        Ok(Self { files, cloud: None })
    }

    pub fn load(&mut self) -> Result<(), SessionError> {
        let extension = check_and_get_extension(&self.files)?;

        let parser = match extension {
            Extension::Las | Extension::Laz => LasParserProvider {
                filenames: self.files.clone(),
            }
            .get_parser(),
            Extension::Csv | Extension::Txt => CsvParserProvider {
                filenames: self.files.clone(),
            }
            .get_parser(),
        };

        self.cloud = Some(parser.parse()?);
        Ok(())
    }

    pub fn cloud(&self) -> Result<&PointCloud, SessionError> {
        self.cloud.as_ref().ok_or(SessionError::NotLoaded)
    }

    pub fn colorize(&self) -> Result<(ClassColorMap, Vec<Color>), SessionError> {
        Ok(color_points(self.cloud()?))
    }

    pub fn visualize(&self, renderer: &dyn Renderer) -> Result<(), SessionError> {
        let cloud = self.cloud()?;
        let (_, colors) = color_points(cloud);
        renderer.render(cloud, &colors)?;
        Ok(())
    }
}

fn check_and_get_extension(paths: &[PathBuf]) -> Result<Extension, SessionError> {
    let mut extensions = vec![];
    for path in paths.iter() {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) => extensions.push(ext.to_lowercase()),
            None => return Err(SessionError::MissingExtension(path.clone())),
        }
    }
    extensions.sort();
    extensions.dedup();

    if extensions.len() > 1 {
        return Err(SessionError::MixedExtensions(extensions));
    }

    Ok(get_extension(&extensions[0])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    use pcv_exporter::PlyRenderer;

    fn csv_fixture(content: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn empty_input_list_is_rejected() {
        assert!(matches!(
            VisualizerSession::new(vec![]),
            Err(SessionError::NoInputFiles)
        ));
    }

    #[test]
    fn colorize_before_load_fails() {
        let session = VisualizerSession::new(vec![PathBuf::from("cloud.las")]).unwrap();
        assert!(matches!(
            session.colorize(),
            Err(SessionError::NotLoaded)
        ));
    }

    #[test]
    fn visualize_before_load_fails() {
        let session = VisualizerSession::new(vec![PathBuf::from("cloud.las")]).unwrap();
        let renderer = PlyRenderer {
            output: PathBuf::from("/tmp/never-written.ply"),
        };
        assert!(matches!(
            session.visualize(&renderer),
            Err(SessionError::NotLoaded)
        ));
    }

    #[test]
    fn load_then_colorize_yields_aligned_colors() {
        let tmp = csv_fixture("x,y,z,classification\n1.0,2.0,3.0,2\n4.0,5.0,6.0,5\n7.0,8.0,9.0,2\n");
        let mut session = VisualizerSession::new(vec![tmp.path().to_path_buf()]).unwrap();
        session.load().unwrap();

        let cloud = session.cloud().unwrap();
        assert_eq!(cloud.points.len(), 3);

        let (palette, colors) = session.colorize().unwrap();
        assert_eq!(colors.len(), 3);
        assert_eq!(palette.class_count(), 2);
        assert_eq!(colors[0], colors[2]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn failed_load_leaves_cloud_unset() {
        let tmp = csv_fixture("x,y,z\n1.0,2.0,3.0\n");
        let mut session = VisualizerSession::new(vec![tmp.path().to_path_buf()]).unwrap();

        assert!(matches!(
            session.load(),
            Err(SessionError::Load(LoadError::MissingField("classification")))
        ));
        assert!(matches!(session.cloud(), Err(SessionError::NotLoaded)));
    }

    #[test]
    fn mixed_extensions_are_rejected() {
        let mut session = VisualizerSession::new(vec![
            PathBuf::from("a.las"),
            PathBuf::from("b.csv"),
        ])
        .unwrap();
        assert!(matches!(
            session.load(),
            Err(SessionError::MixedExtensions(_))
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut session = VisualizerSession::new(vec![PathBuf::from("cloud.ply")]).unwrap();
        assert!(matches!(
            session.load(),
            Err(SessionError::Load(LoadError::UnsupportedExtension(_)))
        ));
    }

    #[test]
    fn visualize_writes_the_artifact() {
        let tmp = csv_fixture("x,y,z,classification\n1.0,2.0,3.0,2\n4.0,5.0,6.0,5\n");
        let mut session = VisualizerSession::new(vec![tmp.path().to_path_buf()]).unwrap();
        session.load().unwrap();

        let out = tempfile::NamedTempFile::with_suffix(".ply").unwrap();
        let renderer = PlyRenderer {
            output: out.path().to_path_buf(),
        };
        session.visualize(&renderer).unwrap();

        let bytes = std::fs::read(out.path()).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("element vertex 2"));
    }
}
