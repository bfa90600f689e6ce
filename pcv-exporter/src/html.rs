use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use pcv_colorizer::classes::class_description;
use pcv_core::pointcloud::point::{Color, PointCloud};

use crate::{check_alignment, RenderError, Renderer};

/// Writes a standalone HTML document with a 3D scatter of the cloud,
/// one trace per class so every class gets its own legend entry.
pub struct HtmlRenderer {
    pub output: PathBuf,
}

#[derive(Serialize)]
struct Marker {
    size: f64,
    color: String,
    opacity: f64,
}

#[derive(Serialize)]
struct ScatterTrace {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    mode: &'static str,
    #[serde(rename = "type")]
    trace_type: &'static str,
    name: String,
    marker: Marker,
}

struct ClassTrace {
    color: Color,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Point Viewer</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
</head>
<body style="margin:0">
<div id="plot" style="width:100vw;height:100vh"></div>
<script>
const data = __PLOT_DATA__;
const layout = {
    scene: {
        xaxis: { title: "X" },
        yaxis: { title: "Y" },
        zaxis: { title: "Z" }
    },
    margin: { l: 0, r: 0, b: 0, t: 0 },
    showlegend: true
};
Plotly.newPlot("plot", data, layout);
</script>
</body>
</html>
"#;

impl Renderer for HtmlRenderer {
    fn render(&self, cloud: &PointCloud, colors: &[Color]) -> Result<(), RenderError> {
        check_alignment(cloud, colors)?;

        // group points by class in ascending class order, keeping the
        // per-point color assigned to each class
        let mut groups: BTreeMap<u8, ClassTrace> = BTreeMap::new();
        for ((x, y, z, point), color) in cloud.iter().zip(colors) {
            let group = groups
                .entry(point.classification)
                .or_insert_with(|| ClassTrace {
                    color: *color,
                    x: Vec::new(),
                    y: Vec::new(),
                    z: Vec::new(),
                });
            group.x.push(x);
            group.y.push(y);
            group.z.push(z);
        }

        let traces: Vec<ScatterTrace> = groups
            .into_iter()
            .map(|(code, group)| {
                let rgb8 = group.color.to_rgb8();
                ScatterTrace {
                    x: group.x,
                    y: group.y,
                    z: group.z,
                    mode: "markers",
                    trace_type: "scatter3d",
                    name: format!("Class {} ({})", code, class_description(code)),
                    marker: Marker {
                        size: 2.0,
                        color: format!("rgb({},{},{})", rgb8[0], rgb8[1], rgb8[2]),
                        opacity: 0.8,
                    },
                }
            })
            .collect();

        let data = serde_json::to_string(&traces)?;
        fs::write(&self.output, HTML_TEMPLATE.replace("__PLOT_DATA__", &data))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcv_core::pointcloud::point::Point;

    fn make_cloud(records: &[(f64, f64, f64, u8)]) -> PointCloud {
        let points = records
            .iter()
            .map(|&(x, y, z, classification)| Point {
                x,
                y,
                z,
                classification,
            })
            .collect();
        PointCloud::new(points)
    }

    fn render_to_string(cloud: &PointCloud, colors: &[Color]) -> String {
        let tmp = tempfile::NamedTempFile::with_suffix(".html").unwrap();
        let renderer = HtmlRenderer {
            output: tmp.path().to_path_buf(),
        };
        renderer.render(cloud, colors).unwrap();
        std::fs::read_to_string(tmp.path()).unwrap()
    }

    #[test]
    fn one_trace_per_class_with_legend_names() {
        let cloud = make_cloud(&[
            (1.0, 2.0, 3.0, 2),
            (4.0, 5.0, 6.0, 6),
            (7.0, 8.0, 9.0, 2),
        ]);
        let ground = Color::from_rgb8([31, 119, 180]);
        let building = Color::from_rgb8([255, 127, 14]);
        let colors = vec![ground, building, ground];

        let html = render_to_string(&cloud, &colors);

        assert_eq!(html.matches("scatter3d").count(), 2);
        assert!(html.contains("Class 2 (Ground)"));
        assert!(html.contains("Class 6 (Building)"));
        assert!(html.contains("rgb(31,119,180)"));
        assert!(html.contains("rgb(255,127,14)"));
    }

    #[test]
    fn points_of_a_class_stay_grouped_in_source_order() {
        let cloud = make_cloud(&[
            (1.0, 0.0, 0.0, 5),
            (2.0, 0.0, 0.0, 2),
            (3.0, 0.0, 0.0, 5),
        ]);
        let colors = vec![
            Color::from_rgb8([0, 255, 0]),
            Color::from_rgb8([255, 0, 0]),
            Color::from_rgb8([0, 255, 0]),
        ];

        let html = render_to_string(&cloud, &colors);

        // class 5 trace carries both its x values, in load order
        assert!(html.contains("\"x\":[1.0,3.0]"));
        assert!(html.contains("\"x\":[2.0]"));
    }

    #[test]
    fn empty_cloud_renders_empty_figure() {
        let cloud = make_cloud(&[]);
        let html = render_to_string(&cloud, &[]);

        assert!(html.contains("const data = [];"));
    }

    #[test]
    fn misaligned_colors_are_rejected() {
        let cloud = make_cloud(&[(1.0, 2.0, 3.0, 2)]);
        let tmp = tempfile::NamedTempFile::with_suffix(".html").unwrap();
        let renderer = HtmlRenderer {
            output: tmp.path().to_path_buf(),
        };
        assert!(matches!(
            renderer.render(&cloud, &[]),
            Err(RenderError::LengthMismatch { .. })
        ));
    }
}
