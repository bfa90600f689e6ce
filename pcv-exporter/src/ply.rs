use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use byteorder::{ByteOrder as _, LittleEndian};

use pcv_core::pointcloud::point::{Color, PointCloud};

use crate::{check_alignment, RenderError, Renderer};

/// Writes a binary PLY file for GPU point cloud viewers.
pub struct PlyRenderer {
    pub output: PathBuf,
}

const BYTE_STRIDE: usize = (4 * 3) + 3;

impl Renderer for PlyRenderer {
    fn render(&self, cloud: &PointCloud, colors: &[Color]) -> Result<(), RenderError> {
        check_alignment(cloud, colors)?;

        // Coordinates are shifted by the bounding volume minimum so that
        // metric coordinates survive the f32 narrowing.
        let offset = cloud.metadata.bounding_volume.min;

        let file = File::create(&self.output)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "ply")?;
        writeln!(writer, "format binary_little_endian 1.0")?;
        writeln!(
            writer,
            "comment offset {} {} {}",
            offset[0], offset[1], offset[2]
        )?;
        writeln!(writer, "element vertex {}", cloud.points.len())?;
        writeln!(writer, "property float x")?;
        writeln!(writer, "property float y")?;
        writeln!(writer, "property float z")?;
        writeln!(writer, "property uchar red")?;
        writeln!(writer, "property uchar green")?;
        writeln!(writer, "property uchar blue")?;
        writeln!(writer, "end_header")?;

        let mut buffer = [0u8; BYTE_STRIDE];
        for ((x, y, z, _), color) in cloud.iter().zip(colors) {
            LittleEndian::write_f32_into(
                &[
                    (x - offset[0]) as f32,
                    (y - offset[1]) as f32,
                    (z - offset[2]) as f32,
                ],
                &mut buffer[0..12],
            );
            buffer[12..15].copy_from_slice(&color.to_rgb8());

            writer.write_all(&buffer)?;
        }

        writer.flush()?;
        Ok(())
    }
}
