use std::path::Path;

pub mod converter;
pub mod error;
pub mod projection;

pub use converter::{convert, reproject_document, transform_point, transform_ring, ConvertOptions};
pub use error::{ConvertError, Result};
pub use projection::{AxisOrder, PointTransform, ProjTransform, DEST_CRS, SOURCE_CRS};

pub fn convert_file(
    input: &Path,
    output: &Path,
    from: &str,
    to: &str,
    order: AxisOrder,
    options: &ConvertOptions,
) -> Result<()> {
    let transform = ProjTransform::new(from, to, order)?;
    convert(input, output, &transform, options)
}
