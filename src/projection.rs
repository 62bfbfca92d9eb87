use proj::Proj;

use crate::error::{ConvertError, Result, TransformError};

// NAD 1983 StatePlane Massachusetts Mainland FIPS 2001, US survey feet
pub const SOURCE_CRS: &str = "ESRI:102686";
pub const DEST_CRS: &str = "EPSG:4326";

/// Output comes back in the destination CRS's authority axis order,
/// i.e. `(latitude, longitude)` for `EPSG:4326`.
pub trait PointTransform {
    fn transform(&self, x: f64, y: f64) -> std::result::Result<(f64, f64), TransformError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOrder {
    // latitude first for EPSG:4326
    #[default]
    Authority,
    Traditional,
}

pub struct ProjTransform {
    proj: Proj,
    order: AxisOrder,
}

impl ProjTransform {
    pub fn new(from: &str, to: &str, order: AxisOrder) -> Result<Self> {
        let proj = Proj::new_known_crs(from, to, None).map_err(|e| ConvertError::Projection {
            from: from.to_string(),
            to: to.to_string(),
            source: Box::new(e),
        })?;
        log::debug!("Created transform {} -> {} ({:?} axis order)", from, to, order);
        Ok(ProjTransform { proj, order })
    }

    pub fn massachusetts_mainland() -> Result<Self> {
        Self::new(SOURCE_CRS, DEST_CRS, AxisOrder::Authority)
    }
}

impl PointTransform for ProjTransform {
    fn transform(&self, x: f64, y: f64) -> std::result::Result<(f64, f64), TransformError> {
        // new_known_crs normalizes to (easting/longitude, northing/latitude)
        let (east, north) = self.proj.convert((x, y))?;
        Ok(match self.order {
            AxisOrder::Authority => (north, east),
            AxisOrder::Traditional => (east, north),
        })
    }
}
