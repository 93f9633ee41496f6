//! Variables supported by the archive and their storage parameters.

use crate::errors::HrrrIngestErr;
use std::{fmt, str::FromStr};
use strum_macros::{AsStaticStr, EnumIter, EnumString};

/// Variables supported by the archive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, AsStaticStr, EnumIter, Hash)]
pub enum Variable {
    /// Pressure at the surface
    #[strum(to_string = "surface_pressure")]
    SurfacePressure,
    /// Surface roughness length
    #[strum(to_string = "surface_roughness")]
    SurfaceRoughness,
    /// Visible beam downward solar flux at the surface
    #[strum(to_string = "visible_beam_downward_solar_flux")]
    VisibleBeamDownwardSolarFlux,
    /// Visible diffuse downward solar flux at the surface
    #[strum(to_string = "visible_diffuse_downward_solar_flux")]
    VisibleDiffuseDownwardSolarFlux,
    /// Temperature at 2m above ground
    #[strum(to_string = "temperature_2m")]
    Temperature2m,
    /// Dewpoint temperature at 2m above ground
    #[strum(to_string = "dewpoint_2m")]
    Dewpoint2m,
    /// Relative humidity at 2m above ground
    #[strum(to_string = "relative_humidity_2m")]
    RelativeHumidity2m,
    /// U-component of the wind at 10m above ground
    #[strum(to_string = "u_component_wind_10m")]
    UComponentWind10m,
    /// V-component of the wind at 10m above ground
    #[strum(to_string = "v_component_wind_10m")]
    VComponentWind10m,
    /// U-component of the wind at 80m above ground
    #[strum(to_string = "u_component_wind_80m")]
    UComponentWind80m,
    /// V-component of the wind at 80m above ground
    #[strum(to_string = "v_component_wind_80m")]
    VComponentWind80m,
}

/// Vertical coordinate category of a stored field.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, EnumString, AsStaticStr)]
pub enum LevelType {
    /// The surface of the earth.
    #[strum(to_string = "surface")]
    Surface,
    /// A fixed height above ground, in meters.
    #[strum(to_string = "heightAboveGround")]
    HeightAboveGround,
}

/// Temporal aggregation category of a stored field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumString, AsStaticStr)]
pub enum StepType {
    /// An instantaneous value.
    #[strum(to_string = "instant")]
    Instant,
}

/// Storage parameters for one supported variable.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct VariableSpec {
    pub short_name: &'static str,
    pub level_type: LevelType,
    pub level: Option<i64>,
    pub step_type: StepType,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use strum::AsStaticRef;
        write!(f, "{}", self.as_static())
    }
}

impl Variable {
    /// Look up a variable by its logical name.
    pub fn from_name(name: &str) -> Result<Self, HrrrIngestErr> {
        Variable::from_str(name).map_err(|_| HrrrIngestErr::UnknownVariable(name.to_owned()))
    }

    /// The storage parameters for this variable.
    ///
    /// Short names are the ecCodes `shortName` values for the HRRR surface
    /// product. Every height-above-ground variable carries a numeric level.
    pub fn spec(self) -> VariableSpec {
        use Variable::*;

        let (short_name, level_type, level) = match self {
            SurfacePressure => ("sp", LevelType::Surface, None),
            SurfaceRoughness => ("fsr", LevelType::Surface, None),
            VisibleBeamDownwardSolarFlux => ("vbdsf", LevelType::Surface, None),
            VisibleDiffuseDownwardSolarFlux => ("vddsf", LevelType::Surface, None),
            Temperature2m => ("t2m", LevelType::HeightAboveGround, Some(2)),
            Dewpoint2m => ("d2m", LevelType::HeightAboveGround, Some(2)),
            RelativeHumidity2m => ("r2", LevelType::HeightAboveGround, Some(2)),
            UComponentWind10m => ("u10", LevelType::HeightAboveGround, Some(10)),
            VComponentWind10m => ("v10", LevelType::HeightAboveGround, Some(10)),
            UComponentWind80m => ("u", LevelType::HeightAboveGround, Some(80)),
            VComponentWind80m => ("v", LevelType::HeightAboveGround, Some(80)),
        };

        VariableSpec {
            short_name,
            level_type,
            level,
            step_type: StepType::Instant,
        }
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
