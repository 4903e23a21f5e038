use serde::{Deserialize, Serialize};

use crate::errors::{RulerError, RulerResult};

pub const CM_PER_INCH: f64 = 2.54;

/// Pixels-per-inch along each axis. Computed once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    ppix: f64,
    ppiy: f64,
}

impl ScaleFactors {
    /// Scale from physical DPI reported by the display subsystem.
    pub fn from_dpi(ppix: f64, ppiy: f64) -> RulerResult<Self> {
        check_positive("ppix", ppix)?;
        check_positive("ppiy", ppiy)?;
        Ok(Self { ppix, ppiy })
    }

    pub fn isotropic(ppi: f64) -> RulerResult<Self> {
        Self::from_dpi(ppi, ppi)
    }

    /// Derive an isotropic scale from the panel resolution and its diagonal
    /// size: `sqrt(h_res² + v_res²) / diagonal_inches`.
    pub fn from_diagonal(h_res: u32, v_res: u32, diagonal_inches: f64) -> RulerResult<Self> {
        if h_res == 0 || v_res == 0 {
            return Err(RulerError::InvalidConfiguration(format!(
                "resolution must be positive, got {h_res}x{v_res}"
            )));
        }
        check_positive("diagonal_inches", diagonal_inches)?;
        let diagonal_px = (h_res as f64).hypot(v_res as f64);
        let scale = Self::isotropic(diagonal_px / diagonal_inches)?;
        tracing::debug!(h_res, v_res, diagonal_inches, ppi = scale.ppix, "scale derived from diagonal");
        Ok(scale)
    }

    pub fn ppix(&self) -> f64 {
        self.ppix
    }

    pub fn ppiy(&self) -> f64 {
        self.ppiy
    }

    /// Scale used for the hypotenuse: mean of both axes.
    pub fn ppi_hypotenuse(&self) -> f64 {
        (self.ppix + self.ppiy) / 2.0
    }
}

fn check_positive(name: &str, v: f64) -> RulerResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(RulerError::InvalidConfiguration(format!(
            "{name} must be a positive finite number, got {v}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_diagonal_full_hd_23_inch() {
        let s = ScaleFactors::from_diagonal(1920, 1080, 23.0).unwrap();
        let expected = (1920.0f64 * 1920.0 + 1080.0 * 1080.0).sqrt() / 23.0;
        assert!((s.ppix() - expected).abs() < 1e-12);
        assert_eq!(s.ppix(), s.ppiy());
        assert!((s.ppix() - 95.78).abs() < 0.01);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ScaleFactors::from_dpi(0.0, 96.0).is_err());
        assert!(ScaleFactors::from_dpi(96.0, f64::NAN).is_err());
        assert!(ScaleFactors::isotropic(-1.0).is_err());
        assert!(ScaleFactors::from_diagonal(1920, 1080, 0.0).is_err());
        assert!(ScaleFactors::from_diagonal(0, 1080, 23.0).is_err());
    }

    #[test]
    fn test_hypotenuse_scale_is_mean() {
        let s = ScaleFactors::from_dpi(90.0, 110.0).unwrap();
        assert_eq!(s.ppi_hypotenuse(), 100.0);
    }
}
