//! `lumina scale`

use lumina_theme::{ScaleConfig, ScaleUnit};
use std::fmt;

/// px conversions of a set of design values at one viewport size
pub struct ScaleReport {
    pub width: f32,
    pub height: f32,
    pub unit: ScaleUnit,
    pub config: ScaleConfig,
    pub values: Vec<f32>,
}

pub fn run(width: f32, height: f32, config: ScaleConfig, values: &[f32]) -> ScaleReport {
    let unit = ScaleUnit(config.scale_for(width, height));
    tracing::debug!(
        "scale for {}x{} against {}x{}: {}",
        width,
        height,
        config.base_width,
        config.base_height,
        unit.factor()
    );

    ScaleReport {
        width,
        height,
        unit,
        config,
        values: values.to_vec(),
    }
}

impl fmt::Display for ScaleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "viewport {}x{} (reference {}x{})",
            self.width, self.height, self.config.base_width, self.config.base_height
        )?;
        let floored = self.unit.factor() <= self.config.min_scale;
        writeln!(
            f,
            "scale    {:.4}{}",
            self.unit.factor(),
            if floored { " (min)" } else { "" }
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>8} {:>6} {:>6} {:>10} {:>6} {:>6}",
            "design", "px", "even", "raw", "floor", "ceil"
        )?;
        for &value in &self.values {
            writeln!(
                f,
                "{:>8} {:>6} {:>6} {:>10.3} {:>6} {:>6}",
                value,
                self.unit.px(value),
                self.unit.even(value),
                self.unit.raw(value),
                self.unit.floor(value),
                self.unit.ceil(value)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_viewport_report() {
        let report = run(1280.0, 832.0, ScaleConfig::default(), &[15.0, 16.0]);
        assert_eq!(report.unit, ScaleUnit(1.0));

        let text = report.to_string();
        assert!(text.starts_with("viewport 1280x832 (reference 1280x832)\n"));
        assert!(text.contains("scale    1.0000\n"));
        assert!(!text.contains("(min)"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn floored_scale_is_marked() {
        let report = run(1.0, 1.0, ScaleConfig::default(), &[10.0]);
        assert_eq!(report.unit, ScaleUnit(0.5));

        let text = report.to_string();
        assert!(text.contains("scale    0.5000 (min)"));
        let row = text.lines().last().unwrap();
        assert_eq!(
            row.split_whitespace().collect::<Vec<_>>(),
            vec!["10", "5", "6", "5.000", "5", "5"]
        );
    }
}
