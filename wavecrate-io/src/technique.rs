//! Curve and surface approximation technique statements (`ctech` / `stech`)

use crate::format::Float;
use crate::lines::Statement;
use wavecrate_core::{ApproximationTechnique, Result};

/// Which statement a technique belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueTarget {
    Curve,
    Surface,
}

impl TechniqueTarget {
    pub fn keyword(&self) -> &'static str {
        match self {
            TechniqueTarget::Curve => "ctech",
            TechniqueTarget::Surface => "stech",
        }
    }
}

/// Parse the technique carried by a `ctech` or `stech` statement
pub fn parse_technique(
    stmt: &Statement,
    target: TechniqueTarget,
) -> Result<ApproximationTechnique> {
    stmt.expect_min_len(2)?;
    let technique = stmt.token(1).to_ascii_lowercase();

    match (technique.as_str(), target) {
        ("cparm", _) | ("cparmb", TechniqueTarget::Surface) => {
            stmt.expect_len(3, 3)?;
            let resolution = stmt.parse_f32(2)?;
            Ok(ApproximationTechnique::ConstantParametric {
                resolution_u: resolution,
                resolution_v: resolution,
            })
        }
        ("cparma", _) => {
            stmt.expect_len(4, 4)?;
            Ok(ApproximationTechnique::ConstantParametric {
                resolution_u: stmt.parse_f32(2)?,
                resolution_v: stmt.parse_f32(3)?,
            })
        }
        ("cspace", _) => {
            stmt.expect_len(3, 3)?;
            Ok(ApproximationTechnique::ConstantSpatial {
                maximum_length: stmt.parse_f32(2)?,
            })
        }
        ("curv", _) => {
            stmt.expect_len(4, 4)?;
            Ok(ApproximationTechnique::CurvatureDependent {
                maximum_distance: stmt.parse_f32(2)?,
                maximum_angle: stmt.parse_f32(3)?,
            })
        }
        _ => Err(stmt.malformed(format!("unknown technique '{}'", stmt.token(1)))),
    }
}

/// Format a technique as a complete `ctech` or `stech` line, without terminator
pub fn format_technique(technique: &ApproximationTechnique, target: TechniqueTarget) -> String {
    let keyword = target.keyword();
    match *technique {
        ApproximationTechnique::ConstantParametric {
            resolution_u,
            resolution_v,
        } if target == TechniqueTarget::Curve && resolution_u == resolution_v => {
            format!("{} cparm {}", keyword, Float(resolution_u))
        }
        ApproximationTechnique::ConstantParametric {
            resolution_u,
            resolution_v,
        } => format!("{} cparma {} {}", keyword, Float(resolution_u), Float(resolution_v)),
        ApproximationTechnique::ConstantSpatial { maximum_length } => {
            format!("{} cspace {}", keyword, Float(maximum_length))
        }
        ApproximationTechnique::CurvatureDependent {
            maximum_distance,
            maximum_angle,
        } => format!(
            "{} curv {} {}",
            keyword,
            Float(maximum_distance),
            Float(maximum_angle)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str, target: TechniqueTarget) -> Result<ApproximationTechnique> {
        let stmt = Statement::parse(1, line).unwrap();
        parse_technique(&stmt, target)
    }

    #[test]
    fn test_curve_techniques() {
        assert_eq!(
            parse("ctech cparm 4", TechniqueTarget::Curve).unwrap(),
            ApproximationTechnique::ConstantParametric { resolution_u: 4.0, resolution_v: 4.0 }
        );
        assert_eq!(
            parse("ctech cspace 0.5", TechniqueTarget::Curve).unwrap(),
            ApproximationTechnique::ConstantSpatial { maximum_length: 0.5 }
        );
        assert_eq!(
            parse("ctech curv 0.1 15", TechniqueTarget::Curve).unwrap(),
            ApproximationTechnique::CurvatureDependent {
                maximum_distance: 0.1,
                maximum_angle: 15.0,
            }
        );
    }

    #[test]
    fn test_surface_techniques() {
        assert_eq!(
            parse("stech cparma 2 3", TechniqueTarget::Surface).unwrap(),
            ApproximationTechnique::ConstantParametric { resolution_u: 2.0, resolution_v: 3.0 }
        );
        assert_eq!(
            parse("stech cparmb 6", TechniqueTarget::Surface).unwrap(),
            ApproximationTechnique::ConstantParametric { resolution_u: 6.0, resolution_v: 6.0 }
        );
    }

    #[test]
    fn test_parametric_forms_apply_to_both_targets() {
        assert_eq!(
            parse("stech cparm 4", TechniqueTarget::Surface).unwrap(),
            ApproximationTechnique::ConstantParametric { resolution_u: 4.0, resolution_v: 4.0 }
        );
        assert_eq!(
            parse("ctech cparma 2 3", TechniqueTarget::Curve).unwrap(),
            ApproximationTechnique::ConstantParametric { resolution_u: 2.0, resolution_v: 3.0 }
        );
    }

    #[test]
    fn test_invalid_techniques() {
        assert!(parse("ctech cparmb 2", TechniqueTarget::Curve).is_err());
        assert!(parse("stech cparma 2", TechniqueTarget::Surface).is_err());
        assert!(parse("ctech cspace", TechniqueTarget::Curve).is_err());
        assert!(parse("ctech curv 1", TechniqueTarget::Curve).is_err());
        assert!(parse("stech spline 1", TechniqueTarget::Surface).is_err());
        assert!(parse("ctech", TechniqueTarget::Curve).is_err());
    }

    #[test]
    fn test_formatting_parses_back() {
        let symmetric = ApproximationTechnique::ConstantParametric {
            resolution_u: 4.0,
            resolution_v: 4.0,
        };
        let asymmetric = ApproximationTechnique::ConstantParametric {
            resolution_u: 2.0,
            resolution_v: 3.0,
        };
        let spatial = ApproximationTechnique::ConstantSpatial { maximum_length: 0.25 };
        let curvature = ApproximationTechnique::CurvatureDependent {
            maximum_distance: 0.5,
            maximum_angle: 10.0,
        };

        for technique in [symmetric, asymmetric, spatial, curvature] {
            for target in [TechniqueTarget::Curve, TechniqueTarget::Surface] {
                let line = format_technique(&technique, target);
                assert_eq!(parse(&line, target).unwrap(), technique, "line: {}", line);
            }
        }

        assert_eq!(format_technique(&symmetric, TechniqueTarget::Curve), "ctech cparm 4.000000");
        assert_eq!(
            format_technique(&asymmetric, TechniqueTarget::Curve),
            "ctech cparma 2.000000 3.000000"
        );
        let unit = ApproximationTechnique::ConstantSpatial { maximum_length: 1.0 };
        assert_eq!(format_technique(&unit, TechniqueTarget::Curve), "ctech cspace 1.000000");
    }
}
