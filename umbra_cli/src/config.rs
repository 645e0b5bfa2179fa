use std::path::Path;

use umbra::g3d::RenderConfig;
use umbra::math::Vec3;

/// Loads the render config from `path`, or the built-in defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    let config = match path {
        Some(path) => RenderConfig::load(path)?,
        None => {
            log::info!("No config given, using defaults");
            RenderConfig::default()
        }
    };

    Ok(config)
}

/// Parses `x,y,z`.
pub fn parse_direction(text: &str) -> anyhow::Result<Vec3> {
    let components = text
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()?;

    match components.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(anyhow::anyhow!(
            "Expected a direction as x,y,z, got {:?}",
            text
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_components() {
        assert_eq!(
            parse_direction("0.5, -1,0.25").unwrap(),
            Vec3::new(0.5, -1.0, 0.25)
        );
    }

    #[test]
    fn rejects_malformed_directions() {
        assert!(parse_direction("1,2").is_err());
        assert!(parse_direction("1,2,3,4").is_err());
        assert!(parse_direction("a,b,c").is_err());
    }
}
