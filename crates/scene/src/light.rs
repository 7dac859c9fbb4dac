use cubeview_common::Color;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Kind of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// Parallel rays shining from `position` towards the origin.
    Directional,
    /// Uniform light on every surface; position is ignored by shading.
    Ambient,
    /// Omnidirectional light with inverse-square falloff.
    Point,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid light type {0:?}")]
pub struct UnknownLightKind(pub String);

impl LightKind {
    /// Tag accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            LightKind::Directional => "directional",
            LightKind::Ambient => "ambient",
            LightKind::Point => "point",
        }
    }

    /// Default position for a freshly constructed light of this kind.
    fn default_position(self) -> Vec3 {
        match self {
            LightKind::Directional => Vec3::Y,
            LightKind::Ambient | LightKind::Point => Vec3::ZERO,
        }
    }
}

impl FromStr for LightKind {
    type Err = UnknownLightKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directional" => Ok(LightKind::Directional),
            "ambient" => Ok(LightKind::Ambient),
            "point" => Ok(LightKind::Point),
            other => Err(UnknownLightKind(other.to_string())),
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light source. Ambient lights ignore `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl Light {
    /// Light at the default position for `kind`: +Y for directional, origin otherwise.
    pub fn new(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self {
            kind,
            color,
            intensity,
            position: kind.default_position(),
        }
    }

    /// Directional light shining from +Y towards the origin.
    pub fn directional(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Directional, color, intensity)
    }

    /// Uniform fill light.
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    /// Point light at the origin.
    pub fn point(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Point, color, intensity)
    }

    /// Move the light to `position`.
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Unit vector pointing from the surface towards a directional light.
    /// Falls back to +Y when the light sits on its target.
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!("directional".parse(), Ok(LightKind::Directional));
        assert_eq!("ambient".parse(), Ok(LightKind::Ambient));
        assert_eq!("point".parse(), Ok(LightKind::Point));
    }

    #[test]
    fn parse_is_exact_match() {
        let err = "Point".parse::<LightKind>().unwrap_err();
        assert_eq!(err, UnknownLightKind("Point".into()));
        assert!("spot".parse::<LightKind>().is_err());
        assert!("".parse::<LightKind>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for kind in [LightKind::Directional, LightKind::Ambient, LightKind::Point] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn directional_defaults_above_origin() {
        let light = Light::directional(Color::WHITE, 1.0);
        assert_eq!(light.position, Vec3::Y);
        assert_eq!(Light::point(Color::WHITE, 1.0).position, Vec3::ZERO);
    }

    #[test]
    fn direction_is_normalized() {
        let light = Light::directional(Color::WHITE, 1.5).at(Vec3::new(1.0, 2.0, 3.0));
        let dir = light.direction_to_light();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.z > dir.y && dir.y > dir.x);

        let degenerate = Light::directional(Color::WHITE, 1.0).at(Vec3::ZERO);
        assert_eq!(degenerate.direction_to_light(), Vec3::Y);
    }
}
