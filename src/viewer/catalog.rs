use crate::surface::color::Color;
use crate::surface::terrain::TerrainKind;
use crate::surface::{self, GeneratedSurface, SurfaceConfig, SurfaceRecipe};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanetClass {
    Terrestrial,
    GasGiant,
    IceGiant,
}

pub fn class_label(class: PlanetClass) -> &'static str {
    match class {
        PlanetClass::Terrestrial => "Terrestrial",
        PlanetClass::GasGiant => "Gas Giant",
        PlanetClass::IceGiant => "Ice Giant",
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MoonDescriptor {
    pub name: &'static str,
    pub radius: f64,
    pub color: Color,
    pub distance: f64,
    /// Radians per tick; the sign picks the direction.
    pub speed: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct RingColors {
    pub inner: Color,
    pub outer: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct PlanetDescriptor {
    pub name: &'static str,
    pub radius: f64,
    pub class: PlanetClass,
    pub description: &'static str,
    pub rings: Option<RingColors>,
    pub moons: &'static [MoonDescriptor],
    pub recipe: SurfaceRecipe,
    pub clouds: Option<Color>,
}

impl PlanetDescriptor {
    pub fn has_rings(&self) -> bool {
        self.rings.is_some()
    }

    /// Paints a fresh set of rasters for this planet and its moons.
    pub fn synthesize(&self, config: &SurfaceConfig, rng: &mut ChaCha8Rng) -> GeneratedSurface {
        let (color, specular) = match self.recipe {
            SurfaceRecipe::Banded { palette } => (surface::banded(palette, config, rng), None),
            SurfaceRecipe::Terrain {
                base,
                feature,
                kind,
            } => (
                surface::terrain(base, feature, kind, config.base_size, config, rng),
                None,
            ),
            SurfaceRecipe::Oceanic => {
                let (color, specular) = surface::oceanic(config, rng);
                (color, Some(specular))
            }
        };

        let atmosphere = self.clouds.map(|c| surface::clouds(c, config, rng));
        let ring = self
            .rings
            .map(|r| surface::ring(r.inner, r.outer, config, rng));
        let moons = self
            .moons
            .iter()
            .map(|m| {
                surface::terrain(
                    m.color,
                    Color::BLACK,
                    TerrainKind::Cratered,
                    config.moon_size,
                    config,
                    rng,
                )
            })
            .collect();

        GeneratedSurface {
            color,
            specular,
            atmosphere,
            ring,
            moons,
        }
    }
}

pub const DEFAULT_START_INDEX: usize = 2;

const fn moon(name: &'static str, radius: f64, color: u32, distance: f64, speed: f64) -> MoonDescriptor {
    MoonDescriptor {
        name,
        radius,
        color: Color::hex(color),
        distance,
        speed,
    }
}

const VENUS_PALETTE: [Color; 3] = [Color::hex(0xe6cca3), Color::hex(0xd4b480), Color::hex(0xe6cca3)];
const JUPITER_PALETTE: [Color; 5] = [
    Color::hex(0x4a4036),
    Color::hex(0x9e8973),
    Color::hex(0xd9cbb6),
    Color::hex(0x856c54),
    Color::hex(0x5e4e40),
];
const SATURN_PALETTE: [Color; 4] = [
    Color::hex(0xceb8b8),
    Color::hex(0xead6b8),
    Color::hex(0xdcc591),
    Color::hex(0xbfb297),
];
const URANUS_PALETTE: [Color; 2] = [Color::hex(0xd1e7e7), Color::hex(0xb9d6d6)];
const NEPTUNE_PALETTE: [Color; 3] = [Color::hex(0x3a489e), Color::hex(0x5063c9), Color::hex(0x3a489e)];

const EARTH_MOONS: [MoonDescriptor; 1] = [moon("Moon", 1.0, 0xcccccc, 8.0, 0.005)];
const MARS_MOONS: [MoonDescriptor; 2] = [
    moon("Phobos", 0.3, 0x8a310a, 4.0, 0.02),
    moon("Deimos", 0.2, 0x706c6c, 6.0, 0.015),
];
const JUPITER_MOONS: [MoonDescriptor; 4] = [
    moon("Io", 0.8, 0xe3d04f, 16.0, 0.03),
    moon("Europa", 0.7, 0xd6eaf2, 20.0, 0.025),
    moon("Ganymede", 1.2, 0x9c8e7e, 26.0, 0.015),
    moon("Callisto", 1.1, 0x5c5042, 32.0, 0.01),
];
const SATURN_MOONS: [MoonDescriptor; 1] = [moon("Titan", 1.3, 0xe3c966, 24.0, 0.02)];

pub static PLANETS: [PlanetDescriptor; 8] = [
    PlanetDescriptor {
        name: "MERCURY",
        radius: 1.5,
        class: PlanetClass::Terrestrial,
        description: "The Swift Planet",
        rings: None,
        moons: &[],
        recipe: SurfaceRecipe::Terrain {
            base: Color::hex(0x706c6c),
            feature: Color::hex(0x4a4848),
            kind: TerrainKind::Cratered,
        },
        clouds: None,
    },
    PlanetDescriptor {
        name: "VENUS",
        radius: 3.8,
        class: PlanetClass::Terrestrial,
        description: "Morning Star",
        rings: None,
        moons: &[],
        recipe: SurfaceRecipe::Banded {
            palette: &VENUS_PALETTE,
        },
        clouds: None,
    },
    PlanetDescriptor {
        name: "EARTH",
        radius: 4.0,
        class: PlanetClass::Terrestrial,
        description: "Our Home",
        rings: None,
        moons: &EARTH_MOONS,
        recipe: SurfaceRecipe::Oceanic,
        clouds: Some(Color::WHITE),
    },
    PlanetDescriptor {
        name: "MARS",
        radius: 2.1,
        class: PlanetClass::Terrestrial,
        description: "The Red Planet",
        rings: None,
        moons: &MARS_MOONS,
        recipe: SurfaceRecipe::Terrain {
            base: Color::hex(0xc1440e),
            feature: Color::hex(0x8a310a),
            kind: TerrainKind::Dusty,
        },
        clouds: None,
    },
    PlanetDescriptor {
        name: "JUPITER",
        radius: 11.0,
        class: PlanetClass::GasGiant,
        description: "King of Planets",
        rings: None,
        moons: &JUPITER_MOONS,
        recipe: SurfaceRecipe::Banded {
            palette: &JUPITER_PALETTE,
        },
        clouds: None,
    },
    PlanetDescriptor {
        name: "SATURN",
        radius: 9.0,
        class: PlanetClass::GasGiant,
        description: "Ringed Beauty",
        rings: Some(RingColors {
            inner: Color::hex(0xdac49a),
            outer: Color::hex(0x8a795d),
        }),
        moons: &SATURN_MOONS,
        recipe: SurfaceRecipe::Banded {
            palette: &SATURN_PALETTE,
        },
        clouds: None,
    },
    PlanetDescriptor {
        name: "URANUS",
        radius: 4.0,
        class: PlanetClass::IceGiant,
        description: "The Bull's Eye",
        rings: Some(RingColors {
            inner: Color::hex(0xffffff),
            outer: Color::hex(0xaaddff),
        }),
        moons: &[],
        recipe: SurfaceRecipe::Banded {
            palette: &URANUS_PALETTE,
        },
        clouds: None,
    },
    PlanetDescriptor {
        name: "NEPTUNE",
        radius: 3.9,
        class: PlanetClass::IceGiant,
        description: "The Big Blue",
        rings: None,
        moons: &[],
        recipe: SurfaceRecipe::Banded {
            palette: &NEPTUNE_PALETTE,
        },
        clouds: None,
    },
];

/// Steps `index` by `step` through a catalog of `len` entries, wrapping
/// at both ends.
pub fn wrap_index(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + step).rem_euclid(len as isize) as usize
}
