//! Planetary positions from Keplerian elements.
//!
//! Elements and rates are the JPL "approximate positions of the planets"
//! set valid 1800-2050 (mean ecliptic and equinox of J2000). Accuracy is a
//! few arcminutes for the inner planets, which is plenty for rise/set times.

use super::math::{cos_deg, normalize_degrees, sin_deg, wrap_degrees};

/// Rate of general precession in longitude, degrees per Julian century.
const PRECESSION_PER_CENTURY: f64 = 1.396_971;

#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Semi-major axis (AU), eccentricity, inclination, mean longitude,
    /// longitude of perihelion, longitude of ascending node. Angles in degrees.
    base: [f64; 6],
    /// Rates per Julian century.
    rate: [f64; 6],
}

const MERCURY: Elements = Elements {
    base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};

const VENUS: Elements = Elements {
    base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};

const EARTH_MOON_BARYCENTRE: Elements = Elements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

const MARS: Elements = Elements {
    base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};

const JUPITER: Elements = Elements {
    base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};

const SATURN: Elements = Elements {
    base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};

const URANUS: Elements = Elements {
    base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
};

const NEPTUNE: Elements = Elements {
    base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
};

const PLUTO: Elements = Elements {
    base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    fn elements(&self) -> &'static Elements {
        match self {
            Planet::Mercury => &MERCURY,
            Planet::Venus => &VENUS,
            Planet::Mars => &MARS,
            Planet::Jupiter => &JUPITER,
            Planet::Saturn => &SATURN,
            Planet::Uranus => &URANUS,
            Planet::Neptune => &NEPTUNE,
            Planet::Pluto => &PLUTO,
        }
    }
}

/// Geocentric ecliptic coordinates of date; distance in AU.
#[derive(Debug, Clone, Copy)]
pub struct EclipticPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
}

fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e_deg = eccentricity.to_degrees();
    let mut e = mean_anomaly + e_deg * sin_deg(mean_anomaly);
    for _ in 0..30 {
        let delta_m = mean_anomaly - (e - e_deg * sin_deg(e));
        let delta_e = delta_m / (1.0 - eccentricity * cos_deg(e));
        e += delta_e;
        if delta_e.abs() < 1e-9 {
            break;
        }
    }
    e
}

/// Heliocentric ecliptic J2000 rectangular coordinates in AU.
fn heliocentric(elements: &Elements, t: f64) -> [f64; 3] {
    let el: [f64; 6] = std::array::from_fn(|i| elements.base[i] + elements.rate[i] * t);
    let [a, e, inclination, mean_longitude, perihelion, node] = el;

    let argument_of_perihelion = perihelion - node;
    let mean_anomaly = wrap_degrees(mean_longitude - perihelion);
    let eccentric_anomaly = solve_kepler(mean_anomaly, e);

    let x_orbit = a * (cos_deg(eccentric_anomaly) - e);
    let y_orbit = a * (1.0 - e * e).sqrt() * sin_deg(eccentric_anomaly);

    let (cw, sw) = (cos_deg(argument_of_perihelion), sin_deg(argument_of_perihelion));
    let (cn, sn) = (cos_deg(node), sin_deg(node));
    let (ci, si) = (cos_deg(inclination), sin_deg(inclination));

    [
        (cw * cn - sw * sn * ci) * x_orbit + (-sw * cn - cw * sn * ci) * y_orbit,
        (cw * sn + sw * cn * ci) * x_orbit + (-sw * sn + cw * cn * ci) * y_orbit,
        (sw * si) * x_orbit + (cw * si) * y_orbit,
    ]
}

fn to_ecliptic(v: [f64; 3], t: f64) -> EclipticPosition {
    let [x, y, z] = v;
    let longitude = y.atan2(x).to_degrees() + PRECESSION_PER_CENTURY * t;
    EclipticPosition {
        longitude: normalize_degrees(longitude),
        latitude: z.atan2(x.hypot(y)).to_degrees(),
        distance: (x * x + y * y + z * z).sqrt(),
    }
}

/// `t` is in Julian centuries (TT) from J2000.
pub fn planet_position(planet: Planet, t: f64) -> EclipticPosition {
    let p = heliocentric(planet.elements(), t);
    let earth = heliocentric(&EARTH_MOON_BARYCENTRE, t);
    to_ecliptic([p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]], t)
}

/// Geocentric position of the sun, the reflection of the Earth's orbit.
pub fn sun_position(t: f64) -> EclipticPosition {
    let earth = heliocentric(&EARTH_MOON_BARYCENTRE, t);
    to_ecliptic([-earth[0], -earth[1], -earth[2]], t)
}
