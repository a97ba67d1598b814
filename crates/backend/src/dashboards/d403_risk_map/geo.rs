//! Приближенные координаты по индийскому пинкоду
//!
//! Это не геокодер: зона выбирается по первым двум цифрам, внутри зоны
//! широта/долгота линейно интерполируются по последним четырем.

use std::collections::HashMap;

use contracts::dashboards::d403_risk_map::dto::Coordinates;
use once_cell::sync::Lazy;

/// Географический центр Индии
pub const INDIA_CENTER: Coordinates = Coordinates {
    lat: 20.5937,
    lng: 78.9629,
};

/// Зона пинкода с ее ограничивающим прямоугольником
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PincodeZone {
    North,
    East,
    West,
    South,
    Other,
}

impl PincodeZone {
    pub fn from_prefix(prefix: u32) -> Self {
        match prefix {
            10..=17 => PincodeZone::North,
            18..=28 => PincodeZone::East,
            30..=39 => PincodeZone::West,
            40..=68 => PincodeZone::South,
            _ => PincodeZone::Other,
        }
    }

    /// (lat_min, lat_span, lng_min, lng_span)
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            PincodeZone::North => (28.0, 8.0, 70.0, 15.0),
            PincodeZone::East => (20.0, 10.0, 85.0, 8.0),
            PincodeZone::West => (18.0, 12.0, 68.0, 12.0),
            PincodeZone::South => (8.0, 15.0, 76.0, 8.0),
            PincodeZone::Other => (20.0, 15.0, 75.0, 15.0),
        }
    }
}

/// Шестизначный цифровой пинкод
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit())
}

pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Координаты пинкода; невалидный пинкод - центр Индии
pub fn pincode_coordinates(pincode: &str) -> Coordinates {
    if !is_valid_pincode(pincode) {
        return INDIA_CENTER;
    }

    let (Ok(prefix), Ok(suffix)) = (pincode[..2].parse::<u32>(), pincode[2..].parse::<u32>()) else {
        return INDIA_CENTER;
    };
    let fraction = suffix as f64 / 10_000.0;
    let (lat_min, lat_span, lng_min, lng_span) = PincodeZone::from_prefix(prefix).bounds();

    Coordinates {
        lat: round6(lat_min + fraction * lat_span),
        lng: round6(lng_min + fraction * lng_span),
    }
}

static STATE_CENTERS: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        ("Maharashtra", (19.7515, 75.7139)),
        ("Karnataka", (15.3173, 75.7139)),
        ("Tamil Nadu", (11.1271, 78.6569)),
        ("Delhi", (28.7041, 77.1025)),
        ("Uttar Pradesh", (26.8467, 80.9462)),
        ("West Bengal", (22.9868, 87.8550)),
        ("Gujarat", (22.2587, 71.1924)),
        ("Rajasthan", (27.0238, 74.2179)),
        ("Madhya Pradesh", (22.9734, 78.6569)),
        ("Andhra Pradesh", (15.9129, 79.0193)),
        ("Telangana", (18.1124, 79.0193)),
        ("Kerala", (10.8505, 76.9386)),
        ("Punjab", (31.1471, 75.3412)),
        ("Haryana", (29.0588, 76.7176)),
        ("Bihar", (25.0961, 85.3131)),
        ("Odisha", (20.9517, 85.0975)),
        ("Chhattisgarh", (21.2787, 81.8661)),
        ("Jharkhand", (23.6102, 85.2799)),
        ("Uttarakhand", (30.0668, 78.2676)),
        ("Himachal Pradesh", (31.1048, 77.1734)),
        ("Jammu and Kashmir", (34.0837, 74.8216)),
        ("Goa", (15.2993, 74.1240)),
        ("Mizoram", (23.1645, 92.9376)),
        ("Manipur", (24.6637, 93.9063)),
        ("Meghalaya", (25.4670, 91.3662)),
        ("Nagaland", (26.1584, 94.5624)),
        ("Arunachal Pradesh", (28.2180, 94.7278)),
        ("Sikkim", (27.5330, 88.5122)),
        ("Tripura", (23.9408, 91.9882)),
        ("Assam", (26.2006, 92.9376)),
        ("Puducherry", (11.9416, 79.8083)),
        ("Chandigarh", (30.7333, 76.7794)),
        ("Andaman and Nicobar Islands", (11.7401, 92.6586)),
        ("Dadra and Nagar Haveli and Daman and Diu", (20.1809, 73.0169)),
        ("Lakshadweep", (10.5667, 72.6369)),
        ("Ladakh", (34.1526, 77.5772)),
        ("Unknown", (20.5937, 78.9629)),
    ])
});

/// Приблизительный центр штата/UT; неизвестный штат - центр Индии
pub fn state_center(state: &str) -> Coordinates {
    STATE_CENTERS
        .get(state)
        .map(|&(lat, lng)| Coordinates { lat, lng })
        .unwrap_or(INDIA_CENTER)
}
