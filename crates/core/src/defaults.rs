//! Per-method starting parameters for users with no brew history.

use crate::recommend::BrewTarget;

const ESPRESSO: BrewTarget = BrewTarget {
    water_ml: 60.0,
    dose_g: 18.0,
    grind_setting: 5.0,
    ratio: 3.0,
};

const POUR_OVER: BrewTarget = BrewTarget {
    water_ml: 250.0,
    dose_g: 15.0,
    grind_setting: 15.0,
    ratio: 17.0,
};

const FRENCH_PRESS: BrewTarget = BrewTarget {
    water_ml: 350.0,
    dose_g: 21.0,
    grind_setting: 30.0,
    ratio: 17.0,
};

const AEROPRESS: BrewTarget = BrewTarget {
    water_ml: 200.0,
    dose_g: 12.0,
    grind_setting: 12.0,
    ratio: 17.0,
};

const GENERIC: BrewTarget = BrewTarget {
    water_ml: 250.0,
    dose_g: 15.0,
    grind_setting: 20.0,
    ratio: 17.0,
};

/// Built-in starting parameters for a brew method.
///
/// Method names are free text, so matching is fuzzy: lowercase the name,
/// strip everything non-alphanumeric, then look for a known token. Unknown
/// methods get the generic filter-coffee fallback.
pub fn method_defaults(method_name: &str) -> BrewTarget {
    let normalized: String = method_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();

    if normalized.contains("espresso") {
        ESPRESSO
    } else if normalized.contains("aero") {
        AEROPRESS
    } else if normalized.contains("french") {
        FRENCH_PRESS
    } else if normalized.contains("v60") || normalized.contains("pourover") {
        POUR_OVER
    } else {
        GENERIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_methods_resolve() {
        assert_eq!(method_defaults("Espresso"), ESPRESSO);
        assert_eq!(method_defaults("V60"), POUR_OVER);
        assert_eq!(method_defaults("Pour Over"), POUR_OVER);
        assert_eq!(method_defaults("French Press"), FRENCH_PRESS);
        assert_eq!(method_defaults("AeroPress"), AEROPRESS);
    }

    #[test]
    fn matching_ignores_case_and_punctuation() {
        assert_eq!(method_defaults("pour-over"), POUR_OVER);
        assert_eq!(method_defaults("FRENCH  PRESS"), FRENCH_PRESS);
        assert_eq!(method_defaults("kinu espresso shot"), ESPRESSO);
    }

    #[test]
    fn aeropress_does_not_match_french_press() {
        assert_eq!(method_defaults("AeroPress Go"), AEROPRESS);
    }

    #[test]
    fn unknown_methods_get_the_generic_fallback() {
        assert_eq!(method_defaults("Moka Pot"), GENERIC);
        assert_eq!(method_defaults(""), GENERIC);
    }
}
