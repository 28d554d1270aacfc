//! Built-in environment layers.
//!
//! These ship with the tool so a project works without an `env/` directory.
//! A project-local `env/` directory takes their place file-for-file.

use super::Layer;

/// Names of the built-in layers, in load order.
pub const PRESET_NAMES: [&str; 3] = ["common", "dev", "prod"];

/// The mandatory base layer.
pub fn common() -> Layer {
    Layer::from_pairs(
        "common",
        0,
        &[
            (super::keys::STD, "c++17"),
            (super::keys::BUILD_DIR, "build"),
            (super::keys::INSTALL_DIR, "dist"),
            (super::keys::THIRDPARTY_DIR, "third_party"),
            (super::keys::OPT_FLAGS, "-O2"),
            (super::keys::VERSION_MAJOR, "1"),
            (super::keys::VERSION_MINOR, "0"),
            (super::keys::VERSION_PATCH, "0"),
        ],
    )
}

/// Development override: lighter optimization, debug info, dev diagnostics.
pub fn dev() -> Layer {
    Layer::from_pairs(
        "dev",
        1,
        &[
            (super::keys::OPT_FLAGS, "-Og -g"),
            (super::keys::EXTRA_DEFINITIONS, "DEV_DIAGNOSTICS"),
        ],
    )
}

/// Production override: full optimization, isolated install prefix.
pub fn prod() -> Layer {
    Layer::from_pairs(
        "prod",
        1,
        &[
            (super::keys::OPT_FLAGS, "-O3"),
            (super::keys::INSTALL_DIR, "dist/release"),
        ],
    )
}

/// Look up a built-in layer by name.
pub fn by_name(name: &str) -> Option<Layer> {
    match name {
        "common" => Some(common()),
        "dev" => Some(dev()),
        "prod" => Some(prod()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_preset_names_resolve() {
        for name in PRESET_NAMES {
            let layer = by_name(name).unwrap();
            assert_eq!(layer.name, name);
        }
        assert!(by_name("staging").is_none());
    }

    #[test]
    fn test_common_carries_version_defaults() {
        let layer = common();
        assert_eq!(layer.rank, 0);
        assert_eq!(layer.vars[crate::env::keys::VERSION_MAJOR], "1");
        assert_eq!(layer.vars[crate::env::keys::VERSION_MINOR], "0");
        assert_eq!(layer.vars[crate::env::keys::VERSION_PATCH], "0");
    }

    #[test]
    fn test_overrides_rank_above_common() {
        assert!(dev().rank > common().rank);
        assert!(prod().rank > common().rank);
    }
}
