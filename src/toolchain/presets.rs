//! Built-in toolchain descriptors.
//!
//! These cover the cross targets the base ships with; a project can always
//! point at its own descriptor file instead.

use std::path::PathBuf;

use super::types::{SearchPolicy, ToolchainDescriptor};

/// Names of the built-in descriptors.
pub const PRESET_NAMES: [&str; 2] = ["arm-cortex-m4", "aarch64-linux"];

/// Bare-metal ARM Cortex-M4 with hard-float FPU.
pub fn arm_cortex_m4() -> ToolchainDescriptor {
    ToolchainDescriptor {
        name: "arm-cortex-m4".to_string(),
        system: "Generic".to_string(),
        processor: "cortex-m4".to_string(),
        cc: PathBuf::from("arm-none-eabi-gcc"),
        cxx: PathBuf::from("arm-none-eabi-g++"),
        flags: vec![
            "-mcpu=cortex-m4".to_string(),
            "-mthumb".to_string(),
            "-mfloat-abi=hard".to_string(),
            "-mfpu=fpv4-sp-d16".to_string(),
        ],
        sysroot: None,
        search: SearchPolicy::default(),
    }
}

/// 64-bit ARM Linux cross target.
pub fn aarch64_linux() -> ToolchainDescriptor {
    ToolchainDescriptor {
        name: "aarch64-linux".to_string(),
        system: "Linux".to_string(),
        processor: "aarch64".to_string(),
        cc: PathBuf::from("aarch64-linux-gnu-gcc"),
        cxx: PathBuf::from("aarch64-linux-gnu-g++"),
        flags: vec!["-march=armv8-a".to_string()],
        sysroot: Some(PathBuf::from("/usr/aarch64-linux-gnu")),
        search: SearchPolicy::default(),
    }
}

/// Look up a built-in descriptor by name.
pub fn by_name(name: &str) -> Option<ToolchainDescriptor> {
    match name {
        "arm-cortex-m4" => Some(arm_cortex_m4()),
        "aarch64-linux" => Some(aarch64_linux()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::CompilerFamily;

    #[test]
    fn test_all_preset_names_resolve() {
        for name in PRESET_NAMES {
            let tc = by_name(name).unwrap();
            assert_eq!(tc.name, name);
        }
        assert!(by_name("riscv32").is_none());
    }

    #[test]
    fn test_cortex_m4_is_gcc_family() {
        let tc = arm_cortex_m4();
        assert_eq!(tc.compiler_family(), CompilerFamily::Gcc);
        assert!(tc.flags.iter().any(|f| f == "-mcpu=cortex-m4"));
        assert!(tc.flags.iter().any(|f| f == "-mthumb"));
    }
}
