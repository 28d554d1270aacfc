//! Project templates for `cfx new`.
//!
//! ## Available Templates
//!
//! - `console` - Native console application (default)
//! - `embedded` - Bare-metal firmware wired to the `arm-cortex-m4` toolchain

/// Files for a fresh project: `(relative path, contents)` pairs.
pub fn get_template(name: &str, template: &str) -> Vec<(String, String)> {
    let mut files = vec![
        (".gitignore".to_string(), "build/\ndist/\n".to_string()),
        (
            "env/common.toml".to_string(),
            r#"# Shared defaults, loaded first for every configuration.
CFX_STD = "c++17"
CFX_BUILD_DIR = "build"
CFX_INSTALL_DIR = "dist"
CFX_THIRDPARTY_DIR = "third_party"
CFX_OPT_FLAGS = "-O2"
CFX_VERSION_MAJOR = "1"
CFX_VERSION_MINOR = "0"
CFX_VERSION_PATCH = "0"
"#
            .to_string(),
        ),
        (
            "env/dev.toml".to_string(),
            r#"# Development overrides; colliding keys replace common wholesale.
CFX_OPT_FLAGS = "-Og -g"
CFX_EXTRA_DEFINITIONS = "DEV_DIAGNOSTICS"
"#
            .to_string(),
        ),
        (
            "env/prod.toml".to_string(),
            r#"# Production overrides.
CFX_OPT_FLAGS = "-O3"
CFX_INSTALL_DIR = "dist/release"
"#
            .to_string(),
        ),
    ];

    match template {
        "embedded" => {
            files.push((
                "cfx.toml".to_string(),
                format!(
                    r#"[package]
name = "{}"

[env]
layer = "dev"

[toolchain]
file = "arm-cortex-m4"

[targets.{}]
definitions = ["USE_HAL"]
"#,
                    name, name
                ),
            ));
            files.push((
                "src/main.c".to_string(),
                r#"#include <stdint.h>

static volatile uint32_t ticks;

void SysTick_Handler(void) {
    ticks++;
}

int main(void) {
    for (;;) {
        __asm__ volatile("wfi");
    }
}
"#
                .to_string(),
            ));
        }
        _ => {
            files.push((
                "cfx.toml".to_string(),
                format!(
                    r#"[package]
name = "{}"

[env]
layer = "dev"

[targets.{}]
"#,
                    name, name
                ),
            ));
            files.push((
                "src/main.cpp".to_string(),
                r#"#include <iostream>

int main() {
#ifdef DEBUG_BUILD
    std::cout << "debug build" << std::endl;
#endif
    std::cout << "Hello cfx!" << std::endl;
    return 0;
}
"#
                .to_string(),
            ));
        }
    }

    files
}
