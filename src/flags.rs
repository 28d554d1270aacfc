//! Compiler families and the flag functions applied to targets.
//!
//! Every conditional function returns an [`ApplyOutcome`] so the caller can
//! see whether flags were attached or the combination was unsupported.
//! Nothing here is a silent no-op.

use serde::Serialize;
use std::path::Path;

use crate::target::{BuildMode, Target};

/// Supported compiler families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    /// Microsoft Visual C++ (cl.exe)
    Msvc,
    /// Clang with MSVC-compatible driver (clang-cl)
    ClangCl,
    /// Clang/LLVM
    Clang,
    /// GNU Compiler Collection
    Gcc,
    /// Anything we cannot classify. Functions skip it and say so.
    Other,
}

impl CompilerFamily {
    pub fn uses_msvc_flags(&self) -> bool {
        matches!(self, CompilerFamily::Msvc | CompilerFamily::ClangCl)
    }

    pub fn is_gnu_like(&self) -> bool {
        matches!(self, CompilerFamily::Gcc | CompilerFamily::Clang)
    }

    /// Classify a compiler executable by its file name.
    ///
    /// Cross toolchains keep their family suffix (`arm-none-eabi-g++`,
    /// `aarch64-linux-gnu-gcc`), so a substring check is enough.
    pub fn from_compiler_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if stem.contains("clang-cl") {
            CompilerFamily::ClangCl
        } else if stem.contains("clang") {
            CompilerFamily::Clang
        } else if stem.contains("gcc") || stem.contains("g++") {
            CompilerFamily::Gcc
        } else if stem == "cl" {
            CompilerFamily::Msvc
        } else {
            CompilerFamily::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::ClangCl => "clang-cl",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Other => "unknown",
        }
    }
}

impl std::fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a conditional flag function did to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyOutcome {
    /// Flags were attached to the target.
    Applied,
    /// The family/mode combination is unsupported; the target is unchanged.
    SkippedUnsupported,
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied)
    }
}

/// Warning set for GCC and Clang.
pub const GNU_WARNINGS: [&str; 5] = [
    "-Wall",
    "-Wextra",
    "-Wpedantic",
    "-Wconversion",
    "-Wsign-conversion",
];

/// Warning set for MSVC-style drivers.
pub const MSVC_WARNINGS: [&str; 2] = ["/W4", "/permissive-"];

/// Attach the fixed warning set for the compiler family.
///
/// Unrecognized families leave the target untouched and report
/// [`ApplyOutcome::SkippedUnsupported`].
pub fn add_compiler_warnings(target: &mut Target, family: CompilerFamily) -> ApplyOutcome {
    let warnings: &[&str] = if family.is_gnu_like() {
        &GNU_WARNINGS
    } else if family.uses_msvc_flags() {
        &MSVC_WARNINGS
    } else {
        return ApplyOutcome::SkippedUnsupported;
    };

    for flag in warnings {
        target.add_compile_flag(flag);
    }
    ApplyOutcome::Applied
}

/// Attach coverage instrumentation to compile and link flags.
///
/// Only meaningful for GNU/Clang debug builds; everything else is skipped
/// with the target unchanged.
pub fn enable_code_coverage(
    target: &mut Target,
    family: CompilerFamily,
    mode: BuildMode,
) -> ApplyOutcome {
    if !mode.is_debug() || !family.is_gnu_like() {
        return ApplyOutcome::SkippedUnsupported;
    }

    target.add_compile_flag("--coverage");
    target.add_link_flag("--coverage");
    ApplyOutcome::Applied
}

/// Inject exactly one of `DEBUG_BUILD`/`RELEASE_BUILD` plus any externally
/// supplied definitions.
///
/// `extra` is the free-form definitions string from the environment layer
/// (semicolon or whitespace separated, `NAME` or `NAME=VALUE` tokens).
pub fn configure_preprocessor_definitions(target: &mut Target, mode: BuildMode, extra: Option<&str>) {
    let mode_def = match mode {
        BuildMode::Debug => "DEBUG_BUILD",
        BuildMode::Release => "RELEASE_BUILD",
    };
    target.add_definition(mode_def);

    if let Some(raw) = extra {
        for def in split_definitions(raw) {
            target.add_definition(def);
        }
    }
}

/// Split a free-form definitions string into tokens.
pub fn split_definitions(raw: &str) -> Vec<&str> {
    raw.split(|c: char| c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Language-standard flag for the family (`-std=c++17` vs `/std:c++17`).
pub fn std_flag(family: CompilerFamily, std: &str) -> String {
    if family.uses_msvc_flags() {
        format!("/std:{}", std)
    } else {
        format!("-std={}", std)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_compiler_path() {
        let classify = |s: &str| CompilerFamily::from_compiler_path(Path::new(s));
        assert_eq!(classify("/usr/bin/clang++"), CompilerFamily::Clang);
        assert_eq!(classify("clang-cl.exe"), CompilerFamily::ClangCl);
        assert_eq!(classify("/usr/bin/g++"), CompilerFamily::Gcc);
        assert_eq!(classify("arm-none-eabi-gcc"), CompilerFamily::Gcc);
        assert_eq!(classify("aarch64-linux-gnu-g++"), CompilerFamily::Gcc);
        assert_eq!(classify("cl.exe"), CompilerFamily::Msvc);
        assert_eq!(classify("tcc"), CompilerFamily::Other);
    }

    #[test]
    fn test_gnu_warning_set_is_exact() {
        let mut t = Target::new("app");
        let outcome = add_compiler_warnings(&mut t, CompilerFamily::Gcc);
        assert!(outcome.is_applied());
        assert_eq!(t.compile_flags, GNU_WARNINGS.to_vec());

        // Re-applying must not duplicate anything.
        add_compiler_warnings(&mut t, CompilerFamily::Gcc);
        assert_eq!(t.compile_flags.len(), GNU_WARNINGS.len());
    }

    #[test]
    fn test_msvc_warning_set_is_exact() {
        let mut t = Target::new("app");
        let outcome = add_compiler_warnings(&mut t, CompilerFamily::Msvc);
        assert!(outcome.is_applied());
        assert_eq!(t.compile_flags, MSVC_WARNINGS.to_vec());
    }

    #[test]
    fn test_unknown_family_is_skipped_not_silent() {
        let mut t = Target::new("app");
        let outcome = add_compiler_warnings(&mut t, CompilerFamily::Other);
        assert_eq!(outcome, ApplyOutcome::SkippedUnsupported);
        assert!(t.compile_flags.is_empty());
    }

    #[test]
    fn test_coverage_only_for_gnu_debug() {
        let combos = [
            (CompilerFamily::Gcc, BuildMode::Debug, true),
            (CompilerFamily::Clang, BuildMode::Debug, true),
            (CompilerFamily::Gcc, BuildMode::Release, false),
            (CompilerFamily::Clang, BuildMode::Release, false),
            (CompilerFamily::Msvc, BuildMode::Debug, false),
            (CompilerFamily::Msvc, BuildMode::Release, false),
            (CompilerFamily::Other, BuildMode::Debug, false),
        ];

        for (family, mode, expect_applied) in combos {
            let mut t = Target::new("app");
            let outcome = enable_code_coverage(&mut t, family, mode);
            assert_eq!(outcome.is_applied(), expect_applied, "{} {}", family, mode);
            if expect_applied {
                assert_eq!(t.compile_flags, vec!["--coverage"]);
                assert_eq!(t.link_flags, vec!["--coverage"]);
            } else {
                assert!(t.compile_flags.is_empty());
                assert!(t.link_flags.is_empty());
            }
        }
    }

    #[test]
    fn test_exactly_one_mode_definition() {
        let mut debug = Target::new("app");
        configure_preprocessor_definitions(&mut debug, BuildMode::Debug, None);
        assert!(debug.has_definition("DEBUG_BUILD"));
        assert!(!debug.has_definition("RELEASE_BUILD"));

        let mut release = Target::new("app");
        configure_preprocessor_definitions(&mut release, BuildMode::Release, None);
        assert!(release.has_definition("RELEASE_BUILD"));
        assert!(!release.has_definition("DEBUG_BUILD"));
        assert_eq!(release.definitions.len(), 1);
    }

    #[test]
    fn test_extra_definitions_are_appended() {
        let mut t = Target::new("app");
        configure_preprocessor_definitions(
            &mut t,
            BuildMode::Debug,
            Some("FEATURE_X;LOG_LEVEL=2  TRACE"),
        );
        assert_eq!(
            t.definitions,
            vec!["DEBUG_BUILD", "FEATURE_X", "LOG_LEVEL=2", "TRACE"]
        );
    }

    #[test]
    fn test_split_definitions() {
        assert_eq!(split_definitions("A;B=1 C"), vec!["A", "B=1", "C"]);
        assert_eq!(split_definitions("  ;; "), Vec::<&str>::new());
    }

    #[test]
    fn test_std_flag_per_family() {
        assert_eq!(std_flag(CompilerFamily::Gcc, "c++17"), "-std=c++17");
        assert_eq!(std_flag(CompilerFamily::Clang, "c17"), "-std=c17");
        assert_eq!(std_flag(CompilerFamily::Msvc, "c++20"), "/std:c++20");
        assert_eq!(std_flag(CompilerFamily::ClangCl, "c++17"), "/std:c++17");
    }
}
