use crate::app::services::bridge::AppInfo;

/// Collect version, platform and architecture for the status bar and About panel.
///
/// Platform and arch names use the conventional desktop-runtime spelling
/// (`darwin`, `win32`, `x64`, `arm64`) so saved bug reports read the same on
/// every build.
pub fn app_info() -> AppInfo {
    AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        platform: platform_name(std::env::consts::OS).to_string(),
        arch: arch_name(std::env::consts::ARCH).to_string(),
    }
}

pub fn platform_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

pub fn arch_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names() {
        assert_eq!(platform_name("macos"), "darwin");
        assert_eq!(platform_name("windows"), "win32");
        assert_eq!(platform_name("linux"), "linux");
        assert_eq!(platform_name("freebsd"), "freebsd");
    }

    #[test]
    fn test_arch_names() {
        assert_eq!(arch_name("x86_64"), "x64");
        assert_eq!(arch_name("aarch64"), "arm64");
        assert_eq!(arch_name("x86"), "ia32");
        assert_eq!(arch_name("riscv64"), "riscv64");
    }

    #[test]
    fn test_app_info_is_populated() {
        let info = app_info();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.platform.is_empty());
        assert!(!info.arch.is_empty());
    }
}
