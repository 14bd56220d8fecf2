// build.rs
use std::path::PathBuf;

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    // Only bare-metal builds get the memory map; hosted builds link normally.
    if target_os == "none" {
        println!("cargo:rerun-if-changed=link.x");

        let script = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap())
            .join("link.x");

        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-T{}", script.display());
        // Provided by the defmt crate's build script on the search path.
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
