use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    // Place memory.x on the linker search path for riscv-rt's link.x
    let out = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => panic!("OUT_DIR not set by cargo"),
    };
    if let Err(e) = fs::copy("memory.x", out.join("memory.x")) {
        panic!("failed to copy memory.x: {e}");
    }
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
