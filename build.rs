use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=settings.json");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };
    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary lives in target/<profile>.
    let Some(target_dir) = out_dir.ancestors().nth(3) else {
        return;
    };

    if let Err(e) = fs::copy("settings.json", target_dir.join("settings.json")) {
        println!("cargo:warning=settings.json not copied next to the binary: {e}");
    }
}
