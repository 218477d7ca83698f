use std::env;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // Askama compiles templates into the binary; cargo needs to be told to watch them.
    println!("cargo:rerun-if-changed=templates");
    watch_templates(Path::new("templates"));

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rustc-env=FANROUTE_BUILD_ID={}", build_id());
}

// Reproducible builds pin the id through SOURCE_DATE_EPOCH.
fn build_id() -> String {
    if let Ok(epoch) = env::var("SOURCE_DATE_EPOCH") {
        if !epoch.trim().is_empty() {
            return epoch.trim().to_string();
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "dev".to_string())
}

fn watch_templates(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            println!("cargo:rerun-if-changed={}", path.display());
            watch_templates(&path);
        } else if path.extension().is_some_and(|ext| ext == "html") {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
