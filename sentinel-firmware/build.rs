//! Build script for sentinel-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates alarm.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate alarm.toml configuration at compile time
fn validate_config() {
    // Re-run if alarm.toml changes
    println!("cargo:rerun-if-changed=alarm.toml");

    let config_path = Path::new("alarm.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: alarm.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds alarm.toml at build time.                   ║\n\
            ║  Please create one in the sentinel-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read alarm.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in alarm.toml                        ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n\n\
                {}\n",
                e
            );
        }
    };

    let mut errors = Vec::new();
    validate_alarm(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid alarm configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Validate the [alarm] section
fn validate_alarm(config: &toml::Value, errors: &mut Vec<String>) {
    let alarm = match config.get("alarm") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[alarm] must be a table".to_string());
            return;
        }
        // Every key has a default
        None => return,
    };

    match alarm.get("pin") {
        Some(toml::Value::String(pin)) => {
            if pin.is_empty() || pin.len() > 8 {
                errors.push("[alarm] pin must be 1 to 8 digits".to_string());
            } else if !pin.bytes().all(|b| b.is_ascii_digit()) {
                errors.push("[alarm] pin must contain only digits".to_string());
            }
        }
        Some(_) => errors.push("[alarm] pin must be a quoted string".to_string()),
        None => {}
    }

    match alarm.get("grace_seconds") {
        Some(toml::Value::Integer(s)) if !(1..=255).contains(s) => {
            errors.push("[alarm] grace_seconds must be 1-255".to_string());
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[alarm] grace_seconds must be an integer".to_string()),
    }

    match alarm.get("rearm_seconds") {
        Some(toml::Value::Integer(s)) if !(0..=255).contains(s) => {
            errors.push("[alarm] rearm_seconds must be 0-255".to_string());
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[alarm] rearm_seconds must be an integer".to_string()),
    }

    match alarm.get("boot") {
        Some(toml::Value::String(boot)) if boot == "armed" || boot == "rearm" => {}
        Some(_) => errors.push("[alarm] boot must be \"armed\" or \"rearm\"".to_string()),
        None => {}
    }
}

/// Validate the [timing] section
fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let timing = match config.get("timing") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[timing] must be a table".to_string());
            return;
        }
        None => return,
    };

    for (key, value) in timing {
        match value {
            toml::Value::Integer(ms) if (0..=i64::from(u32::MAX)).contains(ms) => {}
            _ => errors.push(format!("[timing] {} must be a duration in ms", key)),
        }
    }
}
