//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time, and bakes the clock settings into `utc.rs`.

use chrono::{Local, Utc};
use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // Offset of local time from UTC in seconds, defaults to the build machine's zone
    let utc_offset = match env::var("WATCHFACE_UTC_OFFSET") {
        Ok(value) => value
            .trim()
            .parse::<i32>()
            .expect("WATCHFACE_UTC_OFFSET must be a number of seconds"),
        Err(_) => Local::now().offset().local_minus_utc(),
    };

    // 12h or 24h, defaults to 24h
    let clock_24h = match env::var("WATCHFACE_CLOCK_STYLE").as_deref() {
        Ok("12h") => false,
        Ok("24h") | Err(_) => true,
        Ok(other) => panic!("WATCHFACE_CLOCK_STYLE must be `12h` or `24h`, got `{other}`"),
    };

    // create rs file with current UTC time and clock settings
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "pub const BUILD_EPOCH: i64 = {:?};\npub const UTC_OFFSET: i32 = {:?};\npub const CLOCK_24H: bool = {:?};\n",
            Utc::now().timestamp(),
            utc_offset,
            clock_24h,
        ))
        .unwrap();

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-env-changed=WATCHFACE_UTC_OFFSET");
    println!("cargo:rerun-if-env-changed=WATCHFACE_CLOCK_STYLE");
}
