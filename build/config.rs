/**
Converts the build environment into Cargo cfgs that code in the crate can check.

- `checked`: set by `ION_TEXT_CHECKED` (any value except `0`). Turns on the reader's
  internal invariant assertions, like the bound on pushed back bytes.
- `debug`: set for the unoptimized `debug` profile, so tests can scale down their work.
- `unstable`: set when the compiler accepts feature flags, so nightly-only benches build.
*/
pub mod config {
    use std::env;

    const CHECKED_VAR: &'static str = "ION_TEXT_CHECKED";

    #[derive(Debug, Default)]
    pub struct Cfgs {
        checked: bool,
        debug: bool,
        unstable: bool,
    }

    impl Cfgs {
        pub fn new() -> Self {
            println!("cargo:rerun-if-env-changed={}", CHECKED_VAR);
            println!("cargo:rerun-if-env-changed=PROFILE");

            Cfgs {
                checked: env::var(CHECKED_VAR).map_or(false, |v| v != "0"),
                debug: env::var("PROFILE").map_or(false, |v| v == "debug"),
                unstable: version_check::is_feature_flaggable().unwrap_or(false),
            }
        }

        pub fn apply(self) {
            let cfgs = [
                ("checked", self.checked),
                ("debug", self.debug),
                ("unstable", self.unstable),
            ];

            for (cfg, enabled) in cfgs {
                println!("cargo:rustc-check-cfg=cfg({})", cfg);

                if enabled {
                    println!("cargo:rustc-cfg={}", cfg);
                }
            }

            println!("cargo:rerun-if-changed=build.rs");
            println!("cargo:rerun-if-changed=build/config.rs");
        }
    }
}
