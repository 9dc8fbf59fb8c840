//! Standalone viewer binary.
//!
//! Usage: `maquette <path-or-url> [options.toml]`

use maquette::options::Options;
use maquette::Viewer;

fn main() {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            log::error!("Usage: maquette <gltf path or URL> [options.toml]");
            std::process::exit(1);
        }
    };

    let options = std::env::args().nth(2).map(|preset| {
        match Options::load(std::path::Path::new(&preset)) {
            Ok(opts) => opts,
            Err(e) => {
                log::error!("could not load options preset {preset}: {e}");
                std::process::exit(1);
            }
        }
    });

    let mut builder = Viewer::builder().with_path(path);
    if let Some(options) = options {
        builder = builder.with_options(options);
    }

    if let Err(e) = builder.build().run() {
        log::error!("viewer exited with error: {e}");
        std::process::exit(1);
    }
}
