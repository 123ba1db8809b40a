//! Binary entry point: open a viewer window for a baked glTF scene.
//!
//! Usage: `glint [<scene.glb> <baked image>] [--options <file.toml>]
//! [--dump-options <file.toml>]` — with no arguments the bundled
//! corridor scene is shown.

use std::path::{Path, PathBuf};

use glint::options::Options;
use glint::viewer::Viewer;

/// Options file loaded automatically when no `--options` flag is given.
const DEFAULT_OPTIONS_PATH: &str = "assets/options.toml";

const USAGE: &str = "Usage: glint [<scene.glb> <baked image>] \
                     [--options <file.toml>] [--dump-options <file.toml>]";

fn main() {
    env_logger::init();

    let mut scene: Option<PathBuf> = None;
    let mut texture: Option<PathBuf> = None;
    let mut options_path: Option<PathBuf> = None;
    let mut dump_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--options" {
            let Some(path) = args.next() else {
                log::error!("--options requires a file path");
                std::process::exit(1);
            };
            options_path = Some(PathBuf::from(path));
        } else if arg == "--dump-options" {
            let Some(path) = args.next() else {
                log::error!("--dump-options requires a file path");
                std::process::exit(1);
            };
            dump_path = Some(PathBuf::from(path));
        } else if scene.is_none() {
            scene = Some(PathBuf::from(arg));
        } else if texture.is_none() {
            texture = Some(PathBuf::from(arg));
        } else {
            log::error!("{USAGE}");
            std::process::exit(1);
        }
    }

    // An explicit --options file must load; the implicit assets file is
    // best-effort.
    let options = if let Some(path) = options_path {
        match Options::load(&path) {
            Ok(options) => Some(options),
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    } else {
        let path = Path::new(DEFAULT_OPTIONS_PATH);
        if path.exists() {
            match Options::load(path) {
                Ok(options) => Some(options),
                Err(e) => {
                    log::warn!("ignoring {}: {e}", path.display());
                    None
                }
            }
        } else {
            None
        }
    };

    // Preset dump: write the resolved options and exit without opening
    // a window.
    if let Some(path) = dump_path {
        let resolved = options.unwrap_or_default();
        if let Err(e) = resolved.save(&path) {
            log::error!("failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        log::info!("wrote options preset to {}", path.display());
        return;
    }

    let mut builder = Viewer::builder();
    match (scene, texture) {
        (Some(scene), Some(texture)) => {
            builder = builder.with_scene(scene).with_texture(texture);
        }
        (Some(_), None) => {
            log::error!("{USAGE}");
            std::process::exit(1);
        }
        (None, _) => {}
    }
    if let Some(options) = options {
        builder = builder.with_options(options);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
