/// SW3D Terminal Demo - Rotating Cube or OBJ Mesh
///
/// Usage: sw3d-terminal [path/to/mesh.obj]
///
/// Controls:
///   - Arrow Keys: Move up/down/left/right
///   - W/S: Move forward/back
///   - A/D: Turn left/right
///   - O: Toggle outlines, P: Toggle spin
///   - Q/ESC: Quit

use sw3d_core::{obj, Mesh};
use sw3d_terminal::logging::init_logging;
use sw3d_terminal::{AppConfig, TerminalApp};

fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(config.logging.to_logging_config());
    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    if let Some(path) = std::env::args_os().nth(1) {
        config.scene.mesh_path = Some(path.into());
    }

    let mesh = match &config.scene.mesh_path {
        Some(path) => {
            println!("Loading mesh: {}", path.display());
            obj::load_obj(path).unwrap_or_else(|e| {
                log::warn!("Failed to load {}: {}. Using default cube.", path.display(), e);
                Mesh::cube(config.scene.cube_size)
            })
        }
        None => Mesh::cube(config.scene.cube_size),
    };

    println!("Starting terminal renderer with {} triangles (press Q to quit)...", mesh.len());
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&config, mesh)?;
    app.run()?;

    println!("Thank you for using SW3D Terminal Renderer!");
    Ok(())
}
