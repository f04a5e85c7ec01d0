/// Example: Load and render an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj
///
/// Unlike the main binary this fails loudly when the file cannot be parsed.

use std::env;
use std::io;
use sw3d_core::obj;
use sw3d_terminal::{AppConfig, TerminalApp};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = AppConfig::default();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        let cube = sw3d_core::Mesh::cube(config.scene.cube_size);
        let mut app = TerminalApp::new(&config, cube)?;
        return app.run();
    }

    let obj_path = &args[1];

    println!("Loading OBJ file: {}", obj_path);

    let mesh = obj::load_obj(obj_path)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load OBJ: {}", e)))?;

    println!("Loaded {} triangles", mesh.len());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&config, mesh)?;
    app.run()?;

    println!("Thank you for using SW3D Terminal Renderer!");
    Ok(())
}
