//! Liquid Grid entry point
//!
//! Native builds run a headless demo: a scripted pointer wanders over the
//! canvas, the simulation ticks at a fixed rate and the final grid is printed
//! as text. The web build is driven from JavaScript through
//! `liquid_grid::platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use liquid_grid::consts::SIM_DT;
    use liquid_grid::platform::PointerScript;
    use liquid_grid::{EventKind, SimSettings, Simulation, TextRenderer, TickReport};

    /// Simulated frames
    const FRAMES: u32 = 240;
    /// Pointer moves delivered between two ticks
    const MOVES_PER_FRAME: u32 = 4;
    /// Canvas pixels per grid cell
    const CELL_PX: f32 = 24.0;
    const SEED: u64 = 0x5eed;

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let settings = SimSettings::load();
        let (width, height) = (settings.width, settings.height);
        let canvas = Vec2::new(width as f32 * CELL_PX, height as f32 * CELL_PX);

        let mut sim = Simulation::new(settings)?;
        log::info!(
            "Brush radius {} on a {}x{} grid",
            sim.settings().brush_radius,
            width,
            height
        );
        let mut renderer = TextRenderer::new(width, height);
        sim.render_all(&mut renderer);

        sim.subscribe(EventKind::CellLeave, |_, event| {
            log::trace!("Pointer left {:?}", event.cell());
            Ok(())
        });

        let mut script = PointerScript::new(SEED, canvas, (width, height));
        let mut advected = 0;
        for frame in 0..FRAMES {
            for _ in 0..MOVES_PER_FRAME {
                sim.pointer_moved(script.next_position(), script.canvas());
            }
            if let TickReport::Advected { .. } = sim.tick(SIM_DT) {
                advected += 1;
            }
            let redrawn = sim.render_dirty(&mut renderer);
            log::debug!("Frame {}: {} cell(s) redrawn", frame, redrawn);
        }

        log::info!("{} of {} frames advected the level set", advected, FRAMES);
        println!("{renderer}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Liquid Grid (native) starting...");

    if let Err(e) = demo::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
