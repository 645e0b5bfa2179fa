use clap::*;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use umbra::g3d::{shared, Camera, Projection};
use umbra::math::{Quat, Transform, Vec3};
use umbra::shadow::DirectionalLight;

mod config;

#[derive(Parser, Debug)]
#[clap(
    name = "Umbra",
    version,
    about = "Drives Umbra's directional light shadows headlessly"
)]
struct Args {
    /// Render config (YAML). Built-in defaults are used when omitted
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[clap(long, default_value_t = 240)]
    frames: u32,
    /// Sun direction override as x,y,z
    #[clap(long, allow_hyphen_values = true)]
    direction: Option<String>,
    /// Rotate the sun around the vertical axis every this many frames
    #[clap(long)]
    sweep: Option<u32>,
    /// Write the final matrices buffer to this file
    #[clap(long)]
    dump: Option<PathBuf>,
    /// Write the effective config (including the final sun direction) to this file
    #[clap(long)]
    save_config: Option<PathBuf>,
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    if SimpleLogger::new().with_level(level).init().is_err() {
        println!("Failed to init logger");
    }

    let mut render_config = config::load(args.config.as_deref())?;
    if let Some(direction) = &args.direction {
        render_config.sun_direction = config::parse_direction(direction)?;
    }
    log::debug!("{:#?}", render_config);

    let camera = Camera::new(
        Transform::from_position(Vec3::new(0.0, 2.0, 0.0)).looking_to(-Vec3::Z, Vec3::Y),
        Projection::Perspective(60.0),
        16.0 / 9.0,
    );
    let camera = shared(camera);
    let render_config = shared(render_config);

    let mut light = DirectionalLight::new(camera.clone(), render_config.clone())?;
    log::info!(
        "{} cascades, matrices buffer {} floats ({} bytes)",
        light.cascades().len(),
        light.matrices().len(),
        light.matrices().size_in_bytes()
    );

    let mut refits = 0;
    let mut sun_changes = 0;

    for frame in 0..args.frames {
        let _timer = umbra::dev::ScopeTimer::new("frame");

        {
            let mut camera = camera.write();
            let t = frame as f32 / 60.0;
            camera.set_position(Vec3::new(t.sin() * 25.0, 2.0, -t * 10.0));
            camera.set_rotation(Quat::from_rotation_y(t.sin() * 0.5));
        }

        if light.on_frame()? {
            refits += 1;
        }

        if let Some(every) = args.sweep.filter(|every| *every > 0) {
            if frame % every == every - 1 {
                let direction = Quat::from_rotation_y(0.1) * light.direction();
                light.set_direction(direction)?;
                sun_changes += 1;
            }
        }

        camera.write().end_frame();
        umbra::dev::finish_frame!();
    }

    log::info!(
        "Simulated {} frames: {} camera refits, {} sun changes, sun at {}",
        args.frames,
        refits,
        sun_changes,
        light.direction()
    );

    for (ix, split) in light.cascades().splits().iter().enumerate() {
        log::info!(
            "Cascade {}: {:>9.2} .. {:>9.2}",
            ix,
            split.near_depth(),
            split.far_depth()
        );
    }

    if let Some(path) = &args.dump {
        std::fs::write(path, light.matrices().as_bytes())?;
        log::info!("Wrote matrices buffer to {:?}", path);
    }

    if let Some(path) = &args.save_config {
        render_config.read().save(path)?;
        log::info!("Wrote config to {:?}", path);
    }

    Ok(())
}
