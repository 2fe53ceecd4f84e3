//! terrace - headless terrain walker
//!
//! Usage: terrace [SCENE.json] [--gpu] [--frames <N>]
//!
//! Loads a scene (or the default noise scene), builds the quad-tree and walks
//! the player forward for N frames, logging ground height, visible triangles
//! and FPS. With `--gpu` the leaves are uploaded to a headless wgpu device
//! and drawn into an offscreen target; otherwise they stay in host memory
//! and draws are only counted.

use std::path::PathBuf;

use terrace::core::{logging, Result};
use terrace::core::player::PlayerInput;
use terrace::render::{DrawCounter, GpuContext};
use terrace::render::buffer::{CpuLeafUploader, TerrainUniformBuffer, WgpuLeafUploader};
use terrace::render::pipeline::{TerrainPipeline, TerrainTarget};
use terrace::scene::{SceneConfig, TerrainWorld};

const DEFAULT_FRAMES: u32 = 120;
const TARGET_WIDTH: u32 = 1280;
const TARGET_HEIGHT: u32 = 720;

struct Options {
    scene: Option<PathBuf>,
    gpu: bool,
    frames: u32,
}

fn main() {
    logging::init();
    log::info!("terrace starting...");

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if let Err(e) = run(&options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    let config = match &options.scene {
        Some(path) => SceneConfig::load(path)?,
        None => {
            log::info!("No scene given, using the default noise terrain");
            SceneConfig::default()
        }
    };

    if options.gpu {
        run_gpu(config, options.frames)
    } else {
        run_cpu(config, options.frames)
    }
}

fn walk_input() -> PlayerInput {
    PlayerInput {
        forward: true,
        ..Default::default()
    }
}

fn run_cpu(config: SceneConfig, frames: u32) -> Result<()> {
    let mut uploader = CpuLeafUploader::new();
    let mut world = TerrainWorld::load(config, &mut uploader)?;
    log::info!("Built {} leaves in host memory", uploader.uploads());

    let input = walk_input();
    let mut counter = DrawCounter::new();
    for frame in 0..frames {
        let frame_ms = world.tick();
        let ground = world.update(&input, frame_ms);
        counter.reset();
        let stats = world.render(&mut counter);
        log_frame(frame, &world, ground, stats.visible_triangles, counter.draw_calls);
    }

    world.shutdown();
    Ok(())
}

fn run_gpu(config: SceneConfig, frames: u32) -> Result<()> {
    let gpu = GpuContext::headless_blocking()?;

    let mut uploader = WgpuLeafUploader::new(&gpu.device);
    let mut world = TerrainWorld::load(config, &mut uploader)?;
    log::info!("Uploaded {} KB of terrain buffers", uploader.uploaded_bytes() / 1024);

    world.camera_mut().set_aspect(TARGET_WIDTH as f32, TARGET_HEIGHT as f32);
    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let target = TerrainTarget::new(&gpu.device, TARGET_WIDTH, TARGET_HEIGHT, format);
    let uniform = TerrainUniformBuffer::new(&gpu.device);
    let pipeline = TerrainPipeline::new(&gpu.device, &uniform, format);

    let input = walk_input();
    for frame in 0..frames {
        let frame_ms = world.tick();
        let ground = world.update(&input, frame_ms);
        uniform.update(&gpu.queue, world.camera(), &world.config().light);

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("terrain_frame"),
        });
        let stats = pipeline.render(&mut encoder, &target, &uniform, &mut world);
        gpu.queue.submit(std::iter::once(encoder.finish()));

        log_frame(frame, &world, ground, stats.visible_triangles, stats.visible_leaves);
    }

    world.shutdown();
    Ok(())
}

fn log_frame<B>(frame: u32, world: &TerrainWorld<B>, ground: Option<f32>, triangles: u32, draws: u32) {
    let position = world.player().position;
    match ground {
        Some(height) => log::debug!(
            "frame {}: pos ({:.1}, {:.1}, {:.1}) ground {:.2}, {} triangles in {} draws",
            frame, position.x, position.y, position.z, height, triangles, draws
        ),
        None => log::debug!(
            "frame {}: pos ({:.1}, {:.1}, {:.1}) off terrain, {} triangles in {} draws",
            frame, position.x, position.y, position.z, triangles, draws
        ),
    }

    if frame % 60 == 59 {
        log::info!(
            "frame {}: {} triangles visible, {} fps",
            frame + 1,
            triangles,
            world.timer().fps()
        );
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        scene: None,
        gpu: false,
        frames: DEFAULT_FRAMES,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--gpu" => options.gpu = true,
            "--frames" | "-n" => {
                if let Some(value) = args.get(i + 1) {
                    match value.parse() {
                        Ok(frames) => options.frames = frames,
                        Err(_) => log::warn!("Ignoring invalid frame count '{}'", value),
                    }
                    i += 1;
                }
            }
            arg if !arg.starts_with('-') && options.scene.is_none() => {
                options.scene = Some(PathBuf::from(arg));
            }
            arg => log::warn!("Ignoring unknown argument '{}'", arg),
        }
        i += 1;
    }

    options
}
