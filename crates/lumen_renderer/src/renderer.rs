//! Render entrypoint.
//!
//! Splits the image into one tile per worker, renders the tiles on a
//! dedicated rayon pool and writes the assembled raster to disk.

use std::path::Path;
use std::thread;
use std::time::Instant;

use image::{Rgb, RgbImage};
use lumen_core::Scene;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::tile::{partition, pixel_coords, render_tiles, TileJob, TileResult};

/// Default recursion limit for reflected and transmitted rays.
pub const DEFAULT_BOUNCE_LIMIT: u32 = 10;

/// Render configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Worker count; `None` uses every available core
    pub workers: Option<usize>,
}

impl RenderConfig {
    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Resolve the worker count against the machine.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Tiled parallel renderer with a fixed camera and image size.
pub struct Renderer {
    camera: Camera,
    workers: usize,
    pool: ThreadPool,
}

impl Renderer {
    /// Create a renderer, building its worker pool.
    pub fn new(camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        let (width, height) = (camera.image_width, camera.image_height);
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        let workers = config.worker_count();
        if workers == 0 {
            return Err(RenderError::InvalidWorkerCount {
                workers,
                pixels: width as usize * height as usize,
            });
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("lumen-worker-{i}"))
            .build()?;

        Ok(Self {
            camera,
            workers,
            pool,
        })
    }

    /// Render the scene into an in-memory RGB image.
    pub fn render_image(&self, scene: &Scene, bounce_limit: u32) -> RenderResult<RgbImage> {
        let (width, height) = (self.camera.image_width, self.camera.image_height);
        let pixels = pixel_coords(width, height);

        // Never more tiles than pixels
        let tile_count = self.workers.min(pixels.len());
        let tiles = partition(pixels.len(), tile_count)?;

        log::info!(
            "Rendering {}x{} ({} triangles) in {} tiles on {} workers, bounce limit {}",
            width,
            height,
            scene.total_triangle_count(),
            tiles.len(),
            self.workers,
            bounce_limit
        );
        let start = Instant::now();

        let jobs: Vec<TileJob> = tiles
            .into_iter()
            .map(|tile| TileJob {
                tile,
                pixels: &pixels,
                scene,
                camera: &self.camera,
                max_depth: bounce_limit,
            })
            .collect();
        let results = render_tiles(&jobs, &self.pool)?;

        let image = assemble(width, height, &pixels, &results);
        log::info!("Rendered in {:?}", start.elapsed());

        Ok(image)
    }

    /// Render the scene and write it to `output_path`.
    ///
    /// The format follows the file extension (use `.png` for lossless
    /// output). Nothing is written if any tile fails.
    pub fn render(
        &self,
        scene: &Scene,
        output_path: impl AsRef<Path>,
        bounce_limit: u32,
    ) -> RenderResult<()> {
        let output_path = output_path.as_ref();
        let image = self.render_image(scene, bounce_limit)?;
        image.save(output_path)?;
        log::info!("Saved to {}", output_path.display());
        Ok(())
    }
}

/// Write tile results into a raster, in tile order.
fn assemble(width: u32, height: u32, pixels: &[(u32, u32)], results: &[TileResult]) -> RgbImage {
    let mut image = RgbImage::new(width, height);

    for result in results {
        let coords = &pixels[result.tile.start..result.tile.end()];
        for (&(x, y), &rgb) in coords.iter().zip(&result.pixels) {
            image.put_pixel(x, y, Rgb(rgb));
        }
    }

    image
}
