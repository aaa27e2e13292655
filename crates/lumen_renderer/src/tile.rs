//! Tile-based parallel rendering.
//!
//! The pixel sequence is split into one contiguous tile per worker. Tiles
//! are rendered independently on a rayon pool and returned in tile order,
//! so the assembled image does not depend on which worker finishes first.

use std::panic::{self, AssertUnwindSafe};

use lumen_core::Scene;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use crate::tracer::trace_pixel;

/// A contiguous run of the enumerated pixel sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Index of this tile in the job order
    pub index: usize,
    /// Offset of the first pixel in the pixel sequence
    pub start: usize,
    /// Number of pixels in the tile
    pub len: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(index: usize, start: usize, len: usize) -> Self {
        Self { index, start, len }
    }

    /// One past the last pixel offset.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Enumerate every pixel coordinate, x outer and y inner.
pub fn pixel_coords(width: u32, height: u32) -> Vec<(u32, u32)> {
    (0..width)
        .flat_map(|x| (0..height).map(move |y| (x, y)))
        .collect()
}

/// Split `pixel_count` pixels into exactly `workers` contiguous tiles.
///
/// Every tile holds `pixel_count / workers` pixels except the last, which
/// also takes the remainder.
pub fn partition(pixel_count: usize, workers: usize) -> RenderResult<Vec<Tile>> {
    if workers == 0 || workers > pixel_count {
        return Err(RenderError::InvalidWorkerCount {
            workers,
            pixels: pixel_count,
        });
    }

    let size = pixel_count / workers;
    let tiles = (0..workers)
        .map(|index| {
            let start = index * size;
            let len = if index + 1 == workers {
                pixel_count - start
            } else {
                size
            };
            Tile::new(index, start, len)
        })
        .collect();

    Ok(tiles)
}

/// Everything a worker needs to render one tile.
///
/// The scene is borrowed read-only for the whole render.
#[derive(Clone, Copy)]
pub struct TileJob<'a> {
    pub tile: Tile,
    pub pixels: &'a [(u32, u32)],
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub max_depth: u32,
}

/// Result of rendering a tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    /// The tile that was rendered
    pub tile: Tile,
    /// Pixel colors in the tile's pixel order
    pub pixels: Vec<[u8; 3]>,
}

/// Render a single tile sequentially.
pub fn render_tile(job: &TileJob) -> TileResult {
    let tile = job.tile;
    let pixels = job.pixels[tile.start..tile.end()]
        .iter()
        .map(|&(x, y)| {
            let ray = job.camera.get_ray(x, y);
            trace_pixel(job.scene, &ray, job.max_depth)
        })
        .collect();

    log::debug!("Tile {} done ({} pixels)", tile.index, tile.len);
    TileResult { tile, pixels }
}

/// Render every job on `pool` and return the results in job order.
///
/// Blocks until all tiles finish. A panicking worker fails the whole
/// render; no partial results are returned.
pub fn render_tiles(jobs: &[TileJob], pool: &ThreadPool) -> RenderResult<Vec<TileResult>> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| jobs.par_iter().map(render_tile).collect::<Vec<_>>())
    }));

    outcome.map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "worker panicked".to_string());
        RenderError::WorkerFailed(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_coords_x_outer() {
        let coords = pixel_coords(2, 3);
        assert_eq!(
            coords,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_partition_exact_fit() {
        let tiles = partition(12, 4).unwrap();
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.len == 3));
    }

    #[test]
    fn test_partition_remainder_goes_last() {
        let tiles = partition(10, 3).unwrap();
        assert_eq!(
            tiles,
            vec![Tile::new(0, 0, 3), Tile::new(1, 3, 3), Tile::new(2, 6, 4)]
        );
    }

    #[test]
    fn test_partition_covers_every_pixel_once() {
        for n in 1..=40 {
            for k in 1..=n {
                let tiles = partition(n, k).unwrap();
                assert_eq!(tiles.len(), k);

                let offsets: Vec<usize> = tiles.iter().flat_map(|t| t.start..t.end()).collect();
                assert_eq!(offsets, (0..n).collect::<Vec<_>>(), "n={n} k={k}");
            }
        }
    }

    #[test]
    fn test_partition_rejects_bad_worker_counts() {
        assert!(matches!(
            partition(5, 0),
            Err(RenderError::InvalidWorkerCount { workers: 0, pixels: 5 })
        ));
        assert!(matches!(
            partition(5, 6),
            Err(RenderError::InvalidWorkerCount { workers: 6, pixels: 5 })
        ));
    }

    #[test]
    fn test_render_tiles_preserves_order() {
        let scene = Scene::new();
        let camera = Camera::new().with_resolution(4, 4);
        let pixels = pixel_coords(4, 4);
        let jobs: Vec<TileJob> = partition(pixels.len(), 5)
            .unwrap()
            .into_iter()
            .map(|tile| TileJob {
                tile,
                pixels: &pixels,
                scene: &scene,
                camera: &camera,
                max_depth: 2,
            })
            .collect();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();

        let results = render_tiles(&jobs, &pool).unwrap();

        let indices: Vec<usize> = results.iter().map(|r| r.tile.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(results.iter().map(|r| r.pixels.len()).sum::<usize>(), 16);
        // Empty scene renders black
        assert!(results.iter().flat_map(|r| &r.pixels).all(|p| *p == [0, 0, 0]));
    }

    #[test]
    fn test_render_tiles_worker_panic_is_fatal() {
        let scene = Scene::new();
        let camera = Camera::new().with_resolution(2, 2);
        let pixels = pixel_coords(2, 2);
        // Tile reaches past the pixel list, so the worker panics on slicing
        let jobs = [TileJob {
            tile: Tile::new(0, 0, 9),
            pixels: &pixels,
            scene: &scene,
            camera: &camera,
            max_depth: 1,
        }];
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();

        let err = render_tiles(&jobs, &pool).unwrap_err();

        assert!(matches!(err, RenderError::WorkerFailed(_)));
    }
}
