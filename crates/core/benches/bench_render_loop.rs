use std::hint::black_box;
use std::time::Instant;

use glam::{Mat4, Vec3};
use spincube_core::{FrameTarget, MvpBuilder, RenderLoop, RendererConfig, RotationState};

/// Target that accepts every frame and keeps the last matrix.
struct NullTarget {
    last: Mat4,
}

impl FrameTarget for NullTarget {
    type Frame = ();

    fn acquire_frame(&mut self) -> Option<()> {
        Some(())
    }

    fn draw(&mut self, _frame: &(), mvp: Mat4) {
        self.last = mvp;
    }
}

fn bench_render_frame(iterations: usize, resize_every: Option<usize>) {
    let config = RendererConfig::default();
    let mut render_loop = RenderLoop::new(&config);
    let mut target = NullTarget {
        last: Mat4::IDENTITY,
    };

    let start = Instant::now();
    for i in 0..iterations {
        let width = match resize_every {
            Some(n) if (i / n) % 2 == 1 => 1200,
            _ => 800,
        };
        let now = i as f64 / 120.0;
        let _ = black_box(render_loop.render_frame(black_box(now), width, 600, &mut target));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  render_frame ({iterations} iters, resize every {resize_every:?}): {per_iter:?}/iter, \
         total {elapsed:?}, projections {}",
        render_loop.mvp_builder().projection_recompute_count()
    );
    black_box(target.last);
}

fn bench_build_mvp(iterations: usize) {
    let config = RendererConfig::default();
    let mut builder = MvpBuilder::new(config.camera);

    let start = Instant::now();
    for i in 0..iterations {
        let angle = i as f32 * 0.001;
        let _ = black_box(builder.build_mvp(800, 600, black_box(Vec3::new(angle, angle, 0.0))));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  build_mvp ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_inertia(iterations: usize) {
    let config = RendererConfig::default();
    let mut rotation = RotationState::new(config.rotation);

    let start = Instant::now();
    for i in 0..iterations {
        if i % 240 == 0 {
            rotation.apply_fling(2.0, 1.0);
        }
        rotation.advance(black_box(1.0 / 120.0), config.max_delta_time());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  advance ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
    black_box(rotation.orientation());
}

fn main() {
    println!("=== Render Loop Benchmarks ===\n");

    println!("Full frame:");
    bench_render_frame(100_000, None);
    bench_render_frame(100_000, Some(60));

    println!("\nMatrix build:");
    bench_build_mvp(100_000);

    println!("\nRotation integration:");
    bench_inertia(100_000);

    println!("\n=== Done ===");
}
