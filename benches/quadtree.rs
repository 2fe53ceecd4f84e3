use criterion::{criterion_group, criterion_main, Criterion, black_box};

use terrace::math::Frustum;
use terrace::quadtree::{QuadTree, QuadTreeConfig};
use terrace::render::DrawCounter;
use terrace::render::buffer::{CpuLeafBuffers, CpuLeafUploader};
use terrace::terrain::{GridLayout, GridTerrain, HeightMap, TerrainGenerator, TerrainParams};

use glam::{Mat4, Vec3};

fn noise_terrain(size: u32) -> GridTerrain {
    let layout = GridLayout::centered(size, size, 1.0);
    let generator = TerrainGenerator::new(TerrainParams::default());
    let heightmap = HeightMap::from_generator(size, size, &generator, &layout);
    GridTerrain::new(heightmap, layout)
}

fn build_tree(terrain: &GridTerrain) -> QuadTree<CpuLeafBuffers> {
    let mut tree = QuadTree::new(QuadTreeConfig::default());
    tree.init(terrain, &mut CpuLeafUploader::new()).unwrap();
    tree
}

fn bench_build_257(c: &mut Criterion) {
    let terrain = noise_terrain(257);

    c.bench_function("quadtree_build_257", |b| {
        b.iter(|| build_tree(black_box(&terrain)));
    });
}

fn bench_build_513(c: &mut Criterion) {
    let terrain = noise_terrain(513);

    c.bench_function("quadtree_build_513", |b| {
        b.iter(|| build_tree(black_box(&terrain)));
    });
}

fn bench_height_queries(c: &mut Criterion) {
    let tree = build_tree(&noise_terrain(513));

    c.bench_function("quadtree_height_at_1000", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1000 {
                let t = i as f32 * 0.01;
                let x = t.sin() * 200.0;
                let z = t.cos() * 200.0;
                sum += tree.height_at(black_box(x), black_box(z)).unwrap_or(0.0);
            }
            sum
        });
    });
}

fn bench_render_cull(c: &mut Criterion) {
    let mut tree = build_tree(&noise_terrain(513));
    let view = Mat4::look_at_rh(Vec3::new(0.0, 40.0, -250.0), Vec3::new(0.0, 0.0, 0.0), Vec3::Y);
    let proj = Mat4::perspective_rh(45f32.to_radians(), 16.0 / 9.0, 0.1, 400.0);
    let frustum = Frustum::construct(400.0, &proj, &view);

    c.bench_function("quadtree_render_cull_513", |b| {
        let mut counter = DrawCounter::new();
        b.iter(|| {
            counter.reset();
            tree.render(black_box(&frustum), &mut counter)
        });
    });
}

criterion_group!(
    benches,
    bench_build_257,
    bench_build_513,
    bench_height_queries,
    bench_render_cull,
);
criterion_main!(benches);
