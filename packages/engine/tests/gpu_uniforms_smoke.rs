use arcfield_engine::gpu::shaders::UNIFORMS;
use arcfield_engine::gpu::UNIFORM_FLOATS;
use arcfield_engine::noise::seeded_random;
use arcfield_engine::spatial::grid::{SEED_A, SEED_B};
use arcfield_engine::{ArcField, BackdropConfig, GpuBackdrop};

#[test]
fn intro_completes_once_and_encodes_as_one_and_a_half() {
    let mut gpu = GpuBackdrop::from_config(BackdropConfig::default(), 1440.0, 900.0, 2.0);
    gpu.set_mode("intro");

    let mut flips = 0;
    let mut t = 0.0;
    while t < 8_000.0 {
        assert!(gpu.frame(t));
        if gpu.intro_just_completed() {
            flips += 1;
        }
        let u = gpu.uniform_array();
        assert_eq!(u.len(), UNIFORM_FLOATS);
        assert_eq!(u[3], if gpu.intro_complete() { 1.5 } else { 1.0 });
        t += 16.0;
    }
    assert_eq!(flips, 1);
    assert!(gpu.intro_complete());
}

#[test]
fn uniform_names_cover_the_flat_array() {
    let total: usize = UNIFORMS.iter().map(|&(_, n)| n).sum();
    assert_eq!(total, UNIFORM_FLOATS);
}

#[test]
fn pushed_region_rects_show_up_in_uniforms() {
    let mut gpu = GpuBackdrop::from_config(BackdropConfig::default(), 1024.0, 768.0, 1.0);
    gpu.set_mode("idle");
    gpu.set_region_rect(0, 0.0, 500.0, 1024.0, 400.0);
    assert!(gpu.frame(0.0));
    let u = gpu.uniform_array();
    assert_eq!(&u[8..12], &[0.0, 500.0, 1024.0, 400.0]);
    assert_eq!(&u[12..16], &[0.0; 4]);

    gpu.clear_region(0);
    gpu.frame(16.0);
    assert_eq!(&gpu.uniform_array()[8..12], &[0.0; 4]);
}

#[test]
fn hidden_backdrop_keeps_last_uniforms() {
    let mut gpu = GpuBackdrop::from_config(BackdropConfig::default(), 800.0, 600.0, 1.0);
    gpu.set_mode("blog");
    assert!(gpu.frame(0.0));
    assert!(gpu.frame(500.0));
    let before = gpu.uniform_array();
    gpu.set_visible(false, 500.0);
    assert!(!gpu.frame(5_000.0));
    assert_eq!(gpu.uniform_array(), before);
    gpu.set_visible(true, 5_000.0);
    assert!(gpu.frame(5_016.0));
    assert!((gpu.uniform_array()[0] - 0.516).abs() < 1e-4);
}

#[test]
fn instance_seeds_match_the_canvas_cells() {
    let config = BackdropConfig::default();
    let gpu = GpuBackdrop::from_config(config.clone(), 1200.0, 700.0, 1.0);
    let field = ArcField::from_config(config, 1200.0, 700.0, 1.0);

    let instances = gpu.core().instances();
    let grid = field.core().grid();
    assert_eq!(instances.len(), grid.count());

    for (i, cell) in grid.cells().enumerate() {
        assert_eq!(instances.seeds[2 * i], cell.seed_a as f32);
        assert_eq!(instances.seeds[2 * i + 1], cell.seed_b as f32);
        assert_eq!(instances.offsets[2 * i], cell.x as f32);
        assert_eq!(instances.offsets[2 * i + 1], cell.y as f32);
    }

    let (col, row) = instances.grid_position(5).unwrap();
    assert_eq!(instances.seeds[10], seeded_random(col as f64, row as f64, SEED_A) as f32);
    assert_eq!(instances.seeds[11], seeded_random(col as f64, row as f64, SEED_B) as f32);
}

#[test]
fn resize_bumps_the_instances_version() {
    let mut gpu = GpuBackdrop::from_config(BackdropConfig::default(), 800.0, 600.0, 1.0);
    let v = gpu.instances_version();
    assert!(gpu.resize(1920.0, 1080.0, 1.0));
    assert_ne!(gpu.instances_version(), v);
    assert_eq!(gpu.instance_count(), (gpu.cols() * gpu.rows()) as usize);
}
