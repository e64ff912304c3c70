//! Models a synthetic gable roof end to end.
//!
//! Usage:
//! ```text
//! cargo run --example model_roof                                   # robust, default params
//! cargo run --example model_roof -- '{"algorithm": "least_squares"}'
//! RUST_LOG=roofplane=debug cargo run --example model_roof          # show fit details
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roofplane::{CloudPoint, ModelingConfig, RoofMetadata, RoofModeler};

/// 301 x 201 pixel image at 10 pixels per meter; the roof covers
/// world `[-4, 4] x [-3, 3]` with the ridge along `x = 0`.
const METADATA: &str = r#"{
    "vertices": [[110.0, 130.0], [150.0, 130.0], [190.0, 130.0],
                 [190.0, 70.0], [150.0, 70.0], [110.0, 70.0]],
    "edges": [[0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 0], [1, 4]],
    "faces": [[0, 1, 4, 5], [1, 2, 3, 4]],
    "ppm": 10.0
}"#;

const IMAGE_SHAPE: (usize, usize) = (201, 301);

fn synthetic_cloud(seed: u64) -> Vec<CloudPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cloud = Vec::new();
    for _ in 0..2000 {
        let x: f64 = rng.gen_range(-4.0..4.0);
        let y: f64 = rng.gen_range(-3.0..3.0);
        let z = 8.0 - 0.5 * x.abs() + rng.gen_range(-0.03..0.03);
        cloud.push(CloudPoint::new(x, y, z).with_color([180, 60, 40]));
    }
    // Overhanging tree canopy on the east face.
    for _ in 0..150 {
        let x = rng.gen_range(2.5..3.5);
        let y = rng.gen_range(-2.0..-1.0);
        let z = rng.gen_range(9.0..12.0);
        cloud.push(CloudPoint::new(x, y, z).with_color([30, 120, 30]));
    }
    cloud
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, INFO for roofplane.
    // Override with RUST_LOG env var (e.g. RUST_LOG=roofplane=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roofplane=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(json) => ModelingConfig::from_json_str(&json)?,
        None => ModelingConfig::default(),
    };

    let metadata = RoofMetadata::from_json_str(METADATA)?;
    let vertices = metadata.world_vertices(IMAGE_SHAPE);
    let cloud = synthetic_cloud(7);

    let results = RoofModeler::from_config(&config).execute(&cloud, &vertices, &metadata.faces);
    for (face, result) in results.iter().enumerate() {
        match result {
            Ok(plane) => println!("face {face}: {}", serde_json::to_string(plane)?),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}
