#![forbid(unsafe_code)]

//! Demo binary: runs the scripted orbit scene for a fixed number of frames
//! and reports what the signal subscribers observed.

mod cli;
mod scene;

use tracing_subscriber::EnvFilter;

fn main() {
    let opts = cli::Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = scene::DemoScene::build(opts.epsilon, opts.threshold);
    for frame in 0..opts.steps {
        scene.advance(frame);
    }

    let stats = scene.stats();
    println!("frames:         {}", scene.frame_id());
    println!("label:          {}", scene.label());
    println!("material:       {:?}", scene.material());
    println!("label updates:  {}", stats.label_updates);
    println!("contacts:       {}", stats.contacts);
    println!("approaches:     {}", stats.approaches);
}
